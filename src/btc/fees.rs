//! Fee-rate and fee validation, multisig transaction size estimates
//!
//! Sizes are computed in weight units and rounded up to virtual bytes.
//! Signatures are counted at their 72-byte worst case (plus sighash byte),
//! so estimates err slightly high.

use serde::Serialize;

use crate::btc::multisig::{check_multisig_params, MultisigAddressType};
use crate::error::{GuideError, Result};

/// Highest fee rate (sat/vB) considered sane
pub const MAX_FEE_RATE: f64 = 1000.0;
/// Highest absolute fee (sats) considered sane
pub const MAX_FEE_SATS: f64 = 2_500_000.0;

const WITNESS_SCALE_FACTOR: u64 = 4;
// DER signature worst case plus sighash byte
const SIGNATURE_LEN: u64 = 73;

// ============================================================================
// Validation
// ============================================================================

fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Check a fee rate in sat/vB. Returns `None` when valid.
pub fn validate_fee_rate(fee_rate: &str) -> Option<String> {
    let Some(rate) = parse_decimal(fee_rate) else {
        return Some("Invalid fee rate.".to_string());
    };
    if rate < 0.0 {
        return Some("Fee rate cannot be negative.".to_string());
    }
    if rate > MAX_FEE_RATE {
        return Some("Fee rate is too high.".to_string());
    }
    None
}

/// Check an absolute fee in sats against the total input amount.
pub fn validate_fee(fee_sats: &str, input_total_sats: &str) -> Option<String> {
    let Some(fee) = parse_decimal(fee_sats) else {
        return Some("Invalid fee.".to_string());
    };
    let Some(total) = parse_decimal(input_total_sats) else {
        return Some("Invalid total input amount.".to_string());
    };
    if fee < 0.0 {
        return Some("Fee cannot be negative.".to_string());
    }
    if fee > total || fee > MAX_FEE_SATS {
        return Some("Fee is too high.".to_string());
    }
    None
}

// ============================================================================
// Size Estimation
// ============================================================================

/// Shape of a multisig spend to size
#[derive(Clone, Copy, Debug)]
pub struct MultisigFeeParams {
    pub address_type: MultisigAddressType,
    pub num_inputs: usize,
    pub num_outputs: usize,
    pub required_signers: usize,
    pub total_signers: usize,
    pub fee_rate: f64,
}

/// Result of [`estimate_multisig_transaction_fee`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeEstimate {
    pub address_type: String,
    pub vsize: u64,
    pub fee_rate: f64,
    pub fee_sats: u64,
}

fn compact_size_len(n: u64) -> u64 {
    match n {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x1_0000..=0xffff_ffff => 5,
        _ => 9,
    }
}

fn push_prefix_len(len: u64) -> u64 {
    match len {
        0..=75 => 1,
        76..=0xff => 2,
        _ => 3,
    }
}

fn multisig_script_len(total_signers: u64) -> u64 {
    // OP_m, n * (push + 33-byte key), OP_n, OP_CHECKMULTISIG
    3 + 34 * total_signers
}

/// Non-witness and witness bytes spent by one multisig input
fn input_size(address_type: MultisigAddressType, m: u64, n: u64) -> (u64, u64) {
    let script_len = multisig_script_len(n);
    // outpoint + sequence
    let fixed = 36 + 4;

    match address_type {
        MultisigAddressType::P2sh => {
            let script_sig = 1 + m * SIGNATURE_LEN + push_prefix_len(script_len) + script_len;
            (fixed + compact_size_len(script_sig) + script_sig, 0)
        }
        MultisigAddressType::P2shP2wsh | MultisigAddressType::P2wsh => {
            let script_sig = if address_type == MultisigAddressType::P2shP2wsh {
                35
            } else {
                0
            };
            // empty dummy element, signatures, witness script
            let witness = compact_size_len(m + 2)
                + 1
                + m * SIGNATURE_LEN
                + compact_size_len(script_len)
                + script_len;
            (fixed + 1 + script_sig, witness)
        }
    }
}

fn output_size(address_type: MultisigAddressType) -> u64 {
    // value + script length + script_pubkey
    match address_type {
        MultisigAddressType::P2wsh => 8 + 1 + 34,
        _ => 8 + 1 + 23,
    }
}

/// Estimated virtual size of a multisig spend paying to the same script type
pub fn estimate_multisig_transaction_vsize(params: &MultisigFeeParams) -> Result<u64> {
    check_multisig_params(
        params.address_type,
        params.required_signers,
        params.total_signers,
    )?;
    if params.num_inputs == 0 {
        return Err(GuideError::InvalidMultisig(
            "at least one input is required".to_string(),
        ));
    }
    if params.num_outputs == 0 {
        return Err(GuideError::InvalidMultisig(
            "at least one output is required".to_string(),
        ));
    }

    let inputs = params.num_inputs as u64;
    let outputs = params.num_outputs as u64;
    let (input_base, input_witness) = input_size(
        params.address_type,
        params.required_signers as u64,
        params.total_signers as u64,
    );

    let too_large = || {
        GuideError::InvalidMultisig(format!(
            "transaction with {} inputs and {} outputs is too large",
            params.num_inputs, params.num_outputs
        ))
    };

    // version + locktime
    let base = inputs
        .checked_mul(input_base)
        .and_then(|v| v.checked_add(outputs.checked_mul(output_size(params.address_type))?))
        .and_then(|v| v.checked_add(8 + compact_size_len(inputs) + compact_size_len(outputs)))
        .ok_or_else(too_large)?;

    let mut weight = base
        .checked_mul(WITNESS_SCALE_FACTOR)
        .ok_or_else(too_large)?;
    if params.address_type.is_segwit() {
        // marker and flag
        weight = inputs
            .checked_mul(input_witness)
            .and_then(|v| v.checked_add(2))
            .and_then(|v| v.checked_add(weight))
            .ok_or_else(too_large)?;
    }

    Ok(weight.div_ceil(WITNESS_SCALE_FACTOR))
}

/// Estimate the fee of a multisig spend at `fee_rate` sat/vB.
pub fn estimate_multisig_transaction_fee(params: &MultisigFeeParams) -> Result<FeeEstimate> {
    if !params.fee_rate.is_finite() || params.fee_rate < 0.0 {
        return Err(GuideError::InvalidFeeRate(params.fee_rate.to_string()));
    }
    if params.fee_rate > MAX_FEE_RATE {
        return Err(GuideError::InvalidFeeRate(format!(
            "{} exceeds {} sat/vB",
            params.fee_rate, MAX_FEE_RATE
        )));
    }

    let vsize = estimate_multisig_transaction_vsize(params)?;
    let fee_sats = (vsize as f64 * params.fee_rate).ceil() as u64;

    tracing::debug!(vsize, fee_sats, address_type = %params.address_type, "estimated fee");

    Ok(FeeEstimate {
        address_type: params.address_type.label().to_string(),
        vsize,
        fee_rate: params.fee_rate,
        fee_sats,
    })
}
