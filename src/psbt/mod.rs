//! PSBT guide operations
//!
//! PSBTs travel as base64 text (standard alphabet). New PSBTs are written in
//! the BIP 370 (version 2) format; both version 0 and version 2 PSBTs are
//! read. Every operation decodes, works on a [`VersionedPsbt`], and
//! re-encodes in the version it was given.

pub mod details;

pub use details::{inspect_psbt, InputDetails, OutputDetails, PsbtDetails};

use std::collections::BTreeMap;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine};
use bitcoin::psbt::Psbt;
use bitcoin::{ecdsa, Amount, OutPoint, PublicKey, TxOut, Txid};
use psbt_v2::v2::{
    Constructor, Creator, InputBuilder, InputsOnlyModifiable, OutputBuilder,
    OutputsOnlyModifiable, Psbt as PsbtV2,
};

use crate::btc::address::parse_address;
use crate::btc::keys::parse_public_key;
use crate::btc::signature::parse_der_signature;
use crate::error::{GuideError, Result};
use crate::network::NetworkSelection;

/// A decoded PSBT, kept in the serialization version it arrived in
#[derive(Debug, Clone)]
pub enum VersionedPsbt {
    /// BIP 174, global unsigned transaction
    V0(Psbt),
    /// BIP 370, per-input and per-output transaction fields
    V2(PsbtV2),
}

impl VersionedPsbt {
    /// PSBT_GLOBAL_VERSION
    pub fn version(&self) -> u32 {
        match self {
            Self::V0(psbt) => psbt.version,
            Self::V2(_) => 2,
        }
    }

    pub fn input_count(&self) -> usize {
        match self {
            Self::V0(psbt) => psbt.inputs.len(),
            Self::V2(psbt) => psbt.inputs.len(),
        }
    }

    pub fn output_count(&self) -> usize {
        match self {
            Self::V0(psbt) => psbt.outputs.len(),
            Self::V2(psbt) => psbt.outputs.len(),
        }
    }

    /// Partial signatures recorded on input `index`
    pub fn partial_sigs(&self, index: usize) -> Option<&BTreeMap<PublicKey, ecdsa::Signature>> {
        match self {
            Self::V0(psbt) => psbt.inputs.get(index).map(|input| &input.partial_sigs),
            Self::V2(psbt) => psbt.inputs.get(index).map(|input| &input.partial_sigs),
        }
    }

    fn partial_sigs_mut(
        &mut self,
        index: usize,
    ) -> Option<&mut BTreeMap<PublicKey, ecdsa::Signature>> {
        match self {
            Self::V0(psbt) => psbt.inputs.get_mut(index).map(|input| &mut input.partial_sigs),
            Self::V2(psbt) => psbt.inputs.get_mut(index).map(|input| &mut input.partial_sigs),
        }
    }

    pub fn serialize(&self) -> Vec<u8> {
        match self {
            Self::V0(psbt) => psbt.serialize(),
            Self::V2(psbt) => psbt.serialize(),
        }
    }
}

/// Decode a base64 PSBT of either version
pub fn decode_psbt(psbt_base64: &str) -> Result<VersionedPsbt> {
    let psbt_base64 = psbt_base64.trim();
    if psbt_base64.is_empty() {
        return Err(GuideError::MissingInput("PSBT"));
    }
    let bytes = STANDARD
        .decode(psbt_base64)
        .map_err(|e| GuideError::InvalidPsbt(format!("invalid base64: {}", e)))?;

    match PsbtV2::deserialize(&bytes) {
        Ok(psbt) => Ok(VersionedPsbt::V2(psbt)),
        Err(v2_err) => match Psbt::deserialize(&bytes) {
            Ok(psbt) => Ok(VersionedPsbt::V0(psbt)),
            Err(v0_err) => {
                tracing::debug!(%v2_err, %v0_err, "psbt decode failed");
                Err(GuideError::InvalidPsbt(v0_err.to_string()))
            }
        },
    }
}

/// Encode a PSBT as base64
pub fn encode_psbt(psbt: &VersionedPsbt) -> String {
    STANDARD.encode(psbt.serialize())
}

fn construct_error(e: impl std::fmt::Display) -> GuideError {
    GuideError::InvalidPsbt(e.to_string())
}

/// Create a one-input, one-output version 2 PSBT and return it as base64.
///
/// The input spends `txid:vout`; the output pays `amount_sats` to `address`,
/// which must belong to `network`.
pub fn create_psbt(
    txid: &str,
    vout: u32,
    address: &str,
    amount_sats: u64,
    network: NetworkSelection,
) -> Result<String> {
    let txid = txid.trim();
    if txid.is_empty() {
        return Err(GuideError::MissingInput("transaction id"));
    }
    let txid = Txid::from_str(txid).map_err(|e| GuideError::InvalidTxid(e.to_string()))?;
    let address = parse_address(address, network)?;
    let amount = Amount::from_sat(amount_sats);
    if amount > Amount::MAX_MONEY {
        return Err(GuideError::InvalidAmount(format!(
            "{} sats exceeds the 21000000 BTC supply",
            amount_sats
        )));
    }

    let outpoint = OutPoint { txid, vout };
    let output = TxOut {
        value: amount,
        script_pubkey: address.script_pubkey(),
    };

    let created = Creator::new()
        .inputs_modifiable()
        .outputs_modifiable()
        .psbt();
    let with_input = Constructor::<InputsOnlyModifiable>::new(created)
        .map_err(construct_error)?
        .input(InputBuilder::new(&outpoint).build())
        .no_more_inputs()
        .psbt()
        .map_err(construct_error)?;
    let psbt = Constructor::<OutputsOnlyModifiable>::new(with_input)
        .map_err(construct_error)?
        .output(OutputBuilder::new(output).build())
        .no_more_outputs()
        .psbt()
        .map_err(construct_error)?;

    tracing::debug!(%txid, vout, amount_sats, "created psbt");
    Ok(encode_psbt(&VersionedPsbt::V2(psbt)))
}

/// Record `signature_hex` from `pubkey_hex` as a partial signature on input
/// `input_index`, returning the updated PSBT as base64.
///
/// The signature is DER, optionally followed by its sighash byte. Without
/// one, SIGHASH_ALL is assumed.
pub fn add_partial_sig(
    psbt_base64: &str,
    input_index: usize,
    pubkey_hex: &str,
    signature_hex: &str,
) -> Result<String> {
    let mut psbt = decode_psbt(psbt_base64)?;

    let count = psbt.input_count();
    let Some(partial_sigs) = psbt.partial_sigs_mut(input_index) else {
        return Err(GuideError::InputOutOfRange {
            index: input_index,
            count,
        });
    };

    let pubkey = parse_public_key(pubkey_hex)?;
    let signature = parse_psbt_signature(signature_hex)?;

    partial_sigs.insert(pubkey, signature);

    tracing::debug!(input_index, %pubkey, "added partial signature");
    Ok(encode_psbt(&psbt))
}

fn parse_psbt_signature(signature_hex: &str) -> Result<bitcoin::ecdsa::Signature> {
    let signature_hex = signature_hex.trim();
    if signature_hex.is_empty() {
        return Err(GuideError::MissingInput("signature"));
    }
    let bytes =
        hex::decode(signature_hex).map_err(|e| GuideError::InvalidSignature(e.to_string()))?;
    if let Ok(sig) = bitcoin::ecdsa::Signature::from_slice(&bytes) {
        return Ok(sig);
    }
    parse_der_signature(signature_hex)
        .map(bitcoin::ecdsa::Signature::sighash_all)
        .ok_or_else(|| GuideError::InvalidSignature("not a DER signature".to_string()))
}
