//! Multisig address generation from a public-key set and signer threshold

use std::str::FromStr;

use bitcoin::opcodes::all::OP_CHECKMULTISIG;
use bitcoin::script::Builder;
use bitcoin::{Address, PublicKey, ScriptBuf};
use serde::Serialize;

use crate::btc::keys::parse_public_key;
use crate::error::{GuideError, Result};
use crate::network::NetworkSelection;

/// Largest key set that fits a 520-byte P2SH redeem script
pub const MAX_P2SH_SIGNERS: usize = 15;
/// OP_CHECKMULTISIG limit that applies to witness scripts
pub const MAX_SEGWIT_SIGNERS: usize = 20;

/// Script type wrapping the `m`-of-`n` multisig script
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum MultisigAddressType {
    P2sh,
    P2shP2wsh,
    #[default]
    P2wsh,
}

impl MultisigAddressType {
    pub fn all() -> &'static [MultisigAddressType] {
        &[Self::P2sh, Self::P2shP2wsh, Self::P2wsh]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::P2sh => "P2SH",
            Self::P2shP2wsh => "P2SH-P2WSH",
            Self::P2wsh => "P2WSH",
        }
    }

    pub fn is_segwit(&self) -> bool {
        !matches!(self, Self::P2sh)
    }

    pub fn max_signers(&self) -> usize {
        if self.is_segwit() {
            MAX_SEGWIT_SIGNERS
        } else {
            MAX_P2SH_SIGNERS
        }
    }
}

impl std::fmt::Display for MultisigAddressType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MultisigAddressType {
    type Err = GuideError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('_', "-").as_str() {
            "P2SH" => Ok(Self::P2sh),
            "P2SH-P2WSH" => Ok(Self::P2shP2wsh),
            "P2WSH" => Ok(Self::P2wsh),
            _ => Err(GuideError::UnknownAddressType(s.trim().to_string())),
        }
    }
}

/// Generated multisig wallet address and its scripts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Multisig {
    pub address: String,
    pub address_type: String,
    pub network: String,
    pub required_signers: usize,
    pub total_signers: usize,
    pub public_keys: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redeem_script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub witness_script: Option<String>,
}

/// Check threshold and key count for `address_type`
pub fn check_multisig_params(
    address_type: MultisigAddressType,
    required_signers: usize,
    total_signers: usize,
) -> Result<()> {
    if total_signers == 0 {
        return Err(GuideError::InvalidMultisig(
            "at least one public key is required".to_string(),
        ));
    }
    if required_signers == 0 || required_signers > total_signers {
        return Err(GuideError::InvalidMultisig(format!(
            "required signers must be between 1 and {} (got {})",
            total_signers, required_signers
        )));
    }
    if total_signers > address_type.max_signers() {
        return Err(GuideError::InvalidMultisig(format!(
            "{} supports at most {} signers (got {})",
            address_type,
            address_type.max_signers(),
            total_signers
        )));
    }
    Ok(())
}

/// Build `OP_m <keys> OP_n OP_CHECKMULTISIG` with keys in the given order
pub fn multisig_script(required_signers: usize, public_keys: &[PublicKey]) -> ScriptBuf {
    let mut builder = Builder::new().push_int(required_signers as i64);
    for key in public_keys {
        builder = builder.push_key(key);
    }
    builder
        .push_int(public_keys.len() as i64)
        .push_opcode(OP_CHECKMULTISIG)
        .into_script()
}

/// Generate an `m`-of-`n` multisig address from hex public keys.
pub fn generate_multisig_from_public_keys(
    network: NetworkSelection,
    address_type: MultisigAddressType,
    required_signers: usize,
    public_keys: &[&str],
) -> Result<Multisig> {
    check_multisig_params(address_type, required_signers, public_keys.len())?;

    let keys = public_keys
        .iter()
        .map(|k| parse_public_key(k))
        .collect::<Result<Vec<_>>>()?;

    if address_type.is_segwit() {
        if let Some(position) = keys.iter().position(|k| !k.compressed) {
            return Err(GuideError::InvalidMultisig(format!(
                "public key {} is uncompressed; {} requires compressed keys",
                position + 1,
                address_type
            )));
        }
    }

    let script = multisig_script(required_signers, &keys);
    let btc_network = network.to_bitcoin_network();

    let script_hex = hex::encode(script.as_bytes());

    let (address, redeem_script, witness_script) = match address_type {
        MultisigAddressType::P2sh => {
            let address = Address::p2sh(&script, btc_network)
                .map_err(|e| GuideError::InvalidMultisig(e.to_string()))?;
            (address, Some(script_hex), None)
        }
        MultisigAddressType::P2shP2wsh => {
            // Nested segwit spends reveal the witness program as the redeem script
            let program = Address::p2wsh(&script, btc_network).script_pubkey();
            let address = Address::p2shwsh(&script, btc_network);
            (address, Some(hex::encode(program.as_bytes())), Some(script_hex))
        }
        MultisigAddressType::P2wsh => {
            let address = Address::p2wsh(&script, btc_network);
            (address, None, Some(script_hex))
        }
    };

    Ok(Multisig {
        address: address.to_string(),
        address_type: address_type.label().to_string(),
        network: network.display_name().to_string(),
        required_signers,
        total_signers: keys.len(),
        public_keys: keys.iter().map(|k| k.to_string()).collect(),
        redeem_script,
        witness_script,
    })
}
