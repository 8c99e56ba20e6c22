//! Errors raised by guide operations
//!
//! Validation helpers never fail: they return a problem description instead.
//! Everything that derives, generates, estimates or rewrites a PSBT returns
//! [`GuideError`], which the console renders as `Error: <message>`.

use thiserror::Error;

/// Failure of a single guide operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuideError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid extended public key: {0}")]
    InvalidExtendedKey(String),

    #[error("Extended public key is for {key_network}, but {selected} is selected")]
    NetworkMismatch {
        key_network: &'static str,
        selected: &'static str,
    },

    #[error("Unknown network '{0}' (use mainnet or testnet)")]
    UnknownNetwork(String),

    #[error("Invalid BIP32 path: {0}")]
    InvalidPath(String),

    #[error("Key derivation failed: {0}")]
    Derivation(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Unknown address type '{0}' (use P2SH, P2SH-P2WSH or P2WSH)")]
    UnknownAddressType(String),

    #[error("Invalid multisig parameters: {0}")]
    InvalidMultisig(String),

    #[error("Invalid fee rate: {0}")]
    InvalidFeeRate(String),

    #[error("Invalid transaction id: {0}")]
    InvalidTxid(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid PSBT: {0}")]
    InvalidPsbt(String),

    #[error("Input index {index} out of range (PSBT has {count} inputs)")]
    InputOutOfRange { index: usize, count: usize },

    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    #[error("JSON encoding failed: {0}")]
    Json(String),
}

impl From<serde_json::Error> for GuideError {
    fn from(e: serde_json::Error) -> Self {
        GuideError::Json(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GuideError>;
