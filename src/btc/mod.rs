//! Bitcoin guide operations
//!
//! - **address**: address decoding and network checks
//! - **keys**: public keys, BIP32 paths, child key derivation
//! - **units**: BTC and satoshi conversion
//! - **fees**: fee validation and multisig size estimates
//! - **multisig**: `m`-of-`n` address generation
//! - **signature**: ECDSA signature verification

pub mod address;
pub mod fees;
pub mod keys;
pub mod multisig;
pub mod signature;
pub mod units;

pub use address::{parse_address, validate_address};
pub use fees::{
    estimate_multisig_transaction_fee, validate_fee, validate_fee_rate, FeeEstimate,
    MultisigFeeParams,
};
pub use keys::{derive_child_public_key, validate_bip32_path, validate_public_key, PathMode};
pub use multisig::{generate_multisig_from_public_keys, Multisig, MultisigAddressType};
pub use signature::validate_signature;
pub use units::{bitcoins_to_satoshis, format_btc, satoshis_to_bitcoins};
