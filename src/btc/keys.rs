//! Public keys, BIP32 paths and extended key derivation
//!
//! Derivation only ever touches public data: an extended public key can
//! derive unhardened children, so any hardened segment in the requested
//! path is rejected before the library is called.
//!
//! ## Usage
//!
//! ```ignore
//! let child = derive_child_public_key(tpub, "m/0/0", NetworkSelection::Testnet)?;
//! assert_eq!(child.len(), 66);
//! ```

use std::str::FromStr;

use bitcoin::bip32::{ChildNumber, DerivationPath, Xpub};
use bitcoin::secp256k1::Secp256k1;
use bitcoin::{NetworkKind, PublicKey};

use crate::error::{GuideError, Result};
use crate::network::NetworkSelection;

// ============================================================================
// Public Keys
// ============================================================================

/// Check that `pubkey_hex` is a valid SEC-encoded public key.
///
/// Returns `None` when valid, otherwise the problem.
pub fn validate_public_key(pubkey_hex: &str) -> Option<String> {
    let pubkey_hex = pubkey_hex.trim();
    if pubkey_hex.is_empty() {
        return Some("Public key cannot be blank.".to_string());
    }

    let bytes = match hex::decode(pubkey_hex) {
        Ok(b) => b,
        Err(e) => return Some(format!("Invalid hex: {}", e)),
    };

    match PublicKey::from_slice(&bytes) {
        Ok(_) => None,
        Err(_) => Some("Invalid public key.".to_string()),
    }
}

/// Parse a hex public key, failing with the validation problem
pub fn parse_public_key(pubkey_hex: &str) -> Result<PublicKey> {
    if let Some(problem) = validate_public_key(pubkey_hex) {
        return Err(GuideError::InvalidPublicKey(problem));
    }
    let bytes = hex::decode(pubkey_hex.trim())
        .map_err(|e| GuideError::InvalidPublicKey(e.to_string()))?;
    PublicKey::from_slice(&bytes).map_err(|e| GuideError::InvalidPublicKey(e.to_string()))
}

// ============================================================================
// BIP32 Paths
// ============================================================================

/// Which segments a BIP32 path may contain
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum PathMode {
    #[default]
    Any,
    Hardened,
    Unhardened,
}

impl FromStr for PathMode {
    type Err = GuideError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "any" => Ok(Self::Any),
            "hardened" => Ok(Self::Hardened),
            "unhardened" => Ok(Self::Unhardened),
            other => Err(GuideError::InvalidPath(format!(
                "unknown mode '{}' (use any, hardened or unhardened)",
                other
            ))),
        }
    }
}

/// Check a slash-separated BIP32 path such as `m/48'/1'/0'/2'`.
///
/// Returns `None` when the path is valid for `mode`, otherwise the problem.
pub fn validate_bip32_path(path: &str, mode: PathMode) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return Some("BIP32 path cannot be blank.".to_string());
    }
    if path != "m" && !path.starts_with("m/") {
        return Some("BIP32 path must begin with 'm'.".to_string());
    }

    let parsed = match DerivationPath::from_str(path) {
        Ok(p) => p,
        Err(_) => return Some("BIP32 path is invalid.".to_string()),
    };

    let children: &[ChildNumber] = parsed.as_ref();
    match mode {
        PathMode::Any => None,
        PathMode::Hardened if children.iter().any(|c| c.is_normal()) => {
            Some("BIP32 path must be fully-hardened.".to_string())
        }
        PathMode::Unhardened if children.iter().any(|c| c.is_hardened()) => {
            Some("BIP32 path cannot include hardened segments.".to_string())
        }
        _ => None,
    }
}

// ============================================================================
// Extended Key Derivation
// ============================================================================

/// Derive the child public key of `xpub` at `path`.
///
/// The extended key's version bytes must match `network` (tpub for testnet,
/// xpub for mainnet). Returns the compressed public key as hex.
pub fn derive_child_public_key(
    xpub: &str,
    path: &str,
    network: NetworkSelection,
) -> Result<String> {
    let xpub = xpub.trim();
    if xpub.is_empty() {
        return Err(GuideError::MissingInput("extended public key"));
    }

    let parent =
        Xpub::from_str(xpub).map_err(|e| GuideError::InvalidExtendedKey(e.to_string()))?;

    let key_is_mainnet = parent.network == NetworkKind::Main;
    if key_is_mainnet != network.is_mainnet() {
        let key_network = if key_is_mainnet {
            NetworkSelection::Mainnet
        } else {
            NetworkSelection::Testnet
        };
        return Err(GuideError::NetworkMismatch {
            key_network: key_network.display_name(),
            selected: network.display_name(),
        });
    }

    if let Some(problem) = validate_bip32_path(path, PathMode::Unhardened) {
        return Err(GuideError::InvalidPath(problem));
    }
    let path = DerivationPath::from_str(path.trim())
        .map_err(|e| GuideError::InvalidPath(e.to_string()))?;

    let secp = Secp256k1::verification_only();
    let child = parent
        .derive_pub(&secp, &path)
        .map_err(|e| GuideError::Derivation(e.to_string()))?;

    Ok(child.public_key.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::bip32::Xpriv;
    use bitcoin::Network;

    const GENERATOR: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    fn master_xpub(network: Network) -> String {
        let secp = Secp256k1::new();
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let xpriv = Xpriv::new_master(network, &seed).unwrap();
        Xpub::from_priv(&secp, &xpriv).to_string()
    }

    #[test]
    fn test_validate_public_key() {
        assert_eq!(validate_public_key(GENERATOR), None);
        assert_eq!(
            validate_public_key("").as_deref(),
            Some("Public key cannot be blank.")
        );
        assert!(validate_public_key("zz").unwrap().starts_with("Invalid hex: "));
        assert_eq!(
            validate_public_key("02deadbeef").as_deref(),
            Some("Invalid public key.")
        );
    }

    #[test]
    fn test_validate_bip32_path_modes() {
        assert_eq!(validate_bip32_path("m/44'/0'/0'/0/0", PathMode::Any), None);
        assert_eq!(validate_bip32_path("m", PathMode::Any), None);
        assert_eq!(validate_bip32_path("m/48'/1'/0'/2'", PathMode::Hardened), None);
        assert_eq!(validate_bip32_path("m/0/1", PathMode::Unhardened), None);
        assert_eq!(
            validate_bip32_path("m/48'/1'/0", PathMode::Hardened).as_deref(),
            Some("BIP32 path must be fully-hardened.")
        );
        assert_eq!(
            validate_bip32_path("m/0'/1", PathMode::Unhardened).as_deref(),
            Some("BIP32 path cannot include hardened segments.")
        );
    }

    #[test]
    fn test_validate_bip32_path_problems() {
        assert_eq!(
            validate_bip32_path(" ", PathMode::Any).as_deref(),
            Some("BIP32 path cannot be blank.")
        );
        assert_eq!(
            validate_bip32_path("44'/0'", PathMode::Any).as_deref(),
            Some("BIP32 path must begin with 'm'.")
        );
        assert_eq!(
            validate_bip32_path("m/abc", PathMode::Any).as_deref(),
            Some("BIP32 path is invalid.")
        );
        assert_eq!(
            validate_bip32_path("m/2147483648", PathMode::Any).as_deref(),
            Some("BIP32 path is invalid.")
        );
    }

    #[test]
    fn test_path_mode_parse() {
        assert_eq!("".parse::<PathMode>().unwrap(), PathMode::Any);
        assert_eq!("Hardened".parse::<PathMode>().unwrap(), PathMode::Hardened);
        assert!("sideways".parse::<PathMode>().is_err());
    }

    #[test]
    fn test_derive_child_is_deterministic() {
        let tpub = master_xpub(Network::Testnet);
        assert!(tpub.starts_with("tpub"));

        let first = derive_child_public_key(&tpub, "m/0/0", NetworkSelection::Testnet).unwrap();
        let second = derive_child_public_key(&tpub, "m/0/0", NetworkSelection::Testnet).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 66);
        assert_eq!(validate_public_key(&first), None);

        let other = derive_child_public_key(&tpub, "m/0/1", NetworkSelection::Testnet).unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn test_derive_child_matches_library() {
        let tpub = master_xpub(Network::Testnet);
        let parent = Xpub::from_str(&tpub).unwrap();
        let secp = Secp256k1::verification_only();
        let expected = parent
            .derive_pub(&secp, &DerivationPath::from_str("m/0/0").unwrap())
            .unwrap()
            .public_key
            .to_string();

        assert_eq!(
            derive_child_public_key(&tpub, "m/0/0", NetworkSelection::Testnet).unwrap(),
            expected
        );
    }

    #[test]
    fn test_derive_child_rejects_wrong_network() {
        let xpub = master_xpub(Network::Bitcoin);
        let err = derive_child_public_key(&xpub, "m/0/0", NetworkSelection::Testnet).unwrap_err();
        assert_eq!(
            err,
            GuideError::NetworkMismatch {
                key_network: "Mainnet",
                selected: "Testnet",
            }
        );
        assert!(derive_child_public_key(&xpub, "m/0/0", NetworkSelection::Mainnet).is_ok());
    }

    #[test]
    fn test_derive_child_rejects_hardened_and_garbage() {
        let tpub = master_xpub(Network::Testnet);
        assert!(matches!(
            derive_child_public_key(&tpub, "m/44'/0", NetworkSelection::Testnet),
            Err(GuideError::InvalidPath(_))
        ));
        assert!(matches!(
            derive_child_public_key("tpubgarbage", "m/0/0", NetworkSelection::Testnet),
            Err(GuideError::InvalidExtendedKey(_))
        ));
        assert_eq!(
            derive_child_public_key("", "m/0/0", NetworkSelection::Testnet),
            Err(GuideError::MissingInput("extended public key"))
        );
    }
}
