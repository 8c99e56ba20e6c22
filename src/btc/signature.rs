//! ECDSA signature verification against a message hash

use bitcoin::secp256k1::{ecdsa, Message, Secp256k1};

use crate::btc::keys::parse_public_key;

/// Parse a DER signature, with or without a trailing sighash byte
pub fn parse_der_signature(sig_hex: &str) -> Option<ecdsa::Signature> {
    let bytes = hex::decode(sig_hex.trim()).ok()?;
    ecdsa::Signature::from_der(&bytes)
        .ok()
        .or_else(|| {
            bitcoin::ecdsa::Signature::from_slice(&bytes)
                .ok()
                .map(|s| s.signature)
        })
}

/// Check that `sig_hex` signs the 32-byte `msg_hash_hex` under `pubkey_hex`.
///
/// High-S signatures are normalized before verification. Returns `None`
/// when valid, otherwise the problem.
pub fn validate_signature(pubkey_hex: &str, msg_hash_hex: &str, sig_hex: &str) -> Option<String> {
    let pubkey = match parse_public_key(pubkey_hex) {
        Ok(pk) => pk,
        Err(_) => return Some("Invalid public key.".to_string()),
    };

    let digest: [u8; 32] = match hex::decode(msg_hash_hex.trim())
        .ok()
        .and_then(|b| b.try_into().ok())
    {
        Some(d) => d,
        None => return Some("Invalid message hash.".to_string()),
    };

    let Some(mut signature) = parse_der_signature(sig_hex) else {
        return Some("Invalid signature.".to_string());
    };
    signature.normalize_s();

    let secp = Secp256k1::verification_only();
    let msg = Message::from_digest(digest);
    match secp.verify_ecdsa(&msg, &signature, &pubkey.inner) {
        Ok(()) => None,
        Err(_) => Some("Signature does not match public key.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::secp256k1::{PublicKey, SecretKey};

    fn fixture() -> (String, String, String) {
        let secp = Secp256k1::new();
        let sk = SecretKey::from_slice(&[0x11; 32]).unwrap();
        let pk = PublicKey::from_secret_key(&secp, &sk);
        let digest = [0x42u8; 32];
        let sig = secp.sign_ecdsa(&Message::from_digest(digest), &sk);
        (
            hex::encode(pk.serialize()),
            hex::encode(digest),
            hex::encode(sig.serialize_der()),
        )
    }

    #[test]
    fn test_valid_signature() {
        let (pk, hash, sig) = fixture();
        assert_eq!(validate_signature(&pk, &hash, &sig), None);
        // Trailing SIGHASH_ALL byte is accepted
        assert_eq!(validate_signature(&pk, &hash, &format!("{}01", sig)), None);
    }

    #[test]
    fn test_wrong_message() {
        let (pk, _, sig) = fixture();
        let other = hex::encode([0x43u8; 32]);
        assert_eq!(
            validate_signature(&pk, &other, &sig).as_deref(),
            Some("Signature does not match public key.")
        );
    }

    #[test]
    fn test_malformed_inputs() {
        let (pk, hash, sig) = fixture();
        assert_eq!(
            validate_signature("02abcd", &hash, &sig).as_deref(),
            Some("Invalid public key.")
        );
        assert_eq!(
            validate_signature(&pk, "abcd", &sig).as_deref(),
            Some("Invalid message hash.")
        );
        assert_eq!(
            validate_signature(&pk, &hash, "3000").as_deref(),
            Some("Invalid signature.")
        );
    }
}
