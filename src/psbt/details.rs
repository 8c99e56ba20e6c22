//! Human-readable PSBT breakdown

use std::collections::BTreeMap;

use bitcoin::psbt::{Input, Psbt};
use bitcoin::{Address, Amount, ScriptBuf, Sequence, TxIn};
use psbt_v2::v2;
use serde::Serialize;

use crate::btc::units::format_btc;
use crate::error::Result;
use crate::network::NetworkSelection;
use crate::psbt::{decode_psbt, VersionedPsbt};

/// Global fields plus one entry per input and output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PsbtDetails {
    pub version: u32,
    pub tx_version: i32,
    pub input_count: usize,
    pub output_count: usize,
    pub locktime: u32,
    pub inputs: Vec<InputDetails>,
    pub outputs: Vec<OutputDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDetails {
    pub txid: String,
    pub vout: u32,
    pub sequence: u32,
    pub witness_utxo: Option<UtxoDetails>,
    /// Txid of the full previous transaction
    pub non_witness_utxo: Option<String>,
    /// Public key hex to signature hex
    pub partial_sigs: BTreeMap<String, String>,
    pub sighash_type: Option<String>,
    pub redeem_script: Option<String>,
    pub witness_script: Option<String>,
    pub bip32_derivation: BTreeMap<String, KeySource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UtxoDetails {
    pub amount: String,
    pub script: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeySource {
    pub fingerprint: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputDetails {
    /// BTC, trailing zeros trimmed
    pub amount: String,
    pub script: String,
    /// Set when the script encodes a standard address on the selected network
    pub address: Option<String>,
}

fn input_details(txin: &TxIn, input: &Input) -> InputDetails {
    InputDetails {
        txid: txin.previous_output.txid.to_string(),
        vout: txin.previous_output.vout,
        sequence: txin.sequence.0,
        witness_utxo: input.witness_utxo.as_ref().map(|utxo| UtxoDetails {
            amount: format_btc(utxo.value),
            script: hex::encode(utxo.script_pubkey.as_bytes()),
        }),
        non_witness_utxo: input
            .non_witness_utxo
            .as_ref()
            .map(|tx| tx.compute_txid().to_string()),
        partial_sigs: input
            .partial_sigs
            .iter()
            .map(|(pk, sig)| (pk.to_string(), sig.to_string()))
            .collect(),
        sighash_type: input.sighash_type.map(|t| t.to_string()),
        redeem_script: input
            .redeem_script
            .as_ref()
            .map(|s| hex::encode(s.as_bytes())),
        witness_script: input
            .witness_script
            .as_ref()
            .map(|s| hex::encode(s.as_bytes())),
        bip32_derivation: input
            .bip32_derivation
            .iter()
            .map(|(pk, (fingerprint, path))| {
                (
                    hex::encode(pk.serialize()),
                    KeySource {
                        fingerprint: fingerprint.to_string(),
                        path: path.to_string(),
                    },
                )
            })
            .collect(),
    }
}

fn v2_input_details(input: &v2::Input) -> InputDetails {
    InputDetails {
        txid: input.previous_txid.to_string(),
        vout: input.spent_output_index,
        // BIP 370: an absent sequence means final
        sequence: input.sequence.unwrap_or(Sequence::MAX).0,
        witness_utxo: input.witness_utxo.as_ref().map(|utxo| UtxoDetails {
            amount: format_btc(utxo.value),
            script: hex::encode(utxo.script_pubkey.as_bytes()),
        }),
        non_witness_utxo: input
            .non_witness_utxo
            .as_ref()
            .map(|tx| tx.compute_txid().to_string()),
        partial_sigs: input
            .partial_sigs
            .iter()
            .map(|(pk, sig)| (pk.to_string(), sig.to_string()))
            .collect(),
        sighash_type: input.sighash_type.map(|t| t.to_string()),
        redeem_script: input
            .redeem_script
            .as_ref()
            .map(|s| hex::encode(s.as_bytes())),
        witness_script: input
            .witness_script
            .as_ref()
            .map(|s| hex::encode(s.as_bytes())),
        bip32_derivation: input
            .bip32_derivations
            .iter()
            .map(|(pk, (fingerprint, path))| {
                (
                    hex::encode(pk.serialize()),
                    KeySource {
                        fingerprint: fingerprint.to_string(),
                        path: path.to_string(),
                    },
                )
            })
            .collect(),
    }
}

fn output_details(amount: Amount, script: &ScriptBuf, network: NetworkSelection) -> OutputDetails {
    OutputDetails {
        amount: format_btc(amount),
        script: hex::encode(script.as_bytes()),
        address: Address::from_script(script, network.to_bitcoin_network())
            .ok()
            .map(|a| a.to_string()),
    }
}

/// Summarize a version 0 PSBT's fields
pub fn psbt_details(psbt: &Psbt, network: NetworkSelection) -> PsbtDetails {
    let tx = &psbt.unsigned_tx;
    PsbtDetails {
        version: psbt.version,
        tx_version: tx.version.0,
        input_count: psbt.inputs.len(),
        output_count: psbt.outputs.len(),
        locktime: tx.lock_time.to_consensus_u32(),
        inputs: tx
            .input
            .iter()
            .zip(&psbt.inputs)
            .map(|(txin, input)| input_details(txin, input))
            .collect(),
        outputs: tx
            .output
            .iter()
            .map(|txout| output_details(txout.value, &txout.script_pubkey, network))
            .collect(),
    }
}

/// Summarize a version 2 PSBT's fields
pub fn psbt_v2_details(psbt: &v2::Psbt, network: NetworkSelection) -> PsbtDetails {
    let global = &psbt.global;
    PsbtDetails {
        version: 2,
        tx_version: global.tx_version.0,
        input_count: psbt.inputs.len(),
        output_count: psbt.outputs.len(),
        locktime: global
            .fallback_lock_time
            .map(|lock_time| lock_time.to_consensus_u32())
            .unwrap_or(0),
        inputs: psbt.inputs.iter().map(v2_input_details).collect(),
        outputs: psbt
            .outputs
            .iter()
            .map(|output| output_details(output.amount, &output.script_pubkey, network))
            .collect(),
    }
}

/// Decode a base64 PSBT of either version and summarize it
pub fn inspect_psbt(psbt_base64: &str, network: NetworkSelection) -> Result<PsbtDetails> {
    Ok(match decode_psbt(psbt_base64)? {
        VersionedPsbt::V0(psbt) => psbt_details(&psbt, network),
        VersionedPsbt::V2(psbt) => psbt_v2_details(&psbt, network),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::psbt::{add_partial_sig, create_psbt};
    use bitcoin::secp256k1::{Message, Secp256k1, SecretKey};
    use bitcoin::TxOut;
    use std::str::FromStr;

    const TXID: &str = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";
    const ADDRESS: &str = "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx";

    #[test]
    fn test_inspect_created_psbt() {
        let b64 = create_psbt(TXID, 3, ADDRESS, 100_000, NetworkSelection::Testnet).unwrap();
        let details = inspect_psbt(&b64, NetworkSelection::Testnet).unwrap();

        assert_eq!(details.version, 2);
        assert_eq!(details.tx_version, 2);
        assert_eq!(details.input_count, 1);
        assert_eq!(details.output_count, 1);
        assert_eq!(details.locktime, 0);
        assert_eq!(details.inputs[0].txid, TXID);
        assert_eq!(details.inputs[0].vout, 3);
        assert_eq!(details.inputs[0].sequence, 0xffff_ffff);
        assert!(details.inputs[0].partial_sigs.is_empty());
        assert!(details.inputs[0].witness_utxo.is_none());
        assert_eq!(details.outputs[0].amount, "0.001");
        assert_eq!(details.outputs[0].address.as_deref(), Some(ADDRESS));
        assert_eq!(
            details.outputs[0].script,
            "0014751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }

    #[test]
    fn test_inspect_shows_partial_sig() {
        let secp = Secp256k1::new();
        let sk = SecretKey::from_slice(&[0x33; 32]).unwrap();
        let pk = hex::encode(bitcoin::secp256k1::PublicKey::from_secret_key(&secp, &sk).serialize());
        let sig = secp.sign_ecdsa(&Message::from_digest([9u8; 32]), &sk);
        let sig_hex = hex::encode(sig.serialize_der());

        let b64 = create_psbt(TXID, 0, ADDRESS, 1_000, NetworkSelection::Testnet).unwrap();
        let signed = add_partial_sig(&b64, 0, &pk, &sig_hex).unwrap();
        let details = inspect_psbt(&signed, NetworkSelection::Testnet).unwrap();

        let sigs = &details.inputs[0].partial_sigs;
        assert_eq!(sigs.len(), 1);
        assert_eq!(sigs.get(&pk), Some(&format!("{}01", sig_hex)));
    }

    #[test]
    fn test_output_address_depends_on_network() {
        let b64 = create_psbt(TXID, 0, ADDRESS, 1_000, NetworkSelection::Testnet).unwrap();
        let details = inspect_psbt(&b64, NetworkSelection::Mainnet).unwrap();
        assert_eq!(
            details.outputs[0].address.as_deref(),
            Some("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4")
        );
    }

    #[test]
    fn test_json_field_names() {
        let b64 = create_psbt(TXID, 0, ADDRESS, 1_000, NetworkSelection::Testnet).unwrap();
        let details = inspect_psbt(&b64, NetworkSelection::Testnet).unwrap();
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["txVersion"], 2);
        assert_eq!(json["inputCount"], 1);
        assert!(json["inputs"][0]["partialSigs"].is_object());
        assert!(json["inputs"][0]["witnessUtxo"].is_null());
    }

    #[test]
    fn test_inspect_version_zero() {
        let unsigned_tx = bitcoin::Transaction {
            version: bitcoin::transaction::Version::TWO,
            lock_time: bitcoin::absolute::LockTime::from_consensus(800_000),
            input: vec![TxIn {
                previous_output: bitcoin::OutPoint {
                    txid: TXID.parse().unwrap(),
                    vout: 7,
                },
                sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
                ..Default::default()
            }],
            output: vec![TxOut {
                value: Amount::from_sat(2_500),
                script_pubkey: Address::from_str(ADDRESS)
                    .unwrap()
                    .assume_checked()
                    .script_pubkey(),
            }],
        };
        let psbt = Psbt::from_unsigned_tx(unsigned_tx).unwrap();
        let b64 = crate::psbt::encode_psbt(&VersionedPsbt::V0(psbt));

        let details = inspect_psbt(&b64, NetworkSelection::Testnet).unwrap();
        assert_eq!(details.version, 0);
        assert_eq!(details.locktime, 800_000);
        assert_eq!(details.inputs[0].vout, 7);
        assert_eq!(details.inputs[0].sequence, 0xffff_fffd);
        assert_eq!(details.outputs[0].amount, "0.000025");
        assert_eq!(details.outputs[0].address.as_deref(), Some(ADDRESS));
    }
}
