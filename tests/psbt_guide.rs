//! Integration tests for the PSBT guide: create, sign, inspect

use bitcoin::secp256k1::{Message, Secp256k1, SecretKey};

use btcguide::psbt::{add_partial_sig, create_psbt, decode_psbt, inspect_psbt};
use btcguide::{GuideAction, NetworkSelection};

const TXID: &str = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";
const ADDRESS: &str = "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx";

fn signer() -> (String, String) {
    let secp = Secp256k1::new();
    let sk = SecretKey::from_slice(&[0x44; 32]).unwrap();
    let pk = bitcoin::secp256k1::PublicKey::from_secret_key(&secp, &sk);
    let sig = secp.sign_ecdsa(&Message::from_digest([0x99; 32]), &sk);
    (hex::encode(pk.serialize()), hex::encode(sig.serialize_der()))
}

#[test]
fn test_create_sign_inspect() {
    let net = NetworkSelection::Testnet;
    let (pk, sig) = signer();

    let unsigned = create_psbt(TXID, 3, ADDRESS, 75_000, net).unwrap();
    let details = inspect_psbt(&unsigned, net).unwrap();
    assert_eq!(details.input_count, 1);
    assert_eq!(details.output_count, 1);
    assert_eq!(details.version, 2);
    assert_eq!(details.tx_version, 2);
    assert_eq!(details.locktime, 0);
    assert_eq!(details.inputs[0].txid, TXID);
    assert_eq!(details.inputs[0].vout, 3);
    assert!(details.inputs[0].partial_sigs.is_empty());
    assert_eq!(details.outputs[0].amount, "0.00075");
    assert_eq!(details.outputs[0].address.as_deref(), Some(ADDRESS));

    let signed = add_partial_sig(&unsigned, 0, &pk, &sig).unwrap();
    let details = inspect_psbt(&signed, net).unwrap();
    assert_eq!(
        details.inputs[0].partial_sigs.get(&pk),
        Some(&format!("{}01", sig))
    );

    // Signing leaves the transaction fields untouched
    let before = inspect_psbt(&unsigned, net).unwrap();
    assert_eq!(details.version, before.version);
    assert_eq!(details.outputs, before.outputs);
    assert_eq!(details.inputs[0].txid, before.inputs[0].txid);
    assert_eq!(details.inputs[0].sequence, before.inputs[0].sequence);
    assert_eq!(decode_psbt(&signed).unwrap().version(), 2);
}

#[test]
fn test_psbt_page_actions() {
    let net = NetworkSelection::Testnet;
    let (pk, sig) = signer();

    let psbt = GuideAction::CreatePsbt.run(&[TXID, "0", ADDRESS, "1000"], net);
    assert!(!psbt.starts_with("Error:"), "{}", psbt);
    assert!(decode_psbt(&psbt).is_ok());

    let signed =
        GuideAction::AddPartialSig.run(&[psbt.as_str(), "0", pk.as_str(), sig.as_str()], net);
    assert!(!signed.starts_with("Error:"), "{}", signed);

    let json = GuideAction::InspectPsbt.run(&[signed.as_str()], net);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["inputCount"], 1);
    assert_eq!(value["inputs"][0]["partialSigs"][&pk], format!("{}01", sig));
    assert_eq!(value["outputs"][0]["amount"], "0.00001");
}

#[test]
fn test_psbt_page_errors() {
    let net = NetworkSelection::Testnet;
    let (pk, sig) = signer();

    let missing_amount = GuideAction::CreatePsbt.run(&[TXID, "0", ADDRESS, ""], net);
    assert!(missing_amount.starts_with("Error:"));

    let psbt = GuideAction::CreatePsbt.run(&[TXID, "0", ADDRESS, "1000"], net);
    let out_of_range =
        GuideAction::AddPartialSig.run(&[psbt.as_str(), "4", pk.as_str(), sig.as_str()], net);
    assert!(out_of_range.starts_with("Error:"));

    assert!(GuideAction::InspectPsbt
        .run(&["not a psbt"], net)
        .starts_with("Error:"));
}

#[test]
fn test_psbt_numeric_boundaries() {
    let net = NetworkSelection::Testnet;
    let (pk, sig) = signer();

    for (vout, amount) in [
        ("4294967296", "1000"),
        ("18446744073709551616", "1000"),
        ("0", "18446744073709551616"),
        ("0", "18446744073709551615"),
        ("0", "2100000000000001"),
    ] {
        let output = GuideAction::CreatePsbt.run(&[TXID, vout, ADDRESS, amount], net);
        assert!(output.starts_with("Error:"), "{} {}: {}", vout, amount, output);
    }

    // The largest index and the whole supply are accepted
    let psbt =
        GuideAction::CreatePsbt.run(&[TXID, "4294967295", ADDRESS, "2100000000000000"], net);
    let details = inspect_psbt(&psbt, net).unwrap();
    assert_eq!(details.inputs[0].vout, u32::MAX);
    assert_eq!(details.outputs[0].amount, "21000000");

    for index in ["18446744073709551615", "18446744073709551616", "1"] {
        let output =
            GuideAction::AddPartialSig.run(&[psbt.as_str(), index, pk.as_str(), sig.as_str()], net);
        assert!(output.starts_with("Error:"), "{}: {}", index, output);
    }
}
