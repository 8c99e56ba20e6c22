//! Integration tests for the command line interface

use std::process::{Command, Output};

use btcguide::{GuideAction, NetworkSelection};

const BTCGUIDE: &str = env!("CARGO_BIN_EXE_btcguide");

fn run(args: &[&str]) -> Output {
    Command::new(BTCGUIDE)
        .args(args)
        .env_remove("BTCGUIDE_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run btcguide")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn test_cli_matches_guide_action() {
    let output = run(&["to-sats", "--btc", "0.001"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        GuideAction::BtcToSats.run(&["0.001"], NetworkSelection::Testnet)
    );

    let output = run(&["estimate-fee", "--fee-rate", "10"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["vsize"], 158);
    assert_eq!(value["feeSats"], 1580);
}

#[test]
fn test_cli_network_flag() {
    let address = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";

    let output = run(&["validate-address", "--address", address]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Address is not valid for Testnet.");

    let output = run(&["--network", "mainnet", "validate-address", "--address", address]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Address is valid");
}

#[test]
fn test_cli_errors_exit_nonzero() {
    let output = run(&["to-btc", "--sats", "abc"]);
    assert!(!output.status.success());
    assert!(stdout(&output).starts_with("Error:"));

    let output = run(&["--network", "signet", "to-sats", "--btc", "1"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_multisig_repeated_pubkeys() {
    let output = run(&[
        "multisig-address",
        "--required",
        "2",
        "--pubkey",
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
        "--pubkey",
        "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5",
    ]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["totalSigners"], 2);
    assert!(value["address"].as_str().unwrap().starts_with("tb1q"));
}
