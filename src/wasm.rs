use wasm_bindgen::prelude::*;

use crate::console::format_error;
use crate::guide::GuideAction;
use crate::network::NetworkSelection;

/// Initialize panic hook for better error messages in browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Every export takes raw form values plus a network name ("mainnet" or
/// "testnet") and returns the console text.
fn run(action: GuideAction, inputs: &[&str], network: &str) -> String {
    match network.parse::<NetworkSelection>() {
        Ok(network) => action.run(inputs, network),
        Err(e) => format_error(&e),
    }
}

// Bitcoin guide

#[wasm_bindgen]
pub fn wasm_validate_address(address: &str, network: &str) -> String {
    run(GuideAction::ValidateAddress, &[address], network)
}

#[wasm_bindgen]
pub fn wasm_validate_public_key(pubkey: &str) -> String {
    run(GuideAction::ValidatePublicKey, &[pubkey], "testnet")
}

#[wasm_bindgen]
pub fn wasm_validate_bip32_path(path: &str, mode: &str) -> String {
    run(GuideAction::ValidatePath, &[path, mode], "testnet")
}

#[wasm_bindgen]
pub fn wasm_derive_child_public_key(xpub: &str, path: &str, network: &str) -> String {
    run(GuideAction::DeriveChild, &[xpub, path], network)
}

#[wasm_bindgen]
pub fn wasm_bitcoins_to_satoshis(btc: &str) -> String {
    run(GuideAction::BtcToSats, &[btc], "testnet")
}

#[wasm_bindgen]
pub fn wasm_satoshis_to_bitcoins(sats: &str) -> String {
    run(GuideAction::SatsToBtc, &[sats], "testnet")
}

#[wasm_bindgen]
pub fn wasm_validate_fee_rate(fee_rate: &str) -> String {
    run(GuideAction::ValidateFeeRate, &[fee_rate], "testnet")
}

#[wasm_bindgen]
pub fn wasm_validate_fee(fee: &str, input_total: &str) -> String {
    run(GuideAction::ValidateFee, &[fee, input_total], "testnet")
}

#[wasm_bindgen]
pub fn wasm_estimate_multisig_fee(
    address_type: &str,
    inputs: &str,
    outputs: &str,
    required_signers: &str,
    total_signers: &str,
    fee_rate: &str,
) -> String {
    run(
        GuideAction::EstimateFee,
        &[address_type, inputs, outputs, required_signers, total_signers, fee_rate],
        "testnet",
    )
}

/// `public_keys` is comma or whitespace separated
#[wasm_bindgen]
pub fn wasm_generate_multisig_address(
    address_type: &str,
    required_signers: &str,
    public_keys: &str,
    network: &str,
) -> String {
    run(
        GuideAction::MultisigAddress,
        &[address_type, required_signers, public_keys],
        network,
    )
}

#[wasm_bindgen]
pub fn wasm_validate_signature(pubkey: &str, msg_hash: &str, signature: &str) -> String {
    run(GuideAction::VerifySignature, &[pubkey, msg_hash, signature], "testnet")
}

// PSBT guide

#[wasm_bindgen]
pub fn wasm_create_psbt(
    txid: &str,
    output_index: &str,
    address: &str,
    amount: &str,
    network: &str,
) -> String {
    run(
        GuideAction::CreatePsbt,
        &[txid, output_index, address, amount],
        network,
    )
}

#[wasm_bindgen]
pub fn wasm_add_partial_sig(
    psbt: &str,
    input_index: &str,
    pubkey: &str,
    signature: &str,
) -> String {
    run(
        GuideAction::AddPartialSig,
        &[psbt, input_index, pubkey, signature],
        "testnet",
    )
}

#[wasm_bindgen]
pub fn wasm_inspect_psbt(psbt: &str, network: &str) -> String {
    run(GuideAction::InspectPsbt, &[psbt], network)
}
