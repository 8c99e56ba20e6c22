//! Guide pages and their actions
//!
//! A page is a list of [`GuideAction`] sections. Each action declares its
//! input fields and knows how to turn the collected strings into exactly
//! one library call and the console text for its result. The TUI, the CLI
//! and the WASM exports all go through [`GuideAction::run`], so they show
//! identical output for identical input.

pub mod routes;

pub use routes::Route;

use crate::btc::{
    bitcoins_to_satoshis, derive_child_public_key, estimate_multisig_transaction_fee,
    generate_multisig_from_public_keys, satoshis_to_bitcoins, validate_address,
    validate_bip32_path, validate_fee, validate_fee_rate, validate_public_key, validate_signature,
    FeeEstimate, Multisig, MultisigAddressType, MultisigFeeParams, PathMode,
};
use crate::console::{format_error, format_json, format_result, format_validation};
use crate::error::{GuideError, Result};
use crate::network::NetworkSelection;
use crate::psbt::{add_partial_sig, create_psbt, inspect_psbt};

// ============================================================================
// Field Metadata
// ============================================================================

/// One input of a guide section
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FieldSpec {
    pub label: &'static str,
    pub placeholder: &'static str,
    /// Prefilled value, also used when the input is left blank
    pub default: &'static str,
    /// Only digits may be typed
    pub numeric: bool,
    /// Rendered as a text area
    pub multiline: bool,
}

impl FieldSpec {
    const fn new(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            label,
            placeholder,
            default: "",
            numeric: false,
            multiline: false,
        }
    }

    const fn with_default(mut self, default: &'static str) -> Self {
        self.default = default;
        self
    }

    const fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    const fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }
}

const ADDRESS_TYPE: FieldSpec =
    FieldSpec::new("Address type", "P2SH, P2SH-P2WSH or P2WSH").with_default("P2WSH");
const REQUIRED_SIGNERS: FieldSpec =
    FieldSpec::new("Required signers (m)", "e.g. 2").with_default("2").numeric();
const PUBLIC_KEY: FieldSpec = FieldSpec::new("Public key", "Enter public key in hex format");
const PSBT: FieldSpec = FieldSpec::new("PSBT", "Enter PSBT (Base64)").multiline();

const VALIDATE_ADDRESS_FIELDS: &[FieldSpec] =
    &[FieldSpec::new("Address", "Enter Bitcoin address")];
const VALIDATE_PUBLIC_KEY_FIELDS: &[FieldSpec] = &[PUBLIC_KEY];
const VALIDATE_PATH_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("BIP32 path", "Enter BIP32 derivation path"),
    FieldSpec::new("Mode", "any, hardened or unhardened").with_default("any"),
];
const DERIVE_CHILD_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Extended public key", "Enter extended public key"),
    FieldSpec::new("BIP32 path", "Enter BIP32 derivation path").with_default("m/0/0"),
];
const BTC_TO_SATS_FIELDS: &[FieldSpec] = &[FieldSpec::new("Amount (BTC)", "e.g. 0.001")];
const SATS_TO_BTC_FIELDS: &[FieldSpec] =
    &[FieldSpec::new("Amount (sats)", "e.g. 100000").numeric()];
const FEE_RATE_FIELDS: &[FieldSpec] = &[FieldSpec::new("Fee rate (sats/vB)", "e.g. 10")];
const FEE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Fee (sats)", "e.g. 1500"),
    FieldSpec::new("Total input amount (sats)", "e.g. 100000"),
];
const ESTIMATE_FEE_FIELDS: &[FieldSpec] = &[
    ADDRESS_TYPE,
    FieldSpec::new("Inputs", "Number of inputs").with_default("1").numeric(),
    FieldSpec::new("Outputs", "Number of outputs").with_default("1").numeric(),
    REQUIRED_SIGNERS,
    FieldSpec::new("Total signers (n)", "e.g. 3").with_default("3").numeric(),
    FieldSpec::new("Fee rate (sats/vB)", "e.g. 10").with_default("10"),
];
const MULTISIG_FIELDS: &[FieldSpec] = &[
    ADDRESS_TYPE,
    REQUIRED_SIGNERS,
    FieldSpec::new("Public keys", "Comma-separated hex public keys").multiline(),
];
const VERIFY_SIGNATURE_FIELDS: &[FieldSpec] = &[
    PUBLIC_KEY,
    FieldSpec::new("Message hash", "32-byte hash in hex"),
    FieldSpec::new("Signature", "DER signature in hex"),
];
const CREATE_PSBT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Input TXID", "Input TXID"),
    FieldSpec::new("Input index", "Input Index").with_default("0").numeric(),
    FieldSpec::new("Output address", "Output Address"),
    FieldSpec::new("Output amount", "Output Amount (in satoshis)").numeric(),
];
const ADD_SIG_FIELDS: &[FieldSpec] = &[
    PSBT,
    FieldSpec::new("Input index", "Input to sign").with_default("0").numeric(),
    FieldSpec::new("Public key", "Pubkey (hex)"),
    FieldSpec::new("Signature", "Signature (hex)"),
];
const INSPECT_PSBT_FIELDS: &[FieldSpec] = &[PSBT];

// ============================================================================
// Actions
// ============================================================================

/// A guide section backed by one library call
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GuideAction {
    ValidateAddress,
    ValidatePublicKey,
    ValidatePath,
    DeriveChild,
    BtcToSats,
    SatsToBtc,
    ValidateFeeRate,
    ValidateFee,
    EstimateFee,
    MultisigAddress,
    VerifySignature,
    CreatePsbt,
    AddPartialSig,
    InspectPsbt,
}

impl GuideAction {
    /// Sections of the Bitcoin page
    pub fn bitcoin() -> &'static [GuideAction] {
        &[
            Self::ValidateAddress,
            Self::ValidatePublicKey,
            Self::ValidatePath,
            Self::DeriveChild,
            Self::BtcToSats,
            Self::SatsToBtc,
            Self::ValidateFeeRate,
            Self::ValidateFee,
            Self::EstimateFee,
            Self::MultisigAddress,
            Self::VerifySignature,
        ]
    }

    /// Sections of the PSBT page
    pub fn psbt() -> &'static [GuideAction] {
        &[Self::CreatePsbt, Self::AddPartialSig, Self::InspectPsbt]
    }

    /// Command name, shared by the CLI and the logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::ValidateAddress => "validate-address",
            Self::ValidatePublicKey => "validate-pubkey",
            Self::ValidatePath => "validate-path",
            Self::DeriveChild => "derive-child",
            Self::BtcToSats => "to-sats",
            Self::SatsToBtc => "to-btc",
            Self::ValidateFeeRate => "validate-fee-rate",
            Self::ValidateFee => "validate-fee",
            Self::EstimateFee => "estimate-fee",
            Self::MultisigAddress => "multisig-address",
            Self::VerifySignature => "verify-signature",
            Self::CreatePsbt => "psbt-create",
            Self::AddPartialSig => "psbt-add-sig",
            Self::InspectPsbt => "psbt-inspect",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ValidateAddress => "Validate Address",
            Self::ValidatePublicKey => "Validate Public Key",
            Self::ValidatePath => "Validate BIP32 Path",
            Self::DeriveChild => "Derive Child Public Key",
            Self::BtcToSats => "BTC to Satoshis",
            Self::SatsToBtc => "Satoshis to BTC",
            Self::ValidateFeeRate => "Validate Fee Rate",
            Self::ValidateFee => "Validate Fee",
            Self::EstimateFee => "Estimate Multisig Fee",
            Self::MultisigAddress => "Generate Multisig Address",
            Self::VerifySignature => "Verify Signature",
            Self::CreatePsbt => "Create a PSBT",
            Self::AddPartialSig => "Add a Signature to PSBT",
            Self::InspectPsbt => "Parse PSBT",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ValidateAddress => {
                "Check that an address decodes and belongs to the selected network."
            }
            Self::ValidatePublicKey => "Check a compressed or uncompressed SEC public key.",
            Self::ValidatePath => {
                "Check a BIP32 path such as m/48'/1'/0'/2', optionally requiring it to be \
                 fully hardened or free of hardened segments."
            }
            Self::DeriveChild => {
                "Derive an unhardened child public key from an xpub (Mainnet) or tpub (Testnet)."
            }
            Self::BtcToSats => "Convert a decimal BTC amount to satoshis.",
            Self::SatsToBtc => "Convert satoshis to a decimal BTC amount.",
            Self::ValidateFeeRate => "Check a fee rate in satoshis per virtual byte.",
            Self::ValidateFee => "Check an absolute fee against the total being spent.",
            Self::EstimateFee => {
                "Estimate the virtual size and fee of a transaction spending multisig inputs."
            }
            Self::MultisigAddress => {
                "Build an m-of-n multisig address. Keys are used in the order given."
            }
            Self::VerifySignature => "Verify an ECDSA signature over a 32-byte message hash.",
            Self::CreatePsbt => {
                "Construct a PSBT with one input and one output. The result feeds the \
                 sections below."
            }
            Self::AddPartialSig => "Attach a partial signature to an input of a PSBT.",
            Self::InspectPsbt => "Decode a base64 PSBT and show its fields.",
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Self::ValidateAddress => VALIDATE_ADDRESS_FIELDS,
            Self::ValidatePublicKey => VALIDATE_PUBLIC_KEY_FIELDS,
            Self::ValidatePath => VALIDATE_PATH_FIELDS,
            Self::DeriveChild => DERIVE_CHILD_FIELDS,
            Self::BtcToSats => BTC_TO_SATS_FIELDS,
            Self::SatsToBtc => SATS_TO_BTC_FIELDS,
            Self::ValidateFeeRate => FEE_RATE_FIELDS,
            Self::ValidateFee => FEE_FIELDS,
            Self::EstimateFee => ESTIMATE_FEE_FIELDS,
            Self::MultisigAddress => MULTISIG_FIELDS,
            Self::VerifySignature => VERIFY_SIGNATURE_FIELDS,
            Self::CreatePsbt => CREATE_PSBT_FIELDS,
            Self::AddPartialSig => ADD_SIG_FIELDS,
            Self::InspectPsbt => INSPECT_PSBT_FIELDS,
        }
    }

    /// Whether a successful result is a base64 PSBT that later sections take
    pub fn produces_psbt(&self) -> bool {
        matches!(self, Self::CreatePsbt | Self::AddPartialSig)
    }

    /// Run the action on raw form values and return the console text.
    ///
    /// Missing or blank values fall back to the field default.
    pub fn run<S: AsRef<str>>(&self, inputs: &[S], network: NetworkSelection) -> String {
        let args = self.resolve_args(inputs);

        tracing::debug!(action = self.name(), %network, "running guide action");

        match self {
            Self::ValidateAddress => {
                format_validation(validate_address(args[0], network), "Address is valid")
            }
            Self::ValidatePublicKey => {
                format_validation(validate_public_key(args[0]), "Public key is valid")
            }
            Self::ValidatePath => match args[1].parse::<PathMode>() {
                Ok(mode) => {
                    format_validation(validate_bip32_path(args[0], mode), "BIP32 path is valid")
                }
                Err(e) => format_error(&e),
            },
            Self::DeriveChild => format_result(derive_child_public_key(args[0], args[1], network)),
            Self::BtcToSats => format_result(bitcoins_to_satoshis(args[0])),
            Self::SatsToBtc => format_result(satoshis_to_bitcoins(args[0])),
            Self::ValidateFeeRate => {
                format_validation(validate_fee_rate(args[0]), "Fee rate is valid")
            }
            Self::ValidateFee => format_validation(validate_fee(args[0], args[1]), "Fee is valid"),
            Self::EstimateFee => format_json(estimate_fee(&args)),
            Self::MultisigAddress => format_json(multisig_address(&args, network)),
            Self::VerifySignature => format_validation(
                validate_signature(args[0], args[1], args[2]),
                "Signature is valid",
            ),
            Self::CreatePsbt => format_result(psbt_create(&args, network)),
            Self::AddPartialSig => format_result(psbt_add_sig(&args)),
            Self::InspectPsbt => format_json(inspect_psbt(args[0], network)),
        }
    }
}

impl GuideAction {
    /// Form values with blanks replaced by the field defaults
    fn resolve_args<'a, S: AsRef<str>>(&self, inputs: &'a [S]) -> Vec<&'a str> {
        self.fields()
            .iter()
            .enumerate()
            .map(|(i, field)| match inputs.get(i).map(|s| s.as_ref().trim()) {
                Some(value) if !value.is_empty() => value,
                _ => field.default,
            })
            .collect()
    }

    /// Rust code making the same library call as [`GuideAction::run`] with
    /// these form values.
    pub fn snippet<S: AsRef<str>>(&self, inputs: &[S], network: NetworkSelection) -> String {
        let args = self.resolve_args(inputs);
        let net = format!("NetworkSelection::{:?}", network);

        let (imports, call) = match self {
            Self::ValidateAddress => (
                "btc::validate_address, NetworkSelection",
                format!("let problem = validate_address({:?}, {});", args[0], net),
            ),
            Self::ValidatePublicKey => (
                "btc::validate_public_key",
                format!("let problem = validate_public_key({:?});", args[0]),
            ),
            Self::ValidatePath => (
                "btc::{validate_bip32_path, PathMode}",
                format!(
                    "let problem = validate_bip32_path({:?}, {});",
                    args[0],
                    parsed_literal::<PathMode>("PathMode", args[1])
                ),
            ),
            Self::DeriveChild => (
                "btc::derive_child_public_key, NetworkSelection",
                format!(
                    "let child = derive_child_public_key({:?}, {:?}, {})?;",
                    args[0], args[1], net
                ),
            ),
            Self::BtcToSats => (
                "btc::bitcoins_to_satoshis",
                format!("let sats = bitcoins_to_satoshis({:?})?;", args[0]),
            ),
            Self::SatsToBtc => (
                "btc::satoshis_to_bitcoins",
                format!("let btc = satoshis_to_bitcoins({:?})?;", args[0]),
            ),
            Self::ValidateFeeRate => (
                "btc::validate_fee_rate",
                format!("let problem = validate_fee_rate({:?});", args[0]),
            ),
            Self::ValidateFee => (
                "btc::validate_fee",
                format!("let problem = validate_fee({:?}, {:?});", args[0], args[1]),
            ),
            Self::EstimateFee => (
                "btc::{estimate_multisig_transaction_fee, MultisigAddressType, MultisigFeeParams}",
                format!(
                    "let estimate = estimate_multisig_transaction_fee(&MultisigFeeParams {{\n    \
                     address_type: {},\n    num_inputs: {},\n    num_outputs: {},\n    \
                     required_signers: {},\n    total_signers: {},\n    fee_rate: {},\n}})?;",
                    parsed_literal::<MultisigAddressType>("MultisigAddressType", args[0]),
                    integer_literal(args[1]),
                    integer_literal(args[2]),
                    integer_literal(args[3]),
                    integer_literal(args[4]),
                    float_literal(args[5]),
                ),
            ),
            Self::MultisigAddress => (
                "btc::{generate_multisig_from_public_keys, MultisigAddressType}, NetworkSelection",
                format!(
                    "let multisig = generate_multisig_from_public_keys(\n    {},\n    {},\n    \
                     {},\n    &{:?},\n)?;",
                    net,
                    parsed_literal::<MultisigAddressType>("MultisigAddressType", args[0]),
                    integer_literal(args[1]),
                    split_public_keys(args[2]),
                ),
            ),
            Self::VerifySignature => (
                "btc::validate_signature",
                format!(
                    "let problem = validate_signature({:?}, {:?}, {:?});",
                    args[0], args[1], args[2]
                ),
            ),
            Self::CreatePsbt => (
                "psbt::create_psbt, NetworkSelection",
                format!(
                    "let psbt = create_psbt({:?}, {}, {:?}, {}, {})?;",
                    args[0],
                    integer_literal(args[1]),
                    args[2],
                    integer_literal(args[3]),
                    net
                ),
            ),
            Self::AddPartialSig => (
                "psbt::add_partial_sig",
                format!(
                    "let signed = add_partial_sig({:?}, {}, {:?}, {:?})?;",
                    args[0],
                    integer_literal(args[1]),
                    args[2],
                    args[3]
                ),
            ),
            Self::InspectPsbt => (
                "psbt::inspect_psbt, NetworkSelection",
                format!("let details = inspect_psbt({:?}, {})?;", args[0], net),
            ),
        };

        format!("use btcguide::{{{}}};\n\n{}", imports, call)
    }
}

fn integer_literal(value: &str) -> String {
    match value.parse::<u64>() {
        Ok(n) => n.to_string(),
        Err(_) => format!("{:?}.parse()?", value),
    }
}

fn float_literal(value: &str) -> String {
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => format!("{:?}", n),
        _ => format!("{:?}.parse()?", value),
    }
}

/// `Type::Variant` when `value` names one, otherwise the parse call
fn parsed_literal<T>(type_name: &str, value: &str) -> String
where
    T: std::str::FromStr + std::fmt::Debug,
{
    match value.parse::<T>() {
        Ok(parsed) => format!("{}::{:?}", type_name, parsed),
        Err(_) => format!("{:?}.parse::<{}>()?", value, type_name),
    }
}

fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T> {
    value.parse().map_err(|_| GuideError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Split a list of public keys on commas and whitespace
pub fn split_public_keys(keys: &str) -> Vec<&str> {
    keys.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|k| !k.is_empty())
        .collect()
}

fn estimate_fee(args: &[&str]) -> Result<FeeEstimate> {
    let params = MultisigFeeParams {
        address_type: args[0].parse()?,
        num_inputs: parse_number("inputs", args[1])?,
        num_outputs: parse_number("outputs", args[2])?,
        required_signers: parse_number("required signers", args[3])?,
        total_signers: parse_number("total signers", args[4])?,
        fee_rate: parse_number("fee rate", args[5])?,
    };
    estimate_multisig_transaction_fee(&params)
}

fn multisig_address(args: &[&str], network: NetworkSelection) -> Result<Multisig> {
    let address_type: MultisigAddressType = args[0].parse()?;
    let required = parse_number("required signers", args[1])?;
    generate_multisig_from_public_keys(network, address_type, required, &split_public_keys(args[2]))
}

fn psbt_create(args: &[&str], network: NetworkSelection) -> Result<String> {
    let vout = parse_number("input index", args[1])?;
    if args[3].is_empty() {
        return Err(GuideError::MissingInput("output amount"));
    }
    let amount = parse_number("output amount", args[3])?;
    create_psbt(args[0], vout, args[2], amount, network)
}

fn psbt_add_sig(args: &[&str]) -> Result<String> {
    let index = parse_number("input index", args[1])?;
    add_partial_sig(args[0], index, args[2], args[3])
}
