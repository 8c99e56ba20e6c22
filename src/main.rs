use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use btcguide::config::GuideConfig;
use btcguide::logging::{self, LogTarget};
use btcguide::{GuideAction, NetworkSelection};

mod tui;

#[derive(Parser)]
#[command(name = "btcguide")]
#[command(about = "Interactive guide to Bitcoin address, key, fee, multisig and PSBT operations", long_about = None)]
struct Cli {
    /// Network whose rules apply (mainnet or testnet); overrides the config file
    #[arg(long, global = true)]
    network: Option<NetworkSelection>,

    /// TOML config file
    #[arg(long, global = true, env = "BTCGUIDE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that an address is valid for the selected network
    ValidateAddress {
        #[arg(long)]
        address: String,
    },

    /// Check a hex-encoded public key
    ValidatePubkey {
        #[arg(long)]
        pubkey: String,
    },

    /// Check a BIP32 derivation path
    ValidatePath {
        /// Path such as m/48'/1'/0'/2'
        #[arg(long)]
        path: String,

        /// any, hardened or unhardened
        #[arg(long, default_value = "any")]
        mode: String,
    },

    /// Derive a child public key from an xpub/tpub
    DeriveChild {
        #[arg(long)]
        xpub: String,

        /// Unhardened derivation path
        #[arg(long, default_value = "m/0/0")]
        path: String,
    },

    /// Convert BTC to satoshis
    ToSats {
        #[arg(long, allow_hyphen_values = true)]
        btc: String,
    },

    /// Convert satoshis to BTC
    ToBtc {
        #[arg(long, allow_hyphen_values = true)]
        sats: String,
    },

    /// Check a fee rate in sats/vB
    ValidateFeeRate {
        #[arg(long, allow_hyphen_values = true)]
        fee_rate: String,
    },

    /// Check an absolute fee against the total input amount
    ValidateFee {
        /// Fee in sats
        #[arg(long, allow_hyphen_values = true)]
        fee: String,

        /// Total input amount in sats
        #[arg(long, allow_hyphen_values = true)]
        input_total: String,
    },

    /// Estimate the fee of a multisig spend
    EstimateFee {
        /// P2SH, P2SH-P2WSH or P2WSH
        #[arg(long, default_value = "P2WSH")]
        address_type: String,

        #[arg(long, default_value = "1")]
        inputs: String,

        #[arg(long, default_value = "1")]
        outputs: String,

        /// Required signers (m)
        #[arg(long, default_value = "2")]
        required: String,

        /// Total signers (n)
        #[arg(long, default_value = "3")]
        total: String,

        /// Fee rate in sats/vB
        #[arg(long, allow_hyphen_values = true)]
        fee_rate: String,
    },

    /// Generate an m-of-n multisig address
    MultisigAddress {
        /// P2SH, P2SH-P2WSH or P2WSH
        #[arg(long, default_value = "P2WSH")]
        address_type: String,

        /// Required signers (m)
        #[arg(long)]
        required: String,

        /// Public key in hex; repeat for each signer, order matters
        #[arg(long = "pubkey", required = true)]
        pubkeys: Vec<String>,
    },

    /// Verify an ECDSA signature over a 32-byte message hash
    VerifySignature {
        #[arg(long)]
        pubkey: String,

        /// Message hash (hex, 32 bytes)
        #[arg(long)]
        msg_hash: String,

        /// DER signature (hex)
        #[arg(long)]
        signature: String,
    },

    /// Create a one-input, one-output PSBT
    PsbtCreate {
        /// Previous transaction id
        #[arg(long)]
        txid: String,

        /// Output index being spent
        #[arg(long, default_value = "0")]
        vout: String,

        /// Destination address
        #[arg(long)]
        address: String,

        /// Amount in sats
        #[arg(long)]
        amount: String,
    },

    /// Add a partial signature to a PSBT input
    PsbtAddSig {
        /// Base64 PSBT
        #[arg(long)]
        psbt: String,

        #[arg(long, default_value = "0")]
        input_index: String,

        #[arg(long)]
        pubkey: String,

        /// DER signature (hex), optionally followed by its sighash byte
        #[arg(long)]
        signature: String,
    },

    /// Show the fields of a base64 PSBT
    PsbtInspect {
        #[arg(long)]
        psbt: String,
    },

    /// Launch the interactive terminal UI
    Tui {
        /// Page to open: /, /bitcoin or /psbt
        #[arg(long, default_value = "/")]
        route: String,
    },
}

impl Commands {
    /// The guide action and its form values, or `None` for the TUI
    fn into_action(self) -> Option<(GuideAction, Vec<String>)> {
        let (action, inputs) = match self {
            Commands::ValidateAddress { address } => (GuideAction::ValidateAddress, vec![address]),
            Commands::ValidatePubkey { pubkey } => (GuideAction::ValidatePublicKey, vec![pubkey]),
            Commands::ValidatePath { path, mode } => (GuideAction::ValidatePath, vec![path, mode]),
            Commands::DeriveChild { xpub, path } => (GuideAction::DeriveChild, vec![xpub, path]),
            Commands::ToSats { btc } => (GuideAction::BtcToSats, vec![btc]),
            Commands::ToBtc { sats } => (GuideAction::SatsToBtc, vec![sats]),
            Commands::ValidateFeeRate { fee_rate } => (GuideAction::ValidateFeeRate, vec![fee_rate]),
            Commands::ValidateFee { fee, input_total } => {
                (GuideAction::ValidateFee, vec![fee, input_total])
            }
            Commands::EstimateFee {
                address_type,
                inputs,
                outputs,
                required,
                total,
                fee_rate,
            } => (
                GuideAction::EstimateFee,
                vec![address_type, inputs, outputs, required, total, fee_rate],
            ),
            Commands::MultisigAddress {
                address_type,
                required,
                pubkeys,
            } => (
                GuideAction::MultisigAddress,
                vec![address_type, required, pubkeys.join(",")],
            ),
            Commands::VerifySignature {
                pubkey,
                msg_hash,
                signature,
            } => (GuideAction::VerifySignature, vec![pubkey, msg_hash, signature]),
            Commands::PsbtCreate {
                txid,
                vout,
                address,
                amount,
            } => (GuideAction::CreatePsbt, vec![txid, vout, address, amount]),
            Commands::PsbtAddSig {
                psbt,
                input_index,
                pubkey,
                signature,
            } => (
                GuideAction::AddPartialSig,
                vec![psbt, input_index, pubkey, signature],
            ),
            Commands::PsbtInspect { psbt } => (GuideAction::InspectPsbt, vec![psbt]),
            Commands::Tui { .. } => return None,
        };
        Some((action, inputs))
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = GuideConfig::load(cli.config.as_deref())?;
    if let Some(network) = cli.network {
        config.network = network;
    }

    if let Commands::Tui { route } = &cli.command {
        logging::init(&config, LogTarget::File)?;
        tui::run_tui(config, route)?;
        return Ok(ExitCode::SUCCESS);
    }

    if let Some((action, inputs)) = cli.command.into_action() {
        logging::init(&config, LogTarget::Stderr)?;
        let output = action.run(&inputs, config.network);
        println!("{}", output);
        // Validation problems are answers; only failed operations exit non-zero
        if output.starts_with("Error:") {
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}
