//! stellar-wire - Stellar keys, addresses and transaction envelopes from the
//! command line.
//!
//! Envelopes are read from stdin as base64 XDR. Environment overrides:
//! `STELLAR_NETWORK_PASSPHRASE`, `STELLAR_XDR_MAX_DEPTH`,
//! `STELLAR_XDR_MAX_LEN`, `STELLAR_WIRE_DEBUG`.

use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use stellar_wire::strkey::{self, VersionByte};
use stellar_wire::types::{EnvelopeSummary, KeyPairResponse, NetworkSelector};
use stellar_wire::utils::config::CodecConfig;
use stellar_wire::xdr::{ReadXdr, TransactionEnvelope, WriteXdr};
use stellar_wire::{KeyPair, Network};

#[derive(Parser, Debug)]
#[command(name = "stellar-wire", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a random key pair
    Keygen {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Encode or decode StrKey addresses
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// Print the id of a network
    NetworkId {
        #[command(flatten)]
        network: NetworkArgs,
    },
    /// Sign an envelope read from stdin and print the result
    Sign {
        /// Secret seed (S...)
        #[arg(short, long)]
        secret: String,
        #[command(flatten)]
        network: NetworkArgs,
    },
    /// Print the transaction hash of an envelope read from stdin
    Hash {
        #[command(flatten)]
        network: NetworkArgs,
    },
    /// Check that an account signed the envelope read from stdin
    Verify {
        /// Account id (G...)
        #[arg(short, long)]
        account: String,
        #[command(flatten)]
        network: NetworkArgs,
    },
    /// Print a JSON summary of an envelope read from stdin
    Inspect {
        #[command(flatten)]
        network: NetworkArgs,
    },
}

#[derive(Subcommand, Debug)]
enum AddressAction {
    /// Decode any StrKey into its kind and hex payload
    Decode { address: String },
    /// Encode a hex payload as a StrKey
    Encode {
        #[arg(short, long, value_enum, default_value = "account-id")]
        kind: AddressKind,
        payload_hex: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum AddressKind {
    AccountId,
    SecretSeed,
    PreAuthTx,
    Sha256Hash,
    MuxedAccount,
    SignedPayload,
}

impl From<AddressKind> for VersionByte {
    fn from(kind: AddressKind) -> Self {
        match kind {
            AddressKind::AccountId => VersionByte::AccountId,
            AddressKind::SecretSeed => VersionByte::SecretSeed,
            AddressKind::PreAuthTx => VersionByte::PreAuthTx,
            AddressKind::Sha256Hash => VersionByte::Sha256Hash,
            AddressKind::MuxedAccount => VersionByte::MuxedAccount,
            AddressKind::SignedPayload => VersionByte::SignedPayload,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct NetworkArgs {
    /// Network name: public, testnet, futurenet or standalone
    #[arg(short, long, conflicts_with = "passphrase")]
    network: Option<String>,

    /// Full network passphrase
    #[arg(short, long)]
    passphrase: Option<String>,
}

impl NetworkArgs {
    fn resolve(&self, config: &CodecConfig) -> Result<Network> {
        let selector = NetworkSelector {
            network: self.network.clone(),
            passphrase: self.passphrase.clone(),
        };
        Ok(selector.resolve(config.network())?)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CodecConfig::from_env()?;
    config.apply_logging();

    match cli.command {
        Command::Keygen { json } => keygen(json),
        Command::Address { action } => address(action),
        Command::NetworkId { network } => {
            let network = network.resolve(&config)?;
            println!("{}", network.id());
            Ok(())
        }
        Command::Sign { secret, network } => {
            let network = network.resolve(&config)?;
            let keypair = KeyPair::from_secret_seed(&secret).context("invalid secret seed")?;
            let mut envelope = read_envelope(&config)?;
            envelope.sign(&keypair, network.id())?;
            println!("{}", envelope.to_xdr_base64()?);
            Ok(())
        }
        Command::Hash { network } => {
            let network = network.resolve(&config)?;
            let envelope = read_envelope(&config)?;
            println!("{}", hex::encode(envelope.hash(network.id())?));
            Ok(())
        }
        Command::Verify { account, network } => {
            let network = network.resolve(&config)?;
            let keypair = KeyPair::from_account_id(&account).context("invalid account id")?;
            let envelope = read_envelope(&config)?;
            if !envelope.verify_signature(&keypair, network.id())? {
                bail!("no valid signature from {}", keypair.account_id());
            }
            println!("valid");
            Ok(())
        }
        Command::Inspect { network } => {
            let network = network.resolve(&config)?;
            let envelope = read_envelope(&config)?;
            let summary = EnvelopeSummary::from_envelope(&envelope, network.id())?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
    }
}

fn keygen(json: bool) -> Result<()> {
    let keypair = KeyPair::generate()?;
    let secret_seed = keypair.secret_seed()?;

    if json {
        let response = KeyPairResponse {
            account_id: keypair.account_id(),
            secret_seed: secret_seed.as_str().to_string(),
            public_key_hex: hex::encode(keypair.public_key()),
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("Account ID:  {}", keypair.account_id());
        println!("Secret seed: {}", secret_seed.as_str());
    }
    Ok(())
}

fn address(action: AddressAction) -> Result<()> {
    match action {
        AddressAction::Decode { address } => {
            let (version, payload) = strkey::decode(address.trim())?;
            println!("{}", version.name());
            println!("{}", hex::encode(payload));
        }
        AddressAction::Encode { kind, payload_hex } => {
            let payload = hex::decode(payload_hex.trim()).context("payload is not hex")?;
            println!("{}", strkey::encode(kind.into(), &payload)?);
        }
    }
    Ok(())
}

fn read_envelope(config: &CodecConfig) -> Result<TransactionEnvelope> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read envelope from stdin")?;
    if input.trim().is_empty() {
        bail!("expected a base64 envelope on stdin");
    }
    Ok(TransactionEnvelope::from_xdr_base64_with_limits(
        &input,
        config.limits(),
    )?)
}

