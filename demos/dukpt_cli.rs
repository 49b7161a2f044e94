//! DUKPT demo CLI
//!
//! Derives keys and encrypts single transaction blocks from hex input.
//!
//! # Usage
//!
//! ```bash
//! # Full sample flow: IPEK, session key, encrypt and decrypt "12345678"
//! dukpt_cli demo
//!
//! # Individual steps
//! dukpt_cli ipek --bdk <hex> --ksn <hex>
//! dukpt_cli derive --bdk <hex> --ksn <hex>
//! dukpt_cli encrypt --ksn <hex> <data-hex>
//! dukpt_cli decrypt --ksn <hex> <data-hex>
//! ```
//!
//! # Environment Variables
//!
//! - `DUKPT_BDK` - Base Derivation Key (hex), used when `--bdk` is absent
//! - `DUKPT_KSN` - Key Serial Number (hex), used when `--ksn` is absent
//! - `RUST_LOG` - log filter, defaults to `info`
//!
//! ```bash
//! RUST_LOG=dukpt=trace cargo run --example dukpt_cli -- --json demo
//! ```

use clap::{Parser, Subcommand};
use dukpt::{
    decrypt_data, derive_transaction_key, encrypt_data, generate_ipek, DukptError, Ksn, TdesKey,
};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const SAMPLE_BDK: &str = "0123456789ABCDEFFEDCBA9876543210";
const SAMPLE_KSN: &str = "FFFF9876543210E00001";
const SAMPLE_DATA: &str = "3132333435363738";

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "dukpt_cli")]
#[command(about = "DUKPT key derivation and transaction encryption")]
#[command(version = "0.1.0")]
struct Cli {
    /// Base Derivation Key (hex)
    #[arg(long, global = true)]
    bdk: Option<String>,
    /// Key Serial Number (hex)
    #[arg(long, global = true)]
    ksn: Option<String>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the IPEK
    Ipek,
    /// Derive the transaction key for the KSN counter
    Derive,
    /// Encrypt one 8-byte block under the transaction key
    Encrypt {
        /// Plaintext block (hex)
        data: String,
    },
    /// Decrypt one 8-byte block under the transaction key
    Decrypt {
        /// Ciphertext block (hex)
        data: String,
    },
    /// Run the sample end-to-end flow
    Demo,
}

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug)]
struct Config {
    bdk: String,
    ksn: String,
}

impl Config {
    fn from_env() -> Self {
        Self {
            bdk: std::env::var("DUKPT_BDK").unwrap_or_else(|_| SAMPLE_BDK.to_string()),
            ksn: std::env::var("DUKPT_KSN").unwrap_or_else(|_| SAMPLE_KSN.to_string()),
        }
    }

    fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(bdk) = &cli.bdk {
            self.bdk = bdk.clone();
        }
        if let Some(ksn) = &cli.ksn {
            self.ksn = ksn.clone();
        }
        self
    }
}

// ============================================================================
// Output
// ============================================================================

#[derive(Debug, Default, Serialize)]
struct Report {
    ksn: String,
    counter: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    ipek: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    encrypted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decrypted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decrypted_ascii: Option<String>,
}

impl Report {
    fn print(&self, json: bool) -> Result<(), serde_json::Error> {
        if json {
            println!("{}", serde_json::to_string_pretty(self)?);
            return Ok(());
        }
        println!("KSN: {} (counter {})", self.ksn, self.counter);
        let lines = [
            ("IPEK", &self.ipek),
            ("Session Key", &self.session_key),
            ("Encrypted Data", &self.encrypted),
            ("Decrypted Data (Hex)", &self.decrypted),
            ("Decrypted Data (ASCII)", &self.decrypted_ascii),
        ];
        for (label, value) in lines {
            if let Some(value) = value {
                println!("{}: {}", label, value);
            }
        }
        Ok(())
    }
}

// ============================================================================
// Commands
// ============================================================================

fn keys(config: &Config) -> Result<(Ksn, TdesKey, TdesKey), DukptError> {
    let bdk = hex::decode(config.bdk.trim())?;
    let ksn: Ksn = config.ksn.parse()?;
    let ipek = generate_ipek(&bdk, ksn.as_ref())?;
    let session_key = derive_transaction_key(&ipek, ksn.as_ref())?;
    debug!(ksn = %ksn, counter = ksn.counter(), "derived keys");
    Ok((ksn, ipek, session_key))
}

fn run(cli: &Cli, config: &Config) -> Result<Report, DukptError> {
    let (ksn, ipek, session_key) = keys(config)?;
    let mut report = Report {
        ksn: ksn.to_string(),
        counter: ksn.counter(),
        ..Default::default()
    };

    match &cli.command {
        Commands::Ipek => {
            report.ipek = Some(ipek.to_hex());
        }
        Commands::Derive => {
            report.session_key = Some(session_key.to_hex());
        }
        Commands::Encrypt { data } => {
            let encrypted = encrypt_data(&session_key, &hex::decode(data.trim())?)?;
            report.encrypted = Some(hex::encode_upper(encrypted));
        }
        Commands::Decrypt { data } => {
            let decrypted = decrypt_data(&session_key, &hex::decode(data.trim())?)?;
            report.decrypted = Some(hex::encode_upper(decrypted));
            report.decrypted_ascii = Some(String::from_utf8_lossy(&decrypted).into_owned());
        }
        Commands::Demo => {
            info!("running sample DUKPT flow");
            let data = hex::decode(SAMPLE_DATA)?;
            let encrypted = encrypt_data(&session_key, &data)?;
            let decrypted = decrypt_data(&session_key, &encrypted)?;

            report.ipek = Some(ipek.to_hex());
            report.session_key = Some(session_key.to_hex());
            report.encrypted = Some(hex::encode_upper(encrypted));
            report.decrypted = Some(hex::encode_upper(decrypted));
            report.decrypted_ascii = Some(String::from_utf8_lossy(&decrypted).into_owned());
        }
    }

    Ok(report)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().with_overrides(&cli);

    let report = run(&cli, &config)?;
    report.print(cli.json)?;
    Ok(())
}
