//! trader-dna: build DNA reports for one or more wallets.
//!
//! Each input is a JSON `WalletInput` document (returns, benchmark, trade
//! ledger). Wallets are analyzed in parallel; the report(s) are written as
//! pretty JSON to stdout or `--output`.
//!
//! Usage:
//!   trader-dna --input wallet.json
//!   trader-dna --input a.json --input b.json --locale zh --output reports.json
//!   trader-dna --input wallet.json --now 2024-06-30T00:00:00Z

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use dna_core::{EngineConfig, Locale};
use dna_report::{analyze_wallet, DnaReport, WalletInput};
use rayon::prelude::*;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trader_dna=info,dna_report=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let inputs: Vec<&str> = args
        .iter()
        .enumerate()
        .filter(|(_, a)| *a == "--input")
        .filter_map(|(i, _)| args.get(i + 1))
        .map(|s| s.as_str())
        .collect();
    if inputs.is_empty() {
        bail!("usage: trader-dna --input <wallet.json> [--input ...] [--now <rfc3339>] [--locale en|zh] [--output <path>]");
    }

    let now: DateTime<Utc> = match flag_value(&args, "--now") {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("invalid --now '{}'", raw))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let mut config = EngineConfig::from_env().context("loading DNA_* configuration")?;
    if let Some(raw) = flag_value(&args, "--locale") {
        config.locale = raw.parse::<Locale>()?;
    }

    let wallets = inputs
        .iter()
        .map(WalletInput::from_json_file)
        .collect::<anyhow::Result<Vec<_>>>()?;

    tracing::info!(
        "Analyzing {} wallet(s) as of {} (locale: {})",
        wallets.len(),
        now.to_rfc3339(),
        config.locale.code()
    );

    let reports: Vec<DnaReport> = wallets
        .par_iter()
        .map(|wallet| analyze_wallet(wallet, &config, now))
        .collect();

    let json = if reports.len() == 1 {
        serde_json::to_string_pretty(&reports[0])?
    } else {
        serde_json::to_string_pretty(&reports)?
    };

    match flag_value(&args, "--output") {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path))?;
            tracing::info!("Wrote {} report(s) to {}", reports.len(), path);
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
