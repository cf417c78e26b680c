//! Shared utilities for commands
//!
//! This module contains:
//! - `load_config` - Resolve the engine configuration
//! - `read_transactions` / `read_json` - Input file readers
//! - `resolve_date` - Parse a date flag, defaulting to today
//! - `print_json` - Fingerprinted JSON output

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use finpath_core::{fingerprint, ConfigSource, EngineConfig, Strategy, Transaction};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Load config from an explicit path, the user override, or built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<(EngineConfig, ConfigSource)> {
    let (config, source) = EngineConfig::load(path).context("Failed to load engine config")?;
    debug!(source = %source, "Engine config loaded");
    Ok((config, source))
}

/// Parse a YYYY-MM-DD flag value, or today when absent
pub fn resolve_date(value: Option<&str>, flag: &str) -> Result<NaiveDate> {
    match value {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid --{} date format (use YYYY-MM-DD)", flag)),
        None => Ok(Utc::now().date_naive()),
    }
}

pub fn parse_strategy(name: &str) -> Result<Strategy> {
    name.parse::<Strategy>().map_err(|e| {
        anyhow::anyhow!("{}. Available: avalanche, snowball, hybrid", e)
    })
}

/// Read normalized transactions from CSV (date,amount,category[,description])
pub fn read_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut transactions = Vec::new();
    for (i, row) in reader.deserialize::<Transaction>().enumerate() {
        // Row 1 is the header
        let tx = row.with_context(|| format!("Invalid transaction on row {}", i + 2))?;
        transactions.push(tx);
    }
    debug!(count = transactions.len(), path = %path.display(), "Read transactions");
    Ok(transactions)
}

/// Read a JSON document (debts or goals)
pub fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file {}", what, path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid {} JSON in {}", what, path.display()))
}

/// Print `value` as pretty JSON alongside its content fingerprint
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let fingerprint = fingerprint(value)?;
    let output = serde_json::json!({
        "fingerprint": fingerprint,
        "result": value,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
