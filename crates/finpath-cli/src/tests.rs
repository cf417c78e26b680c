//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use finpath_core::{Debt, Goal, Strategy};
use tempfile::TempDir;

use crate::commands::{self, truncate};

const TRANSACTIONS_CSV: &str = "date,amount,category,description
2026-03-01,450000,Salary,ACME PAYROLL
2026-03-05,-70000,Dining,BISTRO
2026-03-09,-60000,Groceries,MARKET
2026-04-01,450000,Salary,ACME PAYROLL
2026-04-05,-100000,Dining,BISTRO
2026-04-09,-62000,Groceries,MARKET
";

const DEBTS_JSON: &str = r#"[
  {"id": "card", "name": "Credit card", "principal": 250000, "annual_rate": "0.2199", "minimum_payment": 7500},
  {"id": "car", "principal": 600000, "annual_rate": 0.069, "minimum_payment": 15000}
]"#;

const GOALS_JSON: &str = r#"[
  {"id": "fund", "name": "Emergency fund", "target_amount": 300000, "target_date": "2027-04-01", "priority": 1},
  {"id": "trip", "name": "Trip", "target_amount": 150000, "priority": 2, "current_saved": 20000}
]"#;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Config file pinned inside the temp dir so tests never read the user's override
fn write_config(dir: &TempDir) -> PathBuf {
    write_file(dir, "engine.toml", "[debt]\nhorizon_months = 600\n")
}

fn config_of(path: &Path) -> Option<&Path> {
    Some(path)
}

// ========== Input Helper Tests ==========

#[test]
fn test_read_transactions() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "tx.csv", TRANSACTIONS_CSV);

    let transactions = commands::read_transactions(&path).unwrap();
    assert_eq!(transactions.len(), 6);
    assert_eq!(transactions[1].amount, -70_000);
    assert_eq!(transactions[1].category, "Dining");
    assert_eq!(transactions[1].description, "BISTRO");
}

#[test]
fn test_read_transactions_without_description_column() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "tx.csv", "date,amount,category\n2026-04-02,-1500,Coffee\n");

    let transactions = commands::read_transactions(&path).unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].description, "");
}

#[test]
fn test_read_transactions_reports_bad_row() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "tx.csv",
        "date,amount,category\n2026-04-02,-1500,Coffee\n2026-04-03,twelve,Coffee\n",
    );

    let err = commands::read_transactions(&path).unwrap_err();
    assert!(err.to_string().contains("row 3"));
}

#[test]
fn test_read_debts_and_goals_json() {
    let dir = TempDir::new().unwrap();
    let debts_path = write_file(&dir, "debts.json", DEBTS_JSON);
    let goals_path = write_file(&dir, "goals.json", GOALS_JSON);

    let debts: Vec<Debt> = commands::read_json(&debts_path, "debts").unwrap();
    assert_eq!(debts.len(), 2);
    assert_eq!(debts[0].display_name(), "Credit card");
    assert_eq!(debts[1].display_name(), "car");
    assert_eq!(debts[1].annual_rate.to_string(), "0.069");

    let goals: Vec<Goal> = commands::read_json(&goals_path, "goals").unwrap();
    assert_eq!(goals[0].target_date, NaiveDate::from_ymd_opt(2027, 4, 1));
    assert_eq!(goals[1].current_saved, 20_000);
}

#[test]
fn test_read_json_missing_file() {
    let dir = TempDir::new().unwrap();
    let result: anyhow::Result<Vec<Debt>> =
        commands::read_json(&dir.path().join("absent.json"), "debts");
    assert!(result.is_err());
}

#[test]
fn test_resolve_date() {
    assert_eq!(
        commands::resolve_date(Some("2026-04-30"), "as-of").unwrap(),
        NaiveDate::from_ymd_opt(2026, 4, 30).unwrap()
    );
    assert!(commands::resolve_date(Some("04/30/2026"), "as-of").is_err());
    assert!(commands::resolve_date(None, "as-of").is_ok());
}

#[test]
fn test_parse_strategy() {
    assert_eq!(commands::parse_strategy("Snowball").unwrap(), Strategy::Snowball);
    let err = commands::parse_strategy("fastest").unwrap_err();
    assert!(err.to_string().contains("Available"));
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("Groceries", 20), "Groceries");
    assert_eq!(truncate("Home improvement supplies", 10), "Home im...");
}

// ========== Budget Command Tests ==========

#[test]
fn test_cmd_budget() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);
    let path = write_file(&dir, "tx.csv", TRANSACTIONS_CSV);

    let result = commands::cmd_budget(config_of(&config), &path, 2, Some("2026-04-30"), false);
    assert!(result.is_ok());

    let result = commands::cmd_budget(config_of(&config), &path, 2, Some("2026-04-30"), true);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_budget_rejects_zero_months() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);
    let path = write_file(&dir, "tx.csv", TRANSACTIONS_CSV);
    assert!(commands::cmd_budget(config_of(&config), &path, 0, None, false).is_err());
}

// ========== Debt Command Tests ==========

#[test]
fn test_cmd_debt_single_strategy() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);
    let path = write_file(&dir, "debts.json", DEBTS_JSON);

    for strategy in ["avalanche", "snowball", "hybrid"] {
        let result = commands::cmd_debt(
            config_of(&config),
            &path,
            60_000,
            strategy,
            Some("2026-05-01"),
            false,
        );
        assert!(result.is_ok(), "{} failed", strategy);
    }
}

#[test]
fn test_cmd_debt_compare_json() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);
    let path = write_file(&dir, "debts.json", DEBTS_JSON);

    let result = commands::cmd_debt(
        config_of(&config),
        &path,
        60_000,
        "compare",
        Some("2026-05-01"),
        true,
    );
    assert!(result.is_ok());
}

#[test]
fn test_cmd_debt_insufficient_budget() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);
    let path = write_file(&dir, "debts.json", DEBTS_JSON);

    let err = commands::cmd_debt(config_of(&config), &path, 10_000, "avalanche", None, false)
        .unwrap_err();
    let chain = format!("{:#}", err);
    assert!(chain.contains("Insufficient budget"));
}

#[test]
fn test_cmd_debt_unknown_strategy() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);
    let path = write_file(&dir, "debts.json", DEBTS_JSON);
    assert!(commands::cmd_debt(config_of(&config), &path, 60_000, "fastest", None, false).is_err());
}

// ========== Goals Command Tests ==========

#[test]
fn test_cmd_goals() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);
    let path = write_file(&dir, "goals.json", GOALS_JSON);

    for json in [false, true] {
        let result =
            commands::cmd_goals(config_of(&config), &path, 40_000, Some("2026-05-01"), json);
        assert!(result.is_ok());
    }
}

#[test]
fn test_cmd_goals_no_surplus() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);
    let path = write_file(&dir, "goals.json", GOALS_JSON);

    let err = commands::cmd_goals(config_of(&config), &path, -100, Some("2026-05-01"), false)
        .unwrap_err();
    assert!(format!("{:#}", err).contains("No surplus"));
}

// ========== Plan Command Tests ==========

#[test]
fn test_cmd_plan() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);
    let debts = write_file(&dir, "debts.json", DEBTS_JSON);
    let goals = write_file(&dir, "goals.json", GOALS_JSON);

    for json in [false, true] {
        let result = commands::cmd_plan(
            config_of(&config),
            &debts,
            &goals,
            90_000,
            "avalanche",
            Some("2026-05-01"),
            json,
        );
        assert!(result.is_ok());
    }
}

#[test]
fn test_cmd_plan_surplus_below_minimums() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);
    let debts = write_file(&dir, "debts.json", DEBTS_JSON);
    let goals = write_file(&dir, "goals.json", GOALS_JSON);

    let result = commands::cmd_plan(
        config_of(&config),
        &debts,
        &goals,
        20_000,
        "snowball",
        Some("2026-05-01"),
        false,
    );
    assert!(result.is_err());
}

// ========== Config Command Tests ==========

#[test]
fn test_cmd_config() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);
    assert!(commands::cmd_config(config_of(&config)).is_ok());
}

#[test]
fn test_cmd_config_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(commands::cmd_config(Some(&missing)).is_err());
}

#[test]
fn test_invalid_config_fails_commands() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "engine.toml", "[budget]\nanomaly_sigma = 0\n");
    let path = write_file(&dir, "tx.csv", TRANSACTIONS_CSV);
    assert!(commands::cmd_budget(config_of(&config), &path, 2, None, false).is_err());
}
