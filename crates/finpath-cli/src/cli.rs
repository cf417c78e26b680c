//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Finpath - Plan budgets, debt payoff and savings goals
#[derive(Parser)]
#[command(name = "finpath")]
#[command(about = "Deterministic budget, debt and goal planner", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine config file
    ///
    /// Defaults to ~/.config/finpath/engine.toml when present, otherwise the
    /// built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze categorized transactions for overspending, trends and anomalies
    Budget {
        /// CSV with columns date,amount,category[,description] (amount in minor units)
        #[arg(short, long)]
        transactions: PathBuf,

        /// Number of monthly periods ending with the as-of month
        #[arg(short, long, default_value = "3")]
        months: u32,

        /// Analysis date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Simulate paying off debts with a fixed monthly budget
    Debt {
        /// JSON array of debts
        #[arg(short, long)]
        debts: PathBuf,

        /// Monthly budget in minor units
        #[arg(short, long)]
        budget: i64,

        /// Strategy: avalanche, snowball, hybrid, compare
        #[arg(short, long, default_value = "avalanche")]
        strategy: String,

        /// First payment month (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        start: Option<String>,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Allocate a monthly surplus across savings goals
    Goals {
        /// JSON array of goals
        #[arg(short, long)]
        goals: PathBuf,

        /// Monthly surplus in minor units
        #[arg(long, allow_hyphen_values = true)]
        surplus: i64,

        /// Planning date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Split one monthly surplus between debt payoff and goals
    Plan {
        /// JSON array of debts
        #[arg(short, long)]
        debts: PathBuf,

        /// JSON array of goals
        #[arg(short, long)]
        goals: PathBuf,

        /// Monthly surplus in minor units
        #[arg(long, allow_hyphen_values = true)]
        surplus: i64,

        /// Strategy: avalanche, snowball, hybrid
        #[arg(short, long, default_value = "avalanche")]
        strategy: String,

        /// Planning date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved engine configuration
    Config,
}
