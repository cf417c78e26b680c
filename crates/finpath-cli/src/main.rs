//! Finpath CLI - Deterministic personal finance planner
//!
//! Usage:
//!   finpath budget --transactions CSV           Analyze spending
//!   finpath debt --debts JSON --budget N        Simulate debt payoff
//!   finpath goals --goals JSON --surplus N      Plan savings goals
//!   finpath plan --debts JSON --goals JSON ...  Split surplus across both
//!   finpath config                              Show resolved configuration

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Budget {
            transactions,
            months,
            as_of,
            json,
        } => commands::cmd_budget(config_path, &transactions, months, as_of.as_deref(), json),
        Commands::Debt {
            debts,
            budget,
            strategy,
            start,
            json,
        } => commands::cmd_debt(
            config_path,
            &debts,
            budget,
            &strategy,
            start.as_deref(),
            json,
        ),
        Commands::Goals {
            goals,
            surplus,
            as_of,
            json,
        } => commands::cmd_goals(config_path, &goals, surplus, as_of.as_deref(), json),
        Commands::Plan {
            debts,
            goals,
            surplus,
            strategy,
            as_of,
            json,
        } => commands::cmd_plan(
            config_path,
            &debts,
            &goals,
            surplus,
            &strategy,
            as_of.as_deref(),
            json,
        ),
        Commands::Config => commands::cmd_config(config_path),
    }
}
