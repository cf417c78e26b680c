//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `budget` - Spending analysis over trailing monthly periods
//! - `config` - Resolved configuration display
//! - `core` - Shared utilities (config loading, input readers, dates, JSON output)
//! - `debt` - Debt payoff simulation and strategy comparison
//! - `goals` - Savings goal allocation
//! - `plan` - Joint debt and goal planning

pub mod budget;
pub mod config;
pub mod core;
pub mod debt;
pub mod goals;
pub mod plan;

// Re-export command functions for main.rs
pub use budget::*;
pub use config::*;
pub use core::*;
pub use debt::*;
pub use goals::*;
pub use plan::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
