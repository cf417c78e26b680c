//! Debt Simulator - multi-strategy payoff simulation
//!
//! Given a set of debts and a fixed monthly budget, simulates month-by-month
//! payoff where every debt receives its minimum and the surplus goes to one
//! focus debt chosen by strategy:
//!
//! - **Avalanche** - highest interest rate first (least total interest)
//! - **Snowball** - smallest balance first (fastest individual wins)
//! - **Hybrid** - largest composite interest-cost metric first
//!
//! Schedules report per-debt balances, interest and payments per month, and
//! the interest and months saved against paying only the minimums.

pub mod advice;
pub mod simulator;
pub mod strategy;
pub mod types;

pub use advice::{debt_insights, payoff_milestones, DebtInsight};
pub use simulator::{
    compare_strategies, simulate, total_minimums, validate_debts, DebtSimulator, SimulatorConfig,
};
pub use types::{
    BaselineComparison, DebtMonth, DebtOutcome, HybridMetric, PayoffMilestone, PayoffSchedule,
    ScheduleMonth, Strategy, StrategyComparison, StrategyOutcome,
};
