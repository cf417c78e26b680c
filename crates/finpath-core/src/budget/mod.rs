//! Budget Analyzer - category summaries and evidence-based insights
//!
//! Aggregates normalized transactions into per-period category totals and
//! derives insights that always cite the rows justifying them:
//!
//! - **Overspend** - category spending over a threshold this period
//! - **Trend** - sustained change across consecutive periods
//! - **Anomaly** - a single charge far outside the category's usual size
//! - **Savings** - inflow exceeded outflow this period
//!
//! ## Usage
//!
//! ```rust,ignore
//! use finpath_core::budget::{analyze, AnalyzerConfig};
//! use finpath_core::models::Period;
//!
//! let periods = Period::trailing_months(as_of, 3);
//! let report = analyze(&transactions, &periods, &AnalyzerConfig::default())?;
//! let surplus = report.disposable_income();
//! ```

pub mod analyzer;
pub mod rules;
pub mod summary;
pub mod types;

pub use analyzer::{analyze, AnalyzerConfig, BudgetAnalyzer, OverspendThreshold};
pub use summary::validate_periods;
pub use types::{
    BudgetOverview, BudgetReport, CategorySummary, Direction, Insight, InsightKind, Severity,
};
