//! Finpath Core Library
//!
//! Deterministic planning engine for personal finances:
//! - Budget analyzer: per-category summaries and ranked insights
//!   (overspend, trends, anomalies, savings)
//! - Debt simulator: avalanche, snowball and hybrid payoff schedules
//! - Goal planner: priority water-filling of a monthly surplus with
//!   feasibility verdicts, projected completion dates and a feasibility score
//! - Joint planner: one surplus split between debts and goals
//!
//! All amounts are integer minor currency units (`Money`); rates and
//! percentages are exact decimals. Every operation is a pure function of its
//! inputs and an explicit configuration.

pub mod budget;
pub mod config;
pub mod debt;
pub mod error;
pub mod fingerprint;
pub mod goals;
pub mod joint;
pub mod models;
pub mod money;

pub use budget::{
    analyze, AnalyzerConfig, BudgetAnalyzer, BudgetOverview, BudgetReport, CategorySummary,
    Direction, Insight, InsightKind, OverspendThreshold, Severity,
};
pub use config::{default_config_path, parse_config, ConfigSource, EngineConfig};
pub use debt::{
    compare_strategies, debt_insights, payoff_milestones, simulate, DebtInsight, DebtSimulator,
    HybridMetric, PayoffMilestone, PayoffSchedule, SimulatorConfig, Strategy, StrategyComparison,
};
pub use error::{Error, Result, UnreachableReason};
pub use fingerprint::fingerprint;
pub use goals::{
    feasibility_score, goal_insights, plan, scenarios, AllocationPlan, Feasibility,
    GoalAllocation, GoalInsight, GoalMilestone, GoalPlanner, GoalScenario, PlannerConfig,
};
pub use joint::{plan_jointly, JointPlan};
pub use models::{Debt, Goal, Period, Transaction};
pub use money::{format_minor, Money};
