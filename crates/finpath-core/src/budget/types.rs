//! Core types for the Budget Analyzer

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{Period, Transaction};
use crate::money::Money;

/// Totals for one category within one analysis period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    /// Index into the period list passed to the analyzer (a zero row for the
    /// period before the first one reuses index 0)
    pub period_index: usize,
    pub period: Period,
    /// Sum of signed amounts
    pub total: Money,
    pub count: usize,
    /// Same category's total in the previous period, if it had any transactions
    pub prior_total: Option<Money>,
}

impl CategorySummary {
    /// A zero row for a category with no transactions in a period
    pub fn empty(category: impl Into<String>, period_index: usize, period: Period) -> Self {
        Self {
            category: category.into(),
            period_index,
            period,
            total: 0,
            count: 0,
            prior_total: None,
        }
    }

    /// Spending magnitude (zero when the category is a net inflow)
    pub fn outflow(&self) -> Money {
        (-self.total).max(0)
    }

    pub fn prior_outflow(&self) -> Money {
        self.prior_total.map(|t| (-t).max(0)).unwrap_or(0)
    }
}

/// Kinds of budget insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Category spending over its threshold this period
    Overspend,
    /// Sustained change across consecutive periods
    Trend,
    /// Single transaction far outside the category's usual size
    Anomaly,
    /// Inflow exceeded outflow this period
    Savings,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Overspend => "overspend",
            InsightKind::Trend => "trend",
            InsightKind::Anomaly => "anomaly",
            InsightKind::Savings => "savings",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overspend" => Ok(InsightKind::Overspend),
            "trend" => Ok(InsightKind::Trend),
            "anomaly" => Ok(InsightKind::Anomaly),
            "savings" => Ok(InsightKind::Savings),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// Direction of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Severity level of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Worth attention but not urgent
    Attention,
    /// Should be addressed soon
    Warning,
    /// Requires immediate attention
    Alert,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Attention => "attention",
            Severity::Warning => "warning",
            Severity::Alert => "alert",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Attention => 2,
            Severity::Warning => 3,
            Severity::Alert => 4,
        }
    }

    /// Severity for a percentage change: >100% alert, >50% warning, >30% attention
    pub fn for_percent(percent: Decimal) -> Self {
        let percent = percent.abs();
        if percent > Decimal::ONE_HUNDRED {
            Severity::Alert
        } else if percent > Decimal::from(50) {
            Severity::Warning
        } else if percent > Decimal::from(30) {
            Severity::Attention
        } else {
            Severity::Info
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An evidence-carrying insight produced by the analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    /// None for whole-budget insights
    pub category: Option<String>,
    /// Percent for overspend/trend/savings, standard deviations for anomalies
    pub magnitude: Decimal,
    pub direction: Option<Direction>,
    /// Summary rows that justify the insight
    pub evidence: Vec<CategorySummary>,
    /// The offending transaction (anomalies only)
    pub transaction: Option<Transaction>,
    pub severity: Severity,
    pub title: String,
    pub summary: String,
}

impl Insight {
    pub fn new(
        kind: InsightKind,
        category: Option<String>,
        magnitude: Decimal,
        severity: Severity,
        title: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            category,
            magnitude,
            direction: None,
            evidence: Vec::new(),
            transaction: None,
            severity,
            title: title.into(),
            summary: summary.into(),
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_evidence(mut self, evidence: Vec<CategorySummary>) -> Self {
        self.evidence = evidence;
        self
    }

    pub fn with_transaction(mut self, transaction: Transaction) -> Self {
        self.transaction = Some(transaction);
        self
    }
}

/// Whole-budget figures for the current (last) period
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetOverview {
    pub period: Option<Period>,
    pub total_inflow: Money,
    pub total_outflow: Money,
    pub net: Money,
    pub transaction_count: usize,
    /// Mean outflow transaction size (rounded down)
    pub average_outflow: Money,
    /// Category with the largest outflow
    pub top_category: Option<String>,
}

impl BudgetOverview {
    /// Monthly surplus available to the debt simulator and goal planner
    pub fn disposable_income(&self) -> Money {
        self.net.max(0)
    }

    /// Net as a percentage of inflow
    pub fn savings_rate(&self) -> Option<Decimal> {
        crate::money::percent_of(self.net, self.total_inflow)
    }
}

/// Full analyzer output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetReport {
    pub periods: Vec<Period>,
    pub summaries: Vec<CategorySummary>,
    pub insights: Vec<Insight>,
    pub overview: BudgetOverview,
}

impl BudgetReport {
    /// Summaries for one period, ordered by category
    pub fn summaries_for(&self, period_index: usize) -> impl Iterator<Item = &CategorySummary> {
        self.summaries
            .iter()
            .filter(move |s| s.period_index == period_index)
    }

    pub fn insights_of(&self, kind: InsightKind) -> impl Iterator<Item = &Insight> {
        self.insights.iter().filter(move |i| i.kind == kind)
    }

    pub fn disposable_income(&self) -> Money {
        self.overview.disposable_income()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insight_kind_round_trip() {
        assert_eq!(InsightKind::Overspend.as_str(), "overspend");
        assert_eq!(
            InsightKind::from_str("anomaly").unwrap(),
            InsightKind::Anomaly
        );
        assert!(InsightKind::from_str("mystery").is_err());
    }

    #[test]
    fn test_severity_priority() {
        assert!(Severity::Alert.priority() > Severity::Warning.priority());
        assert!(Severity::Warning.priority() > Severity::Attention.priority());
        assert!(Severity::Attention.priority() > Severity::Info.priority());
    }

    #[test]
    fn test_severity_for_percent() {
        assert_eq!(Severity::for_percent(dec!(42.8)), Severity::Attention);
        assert_eq!(Severity::for_percent(dec!(-75)), Severity::Warning);
        assert_eq!(Severity::for_percent(dec!(21)), Severity::Info);
        assert_eq!(Severity::for_percent(dec!(100)), Severity::Warning);
        assert_eq!(Severity::for_percent(dec!(100.01)), Severity::Alert);
    }

    #[test]
    fn test_summary_outflow_ignores_inflows() {
        let period = Period::month(2026, 1).unwrap();
        let mut summary = CategorySummary::empty("Salary", 0, period);
        summary.total = 500_000;
        summary.prior_total = Some(-1_000);
        assert_eq!(summary.outflow(), 0);
        assert_eq!(summary.prior_outflow(), 1_000);
    }
}
