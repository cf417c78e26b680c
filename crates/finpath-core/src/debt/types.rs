//! Core types for the Debt Simulator

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::add_months;
use crate::money::Money;

/// Which open debt receives the surplus each month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Highest interest rate first
    Avalanche,
    /// Smallest balance first
    Snowball,
    /// Largest composite interest-cost metric first
    Hybrid,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Avalanche => "avalanche",
            Strategy::Snowball => "snowball",
            Strategy::Hybrid => "hybrid",
        }
    }

    pub fn all() -> &'static [Strategy] {
        &[Strategy::Avalanche, Strategy::Snowball, Strategy::Hybrid]
    }

    /// One-line description for narration
    pub fn explanation(&self) -> &'static str {
        match self {
            Strategy::Avalanche => {
                "Pays minimums on every debt and sends the rest to the highest rate. Costs the least interest."
            }
            Strategy::Snowball => {
                "Pays minimums on every debt and sends the rest to the smallest balance. Clears debts soonest."
            }
            Strategy::Hybrid => {
                "Pays minimums on every debt and sends the rest to the debt costing the most interest right now."
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "avalanche" => Ok(Strategy::Avalanche),
            "snowball" => Ok(Strategy::Snowball),
            "hybrid" => Ok(Strategy::Hybrid),
            _ => Err(format!("Unknown strategy: {}", s)),
        }
    }
}

/// Scoring used by the Hybrid strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HybridMetric {
    /// rate × remaining balance (this month's interest cost)
    #[default]
    InterestCost,
    /// rate ÷ max(balance / 1,000,000 minor units, 1): favors small high-rate debts
    RateOverBalance,
}

impl HybridMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            HybridMetric::InterestCost => "interest_cost",
            HybridMetric::RateOverBalance => "rate_over_balance",
        }
    }
}

impl FromStr for HybridMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interest_cost" => Ok(HybridMetric::InterestCost),
            "rate_over_balance" => Ok(HybridMetric::RateOverBalance),
            _ => Err(format!("Unknown hybrid metric: {}", s)),
        }
    }
}

/// One debt's line in one month of the schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtMonth {
    pub debt_id: String,
    pub interest: Money,
    pub payment: Money,
    /// Balance after interest and payment
    pub remaining: Money,
}

/// One month of a payoff schedule (debts open at the start of the month)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMonth {
    /// 1-based month index
    pub month: u32,
    pub entries: Vec<DebtMonth>,
    pub interest_accrued: Money,
    /// First debt that received surplus this month
    pub focus: Option<String>,
}

impl ScheduleMonth {
    pub fn entry(&self, debt_id: &str) -> Option<&DebtMonth> {
        self.entries.iter().find(|e| e.debt_id == debt_id)
    }

    pub fn total_payment(&self) -> Money {
        self.entries.iter().map(|e| e.payment).sum()
    }
}

/// Per-debt totals over the whole schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtOutcome {
    pub debt_id: String,
    /// Month the balance reached zero (0 if it started at zero)
    pub payoff_month: u32,
    pub interest_paid: Money,
    pub total_paid: Money,
}

impl DebtOutcome {
    pub fn payoff_date(&self, start: NaiveDate) -> NaiveDate {
        add_months(start, self.payoff_month)
    }
}

/// Comparison against paying only the minimums
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineComparison {
    pub total_interest: Money,
    pub months_to_payoff: u32,
    pub interest_saved: Money,
    pub months_saved: i64,
}

/// Month-by-month payoff plan for one strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffSchedule {
    pub strategy: Strategy,
    pub monthly_budget: Money,
    pub months: Vec<ScheduleMonth>,
    pub debts: Vec<DebtOutcome>,
    pub total_interest: Money,
    pub total_paid: Money,
    pub months_to_payoff: u32,
    /// None when not requested or when minimum payments alone never converge
    pub baseline: Option<BaselineComparison>,
}

impl PayoffSchedule {
    /// Calendar date the last debt is cleared, counting from `start`
    pub fn payoff_date(&self, start: NaiveDate) -> NaiveDate {
        add_months(start, self.months_to_payoff)
    }

    pub fn outcome(&self, debt_id: &str) -> Option<&DebtOutcome> {
        self.debts.iter().find(|d| d.debt_id == debt_id)
    }

    pub fn interest_saved(&self) -> Option<Money> {
        self.baseline.as_ref().map(|b| b.interest_saved)
    }

    /// Order in which debts are cleared (ties keep input order)
    pub fn payoff_order(&self) -> Vec<&DebtOutcome> {
        let mut order: Vec<&DebtOutcome> = self.debts.iter().collect();
        order.sort_by_key(|d| d.payoff_month);
        order
    }
}

/// Result of running one strategy in a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyOutcome {
    pub strategy: Strategy,
    pub schedule: Option<PayoffSchedule>,
    /// Why the strategy could not produce a schedule
    pub failure: Option<String>,
}

/// All strategies side by side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub outcomes: Vec<StrategyOutcome>,
}

impl StrategyComparison {
    pub fn schedule(&self, strategy: Strategy) -> Option<&PayoffSchedule> {
        self.outcomes
            .iter()
            .find(|o| o.strategy == strategy)
            .and_then(|o| o.schedule.as_ref())
    }

    /// Least total interest, then fewest months, then strategy order
    pub fn cheapest(&self) -> Option<&PayoffSchedule> {
        self.outcomes
            .iter()
            .filter_map(|o| o.schedule.as_ref())
            .min_by_key(|s| (s.total_interest, s.months_to_payoff))
    }
}

/// A debt being cleared, in payoff order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffMilestone {
    pub debt_id: String,
    pub name: String,
    pub month: u32,
    pub date: Option<NaiveDate>,
    /// Sum of minimum payments released so far, including this debt's
    pub freed_cash_flow: Money,
}
