//! Focus-debt selection per strategy

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::money::Money;

use super::types::{HybridMetric, Strategy};

/// Balance scale for [`HybridMetric::RateOverBalance`] (10,000.00 in major units)
const RATE_OVER_BALANCE_SCALE: Money = 1_000_000;

/// A debt still carrying a balance, as seen by the focus selector
#[derive(Debug, Clone, Copy)]
pub struct OpenDebt {
    /// Position in the caller's input (final tie-break)
    pub index: usize,
    pub balance: Money,
    pub rate: Decimal,
}

fn hybrid_score(debt: &OpenDebt, metric: HybridMetric) -> Decimal {
    match metric {
        HybridMetric::InterestCost => debt.rate * Decimal::from(debt.balance),
        HybridMetric::RateOverBalance => {
            let scaled = Decimal::from(debt.balance) / Decimal::from(RATE_OVER_BALANCE_SCALE);
            debt.rate / scaled.max(Decimal::ONE)
        }
    }
}

/// Highest rate, then larger balance
fn avalanche_order(a: &OpenDebt, b: &OpenDebt) -> Ordering {
    b.rate
        .cmp(&a.rate)
        .then_with(|| b.balance.cmp(&a.balance))
}

/// Ordering where the preferred focus sorts first
pub fn compare(strategy: Strategy, metric: HybridMetric, a: &OpenDebt, b: &OpenDebt) -> Ordering {
    let primary = match strategy {
        Strategy::Avalanche => avalanche_order(a, b),
        Strategy::Snowball => a
            .balance
            .cmp(&b.balance)
            .then_with(|| b.rate.cmp(&a.rate)),
        Strategy::Hybrid => hybrid_score(b, metric)
            .cmp(&hybrid_score(a, metric))
            .then_with(|| avalanche_order(a, b)),
    };
    primary.then_with(|| a.index.cmp(&b.index))
}

/// Pick the debt that receives surplus, among debts with a positive balance
pub fn select_focus(strategy: Strategy, metric: HybridMetric, open: &[OpenDebt]) -> Option<usize> {
    open.iter()
        .filter(|d| d.balance > 0)
        .min_by(|a, b| compare(strategy, metric, a, b))
        .map(|d| d.index)
}
