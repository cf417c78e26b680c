//! Period validation and category aggregation

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Period, Transaction};
use crate::money::Money;

use super::types::{BudgetOverview, CategorySummary};

/// Periods must be non-empty, ordered oldest first, and must not overlap
pub fn validate_periods(periods: &[Period]) -> Result<()> {
    for (index, period) in periods.iter().enumerate() {
        if period.start >= period.end {
            return Err(Error::InvalidPeriod {
                index,
                reason: format!("start {} is not before end {}", period.start, period.end),
            });
        }
        if index == 0 {
            continue;
        }
        let prev = &periods[index - 1];
        if period.start < prev.start {
            return Err(Error::InvalidPeriod {
                index,
                reason: format!(
                    "starts {} before the previous period ({})",
                    period.start, prev.start
                ),
            });
        }
        if period.start < prev.end {
            return Err(Error::InvalidPeriod {
                index,
                reason: format!(
                    "overlaps the previous period ending {}",
                    prev.end
                ),
            });
        }
    }
    Ok(())
}

/// Index of the period containing `date` (periods must already be validated)
pub fn period_index(periods: &[Period], date: chrono::NaiveDate) -> Option<usize> {
    let idx = periods.partition_point(|p| p.end <= date);
    periods
        .get(idx)
        .filter(|p| p.contains(date))
        .map(|_| idx)
}

/// Group transactions by (period, category), ordered by period then category
pub fn summarize(transactions: &[Transaction], periods: &[Period]) -> Vec<CategorySummary> {
    let mut totals: BTreeMap<(usize, &str), (Money, usize)> = BTreeMap::new();
    let mut skipped = 0usize;

    for tx in transactions {
        let Some(idx) = period_index(periods, tx.date) else {
            skipped += 1;
            continue;
        };
        let entry = totals.entry((idx, tx.category.as_str())).or_insert((0, 0));
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    if skipped > 0 {
        debug!(skipped, "Transactions outside every analysis period");
    }

    totals
        .iter()
        .map(|(&(idx, category), &(total, count))| {
            let prior_total = idx
                .checked_sub(1)
                .and_then(|prev| totals.get(&(prev, category)))
                .map(|&(t, _)| t);
            CategorySummary {
                category: category.to_string(),
                period_index: idx,
                period: periods[idx],
                total,
                count,
                prior_total,
            }
        })
        .collect()
}

/// Find the summary for a category in a period, or a zero row if it had no activity
pub fn summary_or_empty(
    summaries: &[CategorySummary],
    category: &str,
    period_index: usize,
    periods: &[Period],
) -> CategorySummary {
    summaries
        .iter()
        .find(|s| s.period_index == period_index && s.category == category)
        .cloned()
        .unwrap_or_else(|| CategorySummary::empty(category, period_index, periods[period_index]))
}

/// Whole-budget totals for the last period
pub fn overview(transactions: &[Transaction], periods: &[Period]) -> BudgetOverview {
    let Some(current) = periods.len().checked_sub(1) else {
        return BudgetOverview::default();
    };
    let period = periods[current];

    let mut total_inflow = 0;
    let mut total_outflow = 0;
    let mut transaction_count = 0;
    let mut outflow_count: Money = 0;
    let mut by_category: BTreeMap<&str, Money> = BTreeMap::new();

    for tx in transactions.iter().filter(|tx| period.contains(tx.date)) {
        transaction_count += 1;
        if tx.amount >= 0 {
            total_inflow += tx.amount;
        } else {
            total_outflow += tx.outflow();
            outflow_count += 1;
            *by_category.entry(tx.category.as_str()).or_insert(0) += tx.outflow();
        }
    }

    // BTreeMap iteration keeps the first (alphabetical) category on ties
    let top_category = by_category
        .iter()
        .fold(None::<(&str, Money)>, |best, (&cat, &amount)| match best {
            Some((_, best_amount)) if best_amount >= amount => best,
            _ => Some((cat, amount)),
        })
        .map(|(cat, _)| cat.to_string());

    BudgetOverview {
        period: Some(period),
        total_inflow,
        total_outflow,
        net: total_inflow - total_outflow,
        transaction_count,
        average_outflow: if outflow_count > 0 {
            total_outflow / outflow_count
        } else {
            0
        },
        top_category,
    }
}
