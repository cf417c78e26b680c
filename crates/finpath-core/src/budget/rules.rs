//! Insight rules
//!
//! Each rule is a pure function of the summaries (and, for anomalies, the raw
//! transactions) and only emits an insight when it can cite the rows that
//! justify it.

use rust_decimal::{Decimal, MathematicalOps};
use tracing::debug;

use crate::models::{Period, Transaction};
use crate::money::{format_minor, percent_change, percent_of, Money};

use super::analyzer::{AnalyzerConfig, OverspendThreshold};
use super::summary::{period_index, summary_or_empty};
use super::types::{CategorySummary, Direction, Insight, InsightKind, Severity};

/// Categories whose current-period outflow exceeds the configured threshold
pub fn overspend(
    summaries: &[CategorySummary],
    periods: &[Period],
    config: &AnalyzerConfig,
) -> Vec<Insight> {
    let Some(current) = periods.len().checked_sub(1) else {
        return Vec::new();
    };

    let mut insights = Vec::new();
    for summary in summaries.iter().filter(|s| s.period_index == current) {
        let outflow = summary.outflow();
        if outflow == 0 {
            continue;
        }
        let prior_outflow = summary.prior_outflow();

        let (basis, over) = match config.overspend {
            OverspendThreshold::PercentOverPrior(percent) => {
                if prior_outflow == 0 {
                    debug!(
                        category = summary.category,
                        "No prior spending to compare against"
                    );
                    continue;
                }
                let limit = Decimal::from(prior_outflow)
                    * (Decimal::ONE_HUNDRED + percent)
                    / Decimal::ONE_HUNDRED;
                (prior_outflow, Decimal::from(outflow) > limit)
            }
            OverspendThreshold::Absolute(limit) => (limit, outflow > limit),
        };
        if !over {
            continue;
        }

        let magnitude = percent_change(basis, outflow).unwrap_or(Decimal::ONE_HUNDRED);
        let severity = match config.overspend {
            OverspendThreshold::PercentOverPrior(_) => Severity::for_percent(magnitude),
            OverspendThreshold::Absolute(_) => Severity::Attention,
        };

        let prior = match current.checked_sub(1) {
            Some(prev) => summary_or_empty(summaries, &summary.category, prev, periods),
            // Nothing before the first period was analysed; cite it as zero
            None => CategorySummary::empty(
                summary.category.clone(),
                current,
                periods[current].preceding(),
            ),
        };
        let evidence = vec![summary.clone(), prior];

        insights.push(
            Insight::new(
                InsightKind::Overspend,
                Some(summary.category.clone()),
                magnitude.round_dp(2),
                severity,
                format!("{} over budget", summary.category),
                format!(
                    "{} spent this period vs {} last period",
                    format_minor(outflow),
                    format_minor(prior_outflow)
                ),
            )
            .with_direction(Direction::Up)
            .with_evidence(evidence),
        );
    }
    insights
}

/// Sustained same-direction changes ending at the current period
///
/// The run extends back as long as every step moves more than
/// `trend_percent` in the same direction; it must span at least
/// `trend_min_periods` periods.
pub fn trends(
    summaries: &[CategorySummary],
    periods: &[Period],
    config: &AnalyzerConfig,
) -> Vec<Insight> {
    let min_periods = config.trend_min_periods.max(2);
    if periods.len() < min_periods {
        return Vec::new();
    }

    let mut categories: Vec<&str> = summaries.iter().map(|s| s.category.as_str()).collect();
    categories.sort_unstable();
    categories.dedup();

    let mut insights = Vec::new();
    for category in categories {
        let history: Vec<CategorySummary> = (0..periods.len())
            .map(|idx| summary_or_empty(summaries, category, idx, periods))
            .collect();

        let Some((direction, span)) = trailing_run(&history, config.trend_percent) else {
            continue;
        };
        if span < min_periods {
            continue;
        }
        let run = history[history.len() - span..].to_vec();
        let start = run[0].outflow();
        let end = run[run.len() - 1].outflow();
        let Some(magnitude) = percent_change(start, end) else {
            continue;
        };

        insights.push(
            Insight::new(
                InsightKind::Trend,
                Some(category.to_string()),
                magnitude.round_dp(2),
                Severity::for_percent(magnitude),
                format!(
                    "{} spending {} {}%",
                    category,
                    direction.as_str(),
                    magnitude.abs().round_dp(0)
                ),
                format!(
                    "{} over {} periods: {} -> {}",
                    direction.as_str(),
                    run.len(),
                    format_minor(start),
                    format_minor(end)
                ),
            )
            .with_direction(direction)
            .with_evidence(run),
        );
    }
    insights
}

/// Direction and length (in periods) of the longest run of steps ending at the
/// last entry that each move more than `threshold` percent the same way
fn trailing_run(history: &[CategorySummary], threshold: Decimal) -> Option<(Direction, usize)> {
    let mut direction = None;
    let mut steps = 0;
    for pair in history.windows(2).rev() {
        let Some(change) = percent_change(pair[0].outflow(), pair[1].outflow()) else {
            break;
        };
        if change.abs() <= threshold {
            break;
        }
        let step = if change > Decimal::ZERO {
            Direction::Up
        } else {
            Direction::Down
        };
        match direction {
            None => direction = Some(step),
            Some(d) if d == step => {}
            Some(_) => break,
        }
        steps += 1;
    }
    direction.map(|d| (d, steps + 1))
}

/// Sample mean and variance of the values, or None if the arithmetic overflows
fn sample_stats(values: &[Money]) -> Option<(Decimal, Decimal)> {
    if values.len() < 2 {
        return None;
    }
    let n = Decimal::from(values.len());
    let sum = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, &v| acc.checked_add(Decimal::from(v)))?;
    let mean = sum.checked_div(n)?;
    let squares = values.iter().try_fold(Decimal::ZERO, |acc, &v| {
        let diff = Decimal::from(v).checked_sub(mean)?;
        acc.checked_add(diff.checked_mul(diff)?)
    })?;
    let variance = squares.checked_div(n - Decimal::ONE)?;
    Some((mean, variance))
}

/// Current-period transactions far above their category's usual size
pub fn anomalies(
    transactions: &[Transaction],
    summaries: &[CategorySummary],
    periods: &[Period],
    config: &AnalyzerConfig,
) -> Vec<Insight> {
    let Some(current) = periods.len().checked_sub(1) else {
        return Vec::new();
    };
    let sigma_squared = config.anomaly_sigma * config.anomaly_sigma;

    // (index into transactions, period index) for outflows inside any period
    let outflows: Vec<(usize, usize)> = transactions
        .iter()
        .enumerate()
        .filter(|(_, tx)| tx.outflow() > 0)
        .filter_map(|(i, tx)| period_index(periods, tx.date).map(|p| (i, p)))
        .collect();

    let mut insights = Vec::new();
    for &(candidate, _) in outflows.iter().filter(|(_, p)| *p == current) {
        let tx = &transactions[candidate];
        let samples: Vec<Money> = outflows
            .iter()
            .filter(|&&(i, _)| i != candidate && transactions[i].category == tx.category)
            .map(|&(i, _)| transactions[i].outflow())
            .collect();

        if samples.len() < config.anomaly_min_samples {
            continue;
        }
        let Some((mean, variance)) = sample_stats(&samples) else {
            debug!(category = tx.category, "Sample statistics unavailable");
            continue;
        };
        if variance.is_zero() {
            continue;
        }

        let x = Decimal::from(tx.outflow());
        if x <= mean {
            continue;
        }
        let deviation = x - mean;
        let exceeds = match (
            deviation.checked_mul(deviation),
            sigma_squared.checked_mul(variance),
        ) {
            (Some(lhs), Some(rhs)) => lhs > rhs,
            _ => false,
        };
        if !exceeds {
            continue;
        }

        let sigmas = variance
            .sqrt()
            .filter(|sd| !sd.is_zero())
            .map(|sd| deviation / sd)
            .unwrap_or(config.anomaly_sigma);
        let severity = if sigmas > config.anomaly_sigma * Decimal::TWO {
            Severity::Warning
        } else {
            Severity::Attention
        };

        insights.push(
            Insight::new(
                InsightKind::Anomaly,
                Some(tx.category.clone()),
                sigmas.round_dp(2),
                severity,
                format!("Unusual {} charge", tx.category),
                format!(
                    "{} at {} vs a typical {}",
                    format_minor(tx.outflow()),
                    tx.description,
                    format_minor(crate::money::to_minor(mean))
                ),
            )
            .with_direction(Direction::Up)
            .with_evidence(vec![summary_or_empty(
                summaries,
                &tx.category,
                current,
                periods,
            )])
            .with_transaction(tx.clone()),
        );
    }
    insights
}

/// A positive net for the current period
pub fn savings(
    summaries: &[CategorySummary],
    periods: &[Period],
    total_inflow: Money,
    total_outflow: Money,
    config: &AnalyzerConfig,
) -> Option<Insight> {
    let current = periods.len().checked_sub(1)?;
    let net = total_inflow - total_outflow;
    if net <= 0 {
        return None;
    }
    let rate = percent_of(net, total_inflow)?;
    if rate < config.savings_min_percent {
        return None;
    }

    let evidence: Vec<CategorySummary> = summaries
        .iter()
        .filter(|s| s.period_index == current)
        .cloned()
        .collect();

    Some(
        Insight::new(
            InsightKind::Savings,
            None,
            rate.round_dp(2),
            Severity::Info,
            format!("Saved {}% of income", rate.round_dp(0)),
            format!(
                "{} in vs {} out leaves {} to put toward debts and goals",
                format_minor(total_inflow),
                format_minor(total_outflow),
                format_minor(net)
            ),
        )
        .with_evidence(evidence),
    )
}
