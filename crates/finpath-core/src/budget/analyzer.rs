//! Budget Analyzer - orchestrates aggregation and insight rules

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Period, Transaction};
use crate::money::Money;

use super::rules;
use super::summary::{overview, summarize, validate_periods};
use super::types::BudgetReport;

/// When a category counts as overspent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverspendThreshold {
    /// Current outflow more than this percent above the prior period's
    PercentOverPrior(Decimal),
    /// Current outflow above this many minor units
    Absolute(Money),
}

/// Thresholds for the insight rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub overspend: OverspendThreshold,
    /// Minimum percent change per step for a trend (default 15%)
    pub trend_percent: Decimal,
    /// Consecutive periods a trend must span, current included (default 2)
    pub trend_min_periods: usize,
    /// Standard deviations above the mean for an anomaly (default 2.5)
    pub anomaly_sigma: Decimal,
    /// Comparison transactions required before flagging anomalies (default 5)
    pub anomaly_min_samples: usize,
    /// Minimum savings rate to report (default 0: any positive net)
    pub savings_min_percent: Decimal,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            overspend: OverspendThreshold::PercentOverPrior(Decimal::from(20)),
            trend_percent: Decimal::from(15),
            trend_min_periods: 2,
            anomaly_sigma: Decimal::new(25, 1),
            anomaly_min_samples: 5,
            savings_min_percent: Decimal::ZERO,
        }
    }
}

/// Stateless analyzer bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct BudgetAnalyzer {
    config: AnalyzerConfig,
}

impl BudgetAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Summarize transactions per (period, category) and derive insights
    ///
    /// The last period is the "current" one; earlier periods are history.
    /// No transactions (or none inside the periods) is not an error: the
    /// report simply has no insights.
    pub fn analyze(&self, transactions: &[Transaction], periods: &[Period]) -> Result<BudgetReport> {
        validate_periods(periods)?;

        let summaries = summarize(transactions, periods);
        let overview = overview(transactions, periods);

        let mut insights = rules::overspend(&summaries, periods, &self.config);
        insights.extend(rules::trends(&summaries, periods, &self.config));
        insights.extend(rules::anomalies(
            transactions,
            &summaries,
            periods,
            &self.config,
        ));
        insights.extend(rules::savings(
            &summaries,
            periods,
            overview.total_inflow,
            overview.total_outflow,
            &self.config,
        ));

        // Severity (highest first), then kind, then category: a total order
        insights.sort_by(|a, b| {
            b.severity
                .priority()
                .cmp(&a.severity.priority())
                .then_with(|| a.kind.cmp(&b.kind))
                .then_with(|| a.category.cmp(&b.category))
        });

        tracing::debug!(
            periods = periods.len(),
            summaries = summaries.len(),
            insights = insights.len(),
            "Budget analysis complete"
        );

        Ok(BudgetReport {
            periods: periods.to_vec(),
            summaries,
            insights,
            overview,
        })
    }
}

/// Analyze with an explicit configuration
pub fn analyze(
    transactions: &[Transaction],
    periods: &[Period],
    config: &AnalyzerConfig,
) -> Result<BudgetReport> {
    BudgetAnalyzer::new(config.clone()).analyze(transactions, periods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::types::{InsightKind, Severity};
    use crate::error::Error;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_config_values() {
        let config = AnalyzerConfig::default();
        assert_eq!(
            config.overspend,
            OverspendThreshold::PercentOverPrior(dec!(20))
        );
        assert_eq!(config.anomaly_sigma, dec!(2.5));
        assert_eq!(config.anomaly_min_samples, 5);
        assert_eq!(config.trend_min_periods, 2);
    }

    #[test]
    fn test_empty_input_yields_empty_report() {
        let periods = Period::trailing_months(date(2026, 5, 1), 2);
        let report = analyze(&[], &periods, &AnalyzerConfig::default()).unwrap();
        assert!(report.summaries.is_empty());
        assert!(report.insights.is_empty());
        assert_eq!(report.disposable_income(), 0);
    }

    #[test]
    fn test_invalid_periods_fail_before_analysis() {
        let periods = vec![
            Period::new(date(2026, 2, 1), date(2026, 3, 1)),
            Period::new(date(2026, 1, 1), date(2026, 2, 1)),
        ];
        let err = analyze(&[], &periods, &AnalyzerConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidPeriod { index: 1, .. }));
    }

    #[test]
    fn test_overspend_scenario() {
        let periods = Period::trailing_months(date(2026, 5, 20), 2);
        let txs = vec![
            // $700 last month, $1000 this month
            Transaction::new(date(2026, 4, 3), -40_000, "Dining", "A"),
            Transaction::new(date(2026, 4, 17), -30_000, "Dining", "B"),
            Transaction::new(date(2026, 5, 2), -60_000, "Dining", "C"),
            Transaction::new(date(2026, 5, 16), -40_000, "Dining", "D"),
            // $700 last month, $750 this month
            Transaction::new(date(2026, 4, 5), -70_000, "Groceries", "E"),
            Transaction::new(date(2026, 5, 5), -75_000, "Groceries", "F"),
        ];

        let report = analyze(&txs, &periods, &AnalyzerConfig::default()).unwrap();
        let overspends: Vec<_> = report.insights_of(InsightKind::Overspend).collect();
        assert_eq!(overspends.len(), 1);

        let dining = overspends[0];
        assert_eq!(dining.category.as_deref(), Some("Dining"));
        assert_eq!(dining.evidence[0].outflow(), 100_000);
        assert_eq!(dining.evidence[0].prior_total, Some(-70_000));
        assert_eq!(dining.evidence[1].outflow(), 70_000);
        assert_eq!(dining.magnitude, dec!(42.86));
    }

    #[test]
    fn test_insights_sorted_by_severity() {
        let periods = Period::trailing_months(date(2026, 5, 20), 2);
        let txs = vec![
            Transaction::new(date(2026, 4, 1), 500_000, "Salary", "PAY"),
            Transaction::new(date(2026, 5, 1), 500_000, "Salary", "PAY"),
            Transaction::new(date(2026, 4, 3), -10_000, "Dining", "A"),
            Transaction::new(date(2026, 5, 3), -30_000, "Dining", "B"),
        ];
        let report = analyze(&txs, &periods, &AnalyzerConfig::default()).unwrap();
        let kinds: Vec<InsightKind> = report.insights.iter().map(|i| i.kind).collect();
        // Dining tripled: overspend and a two-period trend, both alerts
        assert_eq!(
            kinds,
            vec![InsightKind::Overspend, InsightKind::Trend, InsightKind::Savings]
        );
        assert_eq!(report.insights[0].severity, Severity::Alert);
        assert_eq!(report.insights[1].severity, Severity::Alert);
        assert_eq!(report.disposable_income(), 470_000);
    }
}
