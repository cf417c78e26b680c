//! Payoff milestones and debt overview insights

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budget::Severity;
use crate::models::{add_months, Debt};
use crate::money::{format_minor, percent_of, Money};

use super::types::{PayoffMilestone, PayoffSchedule};

/// Rates above this count as high-interest (18% APR)
fn high_interest_rate() -> Decimal {
    Decimal::new(18, 2)
}

/// Minimums below this share of total balance are flagged (3%)
const LOW_PAYMENT_RATIO_PERCENT: i64 = 3;

/// A narratable observation about the debt set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtInsight {
    pub key: String,
    pub severity: Severity,
    pub title: String,
    pub summary: String,
}

/// Debts in the order the schedule clears them, with the minimums each one frees up
pub fn payoff_milestones(
    schedule: &PayoffSchedule,
    debts: &[Debt],
    start: Option<NaiveDate>,
) -> Vec<PayoffMilestone> {
    let mut freed: Money = 0;
    schedule
        .payoff_order()
        .into_iter()
        .filter(|outcome| outcome.payoff_month > 0)
        .filter_map(|outcome| {
            let debt = debts.iter().find(|d| d.id == outcome.debt_id)?;
            freed += debt.minimum_payment;
            Some(PayoffMilestone {
                debt_id: debt.id.clone(),
                name: debt.display_name().to_string(),
                month: outcome.payoff_month,
                date: start.map(|s| add_months(s, outcome.payoff_month)),
                freed_cash_flow: freed,
            })
        })
        .collect()
}

/// High-interest exposure and low payment ratio checks
pub fn debt_insights(debts: &[Debt]) -> Vec<DebtInsight> {
    let mut insights = Vec::new();

    let high_interest: Money = debts
        .iter()
        .filter(|d| d.annual_rate > high_interest_rate())
        .map(|d| d.principal)
        .sum();
    if high_interest > 0 {
        insights.push(DebtInsight {
            key: "debt:high_interest".to_string(),
            severity: Severity::Warning,
            title: "High interest debt".to_string(),
            summary: format!(
                "{} owed at more than 18% APR; consolidation or a balance transfer may help",
                format_minor(high_interest)
            ),
        });
    }

    let total_balance: Money = debts.iter().map(|d| d.principal).sum();
    let total_minimum: Money = debts
        .iter()
        .filter(|d| d.principal > 0)
        .map(|d| d.minimum_payment)
        .sum();
    if let Some(ratio) = percent_of(total_minimum, total_balance) {
        if ratio < Decimal::from(LOW_PAYMENT_RATIO_PERCENT) {
            insights.push(DebtInsight {
                key: "debt:low_payment_ratio".to_string(),
                severity: Severity::Attention,
                title: "Low payment ratio".to_string(),
                summary: format!(
                    "Minimum payments are {}% of total debt; paying more shortens payoff",
                    ratio.round_dp(1)
                ),
            });
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debt::{simulate, SimulatorConfig, Strategy};
    use rust_decimal_macros::dec;

    #[test]
    fn test_milestones_follow_payoff_order() {
        let debts = vec![
            Debt::new("big", 100_000, Decimal::ZERO, 5_000).with_name("Car loan"),
            Debt::new("small", 10_000, Decimal::ZERO, 2_000).with_name("Store card"),
        ];
        let schedule =
            simulate(&debts, 20_000, Strategy::Snowball, &SimulatorConfig::default()).unwrap();
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let milestones = payoff_milestones(&schedule, &debts, Some(start));

        assert_eq!(milestones.len(), 2);
        assert_eq!(milestones[0].name, "Store card");
        assert_eq!(milestones[0].freed_cash_flow, 2_000);
        assert_eq!(milestones[1].debt_id, "big");
        assert_eq!(milestones[1].freed_cash_flow, 7_000);
        assert_eq!(
            milestones[1].date,
            Some(add_months(start, milestones[1].month))
        );
    }

    #[test]
    fn test_high_interest_insight() {
        let debts = vec![
            Debt::new("card", 300_000, dec!(0.24), 15_000),
            Debt::new("car", 900_000, dec!(0.06), 30_000),
        ];
        let insights = debt_insights(&debts);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].key, "debt:high_interest");
        assert!(insights[0].summary.contains("3000.00"));
    }

    #[test]
    fn test_low_payment_ratio_insight() {
        let debts = vec![Debt::new("mortgage", 10_000_000, dec!(0.05), 60_000)];
        let insights = debt_insights(&debts);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].key, "debt:low_payment_ratio");
    }

    #[test]
    fn test_no_insights_for_empty_debts() {
        assert!(debt_insights(&[]).is_empty());
    }
}
