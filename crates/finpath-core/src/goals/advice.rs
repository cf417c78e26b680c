//! Goal plan insights and an overall feasibility score

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budget::Severity;
use crate::money::{format_minor, percent_of, Money};

use super::types::AllocationPlan;

/// Share of the surplus that should reach goals before suggesting more (80%)
const MIN_UTILIZATION_PERCENT: i64 = 80;

/// Goals taking longer than this are flagged (5 years)
const LONG_TIMELINE_MONTHS: u32 = 60;

/// Priorities at or above this rank count as high priority
const HIGH_PRIORITY_RANK: u32 = 2;

/// More high-priority goals than this dilutes focus
const MAX_HIGH_PRIORITY_GOALS: usize = 3;

/// Goals beyond this count lower the feasibility score
const SCORE_GOAL_ALLOWANCE: usize = 3;

/// Score points lost per goal beyond the allowance
const SCORE_PENALTY_PER_GOAL: i64 = 5;

/// A narratable observation about a goal plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalInsight {
    pub key: String,
    pub severity: Severity,
    pub title: String,
    pub summary: String,
}

/// Surplus utilization, long timelines and priority crowding checks
pub fn goal_insights(plan: &AllocationPlan) -> Vec<GoalInsight> {
    let mut insights = Vec::new();

    if plan.monthly_surplus > 0 && !plan.allocations.is_empty() {
        if let Some(utilization) = percent_of(plan.total_allocated, plan.monthly_surplus) {
            if utilization < Decimal::from(MIN_UTILIZATION_PERCENT) {
                insights.push(GoalInsight {
                    key: "goals:unallocated_surplus".to_string(),
                    severity: Severity::Attention,
                    title: "Room for more savings".to_string(),
                    summary: format!(
                        "Only {}% of the surplus goes to goals; {}/month is unallocated",
                        utilization.round_dp(1),
                        format_minor(plan.unallocated)
                    ),
                });
            }
        }
    }

    let long: Vec<&str> = plan
        .allocations
        .iter()
        .filter(|a| !matches!(a.months_to_complete, Some(m) if m <= LONG_TIMELINE_MONTHS))
        .map(|a| a.name.as_str())
        .collect();
    if !long.is_empty() {
        insights.push(GoalInsight {
            key: "goals:long_timeline".to_string(),
            severity: Severity::Info,
            title: "Very long goal timelines".to_string(),
            summary: format!(
                "{} will take more than 5 years to complete: {}",
                count_goals(long.len()),
                long.join(", ")
            ),
        });
    }

    let high_priority = plan
        .allocations
        .iter()
        .filter(|a| a.priority <= HIGH_PRIORITY_RANK)
        .count();
    if high_priority > MAX_HIGH_PRIORITY_GOALS {
        insights.push(GoalInsight {
            key: "goals:too_many_high_priority".to_string(),
            severity: Severity::Attention,
            title: "Too many high-priority goals".to_string(),
            summary: format!(
                "{} of {} goals are priority {} or higher; focusing on two or three finishes them sooner",
                high_priority,
                plan.allocations.len(),
                HIGH_PRIORITY_RANK
            ),
        });
    }

    insights
}

fn count_goals(n: usize) -> String {
    if n == 1 {
        "1 goal".to_string()
    } else {
        format!("{} goals", n)
    }
}

/// Overall feasibility from 0 to 100
///
/// The surplus as a percentage of what the dated goals require (capped at
/// 100), less five points for every goal beyond the third. A plan with no
/// goals or no surplus scores 0; one whose goals need no fixed pace scores 100.
pub fn feasibility_score(plan: &AllocationPlan) -> Decimal {
    if plan.allocations.is_empty() || plan.monthly_surplus <= 0 {
        return Decimal::ZERO;
    }

    let required: Money = plan
        .allocations
        .iter()
        .filter_map(|a| a.required_contribution)
        .sum();
    let Some(coverage) = percent_of(plan.monthly_surplus, required) else {
        return Decimal::ONE_HUNDRED;
    };

    let extra_goals = plan.allocations.len().saturating_sub(SCORE_GOAL_ALLOWANCE);
    let penalty = Decimal::from(extra_goals as i64 * SCORE_PENALTY_PER_GOAL);
    (coverage.min(Decimal::ONE_HUNDRED) - penalty)
        .max(Decimal::ZERO)
        .round_dp(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::{plan, PlannerConfig};
    use crate::models::{add_months, Goal};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    fn months_ahead(n: u32) -> NaiveDate {
        add_months(as_of(), n)
    }

    fn keys(insights: &[GoalInsight]) -> Vec<&str> {
        insights.iter().map(|i| i.key.as_str()).collect()
    }

    #[test]
    fn test_unallocated_surplus_insight() {
        let goals = vec![Goal::new("fund", "Emergency fund", 120_000, 1)
            .with_saved(20_000)
            .with_target_date(months_ahead(10))];
        let plan = plan(&goals, 50_000, as_of(), &PlannerConfig::default()).unwrap();

        let insights = goal_insights(&plan);
        assert_eq!(keys(&insights), vec!["goals:unallocated_surplus"]);
        assert!(insights[0].summary.contains("20%"));
        assert!(insights[0].summary.contains("400.00"));
        assert_eq!(feasibility_score(&plan), dec!(100));
    }

    #[test]
    fn test_long_timeline_insight() {
        // 10000.00 at 100.00/month takes 100 months
        let goals = vec![Goal::new("house", "House deposit", 1_000_000, 1)];
        let plan = plan(&goals, 10_000, as_of(), &PlannerConfig::default()).unwrap();

        let insights = goal_insights(&plan);
        assert_eq!(keys(&insights), vec!["goals:long_timeline"]);
        assert!(insights[0].summary.contains("House deposit"));
        assert_eq!(insights[0].severity, Severity::Info);
    }

    #[test]
    fn test_too_many_high_priority_goals() {
        let goals: Vec<Goal> = (1..=5)
            .map(|i| {
                Goal::new(format!("g{}", i), format!("Goal {}", i), 12_000, 1 + i % 2)
                    .with_target_date(months_ahead(12))
            })
            .collect();
        let plan = plan(&goals, 100_000, as_of(), &PlannerConfig::default()).unwrap();

        let insights = goal_insights(&plan);
        assert!(keys(&insights).contains(&"goals:too_many_high_priority"));
        let crowded = insights
            .iter()
            .find(|i| i.key == "goals:too_many_high_priority")
            .unwrap();
        assert!(crowded.summary.starts_with("5 of 5"));

        // Fully covered, less 5 points for each of the two goals past the third
        assert_eq!(feasibility_score(&plan), dec!(90));
    }

    #[test]
    fn test_score_reflects_coverage() {
        // Requirements of 300.00 and 400.00 against a 500.00 surplus
        let goals = vec![
            Goal::new("a", "First", 300_000, 1).with_target_date(months_ahead(10)),
            Goal::new("b", "Second", 400_000, 2).with_target_date(months_ahead(10)),
        ];
        let plan = plan(&goals, 50_000, as_of(), &PlannerConfig::default()).unwrap();
        assert_eq!(feasibility_score(&plan), dec!(71.4));
        assert!(goal_insights(&plan).is_empty());
    }

    #[test]
    fn test_score_without_dated_goals_or_surplus() {
        let goals = vec![Goal::new("trip", "Trip", 50_000, 3)];
        let funded = plan(&goals, 10_000, as_of(), &PlannerConfig::default()).unwrap();
        assert_eq!(feasibility_score(&funded), dec!(100));

        let idle = plan(&goals, 0, as_of(), &PlannerConfig::default()).unwrap();
        assert_eq!(feasibility_score(&idle), Decimal::ZERO);
        // Nothing to allocate is not an unused surplus
        assert!(!keys(&goal_insights(&idle)).contains(&"goals:unallocated_surplus"));
    }
}
