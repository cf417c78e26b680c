//! What-if contribution levels and progress milestones

use chrono::NaiveDate;

use crate::models::{add_months, Goal};
use crate::money::{ceil_div, percent_of_amount, Money};

use super::types::{AllocationPlan, GoalMilestone, GoalScenario, MilestoneKind};

/// Share of surplus for each scenario: (name, percent)
const SCENARIO_LEVELS: [(&str, u32); 3] =
    [("conservative", 30), ("moderate", 50), ("aggressive", 80)];

/// Goals longer than this many months also get a halfway milestone
const HALFWAY_MIN_MONTHS: u32 = 12;

/// Completion times if `goal` alone received 30%, 50% or 80% of the surplus
pub fn scenarios(goal: &Goal, monthly_surplus: Money, as_of: NaiveDate) -> Vec<GoalScenario> {
    let remaining = goal.remaining();
    SCENARIO_LEVELS
        .iter()
        .map(|&(name, percent)| {
            let monthly_amount = percent_of_amount(monthly_surplus.max(0), percent.into());
            let months = if monthly_amount > 0 && remaining > 0 {
                u32::try_from(ceil_div(remaining, monthly_amount)).ok()
            } else {
                None
            };
            GoalScenario {
                name: name.to_string(),
                percent,
                monthly_amount,
                months,
                completion: months.map(|m| add_months(as_of, m)),
            }
        })
        .collect()
}

/// Completion milestones for each goal with a projected finish, plus a
/// halfway marker for long goals. Ordered by date, then plan order.
pub fn milestones(plan: &AllocationPlan) -> Vec<GoalMilestone> {
    let mut milestones = Vec::new();
    for allocation in &plan.allocations {
        let Some(months) = allocation.months_to_complete else {
            continue;
        };
        if months > HALFWAY_MIN_MONTHS {
            let halfway = months / 2;
            milestones.push(GoalMilestone {
                goal_id: allocation.goal_id.clone(),
                name: allocation.name.clone(),
                kind: MilestoneKind::Halfway,
                months_from_now: halfway,
                date: add_months(plan.as_of, halfway),
                monthly_amount: allocation.monthly_contribution,
            });
        }
        milestones.push(GoalMilestone {
            goal_id: allocation.goal_id.clone(),
            name: allocation.name.clone(),
            kind: MilestoneKind::Completion,
            months_from_now: months,
            date: add_months(plan.as_of, months),
            monthly_amount: allocation.monthly_contribution,
        });
    }
    // stable: ties keep plan order
    milestones.sort_by_key(|m| m.months_from_now);
    milestones
}
