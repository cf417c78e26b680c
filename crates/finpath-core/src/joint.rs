//! Joint planning: one surplus shared between debt payoff and savings goals
//!
//! Debt minimums are reserved first, goals are water-filled from what is
//! left, and anything the goals do not take is thrown at the debts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::EngineConfig;
use crate::debt::{total_minimums, validate_debts, DebtSimulator, PayoffSchedule, Strategy};
use crate::error::{Error, Result};
use crate::goals::{AllocationPlan, GoalPlanner};
use crate::models::{Debt, Goal};
use crate::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointPlan {
    pub as_of: NaiveDate,
    pub monthly_surplus: Money,
    /// Reserved for minimum payments before goals are funded
    pub debt_minimums: Money,
    /// Minimums plus goal leftovers, as simulated
    pub debt_budget: Money,
    pub goals: AllocationPlan,
    pub debts: PayoffSchedule,
    /// Debt budget plus goal contributions; never above the surplus
    pub total_committed: Money,
}

impl JointPlan {
    /// None when there was nothing to pay off
    pub fn debt_free_date(&self) -> Option<NaiveDate> {
        (self.debts.months_to_payoff > 0).then(|| self.debts.payoff_date(self.as_of))
    }
}

/// Split `monthly_surplus` between `debts` and `goals`
pub fn plan_jointly(
    debts: &[Debt],
    goals: &[Goal],
    monthly_surplus: Money,
    strategy: Strategy,
    as_of: NaiveDate,
    config: &EngineConfig,
) -> Result<JointPlan> {
    validate_debts(debts)?;
    let debt_minimums = total_minimums(debts);
    if monthly_surplus < debt_minimums {
        return Err(Error::InsufficientBudget {
            budget: monthly_surplus,
            required: debt_minimums,
        });
    }

    let goal_budget = monthly_surplus - debt_minimums;
    let goal_plan = GoalPlanner::new(config.planner.clone()).plan(goals, goal_budget, as_of)?;

    let owes_anything = debts.iter().any(|d| d.principal > 0);
    let debt_budget = if owes_anything {
        debt_minimums + goal_plan.unallocated
    } else {
        debt_minimums
    };
    let schedule =
        DebtSimulator::new(config.simulator.clone()).simulate(debts, debt_budget, strategy)?;

    let total_committed = debt_budget + goal_plan.total_allocated;
    info!(
        surplus = monthly_surplus,
        debt_budget,
        goals_funded = goal_plan.total_allocated,
        payoff_months = schedule.months_to_payoff,
        "Joint plan complete"
    );

    Ok(JointPlan {
        as_of,
        monthly_surplus,
        debt_minimums,
        debt_budget,
        goals: goal_plan,
        debts: schedule,
        total_committed,
    })
}
