//! Water-filling allocation of a shared monthly surplus across goals

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{add_months, months_between, Goal};
use crate::money::{ceil_div, format_minor, Money};

use super::types::{AllocationPlan, Feasibility, GoalAllocation, InfeasibleReason};

/// Planner settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Months projected before a completion date is reported as unreachable (default 600)
    pub horizon_months: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            horizon_months: 600,
        }
    }
}

/// Per-goal working state during planning
struct Demand<'a> {
    goal: &'a Goal,
    /// Whole months until the target date (dated goals only)
    months_until: Option<u32>,
    /// Monthly amount needed to land on the target date
    required: Option<Money>,
}

/// Stateless planner bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct GoalPlanner {
    config: PlannerConfig,
}

impl GoalPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Allocate `monthly_surplus` across `goals` as of `as_of`
    ///
    /// Goals are served in priority order (nearest target date breaks ties);
    /// each dated goal takes its required contribution until the surplus runs
    /// out, then undated goals take whatever is left.
    pub fn plan(
        &self,
        goals: &[Goal],
        monthly_surplus: Money,
        as_of: NaiveDate,
    ) -> Result<AllocationPlan> {
        validate_goals(goals, as_of)?;

        if monthly_surplus <= 0 {
            if let Some(goal) = goals.iter().find(|g| g.target_date.is_some()) {
                return Err(Error::NoSurplus {
                    surplus: monthly_surplus,
                    goal_id: goal.id.clone(),
                });
            }
        }
        let surplus = monthly_surplus.max(0);

        let mut demands: Vec<Demand> = goals
            .iter()
            .map(|goal| {
                let months_until = goal.target_date.map(|d| months_between(as_of, d));
                let required = months_until.map(|months| {
                    if months == 0 {
                        goal.remaining()
                    } else {
                        ceil_div(goal.remaining(), Money::from(months))
                    }
                });
                Demand {
                    goal,
                    months_until,
                    required,
                }
            })
            .collect();
        demands.sort_by(|a, b| priority_order(a.goal, b.goal));

        let contributions = water_fill(&demands, surplus);
        let completions = self.project(&demands, &contributions, surplus);

        let mut allocations = Vec::with_capacity(demands.len());
        for ((demand, &contribution), &completion) in
            demands.iter().zip(&contributions).zip(&completions)
        {
            allocations.push(allocate(demand, contribution, completion, as_of));
        }

        let total_allocated: Money = contributions.iter().sum();
        debug!(
            goals = goals.len(),
            surplus,
            total_allocated,
            "Goal allocation complete"
        );

        Ok(AllocationPlan {
            as_of,
            monthly_surplus,
            allocations,
            total_allocated,
            unallocated: surplus - total_allocated,
        })
    }

    /// Month-by-month projection: contributions released by completed goals
    /// flow to unfinished ones in priority order. Fully funded goals stay at
    /// their required pace; underfunded ones absorb whatever they can get.
    /// Returns the completion month for each goal, or None beyond the horizon.
    fn project(
        &self,
        demands: &[Demand],
        contributions: &[Money],
        surplus: Money,
    ) -> Vec<Option<u32>> {
        let caps: Vec<Money> = demands
            .iter()
            .zip(contributions)
            .map(|(demand, &contribution)| match demand.required {
                Some(required) if contribution >= required => required,
                _ => Money::MAX,
            })
            .collect();
        let mut needed: Vec<Money> = demands.iter().map(|d| d.goal.remaining()).collect();
        let mut completed: Vec<Option<u32>> = vec![None; demands.len()];

        if surplus == 0 {
            return completed;
        }

        for month in 1..=self.config.horizon_months {
            if needed.iter().all(|&n| n == 0) {
                break;
            }
            let mut available = surplus;
            for pass in [Pass::Dated, Pass::Undated] {
                for (i, demand) in demands.iter().enumerate() {
                    if needed[i] == 0 || !pass.includes(demand) {
                        continue;
                    }
                    let give = available.min(caps[i]).min(needed[i]);
                    needed[i] -= give;
                    available -= give;
                    if needed[i] == 0 {
                        completed[i] = Some(month);
                    }
                }
            }
        }
        completed
    }
}

#[derive(Clone, Copy)]
enum Pass {
    Dated,
    Undated,
}

impl Pass {
    fn includes(&self, demand: &Demand) -> bool {
        match self {
            Pass::Dated => demand.required.is_some(),
            Pass::Undated => demand.required.is_none(),
        }
    }
}

/// First-month contributions: dated goals take their requirement in order,
/// then undated goals take what is left
fn water_fill(demands: &[Demand], surplus: Money) -> Vec<Money> {
    let mut contributions = vec![0; demands.len()];
    let mut remaining = surplus;
    for pass in [Pass::Dated, Pass::Undated] {
        for (i, demand) in demands.iter().enumerate() {
            if !pass.includes(demand) {
                continue;
            }
            let want = demand
                .required
                .unwrap_or(Money::MAX)
                .min(demand.goal.remaining());
            let give = want.min(remaining);
            contributions[i] = give;
            remaining -= give;
        }
    }
    contributions
}

fn allocate(
    demand: &Demand,
    contribution: Money,
    completion_month: Option<u32>,
    as_of: NaiveDate,
) -> GoalAllocation {
    let goal = demand.goal;
    let projected_completion = completion_month.map(|m| add_months(as_of, m));

    let (feasibility, shortfall) = match (demand.months_until, demand.required) {
        (Some(0), Some(required)) => (
            Feasibility::Infeasible {
                reason: InfeasibleReason::TargetTooSoon,
            },
            (required - contribution).max(0),
        ),
        (Some(_), Some(required)) if contribution >= required => (Feasibility::Feasible, 0),
        (Some(_), Some(required)) => (
            Feasibility::Infeasible {
                reason: InfeasibleReason::Underfunded,
            },
            required - contribution,
        ),
        _ => (Feasibility::Unscheduled, 0),
    };

    let finish = match projected_completion {
        Some(date) => format!("projected to finish {}", date.format("%B %Y")),
        None => "not reachable within the planning horizon".to_string(),
    };
    let explanation = match (feasibility, demand.required) {
        (Feasibility::Feasible, _) => format!(
            "{}/month meets the {} target date; {}",
            format_minor(contribution),
            goal.target_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            finish
        ),
        (Feasibility::Infeasible { reason: InfeasibleReason::TargetTooSoon }, _) => format!(
            "Target date is less than a month away; {} still needed, {}",
            format_minor(goal.remaining()),
            finish
        ),
        (Feasibility::Infeasible { .. }, Some(required)) => format!(
            "Needs {}/month but only {} is available after higher priorities ({} short); {}",
            format_minor(required),
            format_minor(contribution),
            format_minor(shortfall),
            finish
        ),
        _ => format!(
            "No target date; contributing {}/month, {}",
            format_minor(contribution),
            finish
        ),
    };

    GoalAllocation {
        goal_id: goal.id.clone(),
        name: goal.name.clone(),
        priority: goal.priority,
        monthly_contribution: contribution,
        required_contribution: demand.required,
        shortfall,
        months_to_complete: completion_month,
        projected_completion,
        feasibility,
        explanation,
    }
}

/// Priority, then nearest target date (undated last), then id
fn priority_order(a: &Goal, b: &Goal) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| match (a.target_date, b.target_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.id.cmp(&b.id))
}

/// Reject goals with nothing to plan, past target dates, or duplicate ids
pub fn validate_goals(goals: &[Goal], as_of: NaiveDate) -> Result<()> {
    let mut seen = HashSet::new();
    for goal in goals {
        let invalid = |reason: String| Error::InvalidGoal {
            goal_id: goal.id.clone(),
            reason,
        };
        if !seen.insert(goal.id.as_str()) {
            return Err(invalid("duplicate id".to_string()));
        }
        if goal.current_saved < 0 {
            return Err(invalid("current saved amount is negative".to_string()));
        }
        if goal.target_amount <= goal.current_saved {
            return Err(invalid(format!(
                "target {} is already covered by {} saved",
                goal.target_amount, goal.current_saved
            )));
        }
        if let Some(date) = goal.target_date {
            if date < as_of {
                return Err(invalid(format!("target date {} is in the past", date)));
            }
        }
    }
    Ok(())
}

/// Plan with an explicit configuration
pub fn plan(
    goals: &[Goal],
    monthly_surplus: Money,
    as_of: NaiveDate,
    config: &PlannerConfig,
) -> Result<AllocationPlan> {
    GoalPlanner::new(config.clone()).plan(goals, monthly_surplus, as_of)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    fn months_ahead(n: u32) -> NaiveDate {
        add_months(as_of(), n)
    }

    #[test]
    fn test_single_goal_feasible() {
        let goals = vec![Goal::new("fund", "Emergency fund", 120_000, 1)
            .with_saved(20_000)
            .with_target_date(months_ahead(10))];
        let plan = plan(&goals, 50_000, as_of(), &PlannerConfig::default()).unwrap();

        let fund = plan.allocation("fund").unwrap();
        assert_eq!(fund.required_contribution, Some(10_000));
        assert_eq!(fund.monthly_contribution, 10_000);
        assert!(fund.feasibility.is_feasible());
        assert_eq!(fund.months_to_complete, Some(10));
        assert_eq!(fund.projected_completion, Some(months_ahead(10)));
        assert_eq!(plan.unallocated, 40_000);
    }

    #[test]
    fn test_single_goal_required_rounds_up() {
        let goals = vec![Goal::new("g", "Laptop", 100_000, 1).with_target_date(months_ahead(3))];
        let plan = plan(&goals, 50_000, as_of(), &PlannerConfig::default()).unwrap();
        let laptop = plan.allocation("g").unwrap();
        assert_eq!(laptop.required_contribution, Some(33_334));
        assert_eq!(laptop.months_to_complete, Some(3));
    }

    #[test]
    fn test_single_goal_infeasible() {
        let goals = vec![Goal::new("car", "Car", 600_000, 1).with_target_date(months_ahead(6))];
        let plan = plan(&goals, 50_000, as_of(), &PlannerConfig::default()).unwrap();
        let car = plan.allocation("car").unwrap();
        assert_eq!(car.monthly_contribution, 50_000);
        assert_eq!(car.shortfall, 50_000);
        assert_eq!(
            car.feasibility,
            Feasibility::Infeasible {
                reason: InfeasibleReason::Underfunded
            }
        );
        assert_eq!(car.months_to_complete, Some(12));
    }

    #[test]
    fn test_undated_goal_reports_fastest_completion() {
        let goals = vec![Goal::new("trip", "Trip", 250_000, 2)];
        let plan = plan(&goals, 40_000, as_of(), &PlannerConfig::default()).unwrap();
        let trip = plan.allocation("trip").unwrap();
        assert_eq!(trip.feasibility, Feasibility::Unscheduled);
        assert_eq!(trip.monthly_contribution, 40_000);
        assert_eq!(trip.months_to_complete, Some(7));
        assert_eq!(trip.projected_completion, Some(months_ahead(7)));
    }

    #[test]
    fn test_undated_contribution_capped_at_remaining() {
        let goals = vec![Goal::new("gift", "Gift", 5_000, 1)];
        let plan = plan(&goals, 40_000, as_of(), &PlannerConfig::default()).unwrap();
        assert_eq!(plan.allocation("gift").unwrap().monthly_contribution, 5_000);
        assert_eq!(plan.unallocated, 35_000);
    }

    #[test]
    fn test_two_goals_water_fill() {
        // Required 300 and 400 per month; only 500 available
        let goals = vec![
            Goal::new("b", "Second", 4_000, 2).with_target_date(months_ahead(10)),
            Goal::new("a", "First", 3_000, 1).with_target_date(months_ahead(10)),
        ];
        let plan = plan(&goals, 500, as_of(), &PlannerConfig::default()).unwrap();

        assert_eq!(plan.allocations[0].goal_id, "a");
        let first = plan.allocation("a").unwrap();
        assert_eq!(first.monthly_contribution, 300);
        assert!(first.feasibility.is_feasible());

        let second = plan.allocation("b").unwrap();
        assert_eq!(second.monthly_contribution, 200);
        assert_eq!(second.shortfall, 200);
        assert!(!second.feasibility.is_feasible());
        // 200/month for 10 months, then 500/month for the remaining 2000
        assert_eq!(second.months_to_complete, Some(14));
        assert!(second.projected_completion.unwrap() > months_ahead(10));
        assert_eq!(plan.total_allocated, 500);
    }

    #[test]
    fn test_priority_tie_broken_by_nearest_date() {
        let goals = vec![
            Goal::new("later", "Later", 12_000, 1).with_target_date(months_ahead(12)),
            Goal::new("sooner", "Sooner", 6_000, 1).with_target_date(months_ahead(6)),
        ];
        let plan = plan(&goals, 1_000, as_of(), &PlannerConfig::default()).unwrap();
        assert_eq!(plan.allocations[0].goal_id, "sooner");
        assert_eq!(plan.allocation("sooner").unwrap().monthly_contribution, 1_000);
        assert_eq!(plan.allocation("later").unwrap().monthly_contribution, 0);
    }

    #[test]
    fn test_undated_goals_take_leftover_after_dated() {
        let goals = vec![
            Goal::new("open", "Open-ended", 100_000, 1),
            Goal::new("dated", "Dated", 10_000, 2).with_target_date(months_ahead(10)),
        ];
        let plan = plan(&goals, 5_000, as_of(), &PlannerConfig::default()).unwrap();
        assert_eq!(plan.allocation("dated").unwrap().monthly_contribution, 1_000);
        assert_eq!(plan.allocation("open").unwrap().monthly_contribution, 4_000);
    }

    #[test]
    fn test_target_this_month_is_infeasible() {
        let goals = vec![Goal::new("g", "Soon", 10_000, 1)
            .with_target_date(as_of() + chrono::Duration::days(10))];
        let plan = plan(&goals, 50_000, as_of(), &PlannerConfig::default()).unwrap();
        assert_eq!(
            plan.allocation("g").unwrap().feasibility,
            Feasibility::Infeasible {
                reason: InfeasibleReason::TargetTooSoon
            }
        );
    }

    #[test]
    fn test_invalid_goals() {
        let config = PlannerConfig::default();
        let covered = vec![Goal::new("g", "Done", 1_000, 1).with_saved(1_000)];
        assert!(matches!(
            plan(&covered, 500, as_of(), &config),
            Err(Error::InvalidGoal { .. })
        ));

        let past = vec![Goal::new("g", "Past", 1_000, 1)
            .with_target_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())];
        assert!(matches!(
            plan(&past, 500, as_of(), &config),
            Err(Error::InvalidGoal { .. })
        ));

        let dup = vec![
            Goal::new("g", "One", 1_000, 1),
            Goal::new("g", "Two", 2_000, 2),
        ];
        assert!(matches!(
            plan(&dup, 500, as_of(), &config),
            Err(Error::InvalidGoal { .. })
        ));
    }

    #[test]
    fn test_no_surplus_with_dated_goal() {
        let goals = vec![Goal::new("g", "Car", 10_000, 1).with_target_date(months_ahead(5))];
        let err = plan(&goals, 0, as_of(), &PlannerConfig::default()).unwrap_err();
        assert_eq!(
            err,
            Error::NoSurplus {
                surplus: 0,
                goal_id: "g".to_string()
            }
        );
    }

    #[test]
    fn test_no_surplus_with_only_undated_goals() {
        let goals = vec![Goal::new("g", "Someday", 10_000, 1)];
        let plan = plan(&goals, -500, as_of(), &PlannerConfig::default()).unwrap();
        let goal = plan.allocation("g").unwrap();
        assert_eq!(goal.monthly_contribution, 0);
        assert_eq!(goal.projected_completion, None);
        assert_eq!(plan.total_allocated, 0);
        assert_eq!(plan.unallocated, 0);
    }

    #[test]
    fn test_completion_beyond_horizon() {
        let config = PlannerConfig { horizon_months: 24 };
        let goals = vec![Goal::new("house", "House", 10_000_000, 1)];
        let plan = plan(&goals, 10_000, as_of(), &config).unwrap();
        let house = plan.allocation("house").unwrap();
        assert_eq!(house.months_to_complete, None);
        assert!(house.explanation.contains("planning horizon"));
    }

    #[test]
    fn test_empty_goals() {
        let plan = plan(&[], 10_000, as_of(), &PlannerConfig::default()).unwrap();
        assert!(plan.allocations.is_empty());
        assert_eq!(plan.unallocated, 10_000);
    }

    #[test]
    fn test_plan_is_idempotent() {
        let goals = vec![
            Goal::new("a", "A", 50_000, 2).with_target_date(months_ahead(8)),
            Goal::new("b", "B", 90_000, 1).with_target_date(months_ahead(18)),
            Goal::new("c", "C", 30_000, 3),
        ];
        let config = PlannerConfig::default();
        let first = plan(&goals, 9_000, as_of(), &config).unwrap();
        let second = plan(&goals, 9_000, as_of(), &config).unwrap();
        assert_eq!(first, second);
        assert!(first.total_allocated <= 9_000);
    }
}
