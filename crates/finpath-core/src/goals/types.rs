//! Core types for the Goal Feasibility Planner

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Why a dated goal cannot be met
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfeasibleReason {
    /// Higher-priority goals used the surplus first
    Underfunded,
    /// Target date falls before a full month of contributions
    TargetTooSoon,
}

/// Verdict for one goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Feasibility {
    Feasible,
    Infeasible { reason: InfeasibleReason },
    /// No target date: only a projected completion is reported
    Unscheduled,
}

impl Feasibility {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Feasibility::Feasible)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Feasibility::Feasible => "feasible",
            Feasibility::Infeasible { .. } => "infeasible",
            Feasibility::Unscheduled => "unscheduled",
        }
    }
}

/// The planner's decision for one goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalAllocation {
    pub goal_id: String,
    pub name: String,
    pub priority: u32,
    pub monthly_contribution: Money,
    /// Contribution needed to hit the target date (dated goals only)
    pub required_contribution: Option<Money>,
    pub shortfall: Money,
    pub months_to_complete: Option<u32>,
    /// None when completion falls beyond the planning horizon
    pub projected_completion: Option<NaiveDate>,
    pub feasibility: Feasibility,
    pub explanation: String,
}

/// Allocation of one monthly surplus across goals, in priority order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub as_of: NaiveDate,
    pub monthly_surplus: Money,
    pub allocations: Vec<GoalAllocation>,
    pub total_allocated: Money,
    pub unallocated: Money,
}

impl AllocationPlan {
    pub fn allocation(&self, goal_id: &str) -> Option<&GoalAllocation> {
        self.allocations.iter().find(|a| a.goal_id == goal_id)
    }

    /// Every dated goal is feasible
    pub fn all_feasible(&self) -> bool {
        self.allocations
            .iter()
            .all(|a| !matches!(a.feasibility, Feasibility::Infeasible { .. }))
    }

    pub fn total_shortfall(&self) -> Money {
        self.allocations.iter().map(|a| a.shortfall).sum()
    }

    /// Completion (and halfway) milestones in date order
    pub fn milestones(&self) -> Vec<GoalMilestone> {
        super::scenarios::milestones(self)
    }
}

/// A what-if contribution level for one goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalScenario {
    pub name: String,
    /// Share of the monthly surplus
    pub percent: u32,
    pub monthly_amount: Money,
    pub months: Option<u32>,
    pub completion: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneKind {
    Halfway,
    Completion,
}

/// A point worth celebrating on the way to a goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalMilestone {
    pub goal_id: String,
    pub name: String,
    pub kind: MilestoneKind,
    pub months_from_now: u32,
    pub date: NaiveDate,
    pub monthly_amount: Money,
}
