//! Goal Feasibility Planner
//!
//! Splits one monthly surplus across savings goals in priority order. Each
//! dated goal gets the contribution it needs to land on its target date while
//! surplus remains; goals without a date share what is left. Completion dates
//! come from a month-by-month projection in which money released by finished
//! goals flows to the ones still open.

pub mod advice;
pub mod planner;
pub mod scenarios;
pub mod types;

pub use advice::{feasibility_score, goal_insights, GoalInsight};
pub use planner::{plan, validate_goals, GoalPlanner, PlannerConfig};
pub use scenarios::{milestones, scenarios};
pub use types::{
    AllocationPlan, Feasibility, GoalAllocation, GoalMilestone, GoalScenario, InfeasibleReason,
    MilestoneKind,
};
