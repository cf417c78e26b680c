//! Savings goal commands

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use finpath_core::goals::MilestoneKind;
use finpath_core::{
    feasibility_score, format_minor, goal_insights, plan, scenarios, AllocationPlan, Feasibility,
    Goal, GoalInsight, GoalMilestone, GoalScenario,
};
use rust_decimal::Decimal;
use serde::Serialize;

use super::truncate;
use super::{load_config, print_json, read_json, resolve_date};

#[derive(Serialize)]
struct GoalsReport<'a> {
    plan: &'a AllocationPlan,
    feasibility_score: Decimal,
    insights: Vec<GoalInsight>,
    milestones: Vec<GoalMilestone>,
    scenarios: BTreeMap<String, Vec<GoalScenario>>,
}

pub fn cmd_goals(
    config_path: Option<&Path>,
    goals_path: &Path,
    surplus: i64,
    as_of: Option<&str>,
    json: bool,
) -> Result<()> {
    let (config, _) = load_config(config_path)?;
    let goals: Vec<Goal> = read_json(goals_path, "goals")?;
    let as_of = resolve_date(as_of, "as-of")?;

    let allocation =
        plan(&goals, surplus, as_of, &config.planner).context("Goal planning failed")?;
    let goal_scenarios: BTreeMap<String, Vec<GoalScenario>> = goals
        .iter()
        .map(|g| (g.id.clone(), scenarios(g, surplus, as_of)))
        .collect();

    if json {
        return print_json(&GoalsReport {
            plan: &allocation,
            feasibility_score: feasibility_score(&allocation),
            insights: goal_insights(&allocation),
            milestones: allocation.milestones(),
            scenarios: goal_scenarios,
        });
    }

    print_allocation(&allocation);
    print_goal_milestones(&allocation.milestones());
    print_scenarios(&goals, &goal_scenarios);
    Ok(())
}

fn verdict_icon(feasibility: &Feasibility) -> &'static str {
    match feasibility {
        Feasibility::Feasible => "✅",
        Feasibility::Infeasible { .. } => "❌",
        Feasibility::Unscheduled => "⏳",
    }
}

pub(crate) fn print_allocation(plan: &AllocationPlan) {
    println!();
    println!("🎯 Goal Plan");
    println!(
        "   Surplus: {}/month as of {}",
        format_minor(plan.monthly_surplus),
        plan.as_of
    );
    println!("   ─────────────────────────────────────────────────────────────");

    if plan.allocations.is_empty() {
        println!("   No goals to plan.");
        return;
    }

    println!(
        "   {:20} │ {:>3} │ {:>10} │ {:>10} │ {:>10}",
        "Goal", "Pri", "Monthly", "Required", "Completes"
    );
    println!("   ─────────────────────┼─────┼────────────┼────────────┼────────────");
    for allocation in &plan.allocations {
        println!(
            "   {:20} │ {:>3} │ {:>10} │ {:>10} │ {:>10} {}",
            truncate(&allocation.name, 20),
            allocation.priority,
            format_minor(allocation.monthly_contribution),
            allocation
                .required_contribution
                .map(format_minor)
                .unwrap_or_else(|| "-".to_string()),
            allocation
                .projected_completion
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_else(|| "never".to_string()),
            verdict_icon(&allocation.feasibility)
        );
    }

    println!();
    for allocation in &plan.allocations {
        println!("   {}: {}", allocation.name, allocation.explanation);
    }

    println!();
    println!(
        "   Allocated {} · unallocated {}",
        format_minor(plan.total_allocated),
        format_minor(plan.unallocated)
    );
    println!("   Feasibility score: {}/100", feasibility_score(plan));
    if plan.total_shortfall() > 0 {
        println!(
            "⚠️  {}/month more would put every dated goal on track",
            format_minor(plan.total_shortfall())
        );
    }
    for insight in goal_insights(plan) {
        println!("   💡 {}: {}", insight.title, insight.summary);
    }
}

fn print_goal_milestones(milestones: &[GoalMilestone]) {
    if milestones.is_empty() {
        return;
    }
    println!();
    println!("🏁 Milestones");
    for milestone in milestones {
        let label = match milestone.kind {
            MilestoneKind::Halfway => "halfway",
            MilestoneKind::Completion => "complete",
        };
        println!(
            "   {} {} - {} ({} months)",
            milestone.date.format("%b %Y"),
            label,
            milestone.name,
            milestone.months_from_now
        );
    }
}

fn print_scenarios(goals: &[Goal], scenarios: &BTreeMap<String, Vec<GoalScenario>>) {
    println!();
    println!("🔮 If one goal had the surplus to itself");
    for goal in goals {
        let Some(options) = scenarios.get(&goal.id) else {
            continue;
        };
        let parts: Vec<String> = options
            .iter()
            .map(|s| match s.months {
                Some(months) => format!("{} {}% → {} mo", s.name, s.percent, months),
                None => format!("{} {}% → never", s.name, s.percent),
            })
            .collect();
        println!("   {}: {}", truncate(&goal.name, 20), parts.join(" · "));
    }
}
