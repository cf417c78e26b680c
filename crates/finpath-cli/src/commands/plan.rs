//! Joint debt and goal planning command

use std::path::Path;

use anyhow::{Context, Result};
use finpath_core::{format_minor, plan_jointly, Debt, Goal, JointPlan};

use super::goals::print_allocation;
use super::{load_config, parse_strategy, print_json, read_json, resolve_date};

pub fn cmd_plan(
    config_path: Option<&Path>,
    debts_path: &Path,
    goals_path: &Path,
    surplus: i64,
    strategy: &str,
    as_of: Option<&str>,
    json: bool,
) -> Result<()> {
    let (config, _) = load_config(config_path)?;
    let debts: Vec<Debt> = read_json(debts_path, "debts")?;
    let goals: Vec<Goal> = read_json(goals_path, "goals")?;
    let strategy = parse_strategy(strategy)?;
    let as_of = resolve_date(as_of, "as-of")?;

    let joint = plan_jointly(&debts, &goals, surplus, strategy, as_of, &config)
        .context("Joint planning failed")?;

    if json {
        return print_json(&joint);
    }

    print_joint(&joint);
    Ok(())
}

fn print_joint(joint: &JointPlan) {
    println!();
    println!("🧭 Joint Plan");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Monthly surplus:   {}", format_minor(joint.monthly_surplus));
    println!("   Debt minimums:     {}", format_minor(joint.debt_minimums));
    println!(
        "   Goals:             {}",
        format_minor(joint.goals.total_allocated)
    );
    println!(
        "   Extra to debts:    {}",
        format_minor(joint.debt_budget - joint.debt_minimums)
    );
    let idle = joint.monthly_surplus - joint.total_committed;
    if idle > 0 {
        println!("   Uncommitted:       {}", format_minor(idle));
    }

    println!();
    match joint.debt_free_date() {
        Some(date) => println!(
            "💳 {} plan: debt-free {} after {} months, {} interest",
            joint.debts.strategy,
            date.format("%B %Y"),
            joint.debts.months_to_payoff,
            format_minor(joint.debts.total_interest)
        ),
        None => println!("💳 No debts to pay off"),
    }

    print_allocation(&joint.goals);
}
