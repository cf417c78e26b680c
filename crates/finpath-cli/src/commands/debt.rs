//! Debt payoff commands

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use finpath_core::{
    compare_strategies, debt_insights, format_minor, payoff_milestones, simulate, Debt,
    DebtInsight, PayoffMilestone, PayoffSchedule, StrategyComparison,
};
use serde::Serialize;

use super::truncate;
use super::{load_config, parse_strategy, print_json, read_json, resolve_date};

/// Months of the schedule shown in table output
const SCHEDULE_PREVIEW_MONTHS: usize = 12;

#[derive(Serialize)]
struct DebtReport<'a> {
    schedule: &'a PayoffSchedule,
    milestones: Vec<PayoffMilestone>,
    insights: Vec<DebtInsight>,
}

#[derive(Serialize)]
struct ComparisonReport<'a> {
    comparison: &'a StrategyComparison,
    insights: Vec<DebtInsight>,
}

pub fn cmd_debt(
    config_path: Option<&Path>,
    debts_path: &Path,
    budget: i64,
    strategy: &str,
    start: Option<&str>,
    json: bool,
) -> Result<()> {
    let (config, _) = load_config(config_path)?;
    let debts: Vec<Debt> = read_json(debts_path, "debts")?;
    let start = resolve_date(start, "start")?;

    if strategy.eq_ignore_ascii_case("compare") {
        let comparison = compare_strategies(&debts, budget, &config.simulator)
            .context("Strategy comparison failed")?;
        if json {
            return print_json(&ComparisonReport {
                comparison: &comparison,
                insights: debt_insights(&debts),
            });
        }
        print_comparison(&comparison, start);
        print_debt_insights(&debt_insights(&debts));
        return Ok(());
    }

    let strategy = parse_strategy(strategy)?;
    let schedule = simulate(&debts, budget, strategy, &config.simulator)
        .context("Debt simulation failed")?;
    let milestones = payoff_milestones(&schedule, &debts, Some(start));

    if json {
        return print_json(&DebtReport {
            schedule: &schedule,
            milestones,
            insights: debt_insights(&debts),
        });
    }

    print_schedule(&schedule, &debts, start);
    print_milestones(&milestones);
    print_debt_insights(&debt_insights(&debts));
    Ok(())
}

fn print_schedule(schedule: &PayoffSchedule, debts: &[Debt], start: NaiveDate) {
    println!();
    println!("💳 Debt Payoff - {}", schedule.strategy);
    println!("   {}", schedule.strategy.explanation());
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Monthly budget:  {}", format_minor(schedule.monthly_budget));
    println!(
        "   Debt-free in:    {} months ({})",
        schedule.months_to_payoff,
        schedule.payoff_date(start).format("%B %Y")
    );
    println!("   Total interest:  {}", format_minor(schedule.total_interest));
    println!("   Total paid:      {}", format_minor(schedule.total_paid));

    if let Some(ref baseline) = schedule.baseline {
        println!(
            "   vs minimums only: saves {} interest and {} months",
            format_minor(baseline.interest_saved),
            baseline.months_saved
        );
    }

    if schedule.months.is_empty() {
        return;
    }

    println!();
    let names: Vec<String> = debts
        .iter()
        .map(|d| truncate(d.display_name(), 12))
        .collect();
    print!("   {:>5} │ {:>10}", "Month", "Interest");
    for name in &names {
        print!(" │ {:>12}", name);
    }
    println!();

    for month in schedule.months.iter().take(SCHEDULE_PREVIEW_MONTHS) {
        print!(
            "   {:>5} │ {:>10}",
            month.month,
            format_minor(month.interest_accrued)
        );
        for debt in debts {
            let remaining = month
                .entry(&debt.id)
                .map(|e| format_minor(e.remaining))
                .unwrap_or_else(|| "paid".to_string());
            print!(" │ {:>12}", remaining);
        }
        println!();
    }
    if schedule.months.len() > SCHEDULE_PREVIEW_MONTHS {
        println!(
            "   ... {} more months (use --json for the full schedule)",
            schedule.months.len() - SCHEDULE_PREVIEW_MONTHS
        );
    }
}

fn print_milestones(milestones: &[PayoffMilestone]) {
    if milestones.is_empty() {
        return;
    }
    println!();
    println!("🎯 Payoff Milestones");
    for milestone in milestones {
        let when = milestone
            .date
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| format!("month {}", milestone.month));
        println!(
            "   {} paid off {} - frees {}/month",
            milestone.name,
            when,
            format_minor(milestone.freed_cash_flow)
        );
    }
}

fn print_comparison(comparison: &StrategyComparison, start: NaiveDate) {
    println!();
    println!("⚖️  Strategy Comparison");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:10} │ {:>7} │ {:>12} │ {:>14}",
        "Strategy", "Months", "Interest", "Debt-free"
    );
    println!("   ───────────┼─────────┼──────────────┼────────────────");
    for outcome in &comparison.outcomes {
        match (&outcome.schedule, &outcome.failure) {
            (Some(schedule), _) => println!(
                "   {:10} │ {:>7} │ {:>12} │ {:>14}",
                outcome.strategy.as_str(),
                schedule.months_to_payoff,
                format_minor(schedule.total_interest),
                schedule.payoff_date(start).format("%b %Y").to_string()
            ),
            (None, failure) => println!(
                "   {:10} │ {}",
                outcome.strategy.as_str(),
                failure.as_deref().unwrap_or("no schedule")
            ),
        }
    }

    if let Some(best) = comparison.cheapest() {
        println!();
        println!(
            "✅ {} costs the least: {} in interest",
            best.strategy,
            format_minor(best.total_interest)
        );
    }
}

fn print_debt_insights(insights: &[DebtInsight]) {
    if insights.is_empty() {
        return;
    }
    println!();
    for insight in insights {
        println!("   ⚠️  {}: {}", insight.title, insight.summary);
    }
}
