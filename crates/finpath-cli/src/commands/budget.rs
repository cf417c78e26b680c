//! Budget analysis command

use std::path::Path;

use anyhow::{Context, Result};
use finpath_core::{analyze, format_minor, BudgetReport, Insight, Period, Severity};

use super::truncate;
use super::{load_config, print_json, read_transactions, resolve_date};

pub fn cmd_budget(
    config_path: Option<&Path>,
    transactions_path: &Path,
    months: u32,
    as_of: Option<&str>,
    json: bool,
) -> Result<()> {
    if months == 0 {
        anyhow::bail!("--months must be at least 1");
    }
    let (config, _) = load_config(config_path)?;
    let as_of = resolve_date(as_of, "as-of")?;
    let transactions = read_transactions(transactions_path)?;

    let periods = Period::trailing_months(as_of, months);
    let report =
        analyze(&transactions, &periods, &config.analyzer).context("Budget analysis failed")?;

    if json {
        return print_json(&report);
    }

    print_report(&report);
    Ok(())
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Alert => "🚨",
        Severity::Warning => "⚠️ ",
        Severity::Attention => "👀",
        Severity::Info => "💡",
    }
}

fn print_report(report: &BudgetReport) {
    let Some(current) = report.periods.len().checked_sub(1) else {
        println!("No periods to analyze.");
        return;
    };

    println!();
    println!("📊 Budget Analysis");
    println!(
        "   Periods: {} to {}",
        report.periods[0].label(),
        report.periods[current].label()
    );
    println!("   ─────────────────────────────────────────────────────────────");

    let mut rows: Vec<_> = report.summaries_for(current).collect();
    if rows.is_empty() {
        println!("   No transactions in the current period.");
    } else {
        rows.sort_by(|a, b| b.outflow().cmp(&a.outflow()).then(a.category.cmp(&b.category)));
        println!(
            "   {:25} │ {:>12} │ {:>12} │ {:>5}",
            "Category", "Net", "Prior", "Count"
        );
        println!("   ──────────────────────────┼──────────────┼──────────────┼───────");
        for row in rows {
            println!(
                "   {:25} │ {:>12} │ {:>12} │ {:>5}",
                truncate(&row.category, 25),
                format_minor(row.total),
                row.prior_total
                    .map(format_minor)
                    .unwrap_or_else(|| "-".to_string()),
                row.count
            );
        }
    }

    let overview = &report.overview;
    println!();
    println!("   Inflow:   {:>12}", format_minor(overview.total_inflow));
    println!("   Outflow:  {:>12}", format_minor(overview.total_outflow));
    println!("   Net:      {:>12}", format_minor(overview.net));
    if let Some(rate) = overview.savings_rate() {
        println!("   Savings rate: {}%", rate.round_dp(1));
    }
    if let Some(ref top) = overview.top_category {
        println!("   Top category: {}", top);
    }

    println!();
    if report.insights.is_empty() {
        println!("✅ Nothing unusual this period.");
    } else {
        println!("🔎 Insights ({})", report.insights.len());
        for insight in &report.insights {
            print_insight(insight);
        }
    }

    println!();
    println!(
        "💰 Disposable income: {}/month",
        format_minor(report.disposable_income())
    );
}

fn print_insight(insight: &Insight) {
    println!(
        "   {} [{}] {}",
        severity_icon(insight.severity),
        insight.kind,
        insight.title
    );
    println!("      {}", insight.summary);
    if let Some(ref tx) = insight.transaction {
        println!(
            "      {} {} {}",
            tx.date,
            format_minor(tx.amount),
            truncate(&tx.description, 40)
        );
    }
}
