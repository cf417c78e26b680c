//! Month-by-month payoff simulation
//!
//! Each month every open debt accrues interest (exact decimal, rounded to the
//! minor unit where it is posted to the schedule) and pays its minimum. The
//! leftover budget first tops up any debt whose minimum fell short of its
//! interest, then goes to the focus debt picked by the strategy. When the
//! focus is cleared mid-month the strategy picks again, so no budget is left
//! idle while any balance remains.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result, UnreachableReason};
use crate::models::Debt;
use crate::money::{monthly_interest, to_minor, Money};

use super::strategy::{select_focus, OpenDebt};
use super::types::{
    BaselineComparison, DebtMonth, DebtOutcome, HybridMetric, PayoffSchedule, ScheduleMonth,
    Strategy, StrategyComparison, StrategyOutcome,
};

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Months before giving up with `UnreachablePayoff` (default 600)
    pub horizon_months: u32,
    pub hybrid_metric: HybridMetric,
    /// Also simulate minimum payments only and report the savings (default true)
    pub compare_baseline: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            horizon_months: 600,
            hybrid_metric: HybridMetric::default(),
            compare_baseline: true,
        }
    }
}

/// Whether leftover budget is steered to a focus debt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Allocation {
    Strategy(Strategy),
    MinimumsOnly,
}

/// Raw simulation result before baseline comparison
struct RunOutput {
    months: Vec<ScheduleMonth>,
    debts: Vec<DebtOutcome>,
    total_interest: Money,
    total_paid: Money,
}

/// Stateless simulator bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct DebtSimulator {
    config: SimulatorConfig,
}

impl DebtSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Simulate paying `debts` with a fixed `monthly_budget` under `strategy`
    pub fn simulate(
        &self,
        debts: &[Debt],
        monthly_budget: Money,
        strategy: Strategy,
    ) -> Result<PayoffSchedule> {
        validate_debts(debts)?;
        let required = total_minimums(debts);
        if monthly_budget < required {
            return Err(Error::InsufficientBudget {
                budget: monthly_budget,
                required,
            });
        }

        let run = self.run(debts, monthly_budget, Allocation::Strategy(strategy))?;
        let months_to_payoff = run.months.len() as u32;

        let baseline = if self.config.compare_baseline && !debts.is_empty() {
            match self.run(debts, required, Allocation::MinimumsOnly) {
                Ok(base) => {
                    let base_months = base.months.len() as u32;
                    Some(BaselineComparison {
                        total_interest: base.total_interest,
                        months_to_payoff: base_months,
                        interest_saved: base.total_interest - run.total_interest,
                        months_saved: i64::from(base_months) - i64::from(months_to_payoff),
                    })
                }
                Err(e) => {
                    warn!(error = %e, "Minimum-payment baseline does not converge");
                    None
                }
            }
        } else {
            None
        };

        debug!(
            strategy = strategy.as_str(),
            months = months_to_payoff,
            total_interest = run.total_interest,
            "Payoff simulation complete"
        );

        Ok(PayoffSchedule {
            strategy,
            monthly_budget,
            months: run.months,
            debts: run.debts,
            total_interest: run.total_interest,
            total_paid: run.total_paid,
            months_to_payoff,
            baseline,
        })
    }

    /// Run every strategy; validation and budget errors fail the comparison,
    /// convergence failures are reported per strategy
    pub fn compare(&self, debts: &[Debt], monthly_budget: Money) -> Result<StrategyComparison> {
        let mut outcomes = Vec::with_capacity(Strategy::all().len());
        for &strategy in Strategy::all() {
            match self.simulate(debts, monthly_budget, strategy) {
                Ok(schedule) => outcomes.push(StrategyOutcome {
                    strategy,
                    schedule: Some(schedule),
                    failure: None,
                }),
                Err(e @ Error::UnreachablePayoff(_)) => outcomes.push(StrategyOutcome {
                    strategy,
                    schedule: None,
                    failure: Some(e.to_string()),
                }),
                Err(e) => return Err(e),
            }
        }
        Ok(StrategyComparison { outcomes })
    }

    fn run(&self, debts: &[Debt], budget: Money, allocation: Allocation) -> Result<RunOutput> {
        let mut balances: Vec<Money> = debts.iter().map(|d| d.principal).collect();
        let mut outcomes: Vec<DebtOutcome> = debts
            .iter()
            .map(|d| DebtOutcome {
                debt_id: d.id.clone(),
                payoff_month: 0,
                interest_paid: 0,
                total_paid: 0,
            })
            .collect();
        let mut months = Vec::new();
        let mut total_interest: Money = 0;
        let mut total_paid: Money = 0;

        let mut month: u32 = 0;
        while balances.iter().any(|&b| b > 0) {
            month += 1;
            if month > self.config.horizon_months {
                return Err(Error::UnreachablePayoff(UnreachableReason::HorizonExceeded {
                    horizon_months: self.config.horizon_months,
                    remaining: balances.iter().sum(),
                }));
            }

            let opening = balances.clone();
            let mut interest = vec![0; debts.len()];
            let mut payments = vec![0; debts.len()];
            let mut spent: Money = 0;

            for (i, debt) in debts.iter().enumerate() {
                if opening[i] == 0 {
                    continue;
                }
                interest[i] = to_minor(monthly_interest(opening[i], debt.annual_rate));
                balances[i] += interest[i];

                let minimum = debt.minimum_payment.min(balances[i]);
                payments[i] = minimum;
                balances[i] -= minimum;
                spent += minimum;
            }

            let mut focus_id = None;
            if let Allocation::Strategy(strategy) = allocation {
                let mut leftover = budget - spent;
                for (i, &start) in opening.iter().enumerate() {
                    let gap = balances[i] - start;
                    if start == 0 || gap <= 0 || leftover == 0 {
                        continue;
                    }
                    let cover = gap.min(leftover);
                    payments[i] += cover;
                    balances[i] -= cover;
                    leftover -= cover;
                }
                while leftover > 0 {
                    let open: Vec<OpenDebt> = debts
                        .iter()
                        .enumerate()
                        .map(|(index, d)| OpenDebt {
                            index,
                            balance: balances[index],
                            rate: d.annual_rate,
                        })
                        .collect();
                    let Some(focus) = select_focus(strategy, self.config.hybrid_metric, &open)
                    else {
                        break;
                    };
                    let extra = leftover.min(balances[focus]);
                    payments[focus] += extra;
                    balances[focus] -= extra;
                    leftover -= extra;
                    if focus_id.is_none() {
                        focus_id = Some(debts[focus].id.clone());
                    }
                }
            }

            let mut entries = Vec::new();
            for (i, debt) in debts.iter().enumerate() {
                if opening[i] == 0 {
                    continue;
                }
                if balances[i] > opening[i] {
                    return Err(Error::UnreachablePayoff(
                        UnreachableReason::NegativeAmortization {
                            debt_id: debt.id.clone(),
                            month,
                            interest: interest[i],
                            payment: payments[i],
                        },
                    ));
                }
                if balances[i] == 0 {
                    outcomes[i].payoff_month = month;
                }
                outcomes[i].interest_paid += interest[i];
                outcomes[i].total_paid += payments[i];
                entries.push(DebtMonth {
                    debt_id: debt.id.clone(),
                    interest: interest[i],
                    payment: payments[i],
                    remaining: balances[i],
                });
            }

            let interest_accrued: Money = interest.iter().sum();
            total_interest += interest_accrued;
            total_paid += payments.iter().sum::<Money>();
            months.push(ScheduleMonth {
                month,
                entries,
                interest_accrued,
                focus: focus_id,
            });
        }

        Ok(RunOutput {
            months,
            debts: outcomes,
            total_interest,
            total_paid,
        })
    }
}

/// Sum of minimum payments for debts with a balance
pub fn total_minimums(debts: &[Debt]) -> Money {
    debts
        .iter()
        .filter(|d| d.principal > 0)
        .map(|d| d.minimum_payment)
        .sum()
}

/// Reject inputs the simulation cannot interpret
pub fn validate_debts(debts: &[Debt]) -> Result<()> {
    let mut seen = HashSet::new();
    for debt in debts {
        let invalid = |reason: &str| Error::InvalidDebt {
            debt_id: debt.id.clone(),
            reason: reason.to_string(),
        };
        if !seen.insert(debt.id.as_str()) {
            return Err(invalid("duplicate id"));
        }
        if debt.principal < 0 {
            return Err(invalid("principal is negative"));
        }
        if debt.annual_rate < Decimal::ZERO {
            return Err(invalid("interest rate is negative"));
        }
        if debt.minimum_payment < 0 {
            return Err(invalid("minimum payment is negative"));
        }
        if debt.principal > 0 && debt.minimum_payment == 0 {
            return Err(invalid("minimum payment must be positive while a balance is owed"));
        }
    }
    Ok(())
}

/// Simulate with an explicit configuration
pub fn simulate(
    debts: &[Debt],
    monthly_budget: Money,
    strategy: Strategy,
    config: &SimulatorConfig,
) -> Result<PayoffSchedule> {
    DebtSimulator::new(config.clone()).simulate(debts, monthly_budget, strategy)
}

/// Run all three strategies with an explicit configuration
pub fn compare_strategies(
    debts: &[Debt],
    monthly_budget: Money,
    config: &SimulatorConfig,
) -> Result<StrategyComparison> {
    DebtSimulator::new(config.clone()).compare(debts, monthly_budget)
}
