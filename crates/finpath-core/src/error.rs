//! Error types for finpath

use thiserror::Error;

use crate::money::Money;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid period at index {index}: {reason}")]
    InvalidPeriod { index: usize, reason: String },

    #[error("Insufficient budget: {budget} cannot cover minimum payments of {required}")]
    InsufficientBudget { budget: Money, required: Money },

    #[error("Unreachable payoff: {0}")]
    UnreachablePayoff(UnreachableReason),

    #[error("Invalid debt '{debt_id}': {reason}")]
    InvalidDebt { debt_id: String, reason: String },

    #[error("Invalid goal '{goal_id}': {reason}")]
    InvalidGoal { goal_id: String, reason: String },

    #[error("No surplus: monthly surplus {surplus} cannot fund goal '{goal_id}'")]
    NoSurplus { surplus: Money, goal_id: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Why a payoff simulation could not converge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnreachableReason {
    /// Balances were still open after the horizon cap
    HorizonExceeded { horizon_months: u32, remaining: Money },
    /// A debt's payment did not cover its accrued interest
    NegativeAmortization {
        debt_id: String,
        month: u32,
        interest: Money,
        payment: Money,
    },
}

impl std::fmt::Display for UnreachableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HorizonExceeded {
                horizon_months,
                remaining,
            } => write!(
                f,
                "{} still owed after the {}-month horizon",
                remaining, horizon_months
            ),
            Self::NegativeAmortization {
                debt_id,
                month,
                interest,
                payment,
            } => write!(
                f,
                "debt '{}' accrued {} interest in month {} but only {} was paid",
                debt_id, interest, month, payment
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = Error::InsufficientBudget {
            budget: 2000,
            required: 3500,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient budget: 2000 cannot cover minimum payments of 3500"
        );

        let err = Error::UnreachablePayoff(UnreachableReason::HorizonExceeded {
            horizon_months: 600,
            remaining: 125,
        });
        assert!(err.to_string().contains("600-month horizon"));
    }
}
