//! Money arithmetic in integer minor units
//!
//! Amounts are `i64` minor units (cents). Rates and percentages are
//! [`Decimal`], so every intermediate value is exact base-10 arithmetic and
//! rounding happens only when a value is converted back to minor units.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// An amount in minor currency units (e.g. cents)
pub type Money = i64;

const MONTHS_PER_YEAR: i64 = 12;

/// Round an exact decimal to the nearest minor unit (banker's rounding)
pub fn to_minor(value: Decimal) -> Money {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_i64()
        .unwrap_or(if value.is_sign_negative() {
            Money::MIN
        } else {
            Money::MAX
        })
}

/// Exact monthly interest on `balance` at `annual_rate` (a fraction, 0.22 = 22%)
pub fn monthly_interest(balance: Money, annual_rate: Decimal) -> Decimal {
    Decimal::from(balance) * annual_rate / Decimal::from(MONTHS_PER_YEAR)
}

/// Percent change from `from` to `to`, or None when `from` is zero
pub fn percent_change(from: Money, to: Money) -> Option<Decimal> {
    if from == 0 {
        return None;
    }
    let from = Decimal::from(from);
    Some((Decimal::from(to) - from) / from * Decimal::ONE_HUNDRED)
}

/// `part` as a percentage of `whole`, or None when `whole` is zero
pub fn percent_of(part: Money, whole: Money) -> Option<Decimal> {
    if whole == 0 {
        return None;
    }
    Some(Decimal::from(part) / Decimal::from(whole) * Decimal::ONE_HUNDRED)
}

/// Apply a percentage to an amount, rounding down to the minor unit
pub fn percent_of_amount(amount: Money, percent: Decimal) -> Money {
    let value = Decimal::from(amount) * percent / Decimal::ONE_HUNDRED;
    value.floor().to_i64().unwrap_or(0)
}

/// Integer division rounding up, for non-negative numerators and positive divisors
pub fn ceil_div(numerator: Money, divisor: Money) -> Money {
    debug_assert!(divisor > 0);
    if numerator <= 0 {
        return 0;
    }
    numerator / divisor + i64::from(numerator % divisor != 0)
}

/// Render minor units as a major-unit string, e.g. `123456` -> `"1234.56"`
pub fn format_minor(amount: Money) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
