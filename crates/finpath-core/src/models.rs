//! Domain models for finpath
//!
//! Input records supplied by the caller. The engine only ever borrows them;
//! every analysis returns freshly derived output types.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// A normalized, categorized transaction
///
/// Negative amounts are outflows (spending), positive amounts are inflows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: Money,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount,
            category: category.into(),
            description: description.into(),
        }
    }

    /// Spending magnitude (zero for inflows)
    pub fn outflow(&self) -> Money {
        if self.amount < 0 {
            -self.amount
        } else {
            0
        }
    }
}

/// A half-open date interval `[start, end)` used as a comparison window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The calendar month containing the first day of `year`-`month`
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = start.checked_add_months(Months::new(1))?;
        Some(Self { start, end })
    }

    /// `count` consecutive calendar months, oldest first, ending with the month of `as_of`
    pub fn trailing_months(as_of: NaiveDate, count: u32) -> Vec<Self> {
        let Some(current) = Self::month(as_of.year(), as_of.month()) else {
            return Vec::new();
        };
        (0..count)
            .rev()
            .filter_map(|back| {
                let start = current.start.checked_sub_months(Months::new(back))?;
                Self::month(start.year(), start.month())
            })
            .collect()
    }

    /// The period of the same shape ending where this one starts
    pub fn preceding(&self) -> Self {
        let start = if self.is_calendar_month() {
            self.start.checked_sub_months(Months::new(1))
        } else {
            self.start.checked_sub_signed(self.end - self.start)
        };
        Self {
            start: start.unwrap_or(NaiveDate::MIN),
            end: self.start,
        }
    }

    fn is_calendar_month(&self) -> bool {
        self.start.day() == 1 && self.start.checked_add_months(Months::new(1)) == Some(self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// `YYYY-MM` for whole calendar months, `start..end` otherwise
    pub fn label(&self) -> String {
        if self.is_calendar_month() {
            self.start.format("%Y-%m").to_string()
        } else {
            format!("{}..{}", self.start, self.end)
        }
    }
}

/// A debt to be paid down
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Outstanding balance in minor units
    pub principal: Money,
    /// Annual interest rate as a fraction (0.22 = 22% APR)
    pub annual_rate: Decimal,
    pub minimum_payment: Money,
}

impl Debt {
    pub fn new(
        id: impl Into<String>,
        principal: Money,
        annual_rate: Decimal,
        minimum_payment: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            principal,
            annual_rate,
            minimum_payment,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// A savings goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: Money,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    /// 1 is the highest priority
    pub priority: u32,
    #[serde(default)]
    pub current_saved: Money,
}

impl Goal {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        target_amount: Money,
        priority: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target_amount,
            target_date: None,
            priority,
            current_saved: 0,
        }
    }

    pub fn with_target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    pub fn with_saved(mut self, saved: Money) -> Self {
        self.current_saved = saved;
        self
    }

    /// Amount still needed to reach the target
    pub fn remaining(&self) -> Money {
        (self.target_amount - self.current_saved).max(0)
    }
}

/// Whole calendar months from `from` to `to`, not counting a partial final month
pub fn months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    if to <= from {
        return 0;
    }
    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// `date` shifted forward by `months` calendar months (clamped to month end)
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(NaiveDate::MAX)
}
