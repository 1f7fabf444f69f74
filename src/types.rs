use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::{Money, Rate};

pub const MONTHS_PER_YEAR: u32 = 12;

/// the four caller-supplied values one repayment plan is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    /// amount borrowed
    pub loan_amount: Money,
    /// share of the loan repaid in the first year, as a percentage (3.6 = 3.6%)
    pub initial_repayment_rate: Decimal,
    /// nominal annual interest rate, as a percentage
    pub annual_interest_rate: Decimal,
    /// years the interest rate is locked
    pub fixed_interest_period_years: u32,
}

impl CalculationInput {
    pub fn new(
        loan_amount: Money,
        initial_repayment_rate: Decimal,
        annual_interest_rate: Decimal,
        fixed_interest_period_years: u32,
    ) -> Self {
        Self {
            loan_amount,
            initial_repayment_rate,
            annual_interest_rate,
            fixed_interest_period_years,
        }
    }

    pub fn initial_repayment(&self) -> Rate {
        Rate::from_percentage(self.initial_repayment_rate)
    }

    pub fn interest_rate(&self) -> Rate {
        Rate::from_percentage(self.annual_interest_rate)
    }
}

/// time until the loan is paid off
///
/// `months` is always below twelve: a final year that needs all twelve
/// installments counts as a whole year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct LoanDuration {
    pub years: u32,
    pub months: u32,
}

impl LoanDuration {
    pub fn from_months(total_months: u32) -> Self {
        Self {
            years: total_months / MONTHS_PER_YEAR,
            months: total_months % MONTHS_PER_YEAR,
        }
    }

    pub fn total_months(&self) -> u32 {
        self.years * MONTHS_PER_YEAR + self.months
    }
}

impl fmt::Display for LoanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = |n: u32, one: &'static str, many: &'static str| if n == 1 { one } else { many };
        match (self.years, self.months) {
            (y, 0) => write!(f, "{} {}", y, unit(y, "year", "years")),
            (0, m) => write!(f, "{} {}", m, unit(m, "month", "months")),
            (y, m) => write!(
                f,
                "{} {} {} {}",
                y,
                unit(y, "year", "years"),
                m,
                unit(m, "month", "months")
            ),
        }
    }
}
