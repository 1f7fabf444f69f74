//! range checks applied before a plan is calculated

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use tracing::warn;

use crate::config::{Bounds, ValidationLimits};
use crate::errors::{RepaymentError, Result};
use crate::types::CalculationInput;

/// one input field outside its allowed range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// bounds render without trailing zeros, so 10000.00 reads as 10000
fn render_bound<T: Into<Decimal>>(bound: T) -> Decimal {
    bound.into().normalize()
}

fn check_bounds<T>(field: &str, value: T, bounds: &Bounds<T>, violations: &mut Vec<FieldViolation>)
where
    T: PartialOrd + Copy + Display + Into<Decimal>,
{
    if bounds.contains(value) {
        return;
    }

    let message = if value < bounds.min {
        format!("must be greater than or equal to {}", render_bound(bounds.min))
    } else {
        format!("must be less than or equal to {}", render_bound(bounds.max))
    };
    violations.push(FieldViolation::new(field, message));
}

/// collect every out-of-range field of `input`
pub fn violations(input: &CalculationInput, limits: &ValidationLimits) -> Vec<FieldViolation> {
    let mut found = Vec::new();
    check_bounds("loanAmount", input.loan_amount, &limits.loan_amount, &mut found);
    check_bounds(
        "initialRepaymentRate",
        input.initial_repayment_rate,
        &limits.initial_repayment_rate,
        &mut found,
    );
    check_bounds(
        "annualInterestRate",
        input.annual_interest_rate,
        &limits.annual_interest_rate,
        &mut found,
    );
    check_bounds(
        "fixedInterestPeriodYears",
        input.fixed_interest_period_years,
        &limits.fixed_interest_period_years,
        &mut found,
    );
    found
}

/// fail with every violation at once, or pass
pub fn validate(input: &CalculationInput, limits: &ValidationLimits) -> Result<()> {
    let found = violations(input, limits);
    if found.is_empty() {
        return Ok(());
    }

    for violation in &found {
        warn!(%violation, "rejected repayment input");
    }
    Err(RepaymentError::InvalidInput { violations: found })
}
