use thiserror::Error;

use crate::decimal::Money;
use crate::validation::FieldViolation;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepaymentError {
    #[error("invalid input: {}", render_violations(.violations))]
    InvalidInput {
        violations: Vec<FieldViolation>,
    },

    #[error(
        "loan does not amortize: year {year}, month {month}: payment {payment} \
         does not exceed interest {interest}"
    )]
    NonAmortizing {
        year: u32,
        month: u32,
        payment: Money,
        interest: Money,
    },

    #[error("repayment not finished within {max_years} years")]
    TermLimitExceeded {
        max_years: u32,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("serialization error: {message}")]
    Serialization {
        message: String,
    },
}

fn render_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<serde_json::Error> for RepaymentError {
    fn from(err: serde_json::Error) -> Self {
        RepaymentError::Serialization {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RepaymentError>;
