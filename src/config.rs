use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::decimal::Money;
use crate::errors::{RepaymentError, Result};

/// inclusive range an input value must fall into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy + Display> Bounds<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(&self, field: &str) -> Result<()> {
        if self.min > self.max {
            return Err(RepaymentError::InvalidConfiguration {
                message: format!("{field}: min {} exceeds max {}", self.min, self.max),
            });
        }
        Ok(())
    }
}

/// allowed ranges for every calculation input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationLimits {
    pub loan_amount: Bounds<Money>,
    pub initial_repayment_rate: Bounds<Decimal>,
    pub annual_interest_rate: Bounds<Decimal>,
    pub fixed_interest_period_years: Bounds<u32>,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            loan_amount: Bounds::new(Money::from_major(10_000), Money::from_major(10_000_000)),
            initial_repayment_rate: Bounds::new(dec!(1), dec!(15)),
            annual_interest_rate: Bounds::new(dec!(1), dec!(100)),
            fixed_interest_period_years: Bounds::new(1, 30),
        }
    }
}

impl ValidationLimits {
    /// reject ranges whose lower end lies above the upper end
    pub fn validate(&self) -> Result<()> {
        self.loan_amount.check("loan_amount")?;
        self.initial_repayment_rate.check("initial_repayment_rate")?;
        self.annual_interest_rate.check("annual_interest_rate")?;
        self.fixed_interest_period_years.check("fixed_interest_period_years")?;
        Ok(())
    }
}

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    pub limits: ValidationLimits,
    /// hard stop for the yearly simulation
    pub max_term_years: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            limits: ValidationLimits::default(),
            max_term_years: 100,
        }
    }
}

impl CalculatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_term_years == 0 {
            return Err(RepaymentError::InvalidConfiguration {
                message: "max_term_years must be at least 1".to_string(),
            });
        }
        self.limits.validate()
    }

    /// parse and check a configuration from json
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CalculatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
