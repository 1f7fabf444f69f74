//! json support for repayment plans and rejected input
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::AmortizationSchedule;
use crate::decimal::Money;
use crate::errors::{RepaymentError, Result};
use crate::types::LoanDuration;

/// serializable headline figures of a plan, without the yearly rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub loan_amount: Money,
    pub initial_repayment_rate: Decimal,
    pub annual_interest_rate: Decimal,
    pub fixed_interest_period_years: u32,
    pub monthly_payment: Money,
    pub total_interest_paid: Money,
    pub total_amount_repaid: Money,
    pub residual_debt_at_fixed_period_end: Money,
    pub duration: LoanDuration,
    pub duration_text: String,
    pub year_count: usize,
}

impl ScheduleView {
    pub fn from_schedule(schedule: &AmortizationSchedule) -> Self {
        let duration = schedule.duration();
        ScheduleView {
            loan_amount: schedule.loan_amount,
            initial_repayment_rate: schedule.initial_repayment_rate,
            annual_interest_rate: schedule.annual_interest_rate,
            fixed_interest_period_years: schedule.fixed_interest_period_years,
            monthly_payment: schedule.monthly_payment,
            total_interest_paid: schedule.total_interest_paid,
            total_amount_repaid: schedule.total_amount_repaid,
            residual_debt_at_fixed_period_end: schedule.residual_debt_at_fixed_period_end,
            duration,
            duration_text: duration.to_string(),
            year_count: schedule.yearly_breakdowns.len(),
        }
    }
}

/// `{"errors": [...]}` body listing every rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// only input errors produce a report
    pub fn from_error(error: &RepaymentError) -> Option<Self> {
        match error {
            RepaymentError::InvalidInput { violations } => Some(ValidationReport {
                errors: violations.iter().map(|v| v.to_string()).collect(),
            }),
            _ => None,
        }
    }
}

impl AmortizationSchedule {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn view(&self) -> ScheduleView {
        ScheduleView::from_schedule(self)
    }
}
