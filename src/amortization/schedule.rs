use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{CalculationInput, LoanDuration};

/// one year of the repayment plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyBreakdown {
    /// 1-based year since origination
    pub year_index: u32,
    /// installments paid in the year
    pub yearly_payment: Money,
    pub yearly_interest_portion: Money,
    pub yearly_principal_portion: Money,
    pub residual_debt_at_year_end: Money,
}

/// complete repayment plan for one loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationSchedule {
    pub loan_amount: Money,
    pub initial_repayment_rate: Decimal,
    pub annual_interest_rate: Decimal,
    pub fixed_interest_period_years: u32,
    pub total_interest_paid: Money,
    pub monthly_payment: Money,
    /// zero when the loan is paid off before the fixed period ends
    pub residual_debt_at_fixed_period_end: Money,
    /// completed whole years until the debt is gone
    pub total_years: u32,
    /// months of a final partial year, 0..=11
    pub total_extra_months: u32,
    pub total_amount_repaid: Money,
    pub yearly_breakdowns: Vec<YearlyBreakdown>,
}

impl AmortizationSchedule {
    /// the inputs this plan was calculated from
    pub fn input(&self) -> CalculationInput {
        CalculationInput {
            loan_amount: self.loan_amount,
            initial_repayment_rate: self.initial_repayment_rate,
            annual_interest_rate: self.annual_interest_rate,
            fixed_interest_period_years: self.fixed_interest_period_years,
        }
    }

    pub fn duration(&self) -> LoanDuration {
        LoanDuration {
            years: self.total_years,
            months: self.total_extra_months,
        }
    }

    /// get breakdown for a 1-based year
    pub fn year(&self, year_index: u32) -> Option<&YearlyBreakdown> {
        if year_index == 0 {
            return None;
        }
        self.yearly_breakdowns.get((year_index - 1) as usize)
    }

    /// outstanding debt after the given year; year 0 is origination
    pub fn residual_debt_after_year(&self, year_index: u32) -> Money {
        if year_index == 0 {
            return self.loan_amount;
        }
        self.year(year_index)
            .map(|y| y.residual_debt_at_year_end)
            .unwrap_or(Money::ZERO)
    }

    pub fn total_principal_paid(&self) -> Money {
        self.yearly_breakdowns
            .iter()
            .map(|y| y.yearly_principal_portion)
            .sum()
    }

    /// sum of all yearly installments as scheduled
    pub fn total_payments(&self) -> Money {
        self.yearly_breakdowns.iter().map(|y| y.yearly_payment).sum()
    }

    /// true when the debt is paid off within the fixed interest period
    pub fn fixed_period_outlasts_loan(&self) -> bool {
        self.yearly_breakdowns.len() <= self.fixed_interest_period_years as usize
    }
}
