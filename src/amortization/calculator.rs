use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

use crate::config::CalculatorConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{RepaymentError, Result};
use crate::types::{CalculationInput, LoanDuration, MONTHS_PER_YEAR};
use crate::validation;

use super::schedule::{AmortizationSchedule, YearlyBreakdown};

/// split of one monthly installment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyInstallment {
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub residual_debt: Money,
}

impl MonthlyInstallment {
    /// apply one installment to the outstanding debt
    ///
    /// The principal portion is capped at the outstanding debt so the last
    /// installment never pays more than is owed.
    pub fn apply(residual_debt: Money, monthly_payment: Money, interest_rate: Rate) -> Self {
        let interest_portion = residual_debt.monthly_share(interest_rate);
        let principal_portion = (monthly_payment - interest_portion).min(residual_debt);
        Self {
            interest_portion,
            principal_portion,
            residual_debt: residual_debt - principal_portion,
        }
    }
}

/// annuity repayment plan calculator
#[derive(Debug, Clone, Default)]
pub struct AmortizationCalculator {
    config: CalculatorConfig,
}

impl AmortizationCalculator {
    pub fn new(config: CalculatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// check the input against the configured limits, then calculate
    pub fn calculate_validated(&self, input: &CalculationInput) -> Result<AmortizationSchedule> {
        validation::validate(input, &self.config.limits)?;
        self.calculate(input)
    }

    /// build the year-by-year plan until the debt reaches zero
    ///
    /// Ranges are not re-checked here. The only failures are a payment that
    /// can no longer reduce the debt and a plan running past
    /// `max_term_years`.
    pub fn calculate(&self, input: &CalculationInput) -> Result<AmortizationSchedule> {
        let interest_rate = input.interest_rate();
        let monthly_payment = input
            .loan_amount
            .monthly_share(interest_rate + input.initial_repayment());

        debug!(
            loan_amount = %input.loan_amount,
            initial_repayment_rate = %input.initial_repayment_rate,
            %interest_rate,
            fixed_interest_period_years = input.fixed_interest_period_years,
            %monthly_payment,
            "calculating repayment plan"
        );

        let mut residual_debt = input.loan_amount;
        let mut total_interest = Money::ZERO;
        let mut residual_debt_at_fixed_period_end = Money::ZERO;
        let mut yearly_breakdowns = Vec::new();
        let mut months_in_last_year = 0;
        let mut year_index = 0;

        loop {
            year_index += 1;
            if year_index > self.config.max_term_years {
                warn!(
                    max_years = self.config.max_term_years,
                    %residual_debt,
                    "repayment plan exceeds term limit"
                );
                return Err(RepaymentError::TermLimitExceeded {
                    max_years: self.config.max_term_years,
                });
            }

            let mut yearly_payment = Money::ZERO;
            let mut yearly_interest = Money::ZERO;
            let mut yearly_principal = Money::ZERO;

            for month in 1..=MONTHS_PER_YEAR {
                months_in_last_year = month;
                let installment =
                    MonthlyInstallment::apply(residual_debt, monthly_payment, interest_rate);

                if !installment.principal_portion.is_positive() && residual_debt.is_positive() {
                    warn!(
                        year = year_index,
                        month,
                        %monthly_payment,
                        interest = %installment.interest_portion,
                        "payment does not reduce debt"
                    );
                    return Err(RepaymentError::NonAmortizing {
                        year: year_index,
                        month,
                        payment: monthly_payment,
                        interest: installment.interest_portion,
                    });
                }

                yearly_payment += monthly_payment;
                yearly_interest += installment.interest_portion;
                total_interest += installment.interest_portion;
                yearly_principal += installment.principal_portion;
                residual_debt = installment.residual_debt;

                if !residual_debt.is_positive() {
                    break;
                }
            }

            if year_index == input.fixed_interest_period_years {
                residual_debt_at_fixed_period_end = residual_debt;
            }

            trace!(
                year = year_index,
                %yearly_interest,
                %yearly_principal,
                %residual_debt,
                "year closed"
            );

            yearly_breakdowns.push(YearlyBreakdown {
                year_index,
                yearly_payment,
                yearly_interest_portion: yearly_interest,
                yearly_principal_portion: yearly_principal,
                residual_debt_at_year_end: residual_debt,
            });

            if !residual_debt.is_positive() {
                break;
            }
        }

        let elapsed_months = (year_index - 1) * MONTHS_PER_YEAR + months_in_last_year;
        let duration = LoanDuration::from_months(elapsed_months);
        let total_amount_repaid = total_interest + input.loan_amount;

        debug!(%duration, %total_interest, %total_amount_repaid, "repayment plan complete");

        Ok(AmortizationSchedule {
            loan_amount: input.loan_amount,
            initial_repayment_rate: input.initial_repayment_rate,
            annual_interest_rate: input.annual_interest_rate,
            fixed_interest_period_years: input.fixed_interest_period_years,
            total_interest_paid: total_interest,
            monthly_payment,
            residual_debt_at_fixed_period_end,
            total_years: duration.years,
            total_extra_months: duration.months,
            total_amount_repaid,
            yearly_breakdowns,
        })
    }
}

/// calculate a plan with the default configuration, without range checks
pub fn calculate(
    loan_amount: Money,
    initial_repayment_rate: Decimal,
    annual_interest_rate: Decimal,
    fixed_interest_period_years: u32,
) -> Result<AmortizationSchedule> {
    AmortizationCalculator::default().calculate(&CalculationInput::new(
        loan_amount,
        initial_repayment_rate,
        annual_interest_rate,
        fixed_interest_period_years,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn money(s: &str) -> Money {
        Money::from_str_exact(s).unwrap()
    }

    fn plan(
        loan: i64,
        repayment: Decimal,
        interest: Decimal,
        fixed_years: u32,
    ) -> AmortizationSchedule {
        calculate(Money::from_major(loan), repayment, interest, fixed_years).unwrap()
    }

    fn breakdown(
        year_index: u32,
        payment: &str,
        interest: &str,
        principal: &str,
        residual: &str,
    ) -> YearlyBreakdown {
        YearlyBreakdown {
            year_index,
            yearly_payment: money(payment),
            yearly_interest_portion: money(interest),
            yearly_principal_portion: money(principal),
            residual_debt_at_year_end: money(residual),
        }
    }

    fn assert_plan_invariants(plan: &AmortizationSchedule) {
        let last = plan.yearly_breakdowns.last().unwrap();
        assert_eq!(last.residual_debt_at_year_end, Money::ZERO);

        for pair in plan.yearly_breakdowns.windows(2) {
            assert!(pair[1].residual_debt_at_year_end <= pair[0].residual_debt_at_year_end);
            assert_eq!(pair[1].year_index, pair[0].year_index + 1);
        }

        let interest_sum: Money = plan
            .yearly_breakdowns
            .iter()
            .map(|y| y.yearly_interest_portion)
            .sum();
        assert_eq!(interest_sum, plan.total_interest_paid);
        assert_eq!(plan.total_principal_paid(), plan.loan_amount);
        assert_eq!(plan.total_amount_repaid, plan.total_interest_paid + plan.loan_amount);
        assert!(plan.total_extra_months < 12);
    }

    #[test]
    fn test_first_installment() {
        let four = Rate::from_percentage(dec!(4));
        let installment = MonthlyInstallment::apply(money("300000"), money("1500.00"), four);

        assert_eq!(installment.interest_portion, money("1000.00"));
        assert_eq!(installment.principal_portion, money("500.00"));
        assert_eq!(installment.residual_debt, money("299500.00"));
    }

    #[test]
    fn test_last_installment_is_capped() {
        let four = Rate::from_percentage(dec!(4));
        let installment = MonthlyInstallment::apply(money("200.00"), money("1500.00"), four);

        assert_eq!(installment.interest_portion, money("0.67"));
        assert_eq!(installment.principal_portion, money("200.00"));
        assert_eq!(installment.residual_debt, Money::ZERO);
    }

    #[test]
    fn test_standard_mortgage() {
        let plan = plan(300_000, dec!(2), dec!(4), 10);

        assert_eq!(plan.monthly_payment, money("1500.00"));
        assert_eq!(plan.total_interest_paid, money("195199.39"));
        assert_eq!(plan.residual_debt_at_fixed_period_end, money("226375.13"));
        assert_eq!(plan.total_amount_repaid, money("495199.39"));
        assert_eq!((plan.total_years, plan.total_extra_months), (27, 7));
        assert_eq!(plan.yearly_breakdowns.len(), 28);

        assert_eq!(
            plan.yearly_breakdowns[0],
            breakdown(1, "18000.00", "11888.77", "6111.23", "293888.77")
        );
        assert_eq!(
            plan.yearly_breakdowns[27],
            breakdown(28, "10500.00", "108.66", "9090.73", "0.00")
        );
        assert_eq!(plan.residual_debt_after_year(10), plan.residual_debt_at_fixed_period_end);
        assert_plan_invariants(&plan);
    }

    #[test]
    fn test_final_partial_year_breaks_early() {
        let plan = plan(10_000, dec!(15), dec!(100), 1);

        assert_eq!(plan.monthly_payment, money("958.33"));
        assert_eq!(plan.total_interest_paid, money("14396.79"));
        assert_eq!(plan.residual_debt_at_fixed_period_end, money("7580.51"));
        assert_eq!(plan.total_amount_repaid, money("24396.79"));
        assert_eq!(plan.yearly_breakdowns.len(), 3);
        assert_eq!(plan.duration(), LoanDuration { years: 2, months: 2 });

        assert_eq!(
            plan.yearly_breakdowns[0],
            breakdown(1, "11499.96", "9080.47", "2419.49", "7580.51")
        );
        // two installments only in the final year
        assert_eq!(
            plan.yearly_breakdowns[2],
            breakdown(3, "1916.66", "138.59", "1258.28", "0.00")
        );
        assert_plan_invariants(&plan);
    }

    #[test]
    fn test_repayment_ending_on_year_boundary() {
        let plan = plan(10_000, dec!(15), dec!(4), 5);

        assert_eq!(plan.monthly_payment, money("158.33"));
        assert_eq!(plan.total_interest_paid, money("1247.21"));
        assert_eq!(plan.residual_debt_at_fixed_period_end, money("1712.85"));
        assert_eq!(plan.yearly_breakdowns.len(), 6);
        assert_eq!((plan.total_years, plan.total_extra_months), (6, 0));
        assert_eq!(
            plan.yearly_breakdowns[5],
            breakdown(6, "1899.96", "34.56", "1712.85", "0.00")
        );
        assert_plan_invariants(&plan);
    }

    #[test]
    fn test_loan_repaid_within_fixed_period() {
        let short = plan(10_000, dec!(15), dec!(4), 10);
        assert_eq!(short.residual_debt_at_fixed_period_end, Money::ZERO);
        assert!(short.fixed_period_outlasts_loan());

        let inside = plan(120_000, dec!(10), dec!(2), 10);
        assert_eq!(inside.monthly_payment, money("1200.00"));
        assert_eq!(inside.total_interest_paid, money("11381.12"));
        assert_eq!(inside.total_amount_repaid, money("131381.12"));
        assert_eq!(inside.residual_debt_at_fixed_period_end, Money::ZERO);
        assert_eq!(inside.duration(), LoanDuration { years: 9, months: 2 });
        assert!(inside.fixed_period_outlasts_loan());
        assert_plan_invariants(&inside);
    }

    #[test]
    fn test_fractional_rates() {
        let plan = plan(250_000, dec!(2.5), dec!(3.5), 15);

        assert_eq!(plan.monthly_payment, money("1250.00"));
        assert_eq!(plan.total_interest_paid, money("125748.17"));
        assert_eq!(plan.residual_debt_at_fixed_period_end, money("126934.29"));
        assert_eq!(plan.duration(), LoanDuration { years: 25, months: 1 });
        assert_plan_invariants(&plan);
    }

    #[test]
    fn test_slowest_loan_within_limits_terminates() {
        let plan = plan(10_000_000, dec!(1), dec!(1), 30);
        assert_eq!(plan.total_years, 69);
        assert_plan_invariants(&plan);
    }

    #[test]
    fn test_higher_interest_never_lowers_total_interest() {
        let mut previous = Money::ZERO;
        for rate in 1..=40 {
            let plan = plan(100_000, dec!(2), Decimal::from(rate), 10);
            assert!(plan.total_interest_paid >= previous, "interest fell at {rate}%");
            previous = plan.total_interest_paid;
        }
    }

    #[test]
    fn test_identical_inputs_give_identical_plans() {
        let first = plan(300_000, dec!(2), dec!(4), 10);
        let second = plan(300_000, dec!(2), dec!(4), 10);
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_amortizing_loan_rejected() {
        let err = calculate(Money::from_major(100_000), dec!(0), dec!(5), 10).unwrap_err();
        assert_eq!(
            err,
            RepaymentError::NonAmortizing {
                year: 1,
                month: 1,
                payment: money("416.67"),
                interest: money("416.67"),
            }
        );
        assert_eq!(
            err.to_string(),
            concat!(
                "loan does not amortize: year 1, month 1: ",
                "payment 416.67 does not exceed interest 416.67"
            )
        );
    }

    #[test]
    fn test_term_limit() {
        let config = CalculatorConfig {
            max_term_years: 5,
            ..CalculatorConfig::default()
        };
        let calculator = AmortizationCalculator::new(config).unwrap();
        let input = CalculationInput::new(Money::from_major(300_000), dec!(2), dec!(4), 10);

        let err = calculator.calculate(&input).unwrap_err();
        assert_eq!(err, RepaymentError::TermLimitExceeded { max_years: 5 });
    }

    #[test]
    fn test_validated_calculation() {
        let calculator = AmortizationCalculator::default();

        let too_small = CalculationInput::new(Money::from_major(5_000), dec!(2), dec!(4), 10);
        let err = calculator.calculate_validated(&too_small).unwrap_err();
        assert!(matches!(
            err,
            RepaymentError::InvalidInput { ref violations } if violations.len() == 1
        ));

        let valid = CalculationInput::new(Money::from_major(300_000), dec!(2), dec!(4), 10);
        let plan = calculator.calculate_validated(&valid).unwrap();
        assert_eq!(plan.input(), valid);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CalculatorConfig {
            max_term_years: 0,
            ..CalculatorConfig::default()
        };
        assert!(AmortizationCalculator::new(config).is_err());
    }
}
