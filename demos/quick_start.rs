/// quick start - calculate a plan and print it year by year
use repayment_plan::{AmortizationCalculator, CalculationInput, Money, ValidationReport};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let calculator = AmortizationCalculator::default();

    // 300,000 loan, 2% initial repayment, 4% interest fixed for 10 years
    let input = CalculationInput::new(Money::from_major(300_000), dec!(2), dec!(4), 10);
    let plan = calculator.calculate_validated(&input)?;

    println!("monthly payment: {}", plan.monthly_payment);
    println!("paid off after:  {}", plan.duration());
    println!("debt after fixed period: {}", plan.residual_debt_at_fixed_period_end);
    for year in &plan.yearly_breakdowns {
        println!(
            "{:>3} {:>12} {:>12} {:>12} {:>12}",
            year.year_index,
            year.yearly_payment,
            year.yearly_interest_portion,
            year.yearly_principal_portion,
            year.residual_debt_at_year_end
        );
    }

    // out of range input is reported field by field
    let rejected = CalculationInput::new(Money::from_major(5_000), dec!(20), dec!(4), 10);
    if let Err(err) = calculator.calculate_validated(&rejected) {
        if let Some(report) = ValidationReport::from_error(&err) {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
