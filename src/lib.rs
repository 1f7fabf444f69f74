pub mod amortization;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod serialization;
pub mod types;
pub mod validation;

// re-export key types
pub use amortization::{
    calculate, AmortizationCalculator, AmortizationSchedule, MonthlyInstallment, YearlyBreakdown,
};
pub use config::{Bounds, CalculatorConfig, ValidationLimits};
pub use decimal::{round2, Money, Rate};
pub use errors::{RepaymentError, Result};
pub use serialization::{ScheduleView, ValidationReport};
pub use types::{CalculationInput, LoanDuration, MONTHS_PER_YEAR};
pub use validation::FieldViolation;

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;
