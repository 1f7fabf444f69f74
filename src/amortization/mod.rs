pub mod calculator;
pub mod schedule;

pub use calculator::{calculate, AmortizationCalculator, MonthlyInstallment};
pub use schedule::{AmortizationSchedule, YearlyBreakdown};
