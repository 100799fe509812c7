pub mod aggregation;
pub mod amortization;
pub mod prepayment;

pub use aggregation::{aggregate_yearly, YearlyEntry};
pub use amortization::{due_date, generate, generate_with_effect, year_of, ScheduleEntry, ScheduleGenerator};
pub use prepayment::{resolve, Prepayment, PrepaymentSet};
