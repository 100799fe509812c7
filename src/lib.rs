pub mod config;
pub mod decimal;
pub mod errors;
pub mod loan;
pub mod payments;
pub mod plan;
pub mod serialization;
pub mod summary;
pub mod types;

// re-export key types
pub use config::PlannerConfig;
pub use decimal::{Money, Rate};
pub use errors::{Result, ScheduleError};
pub use loan::{calculate_emi, LoanParameters};
pub use payments::{
    aggregate_yearly, generate, generate_with_effect, resolve, Prepayment, PrepaymentSet,
    ScheduleEntry, ScheduleGenerator, YearlyEntry,
};
pub use plan::{LoanBuilder, LoanPlan, Report};
pub use summary::{interest_saved, ScheduleSummary};
pub use types::{PrepaymentEffect, PrepaymentId, PrepaymentKind, ReportMode};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
