use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a prepayment
pub type PrepaymentId = Uuid;

/// how often a prepayment recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrepaymentKind {
    /// paid once, in its start month
    OneTime,
    /// paid every month from the start month through `end_month` inclusive
    Monthly { end_month: u32 },
}

/// granularity of a schedule report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    #[default]
    Monthly,
    Yearly,
}

/// what a prepayment buys the borrower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrepaymentEffect {
    /// keep the installment, finish the loan earlier
    #[default]
    ReduceTenure,
    /// keep the tenure, lower the installment after each prepayment
    ReduceInstallment,
}
