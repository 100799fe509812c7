use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::types::PrepaymentId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("invalid principal: {amount}")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid tenure: {months} months (allowed 1 to {max})")]
    InvalidTenure {
        months: u32,
        max: u32,
    },

    #[error("invalid installment amount: {amount}")]
    InvalidInstallment {
        amount: Money,
    },

    #[error("invalid prepayment amount: {amount}")]
    InvalidPrepaymentAmount {
        amount: Money,
    },

    #[error("invalid prepayment month: {month} (allowed 1 to {max})")]
    InvalidPrepaymentMonth {
        month: u32,
        max: u32,
    },

    #[error("end month must be >= start month: start {start_month}, end {end_month}")]
    InvalidPrepaymentWindow {
        start_month: u32,
        end_month: u32,
    },

    #[error("prepayment not found: {id}")]
    PrepaymentNotFound {
        id: PrepaymentId,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("serialization error: {message}")]
    Serialization {
        message: String,
    },
}

impl From<serde_json::Error> for ScheduleError {
    fn from(err: serde_json::Error) -> Self {
        ScheduleError::Serialization {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
