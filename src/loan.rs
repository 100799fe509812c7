use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};

/// loan terms consumed by the schedule generator
///
/// Fields are public so callers can hold them as plain data, but the
/// generator assumes the invariants checked by [`LoanParameters::new`]:
/// positive principal, tenure and installment and a non-negative rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    pub annual_rate: Rate,
    pub tenure_months: u32,
    pub installment: Money,
}

impl LoanParameters {
    /// validate and create loan parameters using the default tenure bound
    pub fn new(principal: Money, annual_rate: Rate, tenure_months: u32, installment: Money) -> Result<Self> {
        Self::with_config(principal, annual_rate, tenure_months, installment, &PlannerConfig::default())
    }

    /// validate and create loan parameters against a planner configuration
    pub fn with_config(
        principal: Money,
        annual_rate: Rate,
        tenure_months: u32,
        installment: Money,
        config: &PlannerConfig,
    ) -> Result<Self> {
        if !principal.is_positive() {
            return Err(ScheduleError::InvalidPrincipal { amount: principal });
        }

        if annual_rate.is_negative() {
            return Err(ScheduleError::InvalidInterestRate { rate: annual_rate });
        }

        if tenure_months == 0 || tenure_months > config.max_tenure_months {
            return Err(ScheduleError::InvalidTenure {
                months: tenure_months,
                max: config.max_tenure_months,
            });
        }

        if !installment.is_positive() {
            return Err(ScheduleError::InvalidInstallment { amount: installment });
        }

        Ok(Self {
            principal,
            annual_rate,
            tenure_months,
            installment,
        })
    }

    /// create loan parameters with the standard EMI for the given terms
    pub fn with_standard_emi(principal: Money, annual_rate: Rate, tenure_months: u32) -> Result<Self> {
        let installment = calculate_emi(principal, annual_rate, tenure_months)?;
        Self::new(principal, annual_rate, tenure_months, installment)
    }

    /// periodic rate applied each month
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate.monthly_rate()
    }
}

/// calculate the equated monthly installment
///
/// EMI = P * r / (1 - (1 + r)^-n), or P / n for an interest-free loan.
/// Discounting instead of compounding keeps long, high-rate terms inside the
/// decimal range; an installment that still does not fit is an error.
pub fn calculate_emi(principal: Money, annual_rate: Rate, months: u32) -> Result<Money> {
    let out_of_range = || ScheduleError::CalculationError {
        message: format!(
            "installment for {} at {} over {} months is out of range",
            principal, annual_rate, months
        ),
    };

    if months == 0 {
        return Ok(principal);
    }

    let r = annual_rate.monthly_rate().as_decimal();

    if r.is_zero() {
        return principal.checked_div(Decimal::from(months)).ok_or_else(out_of_range);
    }

    let base = Decimal::ONE.checked_add(r).ok_or_else(out_of_range)?;
    let mut discount = Decimal::ONE;
    for _ in 0..months {
        discount = discount.checked_div(base).ok_or_else(out_of_range)?;
    }

    let numerator = principal.as_decimal().checked_mul(r).ok_or_else(out_of_range)?;
    let denominator = Decimal::ONE - discount;

    numerator
        .checked_div(denominator)
        .map(Money::from_decimal)
        .ok_or_else(out_of_range)
}
