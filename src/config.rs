use serde::{Deserialize, Serialize};

use crate::errors::{Result, ScheduleError};
use crate::types::{PrepaymentEffect, ReportMode};

/// longest tenure a loan may be scheduled for
pub const DEFAULT_MAX_TENURE_MONTHS: u32 = 1200;

/// latest month a prepayment may be placed in
pub const DEFAULT_MAX_PREPAYMENT_MONTH: u32 = 600;

/// planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub max_tenure_months: u32,
    pub max_prepayment_month: u32,
    pub default_report_mode: ReportMode,
    pub prepayment_effect: PrepaymentEffect,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_tenure_months: DEFAULT_MAX_TENURE_MONTHS,
            max_prepayment_month: DEFAULT_MAX_PREPAYMENT_MONTH,
            default_report_mode: ReportMode::Monthly,
            prepayment_effect: PrepaymentEffect::ReduceTenure,
        }
    }
}

impl PlannerConfig {
    /// parse from json; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PlannerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_tenure_months == 0 {
            return Err(ScheduleError::InvalidConfiguration {
                message: "max_tenure_months must be positive".to_string(),
            });
        }

        if self.max_prepayment_month == 0 {
            return Err(ScheduleError::InvalidConfiguration {
                message: "max_prepayment_month must be positive".to_string(),
            });
        }

        Ok(())
    }

    pub fn with_prepayment_effect(mut self, effect: PrepaymentEffect) -> Self {
        self.prepayment_effect = effect;
        self
    }

    pub fn with_report_mode(mut self, mode: ReportMode) -> Self {
        self.default_report_mode = mode;
        self
    }
}
