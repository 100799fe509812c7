use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::payments::ScheduleEntry;

/// totals over a whole schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScheduleSummary {
    pub months: u32,
    pub total_installments: Money,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_prepayments: Money,
    pub final_balance: Money,
}

impl ScheduleSummary {
    pub fn from_schedule(schedule: &[ScheduleEntry]) -> Self {
        let mut summary = schedule.iter().fold(Self::default(), |mut acc, entry| {
            acc.total_installments += entry.installment;
            acc.total_interest += entry.interest_portion;
            acc.total_principal += entry.principal_portion;
            acc.total_prepayments += entry.prepayment_applied;
            acc
        });

        summary.months = schedule.len() as u32;
        summary.final_balance = schedule.last().map(|e| e.ending_balance).unwrap_or(Money::ZERO);
        summary
    }

    /// everything paid out, installments and prepayments
    pub fn total_paid(&self) -> Money {
        self.total_installments + self.total_prepayments
    }

    /// true when the balance left is below half a minor currency unit
    pub fn is_fully_amortized(&self) -> bool {
        self.final_balance.round_dp(2).is_zero()
    }
}

/// interest avoided by a schedule relative to a baseline without prepayments
pub fn interest_saved(baseline: &ScheduleSummary, with_prepayments: &ScheduleSummary) -> Money {
    (baseline.total_interest - with_prepayments.total_interest).max(Money::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::loan::LoanParameters;
    use crate::payments::{generate, Prepayment, PrepaymentSet};
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_totals() {
        let loan = LoanParameters::with_standard_emi(Money::from_major(100_000), Rate::from_percentage(12), 12)
            .unwrap();
        let schedule = generate(&loan, &PrepaymentSet::new());
        let summary = ScheduleSummary::from_schedule(&schedule);

        assert_eq!(summary.months, 12);
        assert!(summary.is_fully_amortized());
        assert_eq!(summary.total_prepayments, Money::ZERO);
        assert_eq!(summary.total_installments, summary.total_interest + summary.total_principal);
        assert!((summary.total_principal - Money::from_major(100_000)).abs() < Money::from_decimal(dec!(0.0001)));
    }

    #[test]
    fn test_interest_saved_by_prepayment() {
        let loan = LoanParameters::with_standard_emi(Money::from_major(100_000), Rate::from_percentage(12), 24)
            .unwrap();
        let baseline = ScheduleSummary::from_schedule(&generate(&loan, &PrepaymentSet::new()));
        let prepayments = vec![Prepayment::one_time(Money::from_major(30_000), 3).unwrap()];
        let prepaid = ScheduleSummary::from_schedule(&generate(&loan, &prepayments));

        assert!(prepaid.months < baseline.months);
        assert!(interest_saved(&baseline, &prepaid) > Money::ZERO);
        assert_eq!(prepaid.total_paid(), prepaid.total_installments + Money::from_major(30_000));
    }

    #[test]
    fn test_residual_is_not_amortized() {
        let loan = LoanParameters::new(
            Money::from_major(10_000),
            Rate::from_percentage(10),
            6,
            Money::from_major(500),
        )
        .unwrap();
        let summary = ScheduleSummary::from_schedule(&generate(&loan, &PrepaymentSet::new()));

        assert_eq!(summary.months, 6);
        assert!(!summary.is_fully_amortized());
        assert!(summary.final_balance > Money::ZERO);
    }

    #[test]
    fn test_empty_schedule() {
        let summary = ScheduleSummary::from_schedule(&[]);
        assert_eq!(summary, ScheduleSummary::default());
    }
}
