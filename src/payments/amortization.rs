use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::loan::{calculate_emi, LoanParameters};
use crate::types::PrepaymentEffect;

use super::prepayment::{resolve, Prepayment};

/// one simulated month of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based month index
    pub month: u32,
    /// 1-based loan year, `ceil(month / 12)`
    pub year: u32,
    pub installment: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub prepayment_applied: Money,
    pub ending_balance: Money,
}

impl ScheduleEntry {
    /// date this installment falls due for a loan starting on `start`
    pub fn due_date(&self, start: NaiveDate) -> Option<NaiveDate> {
        due_date(start, self.month)
    }

    /// installment plus prepayment paid this month
    pub fn total_outflow(&self) -> Money {
        self.installment + self.prepayment_applied
    }
}

/// date installment `month` falls due, clamped to the end of shorter months
pub fn due_date(start: NaiveDate, month: u32) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(month))
}

/// loan year a month falls in
pub fn year_of(month: u32) -> u32 {
    month.div_ceil(12)
}

/// running position carried from one month to the next
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScheduleState {
    month: u32,
    balance: Money,
    installment: Money,
}

impl ScheduleState {
    fn opening(loan: &LoanParameters) -> Self {
        Self {
            month: 1,
            balance: loan.principal,
            installment: loan.installment,
        }
    }

    fn is_open(&self, tenure_months: u32) -> bool {
        self.balance.is_positive() && self.month <= tenure_months
    }

    /// simulate the current month, returning its entry and the next state
    ///
    /// `None` when the month cannot be represented, which only happens once
    /// negative amortization has grown the balance to the decimal limit.
    fn advance(
        self,
        loan: &LoanParameters,
        prepayments: &[Prepayment],
        effect: PrepaymentEffect,
    ) -> Option<(ScheduleEntry, ScheduleState)> {
        let interest = self.balance.checked_interest_at(loan.monthly_rate())?;
        let installment = self.installment.min(self.balance.checked_add(interest)?);
        let principal_portion = installment.checked_sub(interest)?;

        if principal_portion.is_negative() {
            log::warn!(
                "month {}: installment {} does not cover interest {}",
                self.month,
                installment,
                interest
            );
        }

        let prepayment = resolve(prepayments, self.month);
        if prepayment.is_positive() {
            log::trace!("month {}: applying prepayment {}", self.month, prepayment);
        }

        let balance = self
            .balance
            .checked_sub(principal_portion)?
            .checked_sub(prepayment)?
            .max(Money::ZERO);

        let entry = ScheduleEntry {
            month: self.month,
            year: year_of(self.month),
            installment,
            interest_portion: interest,
            principal_portion,
            prepayment_applied: prepayment,
            ending_balance: balance,
        };

        let next_installment = match effect {
            PrepaymentEffect::ReduceInstallment
                if prepayment.is_positive() && balance.is_positive() && self.month < loan.tenure_months =>
            {
                let remaining = loan.tenure_months - self.month;
                calculate_emi(balance, loan.annual_rate, remaining).unwrap_or_else(|err| {
                    log::warn!("month {}: keeping installment {}: {}", self.month, self.installment, err);
                    self.installment
                })
            }
            _ => self.installment,
        };

        let next = ScheduleState {
            month: self.month + 1,
            balance,
            installment: next_installment,
        };

        Some((entry, next))
    }
}

/// month-by-month schedule generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleGenerator {
    effect: PrepaymentEffect,
}

impl ScheduleGenerator {
    pub fn new(effect: PrepaymentEffect) -> Self {
        Self { effect }
    }

    pub fn effect(&self) -> PrepaymentEffect {
        self.effect
    }

    /// simulate the loan until it is paid off or the tenure is exhausted
    ///
    /// The final installment is capped at balance plus interest, and the
    /// balance is floored at zero when prepayments overshoot. A residual
    /// balance after the last month is a valid outcome, not an error.
    pub fn generate<P>(&self, loan: &LoanParameters, prepayments: &P) -> Vec<ScheduleEntry>
    where
        P: AsRef<[Prepayment]> + ?Sized,
    {
        let prepayments = prepayments.as_ref();
        let mut entries = Vec::with_capacity(loan.tenure_months as usize);
        let mut state = ScheduleState::opening(loan);

        while state.is_open(loan.tenure_months) {
            let Some((entry, next)) = state.advance(loan, prepayments, self.effect) else {
                log::warn!(
                    "month {}: balance {} has outgrown the decimal range, ending the schedule",
                    state.month,
                    state.balance
                );
                break;
            };
            entries.push(entry);
            state = next;
        }

        match entries.last() {
            Some(last) if last.ending_balance.is_zero() => {
                log::debug!("loan paid off in month {} of {}", last.month, loan.tenure_months);
            }
            Some(last) => {
                log::debug!(
                    "tenure of {} months exhausted with residual balance {}",
                    loan.tenure_months,
                    last.ending_balance
                );
            }
            None => log::debug!("empty schedule for principal {}", loan.principal),
        }

        entries
    }
}

/// generate the schedule keeping the installment fixed
pub fn generate<P>(loan: &LoanParameters, prepayments: &P) -> Vec<ScheduleEntry>
where
    P: AsRef<[Prepayment]> + ?Sized,
{
    ScheduleGenerator::new(PrepaymentEffect::ReduceTenure).generate(loan, prepayments)
}

/// generate the schedule with an explicit prepayment effect
pub fn generate_with_effect<P>(loan: &LoanParameters, prepayments: &P, effect: PrepaymentEffect) -> Vec<ScheduleEntry>
where
    P: AsRef<[Prepayment]> + ?Sized,
{
    ScheduleGenerator::new(effect).generate(loan, prepayments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::payments::PrepaymentSet;
    use rust_decimal_macros::dec;

    fn scenario_loan() -> LoanParameters {
        LoanParameters::new(
            Money::from_major(100_000),
            Rate::from_percentage(12),
            12,
            Money::from_decimal(dec!(8884.88)),
        )
        .unwrap()
    }

    fn close(a: Money, b: Money, tolerance: Money) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn test_standard_scenario() {
        let loan = scenario_loan();
        let schedule = generate(&loan, &PrepaymentSet::new());

        assert_eq!(schedule.len(), 12);

        let first = &schedule[0];
        assert_eq!(first.month, 1);
        assert_eq!(first.year, 1);
        assert_eq!(first.interest_portion, Money::from_major(1_000));
        assert_eq!(first.principal_portion, Money::from_decimal(dec!(7884.88)));
        assert_eq!(first.ending_balance, Money::from_decimal(dec!(92115.12)));
        assert_eq!(first.prepayment_applied, Money::ZERO);

        let last = &schedule[11];
        assert!(close(last.ending_balance, Money::ZERO, Money::from_decimal(dec!(0.01))));
        assert!(last.installment <= loan.installment);
    }

    #[test]
    fn test_installment_splits_into_interest_and_principal() {
        let loan = scenario_loan();
        let schedule = generate(&loan, &PrepaymentSet::new());

        for entry in &schedule[..11] {
            assert_eq!(entry.installment, loan.installment);
            assert_eq!(entry.interest_portion + entry.principal_portion, entry.installment);
        }
    }

    #[test]
    fn test_one_time_prepayment_scenario() {
        let loan = scenario_loan();
        let baseline = generate(&loan, &PrepaymentSet::new());

        let mut set = PrepaymentSet::new();
        set.add(Money::from_major(20_000), crate::types::PrepaymentKind::OneTime, 3).unwrap();
        let schedule = generate(&loan, &set);

        assert_eq!(schedule[2].prepayment_applied, Money::from_major(20_000));
        assert_eq!(
            schedule[2].ending_balance,
            baseline[2].ending_balance - Money::from_major(20_000)
        );
        assert!(schedule.len() < 12);
        assert!(schedule.last().unwrap().ending_balance.is_zero());

        let total: Money = schedule.iter().map(|e| e.prepayment_applied).sum();
        assert_eq!(total, Money::from_major(20_000));
    }

    #[test]
    fn test_monthly_prepayment_window() {
        let loan = LoanParameters::with_standard_emi(Money::from_major(100_000), Rate::from_percentage(12), 24)
            .unwrap();
        let window = vec![Prepayment::monthly(Money::from_major(5_000), 4, 6).unwrap()];
        let schedule = generate(&loan, &window);

        for entry in &schedule {
            let expected = if (4..=6).contains(&entry.month) {
                Money::from_major(5_000)
            } else {
                Money::ZERO
            };
            assert_eq!(entry.prepayment_applied, expected, "month {}", entry.month);
        }
    }

    #[test]
    fn test_overshooting_prepayment_clamps_to_zero() {
        let loan = scenario_loan();
        let big = vec![Prepayment::one_time(Money::from_major(500_000), 2).unwrap()];
        let schedule = generate(&loan, &big);

        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[1].ending_balance, Money::ZERO);
        // recorded as supplied, not trimmed to the balance
        assert_eq!(schedule[1].prepayment_applied, Money::from_major(500_000));
    }

    #[test]
    fn test_prepayments_past_schedule_are_ignored() {
        let loan = scenario_loan();
        let late = vec![Prepayment::one_time(Money::from_major(1_000), 40).unwrap()];

        assert_eq!(generate(&loan, &late), generate(&loan, &PrepaymentSet::new()));
    }

    #[test]
    fn test_under_amortization_leaves_residual() {
        let loan = LoanParameters::new(
            Money::from_major(100_000),
            Rate::from_percentage(12),
            12,
            Money::from_major(5_000),
        )
        .unwrap();
        let schedule = generate(&loan, &PrepaymentSet::new());

        assert_eq!(schedule.len(), 12);
        assert!(schedule[11].ending_balance > Money::from_major(40_000));
    }

    #[test]
    fn test_interest_shortfall_grows_balance() {
        let loan = LoanParameters::new(
            Money::from_major(100_000),
            Rate::from_percentage(24),
            3,
            Money::from_major(1_000),
        )
        .unwrap();
        let schedule = generate(&loan, &PrepaymentSet::new());

        assert_eq!(schedule.len(), 3);
        assert!(schedule[0].principal_portion.is_negative());
        assert_eq!(schedule[0].ending_balance, Money::from_major(101_000));
    }

    #[test]
    fn test_runaway_balance_ends_at_decimal_limit() {
        let loan = LoanParameters::new(
            Money::from_major(1_000_000),
            Rate::from_percentage(120),
            1200,
            Money::from_major(1),
        )
        .unwrap();
        let schedule = generate(&loan, &PrepaymentSet::new());

        assert!(schedule.len() > 500);
        assert!(schedule.len() < 1200);
        assert!(schedule.windows(2).all(|w| w[1].ending_balance > w[0].ending_balance));
        assert!(schedule.last().unwrap().ending_balance > Money::from_str_exact("1000000000000000000000000000").unwrap());

        // downstream totals saturate rather than overflow
        let yearly = crate::payments::aggregate_yearly(&schedule);
        assert_eq!(yearly.last().unwrap().ending_balance, schedule.last().unwrap().ending_balance);
    }

    #[test]
    fn test_reduce_installment_at_high_rate_long_tenure() {
        let loan = LoanParameters::with_standard_emi(Money::from_major(1_000_000), Rate::from_percentage(60), 1200)
            .unwrap();
        let prepayments = vec![Prepayment::one_time(Money::from_major(100_000), 12).unwrap()];
        let schedule = generate_with_effect(&loan, &prepayments, PrepaymentEffect::ReduceInstallment);

        assert!(schedule.len() > 12 && schedule.len() <= 1200);
        assert_eq!(schedule[11].installment, loan.installment);
        assert!(schedule[12].installment < loan.installment);
    }

    #[test]
    fn test_zero_rate_loan() {
        let loan = LoanParameters::with_standard_emi(Money::from_major(1_200), Rate::ZERO, 12).unwrap();
        let schedule = generate(&loan, &PrepaymentSet::new());

        assert_eq!(schedule.len(), 12);
        assert!(schedule.iter().all(|e| e.interest_portion.is_zero()));
        assert!(schedule[11].ending_balance.is_zero());
    }

    #[test]
    fn test_years_follow_months() {
        let loan = LoanParameters::with_standard_emi(Money::from_major(50_000), Rate::from_percentage(9), 30)
            .unwrap();
        let schedule = generate(&loan, &PrepaymentSet::new());

        assert_eq!(schedule[0].year, 1);
        assert_eq!(schedule[11].year, 1);
        assert_eq!(schedule[12].year, 2);
        assert_eq!(schedule[29].year, 3);
        assert_eq!(year_of(24), 2);
        assert_eq!(year_of(25), 3);
    }

    #[test]
    fn test_reduce_installment_keeps_tenure() {
        let loan = LoanParameters::with_standard_emi(Money::from_major(100_000), Rate::from_percentage(12), 24)
            .unwrap();
        let prepayments = vec![Prepayment::one_time(Money::from_major(20_000), 6).unwrap()];

        let reduced = generate_with_effect(&loan, &prepayments, PrepaymentEffect::ReduceInstallment);
        let shortened = generate(&loan, &prepayments);

        assert_eq!(reduced.len(), 24);
        assert!(shortened.len() < 24);
        assert_eq!(reduced[5].installment, loan.installment);
        assert!(reduced[6].installment < loan.installment);
        assert!(reduced[23].ending_balance < Money::from_decimal(dec!(0.0001)));
    }

    #[test]
    fn test_due_dates() {
        let loan = scenario_loan();
        let schedule = generate(&loan, &PrepaymentSet::new());
        let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

        assert_eq!(schedule[0].due_date(start), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(schedule[11].due_date(start), NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(schedule[0].due_date(start), due_date(start, 1));
        assert_eq!(due_date(start, 0), Some(start));
        assert_eq!(due_date(NaiveDate::MAX, 1), None);
    }

    #[test]
    fn test_deterministic() {
        let loan = scenario_loan();
        let prepayments = vec![
            Prepayment::one_time(Money::from_major(3_000), 2).unwrap(),
            Prepayment::monthly(Money::from_major(700), 5, 9).unwrap(),
        ];

        assert_eq!(generate(&loan, &prepayments), generate(&loan, &prepayments));
    }
}
