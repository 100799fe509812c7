use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::decimal::Money;

use super::amortization::ScheduleEntry;

/// one loan year rolled up from its months
///
/// Flow columns are summed; `ending_balance` is the balance after the
/// highest month of the year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyEntry {
    pub year: u32,
    pub months: u32,
    pub installment: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub prepayment_applied: Money,
    pub ending_balance: Money,
}

/// partial sums for a year while folding
#[derive(Debug, Clone, Copy)]
struct YearBucket {
    last_month: u32,
    months: u32,
    installment: Money,
    interest_portion: Money,
    principal_portion: Money,
    prepayment_applied: Money,
    ending_balance: Money,
}

impl YearBucket {
    fn open(entry: &ScheduleEntry) -> Self {
        Self {
            last_month: entry.month,
            months: 1,
            installment: entry.installment,
            interest_portion: entry.interest_portion,
            principal_portion: entry.principal_portion,
            prepayment_applied: entry.prepayment_applied,
            ending_balance: entry.ending_balance,
        }
    }

    fn absorb(&mut self, entry: &ScheduleEntry) {
        self.months += 1;
        self.installment += entry.installment;
        self.interest_portion += entry.interest_portion;
        self.principal_portion += entry.principal_portion;
        self.prepayment_applied += entry.prepayment_applied;

        if entry.month >= self.last_month {
            self.last_month = entry.month;
            self.ending_balance = entry.ending_balance;
        }
    }

    fn close(self, year: u32) -> YearlyEntry {
        YearlyEntry {
            year,
            months: self.months,
            installment: self.installment,
            interest_portion: self.interest_portion,
            principal_portion: self.principal_portion,
            prepayment_applied: self.prepayment_applied,
            ending_balance: self.ending_balance,
        }
    }
}

/// roll a monthly schedule up into loan years, ascending by year
pub fn aggregate_yearly(schedule: &[ScheduleEntry]) -> Vec<YearlyEntry> {
    let buckets = schedule
        .iter()
        .fold(BTreeMap::<u32, YearBucket>::new(), |mut acc, entry| {
            acc.entry(entry.year)
                .and_modify(|bucket| bucket.absorb(entry))
                .or_insert_with(|| YearBucket::open(entry));
            acc
        });

    buckets
        .into_iter()
        .map(|(year, bucket)| bucket.close(year))
        .collect()
}
