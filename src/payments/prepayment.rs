use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::config::PlannerConfig;
use crate::decimal::Money;
use crate::errors::{Result, ScheduleError};
use crate::types::{PrepaymentId, PrepaymentKind};

/// extra payment applied directly to principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prepayment {
    pub id: PrepaymentId,
    pub amount: Money,
    #[serde(flatten)]
    pub kind: PrepaymentKind,
    pub start_month: u32,
}

impl Prepayment {
    /// one-time prepayment in `month`
    pub fn one_time(amount: Money, month: u32) -> Result<Self> {
        Self::new(amount, PrepaymentKind::OneTime, month)
    }

    /// recurring prepayment for every month in `[start_month, end_month]`
    pub fn monthly(amount: Money, start_month: u32, end_month: u32) -> Result<Self> {
        Self::new(amount, PrepaymentKind::Monthly { end_month }, start_month)
    }

    /// validate and create a prepayment with a fresh id
    pub fn new(amount: Money, kind: PrepaymentKind, start_month: u32) -> Result<Self> {
        let prepayment = Self {
            id: Uuid::new_v4(),
            amount,
            kind,
            start_month,
        };
        prepayment.validate(&PlannerConfig::default())?;
        Ok(prepayment)
    }

    pub fn validate(&self, config: &PlannerConfig) -> Result<()> {
        if !self.amount.is_positive() {
            return Err(ScheduleError::InvalidPrepaymentAmount { amount: self.amount });
        }

        let max = config.max_prepayment_month;
        if self.start_month == 0 || self.start_month > max {
            return Err(ScheduleError::InvalidPrepaymentMonth {
                month: self.start_month,
                max,
            });
        }

        if let PrepaymentKind::Monthly { end_month } = self.kind {
            if end_month < self.start_month {
                return Err(ScheduleError::InvalidPrepaymentWindow {
                    start_month: self.start_month,
                    end_month,
                });
            }
            if end_month > max {
                return Err(ScheduleError::InvalidPrepaymentMonth { month: end_month, max });
            }
        }

        Ok(())
    }

    /// last month this prepayment is paid in
    pub fn end_month(&self) -> u32 {
        match self.kind {
            PrepaymentKind::OneTime => self.start_month,
            PrepaymentKind::Monthly { end_month } => end_month,
        }
    }

    /// whether this prepayment is due in `month`
    pub fn applies_in(&self, month: u32) -> bool {
        match self.kind {
            PrepaymentKind::OneTime => self.start_month == month,
            PrepaymentKind::Monthly { end_month } => self.start_month <= month && month <= end_month,
        }
    }

    /// total paid by this prepayment over months `1..=last_month`
    pub fn total_through(&self, last_month: u32) -> Money {
        let last = self.end_month().min(last_month);
        if last < self.start_month {
            return Money::ZERO;
        }
        let months = last - self.start_month + 1;
        self.amount * rust_decimal::Decimal::from(months)
    }
}

impl fmt::Display for Prepayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PrepaymentKind::OneTime => {
                write!(f, "one-time {} at month {}", self.amount.round_dp(2), self.start_month)
            }
            PrepaymentKind::Monthly { end_month } => write!(
                f,
                "monthly {} from month {} to {}",
                self.amount.round_dp(2),
                self.start_month,
                end_month
            ),
        }
    }
}

/// total prepayment due in `month` across all prepayments
///
/// Linear in the number of prepayments; sets are expected to hold tens of
/// entries, so no month index is kept.
pub fn resolve<'a, I>(prepayments: I, month: u32) -> Money
where
    I: IntoIterator<Item = &'a Prepayment>,
{
    prepayments
        .into_iter()
        .filter(|p| p.applies_in(month))
        .map(|p| p.amount)
        .sum()
}

/// ordered collection of prepayments keyed by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrepaymentSet {
    items: Vec<Prepayment>,
}

impl PrepaymentSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// validate and add a new prepayment, returning its id
    pub fn add(&mut self, amount: Money, kind: PrepaymentKind, start_month: u32) -> Result<PrepaymentId> {
        let prepayment = Prepayment::new(amount, kind, start_month)?;
        let id = prepayment.id;
        self.items.push(prepayment);
        Ok(id)
    }

    /// add a pre-built prepayment after validating it against `config`
    ///
    /// A prepayment with an id already in the set replaces the existing entry.
    pub fn insert(&mut self, prepayment: Prepayment, config: &PlannerConfig) -> Result<PrepaymentId> {
        prepayment.validate(config)?;
        let id = prepayment.id;
        match self.items.iter_mut().find(|p| p.id == id) {
            Some(existing) => *existing = prepayment,
            None => self.items.push(prepayment),
        }
        Ok(id)
    }

    /// remove a prepayment by id
    pub fn remove(&mut self, id: PrepaymentId) -> Result<Prepayment> {
        let index = self
            .items
            .iter()
            .position(|p| p.id == id)
            .ok_or(ScheduleError::PrepaymentNotFound { id })?;
        Ok(self.items.remove(index))
    }

    pub fn get(&self, id: PrepaymentId) -> Option<&Prepayment> {
        self.items.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Prepayment> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// total prepayment due in `month`
    pub fn resolve(&self, month: u32) -> Money {
        resolve(&self.items, month)
    }

    pub fn as_slice(&self) -> &[Prepayment] {
        &self.items
    }
}

impl AsRef<[Prepayment]> for PrepaymentSet {
    fn as_ref(&self) -> &[Prepayment] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a PrepaymentSet {
    type Item = &'a Prepayment;
    type IntoIter = std::slice::Iter<'a, Prepayment>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Prepayment> for PrepaymentSet {
    fn from_iter<T: IntoIterator<Item = Prepayment>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
