//! serialization support for loan plans
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::payments::{Prepayment, ScheduleEntry, YearlyEntry};
use crate::plan::{LoanPlan, Report};
use crate::summary::ScheduleSummary;
use crate::types::{PrepaymentEffect, ReportMode};

/// serialisable view of a plan and its schedule
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportView {
    pub mode: ReportMode,
    pub terms: TermsView,
    pub prepayments: Vec<Prepayment>,
    pub summary: ScheduleSummary,
    pub interest_saved: Money,
    pub rows: RowsView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TermsView {
    pub principal: Money,
    pub annual_rate: Rate,
    pub tenure_months: u32,
    pub installment: Money,
    pub start_date: NaiveDate,
    pub prepayment_effect: PrepaymentEffect,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowsView {
    Monthly(Vec<MonthlyRow>),
    Yearly(Vec<YearlyEntry>),
}

/// monthly entry with its calendar due date
#[derive(Debug, Serialize, Deserialize)]
pub struct MonthlyRow {
    #[serde(flatten)]
    pub entry: ScheduleEntry,
    pub due_date: Option<NaiveDate>,
}

impl ReportView {
    pub fn from_plan(plan: &LoanPlan, mode: ReportMode) -> Self {
        let loan = plan.loan();
        let start = plan.start_date();

        let rows = match plan.report(mode) {
            Report::Monthly(entries) => RowsView::Monthly(
                entries
                    .into_iter()
                    .map(|entry| MonthlyRow {
                        due_date: entry.due_date(start),
                        entry,
                    })
                    .collect(),
            ),
            Report::Yearly(entries) => RowsView::Yearly(entries),
        };

        ReportView {
            mode,
            terms: TermsView {
                principal: loan.principal,
                annual_rate: loan.annual_rate,
                tenure_months: loan.tenure_months,
                installment: loan.installment,
                start_date: start,
                prepayment_effect: plan.config().prepayment_effect,
            },
            prepayments: plan.prepayments().iter().cloned().collect(),
            summary: plan.summary(),
            interest_saved: plan.interest_saved(),
            rows,
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
