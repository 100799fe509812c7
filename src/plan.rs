use chrono::NaiveDate;
use hourglass_rs::{SafeTimeProvider, TimeSource};
use rust_decimal::Decimal;

use crate::config::PlannerConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::loan::{calculate_emi, LoanParameters};
use crate::payments::{aggregate_yearly, due_date, Prepayment, PrepaymentSet, ScheduleEntry, ScheduleGenerator, YearlyEntry};
use crate::serialization::ReportView;
use crate::summary::{interest_saved, ScheduleSummary};
use crate::types::{PrepaymentEffect, PrepaymentId, PrepaymentKind, ReportMode};

/// schedule rows at the requested granularity
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Monthly(Vec<ScheduleEntry>),
    Yearly(Vec<YearlyEntry>),
}

impl Report {
    pub fn mode(&self) -> ReportMode {
        match self {
            Report::Monthly(_) => ReportMode::Monthly,
            Report::Yearly(_) => ReportMode::Yearly,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Report::Monthly(rows) => rows.len(),
            Report::Yearly(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// a loan together with the prepayments planned against it
///
/// Every query recomputes the schedule from scratch.
#[derive(Debug, Clone)]
pub struct LoanPlan {
    loan: LoanParameters,
    prepayments: PrepaymentSet,
    start_date: NaiveDate,
    config: PlannerConfig,
}

impl LoanPlan {
    pub fn new(loan: LoanParameters, start_date: NaiveDate, config: PlannerConfig) -> Self {
        Self {
            loan,
            prepayments: PrepaymentSet::new(),
            start_date,
            config,
        }
    }

    /// builder for creating loan plans
    pub fn builder() -> LoanBuilder {
        LoanBuilder::new()
    }

    pub fn loan(&self) -> &LoanParameters {
        &self.loan
    }

    pub fn prepayments(&self) -> &PrepaymentSet {
        &self.prepayments
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn set_prepayment_effect(&mut self, effect: PrepaymentEffect) {
        self.config.prepayment_effect = effect;
    }

    /// add a one-time prepayment
    pub fn add_one_time(&mut self, amount: Money, month: u32) -> Result<PrepaymentId> {
        self.add_prepayment(amount, PrepaymentKind::OneTime, month)
    }

    /// add a monthly prepayment over `[start_month, end_month]`
    pub fn add_monthly(&mut self, amount: Money, start_month: u32, end_month: u32) -> Result<PrepaymentId> {
        self.add_prepayment(amount, PrepaymentKind::Monthly { end_month }, start_month)
    }

    pub fn add_prepayment(&mut self, amount: Money, kind: PrepaymentKind, start_month: u32) -> Result<PrepaymentId> {
        let prepayment = Prepayment {
            id: uuid::Uuid::new_v4(),
            amount,
            kind,
            start_month,
        };
        self.prepayments.insert(prepayment, &self.config)
    }

    pub fn remove_prepayment(&mut self, id: PrepaymentId) -> Result<Prepayment> {
        self.prepayments.remove(id)
    }

    fn generator(&self) -> ScheduleGenerator {
        ScheduleGenerator::new(self.config.prepayment_effect)
    }

    /// monthly schedule with all prepayments applied
    pub fn schedule(&self) -> Vec<ScheduleEntry> {
        self.generator().generate(&self.loan, &self.prepayments)
    }

    /// monthly schedule of the same loan without prepayments
    pub fn baseline_schedule(&self) -> Vec<ScheduleEntry> {
        self.generator().generate(&self.loan, &PrepaymentSet::new())
    }

    /// schedule at the requested granularity
    pub fn report(&self, mode: ReportMode) -> Report {
        let schedule = self.schedule();
        match mode {
            ReportMode::Monthly => Report::Monthly(schedule),
            ReportMode::Yearly => Report::Yearly(aggregate_yearly(&schedule)),
        }
    }

    /// schedule at the configured default granularity
    pub fn default_report(&self) -> Report {
        self.report(self.config.default_report_mode)
    }

    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary::from_schedule(&self.schedule())
    }

    /// interest avoided by the planned prepayments
    pub fn interest_saved(&self) -> Money {
        let baseline = ScheduleSummary::from_schedule(&self.baseline_schedule());
        interest_saved(&baseline, &self.summary())
    }

    /// date installment `month` falls due
    pub fn due_date(&self, month: u32) -> Option<NaiveDate> {
        due_date(self.start_date, month)
    }

    /// serialisable view of the report
    pub fn view(&self, mode: ReportMode) -> ReportView {
        ReportView::from_plan(self, mode)
    }

    /// pretty-printed json of the report
    pub fn json(&self, mode: ReportMode) -> String {
        self.view(mode)
            .to_json_pretty()
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}

/// builder for loan plans
pub struct LoanBuilder {
    amount: Option<Money>,
    rate: Option<Rate>,
    tenure_months: Option<u32>,
    installment: Option<Money>,
    start_date: Option<NaiveDate>,
    config: Option<PlannerConfig>,
    time_provider: Option<SafeTimeProvider>,
}

impl Default for LoanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoanBuilder {
    pub fn new() -> Self {
        Self {
            amount: None,
            rate: None,
            tenure_months: None,
            installment: None,
            start_date: None,
            config: None,
            time_provider: None,
        }
    }

    /// use `time` to pick the start date when none is given
    pub fn set_time(mut self, time: &SafeTimeProvider) -> Self {
        self.time_provider = Some(time.clone());
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    /// annual rate as a percentage, e.g. 7.5
    pub fn annual_rate_percent(mut self, percent: Decimal) -> Self {
        self.rate = Some(Rate::from_percentage_decimal(percent));
        self
    }

    pub fn tenure_months(mut self, months: u32) -> Self {
        self.tenure_months = Some(months);
        self
    }

    /// fixed monthly installment; the standard EMI is used when omitted
    pub fn installment(mut self, installment: Money) -> Self {
        self.installment = Some(installment);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn config(mut self, config: PlannerConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn prepayment_effect(mut self, effect: PrepaymentEffect) -> Self {
        let config = self.config.take().unwrap_or_default();
        self.config = Some(config.with_prepayment_effect(effect));
        self
    }

    /// build with the stored time provider, or system time if not set
    pub fn build(self) -> Result<LoanPlan> {
        let time = match &self.time_provider {
            Some(time) => time.clone(),
            None => SafeTimeProvider::new(TimeSource::System),
        };
        self.build_with_time(&time)
    }

    pub fn build_with_time(self, time_provider: &SafeTimeProvider) -> Result<LoanPlan> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let amount = self.amount.ok_or(ScheduleError::InvalidConfiguration {
            message: "Amount required".to_string(),
        })?;

        let rate = self.rate.ok_or(ScheduleError::InvalidConfiguration {
            message: "Rate required".to_string(),
        })?;

        let tenure = self.tenure_months.ok_or(ScheduleError::InvalidConfiguration {
            message: "Tenure required".to_string(),
        })?;

        let installment = match self.installment {
            Some(installment) => installment,
            None => calculate_emi(amount, rate, tenure)?,
        };

        let loan = LoanParameters::with_config(amount, rate, tenure, installment, &config)?;
        let start_date = self.start_date.unwrap_or_else(|| time_provider.now().date_naive());

        log::debug!(
            "planned loan of {} at {} over {} months, installment {}",
            loan.principal,
            loan.annual_rate,
            loan.tenure_months,
            loan.installment
        );

        Ok(LoanPlan::new(loan, start_date, config))
    }
}
