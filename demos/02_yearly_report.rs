/// yearly report - monthly schedule rolled up per loan year
use chrono::{TimeZone, Utc};
use loan_schedule_rs::{LoanPlan, Money, Rate, Report, ReportMode, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()
    ));

    let mut plan = LoanPlan::builder()
        .amount(Money::from_major(2_500_000))
        .rate(Rate::from_bps(875))
        .tenure_months(120)
        .set_time(&time)
        .build()?;
    plan.add_monthly(Money::from_major(15_000), 1, 36)?;

    println!("{:>4} {:>14} {:>14} {:>14} {:>14} {:>14}", "year", "installment", "interest", "principal", "prepayment", "balance");
    if let Report::Yearly(rows) = plan.report(ReportMode::Yearly) {
        for row in rows {
            println!(
                "{:>4} {:>14} {:>14} {:>14} {:>14} {:>14}",
                row.year,
                row.installment.round_dp(2),
                row.interest_portion.round_dp(2),
                row.principal_portion.round_dp(2),
                row.prepayment_applied.round_dp(2),
                row.ending_balance.round_dp(2),
            );
        }
    }

    let last_month = plan.summary().months;
    println!("\nlast installment due {:?}", plan.due_date(last_month));

    Ok(())
}
