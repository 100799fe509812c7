/// prepayments - one-time and recurring extra payments
use chrono::NaiveDate;
use loan_schedule_rs::{Decimal, LoanPlan, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut plan = LoanPlan::builder()
        .amount(Money::from_major(1_000_000))
        .annual_rate_percent(Decimal::new(75, 1))
        .tenure_months(60)
        .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .build()?;

    let before = plan.summary();

    plan.add_one_time(Money::from_major(100_000), 6)?;
    let bonus = plan.add_monthly(Money::from_major(10_000), 13, 24)?;

    println!("prepayments:");
    for prepayment in plan.prepayments() {
        println!("  {}", prepayment);
    }

    let after = plan.summary();
    println!();
    println!("months:         {} -> {}", before.months, after.months);
    println!("total interest: {} -> {}", before.total_interest.round_dp(2), after.total_interest.round_dp(2));
    println!("interest saved: {}", plan.interest_saved().round_dp(2));

    // drop the recurring one and compare again
    plan.remove_prepayment(bonus)?;
    println!("without monthly prepayments: {} months", plan.summary().months);

    Ok(())
}
