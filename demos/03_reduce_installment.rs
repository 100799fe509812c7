/// reduce installment - keep the tenure, lower the EMI after prepaying
use chrono::NaiveDate;
use loan_schedule_rs::{LoanPlan, Money, PrepaymentEffect, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut plan = LoanPlan::builder()
        .amount(Money::from_major(500_000))
        .rate(Rate::from_percentage(9))
        .tenure_months(36)
        .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .build()?;
    plan.add_one_time(Money::from_major(100_000), 12)?;

    for effect in [PrepaymentEffect::ReduceTenure, PrepaymentEffect::ReduceInstallment] {
        plan.set_prepayment_effect(effect);
        let schedule = plan.schedule();
        let summary = plan.summary();

        println!("{:?}", effect);
        println!("  months:            {}", summary.months);
        println!("  installment m12:   {}", schedule[11].installment.round_dp(2));
        println!("  installment m13:   {}", schedule[12].installment.round_dp(2));
        println!("  interest saved:    {}", plan.interest_saved().round_dp(2));
        println!();
    }

    Ok(())
}
