/// quick start - minimal example to get started
use loan_schedule_rs::{LoanPlan, Money, Rate, ReportMode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // a 100,000 loan at 12% over a year, standard EMI
    let plan = LoanPlan::builder()
        .amount(Money::from_major(100_000))
        .rate(Rate::from_percentage(12))
        .tenure_months(12)
        .build()?;

    println!("installment: {}", plan.loan().installment.round_dp(2));
    println!("{}", plan.json(ReportMode::Monthly));

    Ok(())
}
