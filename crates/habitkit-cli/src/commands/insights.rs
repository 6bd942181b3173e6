//! Cross-habit summary command.

use crate::notifier::LedgerNotifier;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let notifier = LedgerNotifier::open()?;
    let svc = super::open_service(&notifier)?;
    let insights = svc.insights();

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
    } else {
        println!("Habits: {}", insights.total);
        println!("Done today: {}", insights.done_today);
        println!(
            "Top category: {}",
            insights.top_category.as_deref().unwrap_or("-")
        );
        println!(
            "Busiest day: {}",
            insights.busiest_day.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
