//! Per-habit statistics command.

use crate::notifier::LedgerNotifier;

pub fn run(id: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let notifier = LedgerNotifier::open()?;
    let svc = super::open_service(&notifier)?;

    let (Some(habit), Some(stats)) = (svc.find(id), svc.stats(id)) else {
        return Err(format!("no habit with id {id}").into());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{} {}", habit.emoji, habit.title);
        println!("Streak: {} day(s)", stats.streak);
        println!(
            "This week: {}/{} scheduled ({}%)",
            stats.weekly.completed, stats.weekly.scheduled, stats.weekly.rate
        );
        if !habit.badges.is_empty() {
            println!("Badges: {}", habit.badges.join(", "));
        }
    }
    Ok(())
}
