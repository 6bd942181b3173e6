//! Habit management commands for CLI.

use clap::Subcommand;
use habitkit_core::{calculate_streak, Frequency};

use crate::notifier::LedgerNotifier;

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit title
        title: String,
        /// Display emoji
        #[arg(long, default_value = "")]
        emoji: String,
        /// Display color
        #[arg(long, default_value = "")]
        color: String,
        /// Category label
        #[arg(long, default_value = "General")]
        category: String,
        /// Frequency: daily or custom (default: daily)
        #[arg(long, default_value = "daily")]
        frequency: String,
        /// Comma-separated weekday indices 0=Sun..6=Sat (custom only)
        #[arg(long)]
        weekdays: Option<String>,
        /// Comma-separated HH:MM reminder times
        #[arg(long)]
        remind: Option<String>,
    },
    /// List habits
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle a day's completion (default: today)
    Done {
        /// Habit ID
        id: String,
        /// Date key YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// Set or clear the note for a day
    Note {
        /// Habit ID
        id: String,
        /// Date key YYYY-MM-DD
        date: String,
        /// Note text; empty clears the note
        text: String,
    },
    /// Replace the reminder times
    Remind {
        /// Habit ID
        id: String,
        /// Comma-separated HH:MM times; empty string disables reminders
        times: String,
    },
    /// Delete a habit
    Delete {
        /// Habit ID
        id: String,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let notifier = LedgerNotifier::open()?;
    let mut svc = super::open_service(&notifier)?;

    match action {
        HabitAction::Add {
            title,
            emoji,
            color,
            category,
            frequency,
            weekdays,
            remind,
        } => {
            let frequency = parse_frequency(&frequency)?;
            let weekdays = parse_weekdays(weekdays.as_deref())?;
            let times = split_csv(remind.as_deref());

            let id = svc.add_habit(&title, &emoji, &color, &category, frequency, weekdays, times)?;
            println!("Habit created: {id}");
            if let Some(habit) = svc.find(&id) {
                if !habit.reminder_times.is_empty() {
                    println!("Reminders: {}", habit.reminder_times.join(", "));
                }
            }
        }
        HabitAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(svc.habits())?);
            } else {
                for habit in svc.habits() {
                    println!(
                        "{}  {} {}  [{}]  streak {}  xp {}",
                        habit.id,
                        habit.emoji,
                        habit.title,
                        habit.category,
                        calculate_streak(habit),
                        habit.xp,
                    );
                }
            }
        }
        HabitAction::Done { id, date } => {
            let key = date.unwrap_or_else(habitkit_core::dates::today_key);
            let awarded = svc.toggle_on(&id, &key)?;
            match svc.find(&id) {
                Some(habit) if habit.is_completed_on(&key) => println!("Completed {key}"),
                Some(_) => println!("Un-completed {key}"),
                None => println!("No habit with id {id}"),
            }
            for badge in awarded {
                println!("Badge earned: {} (+{} XP)", badge.description(), badge.xp_delta());
            }
        }
        HabitAction::Note { id, date, text } => {
            svc.set_note(&id, &date, &text)?;
            println!("Note saved for {date}");
        }
        HabitAction::Remind { id, times } => {
            svc.set_reminders(&id, split_csv(Some(&times)))?;
            match svc.find(&id) {
                Some(habit) if habit.reminder_times.is_empty() => println!("Reminders disabled"),
                Some(habit) => println!("Reminders: {}", habit.reminder_times.join(", ")),
                None => println!("No habit with id {id}"),
            }
        }
        HabitAction::Delete { id } => {
            if svc.delete_habit(&id)? {
                println!("Habit deleted: {id}");
            } else {
                println!("No habit with id {id}");
            }
        }
    }
    Ok(())
}

fn parse_frequency(s: &str) -> Result<Frequency, Box<dyn std::error::Error>> {
    match s {
        "daily" => Ok(Frequency::Daily),
        "custom" => Ok(Frequency::Custom),
        other => Err(format!("unknown frequency '{other}' (expected daily or custom)").into()),
    }
}

fn parse_weekdays(s: Option<&str>) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let Some(s) = s else { return Ok(Vec::new()) };
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            let day: u8 = part.trim().parse()?;
            if day > 6 {
                return Err(format!("weekday index {day} out of range 0..=6").into());
            }
            Ok(day)
        })
        .collect()
}

fn split_csv(s: Option<&str>) -> Vec<String> {
    s.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}
