//! Consecutive-completion streak engine.
//!
//! The streak counts scheduled days, walking backward from today, that are
//! all marked completed. Unscheduled days are transparent: they neither
//! extend nor break the run. A scheduled *today* without a completion is
//! treated as pending rather than a break -- the streak only breaks at the
//! first missed scheduled day strictly before today.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

use crate::dates::{self, to_date_key};
use crate::habit::Habit;

/// Hard bound on days scanned, guarding against corrupt data such as a
/// custom habit whose weekday set never schedules anything.
pub const MAX_SCAN_DAYS: u32 = 366;

/// Current streak for a habit, ending at today (or yesterday if today is
/// still pending).
pub fn calculate_streak(habit: &Habit) -> u32 {
    streak_on(habit, dates::today())
}

/// Deterministic variant of [`calculate_streak`] with an explicit "today".
pub fn streak_on(habit: &Habit, today: NaiveDate) -> u32 {
    let completed: HashSet<&str> = habit.completed_dates.iter().map(String::as_str).collect();
    if completed.is_empty() {
        return 0;
    }

    let mut streak = 0;
    let mut day = today;
    for _ in 0..MAX_SCAN_DAYS {
        if habit.is_scheduled_on(day) {
            if completed.contains(to_date_key(day).as_str()) {
                streak += 1;
            } else if day != today {
                break;
            }
            // scheduled today without a mark is pending, keep scanning
        }
        day = day - Duration::days(1);
    }
    streak
}
