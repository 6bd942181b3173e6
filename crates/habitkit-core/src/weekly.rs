//! Calendar-week completion engine.
//!
//! The window is the current fixed Sun-Sat week: Sunday 00:00 local through
//! the following Sunday 00:00 exclusive. Not a rolling 7-day window.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dates::{self, parse_date_key, weekday_index};
use crate::habit::Habit;

/// This-week completion figures for one habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyCompletion {
    /// Completions falling inside the week window.
    pub completed: u32,
    /// Days in the window on which the habit is scheduled.
    pub scheduled: u32,
    /// `round(completed / scheduled * 100)`, clamped to 0..=100.
    /// Zero when nothing is scheduled.
    pub rate: u32,
}

/// Completed/scheduled/rate for the current calendar week.
pub fn weekly_completion(habit: &Habit) -> WeeklyCompletion {
    weekly_completion_on(habit, dates::today())
}

/// Deterministic variant of [`weekly_completion`] with an explicit "today".
pub fn weekly_completion_on(habit: &Habit, today: NaiveDate) -> WeeklyCompletion {
    let start = today - Duration::days(i64::from(weekday_index(today)));
    let end = start + Duration::days(7);

    // Iterate the window days rather than taking the weekday-set size, so
    // the figure stays correct if the window definition ever changes.
    let scheduled = (0..7)
        .map(|i| start + Duration::days(i))
        .filter(|d| habit.is_scheduled_on(*d))
        .count() as u32;

    let completed = habit
        .completed_dates
        .iter()
        .filter_map(|key| parse_date_key(key))
        .filter(|d| *d >= start && *d < end)
        .count() as u32;

    let rate = if scheduled == 0 {
        0
    } else {
        (f64::from(completed) / f64::from(scheduled) * 100.0).round() as u32
    };

    WeeklyCompletion {
        completed,
        scheduled,
        rate: rate.min(100),
    }
}
