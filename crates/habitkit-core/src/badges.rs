//! Badge and XP award engine.
//!
//! Badges are one-way, one-time-per-habit achievement flags from a fixed
//! closed set. The award pass is a pure function: it evaluates every rule
//! against the habit's current streak and weekly figures, grants whatever is
//! applicable and not yet held, and returns a new snapshot. It never
//! persists anything itself.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::habit::Habit;
use crate::streak::streak_on;
use crate::weekly::weekly_completion_on;

/// The closed set of awardable badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Badge {
    /// Streak of at least 3 scheduled days.
    #[serde(rename = "3-day")]
    ThreeDay,
    /// Streak of at least 7 scheduled days.
    #[serde(rename = "7-day")]
    SevenDay,
    /// Streak of at least 30 scheduled days.
    #[serde(rename = "30-day")]
    ThirtyDay,
    /// Every scheduled day of the current week completed.
    PerfectWeek,
}

impl Badge {
    /// All badges, in evaluation order.
    pub const ALL: [Badge; 4] = [
        Badge::ThreeDay,
        Badge::SevenDay,
        Badge::ThirtyDay,
        Badge::PerfectWeek,
    ];

    /// Stable identifier stored in `Habit::badges`.
    pub fn id(&self) -> &'static str {
        match self {
            Badge::ThreeDay => "3-day",
            Badge::SevenDay => "7-day",
            Badge::ThirtyDay => "30-day",
            Badge::PerfectWeek => "perfect-week",
        }
    }

    /// XP granted when this badge is awarded.
    pub fn xp_delta(&self) -> u32 {
        match self {
            Badge::ThreeDay => 15,
            Badge::SevenDay => 35,
            Badge::ThirtyDay => 120,
            Badge::PerfectWeek => 50,
        }
    }

    /// Human-readable description for award toasts.
    pub fn description(&self) -> &'static str {
        match self {
            Badge::ThreeDay => "3-day streak",
            Badge::SevenDay => "7-day streak",
            Badge::ThirtyDay => "30-day streak",
            Badge::PerfectWeek => "Perfect week",
        }
    }
}

/// Outcome of one award pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AwardResult {
    /// Badges newly granted by this pass, empty if none.
    pub awarded: Vec<Badge>,
    /// Habit snapshot with all grants of this pass applied.
    pub habit: Habit,
}

/// Evaluate every badge rule against the habit's current state.
///
/// The caller applies the toggle XP delta and merges the completion change
/// *before* invoking this, so the streak and weekly figures already reflect
/// the new state. Idempotent: a second pass on the returned snapshot awards
/// nothing.
pub fn award_badges(habit: &Habit) -> AwardResult {
    award_badges_on(habit, dates::today())
}

/// Deterministic variant of [`award_badges`] with an explicit "today".
pub fn award_badges_on(habit: &Habit, today: NaiveDate) -> AwardResult {
    let streak = streak_on(habit, today);
    let week = weekly_completion_on(habit, today);

    let mut awarded = Vec::new();
    let mut next = habit.clone();

    for badge in Badge::ALL {
        if next.badges.iter().any(|b| b == badge.id()) {
            continue;
        }
        let applies = match badge {
            Badge::ThreeDay => streak >= 3,
            Badge::SevenDay => streak >= 7,
            Badge::ThirtyDay => streak >= 30,
            Badge::PerfectWeek => week.scheduled > 0 && week.completed == week.scheduled,
        };
        if applies {
            next.badges.push(badge.id().to_string());
            next.xp += badge.xp_delta();
            awarded.push(badge);
        }
    }

    AwardResult { awarded, habit: next }
}
