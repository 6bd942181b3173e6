//! The habit data model.
//!
//! A [`Habit`] is the sole persisted entity: the whole application state is
//! an ordered `Vec<Habit>` stored as one JSON blob. Mutating operations are
//! copy-on-write -- they return a new `Habit` rather than editing in place,
//! so the collection is always replaced wholesale by the caller.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates::{parse_date_key, to_date_key, weekday_index, DateKey};

/// XP granted when a completion is toggled on, and removed (floored at zero)
/// when it is toggled back off. Kept symmetric so a toggle-on/off pair is a
/// gamification no-op.
pub const TOGGLE_XP: u32 = 20;

/// Maximum number of daily reminders per habit.
pub const MAX_REMINDERS: usize = 5;

/// How often a habit is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every calendar day.
    #[default]
    Daily,
    /// Only the weekdays listed in `Habit::weekdays`.
    Custom,
}

/// A tracked habit.
///
/// Every field the stored blob may omit carries `#[serde(default)]` so load
/// tolerates records written by older versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub category: String,
    /// Date keys of completion events, one per calendar day. Set semantics:
    /// no duplicates, order irrelevant.
    #[serde(default)]
    pub completed_dates: Vec<DateKey>,
    #[serde(default)]
    pub frequency: Frequency,
    /// Scheduled weekdays, 0=Sun .. 6=Sat. Only meaningful for `Custom`.
    #[serde(default)]
    pub weekdays: Vec<u8>,
    /// Daily reminder times as `HH:MM`, at most [`MAX_REMINDERS`].
    #[serde(default)]
    pub reminder_times: Vec<String>,
    /// Opaque handles returned by the notification service, one per live
    /// reminder. Used only for cancellation.
    #[serde(default)]
    pub notification_ids: Vec<String>,
    /// Per-day reflection notes, keyed by date key.
    #[serde(default)]
    pub notes: HashMap<DateKey, String>,
    #[serde(default)]
    pub xp: u32,
    /// Awarded badge ids. One-way accumulation, never removed.
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Create a fresh habit with empty history and zero XP.
    pub fn new(
        title: impl Into<String>,
        emoji: impl Into<String>,
        color: impl Into<String>,
        category: impl Into<String>,
        frequency: Frequency,
        weekdays: Vec<u8>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            emoji: emoji.into(),
            color: color.into(),
            category: category.into(),
            completed_dates: Vec::new(),
            frequency,
            weekdays,
            reminder_times: Vec::new(),
            notification_ids: Vec::new(),
            notes: HashMap::new(),
            xp: 0,
            badges: Vec::new(),
            created_at: Utc::now(),
        }
        .normalized()
    }

    /// Whether this habit is scheduled on the given calendar day.
    ///
    /// `Daily` habits are scheduled every day. `Custom` habits are scheduled
    /// only on the listed weekdays; an empty weekday set means no day is
    /// ever scheduled.
    pub fn is_scheduled_on(&self, date: NaiveDate) -> bool {
        match self.frequency {
            Frequency::Daily => true,
            Frequency::Custom => self.weekdays.contains(&weekday_index(date)),
        }
    }

    /// Whether the given day is marked completed.
    pub fn is_completed_on(&self, key: &str) -> bool {
        self.completed_dates.iter().any(|d| d == key)
    }

    /// Toggle the completion mark for a day, applying the toggle XP policy:
    /// +[`TOGGLE_XP`] when completing, -[`TOGGLE_XP`] (floored at zero) when
    /// un-completing.
    pub fn toggle_completion(&self, key: &str) -> Habit {
        let mut next = self.clone();
        if let Some(pos) = next.completed_dates.iter().position(|d| d == key) {
            next.completed_dates.remove(pos);
            next.xp = next.xp.saturating_sub(TOGGLE_XP);
        } else {
            next.completed_dates.push(key.to_string());
            next.xp += TOGGLE_XP;
        }
        next
    }

    /// Upsert the reflection note for a day. Empty (after trimming) text
    /// removes the note, keeping at most one note per calendar day.
    pub fn set_note(&self, key: &str, text: &str) -> Habit {
        let mut next = self.clone();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            next.notes.remove(key);
        } else {
            next.notes.insert(key.to_string(), trimmed.to_string());
        }
        next
    }

    /// The single "deserialize with defaults" boundary: bring a possibly
    /// partial or malformed record back to the documented invariants.
    ///
    /// Drops malformed date keys, rewrites parseable ones to the canonical
    /// zero-padded form, dedups completion dates and badges, clamps weekdays
    /// to 0..=6, and truncates the reminder list to the cap. The engines can
    /// then assume well-formed input and stay total.
    ///
    /// Canonicalization matters: a key like `2026-3-9` parses but would
    /// otherwise coexist with `2026-03-09` as a second entry for the same
    /// calendar day.
    pub fn normalized(mut self) -> Habit {
        self.title = self.title.trim().to_string();

        let mut seen = HashSet::new();
        self.completed_dates = self
            .completed_dates
            .iter()
            .filter_map(|key| parse_date_key(key).map(to_date_key))
            .filter(|key| seen.insert(key.clone()))
            .collect();

        self.weekdays.retain(|d| *d <= 6);
        self.weekdays.sort_unstable();
        self.weekdays.dedup();

        self.reminder_times.truncate(MAX_REMINDERS);
        self.notification_ids.truncate(MAX_REMINDERS);

        let mut seen_badges = HashSet::new();
        self.badges.retain(|b| seen_badges.insert(b.clone()));

        self.notes = std::mem::take(&mut self.notes)
            .into_iter()
            .filter_map(|(key, text)| parse_date_key(&key).map(|d| (to_date_key(d), text)))
            .collect();

        self
    }
}
