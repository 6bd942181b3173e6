//! Application-level habit service.
//!
//! The explicit state container: it owns the loaded habit collection and is
//! the only writer. Engines stay pure; every mutation here builds a new
//! collection value, persists it wholesale through the store gateway, and
//! keeps the reminder bookkeeping in step with the notification service.

use tracing::warn;

use crate::badges::{award_badges, Badge};
use crate::dates::{self, parse_date_key, to_date_key};
use crate::error::CoreError;
use crate::habit::{Frequency, Habit, MAX_REMINDERS};
use crate::insights::{generate_insights, Insights};
use crate::reminders::{Notifier, ReminderScheduler};
use crate::store::{BlobStore, HabitStore};
use crate::streak::calculate_streak;
use crate::weekly::{weekly_completion, WeeklyCompletion};

/// Per-habit figures surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct HabitStats {
    pub streak: u32,
    pub weekly: WeeklyCompletion,
}

pub struct HabitService<'a, S: BlobStore> {
    store: HabitStore<S>,
    notifier: &'a dyn Notifier,
    habits: Vec<Habit>,
}

impl<'a, S: BlobStore> HabitService<'a, S> {
    /// Load the collection and take ownership of it for this session.
    pub fn open(store: S, notifier: &'a dyn Notifier) -> Self {
        let store = HabitStore::new(store);
        let habits = store.load();
        Self {
            store,
            notifier,
            habits,
        }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn find(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Create a habit, schedule its reminders, and persist.
    ///
    /// Returns the stored habit's id. A reminder slot that cannot be
    /// scheduled is dropped from both `reminder_times` and
    /// `notification_ids`, so the two stay in one-to-one correspondence even
    /// under partial failure; an unsupported platform or denied permission
    /// simply leaves both empty.
    #[allow(clippy::too_many_arguments)]
    pub fn add_habit(
        &mut self,
        title: &str,
        emoji: &str,
        color: &str,
        category: &str,
        frequency: Frequency,
        weekdays: Vec<u8>,
        reminder_times: Vec<String>,
    ) -> Result<String, CoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CoreError::Validation("habit title must not be empty".into()));
        }
        if frequency == Frequency::Custom && weekdays.is_empty() {
            return Err(CoreError::Validation(
                "custom habits need at least one weekday".into(),
            ));
        }

        let mut habit = Habit::new(title, emoji, color, category, frequency, weekdays);
        let (times, handles) = self.schedule_paired(&habit.title, &reminder_times);
        habit.reminder_times = times;
        habit.notification_ids = handles;

        let id = habit.id.clone();
        self.habits.push(habit);
        self.store.save(&self.habits)?;
        Ok(id)
    }

    /// Toggle today's completion for a habit. See [`Self::toggle_on`].
    pub fn toggle_completion(&mut self, id: &str) -> Result<Vec<Badge>, CoreError> {
        self.toggle_on(id, &dates::today_key())
    }

    /// Toggle the completion mark for a given day, then run the badge award
    /// pass on the new snapshot and persist.
    ///
    /// Returns the badges newly awarded by this toggle so the caller can
    /// surface them. An unknown id or malformed date key is a no-op.
    pub fn toggle_on(&mut self, id: &str, date_key: &str) -> Result<Vec<Badge>, CoreError> {
        let Some(date) = parse_date_key(date_key) else {
            warn!(%id, %date_key, "ignoring toggle with malformed date key");
            return Ok(Vec::new());
        };
        // Store only the canonical zero-padded form, whatever the caller
        // typed.
        let key = to_date_key(date);
        let Some(pos) = self.habits.iter().position(|h| h.id == id) else {
            return Ok(Vec::new());
        };

        // Toggle XP first so the award pass sees the new completion state.
        let toggled = self.habits[pos].toggle_completion(&key);
        let result = award_badges(&toggled);
        self.habits[pos] = result.habit;
        self.store.save(&self.habits)?;
        Ok(result.awarded)
    }

    /// Upsert the reflection note for one day of a habit. Unknown id or a
    /// malformed date key is a no-op.
    pub fn set_note(&mut self, id: &str, date_key: &str, text: &str) -> Result<(), CoreError> {
        let Some(date) = parse_date_key(date_key) else {
            warn!(%id, %date_key, "ignoring note with malformed date key");
            return Ok(());
        };
        let key = to_date_key(date);
        let Some(pos) = self.habits.iter().position(|h| h.id == id) else {
            return Ok(());
        };
        self.habits[pos] = self.habits[pos].set_note(&key, text);
        self.store.save(&self.habits)?;
        Ok(())
    }

    /// Replace a habit's reminder set: cancel every outstanding handle, then
    /// schedule the new times. There is no paused state -- disabling cancels,
    /// re-enabling creates fresh schedules.
    pub fn set_reminders(&mut self, id: &str, times: Vec<String>) -> Result<(), CoreError> {
        let Some(pos) = self.habits.iter().position(|h| h.id == id) else {
            return Ok(());
        };

        let scheduler = ReminderScheduler::new(self.notifier);
        scheduler.cancel_reminders(&self.habits[pos].notification_ids);

        let title = self.habits[pos].title.clone();
        let (times, handles) = self.schedule_paired(&title, &times);

        let mut next = self.habits[pos].clone();
        next.reminder_times = times;
        next.notification_ids = handles;
        self.habits[pos] = next;
        self.store.save(&self.habits)?;
        Ok(())
    }

    /// Delete a habit, cancelling its outstanding reminders first so no
    /// orphaned device notifications remain. Unknown id is a no-op.
    pub fn delete_habit(&mut self, id: &str) -> Result<bool, CoreError> {
        let Some(pos) = self.habits.iter().position(|h| h.id == id) else {
            return Ok(false);
        };

        let scheduler = ReminderScheduler::new(self.notifier);
        scheduler.cancel_reminders(&self.habits[pos].notification_ids);

        self.habits.remove(pos);
        self.store.save(&self.habits)?;
        Ok(true)
    }

    /// Current streak and weekly completion for one habit.
    pub fn stats(&self, id: &str) -> Option<HabitStats> {
        self.find(id).map(|h| HabitStats {
            streak: calculate_streak(h),
            weekly: weekly_completion(h),
        })
    }

    /// Cross-habit summary.
    pub fn insights(&self) -> Insights {
        generate_insights(&self.habits)
    }

    /// Schedule each time through the bridge one slot at a time, keeping the
    /// kept times and their handles positionally aligned.
    fn schedule_paired(&self, title: &str, times: &[String]) -> (Vec<String>, Vec<String>) {
        let scheduler = ReminderScheduler::new(self.notifier);
        let mut kept = Vec::new();
        let mut handles = Vec::new();
        for time in times.iter().take(MAX_REMINDERS) {
            let slot = scheduler.schedule_reminders(title, std::slice::from_ref(time));
            if let Some(handle) = slot.into_iter().next() {
                kept.push(time.clone());
                handles.push(handle);
            }
        }
        (kept, handles)
    }
}
