//! # Habitkit Core Library
//!
//! Core business logic for the Habitkit habit tracker: date-based streak
//! computation, weekly completion rates, badge/XP awards, cross-habit
//! insights, reminder scheduling bookkeeping, and blob persistence of the
//! habit collection. All UI lives elsewhere; this crate exposes plain
//! functions and one application service over the data model.
//!
//! ## Architecture
//!
//! - **Engines** (`streak`, `weekly`, `badges`, `insights`): pure,
//!   deterministic functions over in-memory habits. Each has a `*_on`
//!   variant taking an explicit "today" for tests.
//! - **Store** (`store`): the whole collection persisted as one JSON blob
//!   through an opaque [`BlobStore`] key/value seam.
//! - **Reminders** (`reminders`): bridge from `HH:MM` reminder times to the
//!   injected [`Notifier`] device-notification capability.
//! - **Service** (`service`): the single state container orchestrating
//!   engines, store, and reminders per user action.

pub mod badges;
pub mod dates;
pub mod error;
pub mod habit;
pub mod insights;
pub mod reminders;
pub mod service;
pub mod store;
pub mod streak;
pub mod weekly;

pub use badges::{award_badges, AwardResult, Badge};
pub use error::{CoreError, NotifyError, StoreError};
pub use habit::{Frequency, Habit, MAX_REMINDERS, TOGGLE_XP};
pub use insights::{generate_insights, Insights};
pub use reminders::{NotificationRequest, Notifier, ReminderScheduler};
pub use service::{HabitService, HabitStats};
pub use store::{BlobStore, FileStore, HabitStore, MemoryStore, HABITS_KEY};
pub use streak::calculate_streak;
pub use weekly::{weekly_completion, WeeklyCompletion};
