//! Reminder scheduling bridge over the device notification service.
//!
//! The service itself is external; it is modelled as the [`Notifier`]
//! capability so tests can substitute an in-memory fake. The bridge turns a
//! habit's `HH:MM` reminder times into repeating daily notification requests
//! and keeps the returned opaque handles for later cancellation.
//!
//! Every path here fails open: a slot that cannot be scheduled is logged and
//! skipped, a handle that cannot be cancelled is logged and ignored. Reminder
//! trouble must never abort a habit save or delete.

use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use tracing::warn;

use crate::error::NotifyError;

/// One notification to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    /// First local wall-clock occurrence.
    pub fire_at: NaiveDateTime,
    pub repeats_daily: bool,
}

/// The device notification service seam.
///
/// Implementations are expected to be tolerant: `cancel` on an unknown
/// handle may error, but callers treat that as a no-op.
pub trait Notifier: Send + Sync {
    /// Whether this platform can deliver notifications at all. When false,
    /// scheduling short-circuits to an empty result without any call.
    fn is_supported(&self) -> bool {
        true
    }

    /// Ask the user for notification permission.
    fn request_permission(&self) -> Result<bool, NotifyError>;

    /// Schedule one notification, returning an opaque handle.
    fn schedule(&self, request: &NotificationRequest) -> Result<String, NotifyError>;

    /// Cancel a previously scheduled notification.
    fn cancel(&self, handle: &str) -> Result<(), NotifyError>;
}

/// Bridge between habit reminder configuration and the notification service.
pub struct ReminderScheduler<'a> {
    notifier: &'a dyn Notifier,
}

impl<'a> ReminderScheduler<'a> {
    pub fn new(notifier: &'a dyn Notifier) -> Self {
        Self { notifier }
    }

    /// Schedule a repeating daily reminder for each `HH:MM` time.
    ///
    /// Returns the handles of the slots that were scheduled. Malformed times
    /// and per-slot service failures are logged and omitted; an unsupported
    /// platform or denied notification permission yields an empty list
    /// without scheduling anything.
    pub fn schedule_reminders(&self, title: &str, times: &[String]) -> Vec<String> {
        if !self.notifier.is_supported() {
            warn!(%title, "notifications unsupported on this platform, skipping");
            return Vec::new();
        }
        match self.notifier.request_permission() {
            Ok(true) => {}
            Ok(false) => {
                warn!(%title, "notification permission denied, skipping reminders");
                return Vec::new();
            }
            Err(e) => {
                warn!(%title, error = %e, "permission check failed, skipping reminders");
                return Vec::new();
            }
        }

        let now = Local::now().naive_local();
        let mut handles = Vec::new();
        for time in times {
            let Some(fire_at) = next_occurrence(time, now) else {
                warn!(%title, %time, "invalid reminder time, slot skipped");
                continue;
            };
            let request = NotificationRequest {
                title: "Habit Reminder".to_string(),
                body: format!("Time for: {title}"),
                fire_at,
                repeats_daily: true,
            };
            match self.notifier.schedule(&request) {
                Ok(handle) => handles.push(handle),
                Err(e) => warn!(%title, %time, error = %e, "failed to schedule reminder"),
            }
        }
        handles
    }

    /// Best-effort cancellation of every handle. Unknown or already-fired
    /// handles are non-fatal no-ops.
    pub fn cancel_reminders(&self, handles: &[String]) {
        for handle in handles {
            if let Err(e) = self.notifier.cancel(handle) {
                warn!(%handle, error = %e, "failed to cancel reminder");
            }
        }
    }
}

/// Next local occurrence of an `HH:MM` wall-clock time: today unless the
/// time has already passed, in which case tomorrow. A time equal to `now`
/// to the second still counts as today. `None` for malformed input.
pub fn next_occurrence(time: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let (hh, mm) = time.split_once(':')?;
    let hour: u32 = hh.parse().ok()?;
    let minute: u32 = mm.parse().ok()?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;

    let candidate = now.date().and_time(time);
    if candidate >= now {
        Some(candidate)
    } else {
        Some(candidate + Duration::days(1))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory notifier fake shared by the bridge and service tests.

    use std::collections::HashSet;
    use std::sync::Mutex;

    use uuid::Uuid;

    use super::{NotificationRequest, Notifier};
    use crate::error::NotifyError;

    #[derive(Default)]
    pub struct RecordingNotifier {
        pub supported: bool,
        pub permission: bool,
        /// Times (`HH:MM` of the request's fire_at) that fail to schedule.
        pub failing_times: HashSet<String>,
        pub scheduled: Mutex<Vec<(String, NotificationRequest)>>,
        pub cancelled: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self {
                supported: true,
                permission: true,
                ..Self::default()
            }
        }

        pub fn unsupported() -> Self {
            Self {
                supported: false,
                permission: false,
                ..Self::default()
            }
        }

        pub fn live_handles(&self) -> Vec<String> {
            let cancelled = self.cancelled.lock().unwrap();
            self.scheduled
                .lock()
                .unwrap()
                .iter()
                .map(|(h, _)| h.clone())
                .filter(|h| !cancelled.contains(h))
                .collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn is_supported(&self) -> bool {
            self.supported
        }

        fn request_permission(&self) -> Result<bool, NotifyError> {
            Ok(self.permission)
        }

        fn schedule(&self, request: &NotificationRequest) -> Result<String, NotifyError> {
            let key = request.fire_at.format("%H:%M").to_string();
            if self.failing_times.contains(&key) {
                return Err(NotifyError::Service(format!("slot {key} rejected")));
            }
            let handle = Uuid::new_v4().to_string();
            self.scheduled
                .lock()
                .unwrap()
                .push((handle.clone(), request.clone()));
            Ok(handle)
        }

        fn cancel(&self, handle: &str) -> Result<(), NotifyError> {
            let known = self
                .scheduled
                .lock()
                .unwrap()
                .iter()
                .any(|(h, _)| h == handle);
            if !known {
                return Err(NotifyError::UnknownHandle(handle.to_string()));
            }
            self.cancelled.lock().unwrap().push(handle.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingNotifier;
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn past_time_rolls_to_tomorrow_future_time_stays_today() {
        // Current time 10:00: 09:00 has passed, 21:00 has not.
        let now = at(10, 0);
        let morning = next_occurrence("09:00", now).unwrap();
        let evening = next_occurrence("21:00", now).unwrap();

        assert_eq!(morning.date(), now.date() + Duration::days(1));
        assert_eq!(morning.time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(evening.date(), now.date());
        assert_eq!(evening.time(), NaiveTime::from_hms_opt(21, 0, 0).unwrap());
    }

    #[test]
    fn time_equal_to_now_stays_today() {
        let now = at(9, 0);
        let next = next_occurrence("09:00", now).unwrap();
        assert_eq!(next, now);
    }

    #[test]
    fn malformed_times_yield_none() {
        let now = at(10, 0);
        assert_eq!(next_occurrence("25:00", now), None);
        assert_eq!(next_occurrence("09:61", now), None);
        assert_eq!(next_occurrence("soon", now), None);
        assert_eq!(next_occurrence("", now), None);
    }

    #[test]
    fn schedules_one_repeating_slot_per_time() {
        let notifier = RecordingNotifier::new();
        let scheduler = ReminderScheduler::new(&notifier);

        let handles =
            scheduler.schedule_reminders("Meditate", &["09:00".to_string(), "21:00".to_string()]);
        assert_eq!(handles.len(), 2);

        let scheduled = notifier.scheduled.lock().unwrap();
        assert_eq!(scheduled.len(), 2);
        for (_, request) in scheduled.iter() {
            assert!(request.repeats_daily);
            assert_eq!(request.body, "Time for: Meditate");
        }
    }

    #[test]
    fn denied_permission_schedules_nothing() {
        let mut notifier = RecordingNotifier::new();
        notifier.permission = false;
        let scheduler = ReminderScheduler::new(&notifier);

        let handles = scheduler.schedule_reminders("Meditate", &["09:00".to_string()]);
        assert!(handles.is_empty());
        assert!(notifier.scheduled.lock().unwrap().is_empty());
    }

    #[test]
    fn unsupported_platform_schedules_nothing() {
        let notifier = RecordingNotifier::unsupported();
        let scheduler = ReminderScheduler::new(&notifier);

        let handles = scheduler.schedule_reminders("Meditate", &["09:00".to_string()]);
        assert!(handles.is_empty());
        assert!(notifier.scheduled.lock().unwrap().is_empty());
    }

    #[test]
    fn failing_slot_is_skipped_without_aborting_the_rest() {
        let mut notifier = RecordingNotifier::new();
        notifier.failing_times.insert("09:00".to_string());
        let scheduler = ReminderScheduler::new(&notifier);

        let handles = scheduler.schedule_reminders(
            "Meditate",
            &["09:00".to_string(), "21:00".to_string()],
        );
        assert_eq!(handles.len(), 1);
    }

    #[test]
    fn invalid_time_is_skipped_without_aborting_the_rest() {
        let notifier = RecordingNotifier::new();
        let scheduler = ReminderScheduler::new(&notifier);

        let handles = scheduler.schedule_reminders(
            "Meditate",
            &["nope".to_string(), "21:00".to_string()],
        );
        assert_eq!(handles.len(), 1);
    }

    #[test]
    fn cancel_swallows_unknown_handles() {
        let notifier = RecordingNotifier::new();
        let scheduler = ReminderScheduler::new(&notifier);

        let mut handles = scheduler.schedule_reminders("Meditate", &["21:00".to_string()]);
        handles.push("no-such-handle".to_string());

        // Must not panic or abort on the unknown handle.
        scheduler.cancel_reminders(&handles);
        assert_eq!(notifier.cancelled.lock().unwrap().len(), 1);
    }
}
