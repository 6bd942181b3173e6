//! File-backed ledger notifier.
//!
//! On a phone the notification service is the OS scheduler; on the desktop
//! CLI there is none, so this implementation records the repeating schedule
//! in a blob of its own and hands back uuid handles. It keeps the full
//! Unscheduled -> Scheduled -> Cancelled slot lifecycle observable from the
//! command line.

use std::sync::Mutex;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use habitkit_core::reminders::{NotificationRequest, Notifier};
use habitkit_core::store::{BlobStore, FileStore};
use habitkit_core::NotifyError;

const LEDGER_KEY: &str = "reminders_v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LedgerEntry {
    handle: String,
    title: String,
    body: String,
    fire_at: NaiveDateTime,
    repeats_daily: bool,
}

pub struct LedgerNotifier {
    store: FileStore,
    entries: Mutex<Vec<LedgerEntry>>,
}

impl LedgerNotifier {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let store = FileStore::open()?;
        let entries = match store.get(LEDGER_KEY)? {
            Some(blob) => serde_json::from_str(&blob).unwrap_or_default(),
            None => Vec::new(),
        };
        Ok(Self {
            store,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &[LedgerEntry]) -> Result<(), NotifyError> {
        let blob = serde_json::to_string(entries)
            .map_err(|e| NotifyError::Service(e.to_string()))?;
        self.store
            .set(LEDGER_KEY, &blob)
            .map_err(|e| NotifyError::Service(e.to_string()))
    }
}

impl Notifier for LedgerNotifier {
    fn request_permission(&self) -> Result<bool, NotifyError> {
        // Nothing to ask on the desktop ledger.
        Ok(true)
    }

    fn schedule(&self, request: &NotificationRequest) -> Result<String, NotifyError> {
        let handle = Uuid::new_v4().to_string();
        let mut entries = self.entries.lock().unwrap();
        entries.push(LedgerEntry {
            handle: handle.clone(),
            title: request.title.clone(),
            body: request.body.clone(),
            fire_at: request.fire_at,
            repeats_daily: request.repeats_daily,
        });
        self.persist(&entries)?;
        Ok(handle)
    }

    fn cancel(&self, handle: &str) -> Result<(), NotifyError> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.handle != handle);
        if entries.len() == before {
            return Err(NotifyError::UnknownHandle(handle.to_string()));
        }
        self.persist(&entries)
    }
}
