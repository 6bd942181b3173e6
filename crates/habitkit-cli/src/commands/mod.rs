pub mod habit;
pub mod insights;
pub mod stats;

use habitkit_core::{FileStore, HabitService, Notifier};

/// Open the service against the default data directory.
pub fn open_service(notifier: &dyn Notifier) -> Result<HabitService<'_, FileStore>, Box<dyn std::error::Error>> {
    let store = FileStore::open()?;
    Ok(HabitService::open(store, notifier))
}
