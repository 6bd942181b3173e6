//! Core error types for habitkit-core.
//!
//! The pure engines (streak, weekly completion, badges, insights) are total
//! functions and have no error paths; errors arise only at the store and
//! notifier boundaries.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitkit-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistence-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Notification-service errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the blob persistence service.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Data directory unavailable: {0}")]
    DataDir(String),

    #[error("Failed to read blob at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write blob at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize habit collection: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from the device notification service.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification permission denied")]
    PermissionDenied,

    #[error("Unknown notification handle: {0}")]
    UnknownHandle(String),

    #[error("Notification service failure: {0}")]
    Service(String),
}
