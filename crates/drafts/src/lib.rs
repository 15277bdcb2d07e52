//! Draft persistence and autosave for in-progress nursing records.
//!
//! A draft is a not-yet-submitted record held only in client-side durable
//! storage; the backend remains the record of truth once submitted. This
//! crate provides:
//!
//! - [`KeyValueStorage`]: the seam to the durable store (a synchronous,
//!   non-transactional string key/value store), with in-memory and
//!   file-backed implementations.
//! - [`DraftStore`]: the keyed draft collection, serialised as a single JSON
//!   document under one fixed key.
//! - [`DraftSession`]: a per-draft controller that debounces persistence of
//!   in-memory edits and exposes a terminal kill-switch for autosave.
//!
//! ## Failure policy
//!
//! Draft data is low-stakes and the storage is user-controlled, so the whole
//! public surface is fail-soft: corrupted documents degrade to an empty
//! collection, missing drafts come back as `None`, and storage faults are
//! logged via `tracing` instead of being surfaced to callers. The
//! [`StorageError`] type exists only at the [`KeyValueStorage`] seam and is
//! absorbed by the store.
//!
//! ## Concurrency
//!
//! The model is single-threaded and event-driven. The collection may be
//! shared by several store instances (think multiple browser tabs); writes
//! are last-write-wins at the granularity of one collection document. Two
//! sessions editing *different* drafts are safe; two sessions editing the
//! *same* draft can lose one side's update. That is an accepted limitation,
//! not something this crate tries to hide.

mod session;
mod storage;
mod store;

pub use session::{Clock, DraftSession, SystemClock, AUTOSAVE_DEBOUNCE};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{Draft, DraftStore, DRAFTS_KEY, MAX_STEP, MIN_STEP};

/// Errors that can occur at the storage backend seam.
///
/// These never cross the `DraftStore`/`DraftSession` boundary; the store
/// logs and degrades instead.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Storage directory does not exist or is not a directory
    #[error("invalid storage directory: {0}")]
    InvalidDirectory(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
