//! Per-draft editing session with debounced autosave.
//!
//! A [`DraftSession`] mediates between in-memory edits and the
//! [`DraftStore`] for exactly one draft. Edits are applied to memory
//! synchronously and immediately visible to the next call; only persistence
//! is deferred, behind a trailing-edge debounce window of
//! [`AUTOSAVE_DEBOUNCE`]. Each new edit restarts the window, so a burst of
//! rapid keystrokes produces one write whose content reflects the last edit
//! in the burst, never an intermediate state.
//!
//! Autosave is an explicit three-state machine (idle, pending with a
//! deadline, suspended) rather than a collection of mutable flags and timer
//! handles. Suspension is terminal for the session: once
//! [`DraftSession::suspend_autosave`] returns, no commit can happen, even if
//! a deadline had already elapsed. A fresh session must be started to
//! autosave that draft again. This is used right before final submission so
//! a stale in-flight autosave cannot race the draft's deletion.
//!
//! The session drives no timer of its own. The owner schedules a wake-up for
//! [`DraftSession::next_deadline`] and calls [`DraftSession::tick`]; time
//! itself comes from the [`Clock`] seam so the debounce window is
//! deterministic under test.

use crate::store::{Draft, DraftStore, MAX_STEP, MIN_STEP};
use crate::storage::KeyValueStorage;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Debounce window between the last edit and its persisted write.
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(600);

/// Time source for the session.
pub trait Clock {
    /// Monotonic instant used for the debounce deadline.
    fn instant(&self) -> Instant;
    /// Wall-clock time stamped onto persisted drafts.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// The real time source.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn instant(&self) -> Instant {
        Instant::now()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn instant(&self) -> Instant {
        (**self).instant()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        (**self).now_utc()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Autosave {
    Idle,
    Pending { deadline: Instant },
    Suspended,
}

/// Controller for one draft during a single editing session.
pub struct DraftSession<S: KeyValueStorage, C: Clock = SystemClock> {
    store: DraftStore<S>,
    clock: C,
    draft_id: String,
    draft: Option<Draft>,
    autosave: Autosave,
}

impl<S: KeyValueStorage> DraftSession<S, SystemClock> {
    /// Opens a session for `draft_id`, loading the current draft if it
    /// exists. A missing draft leaves the session empty; edits then become
    /// no-ops and the calling UI presents its "not found" state.
    pub fn new(store: DraftStore<S>, draft_id: &str) -> Self {
        Self::with_clock(store, draft_id, SystemClock)
    }
}

impl<S: KeyValueStorage, C: Clock> DraftSession<S, C> {
    /// Opens a session with an explicit time source.
    pub fn with_clock(store: DraftStore<S>, draft_id: &str, clock: C) -> Self {
        let draft = store.get_draft(draft_id);
        Self {
            store,
            clock,
            draft_id: draft_id.to_string(),
            draft,
            autosave: Autosave::Idle,
        }
    }

    /// The draft as currently held in memory.
    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// The store this session persists through.
    pub fn store(&self) -> &DraftStore<S> {
        &self.store
    }

    /// Merges field edits into the draft's data and schedules a write.
    pub fn update_data(&mut self, partial: Map<String, Value>) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        for (key, value) in partial {
            draft.data.insert(key, value);
        }
        self.schedule();
    }

    /// Moves the wizard position (clamped to the valid step range) and
    /// schedules a write.
    pub fn set_step(&mut self, step: u8) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        draft.step = step.clamp(MIN_STEP, MAX_STEP);
        self.schedule();
    }

    fn schedule(&mut self) {
        if self.autosave == Autosave::Suspended {
            return;
        }
        self.autosave = Autosave::Pending {
            deadline: self.clock.instant() + AUTOSAVE_DEBOUNCE,
        };
    }

    /// The instant the pending autosave is due, if one is scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.autosave {
            Autosave::Pending { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Commits the pending autosave if its deadline has elapsed.
    ///
    /// Returns `true` when a write happened. Writes always carry the full
    /// current draft with a refreshed `updated_at`; states superseded during
    /// the debounce window are never separately persisted.
    pub fn tick(&mut self) -> bool {
        let Autosave::Pending { deadline } = self.autosave else {
            return false;
        };
        if self.clock.instant() < deadline {
            return false;
        }

        let Some(draft) = self.draft.as_mut() else {
            self.autosave = Autosave::Idle;
            return false;
        };
        draft.updated_at = self.clock.now_utc();
        self.store.put_draft(draft);
        self.autosave = Autosave::Idle;
        true
    }

    /// Permanently disables autosave for this session and cancels any
    /// pending write. Idempotent; there is no way to resume.
    pub fn suspend_autosave(&mut self) {
        self.autosave = Autosave::Suspended;
    }

    /// Suspends autosave, deletes the draft from the store and clears the
    /// in-memory state. Irreversible and idempotent.
    pub fn remove_draft(&mut self) {
        self.suspend_autosave();
        self.store.delete_draft(&self.draft_id);
        self.draft = None;
    }

    /// Wizard progress as a percentage: `(step - 1) * 20`, clamped to
    /// 0..=100. Step 5 therefore reads 80, not 100; the final 20% is the
    /// submission itself.
    pub fn progress(&self) -> u8 {
        let step = self.draft.as_ref().map_or(MIN_STEP, |d| d.step);
        (u32::from(step.saturating_sub(1)) * 20).clamp(0, 100) as u8
    }

    /// Re-reads the draft from the store, discarding in-memory edits.
    /// Recovery path when external mutation is suspected.
    pub fn refresh(&mut self) {
        self.draft = self.store.get_draft(&self.draft_id);
    }
}
