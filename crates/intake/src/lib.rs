//! Intake and submission flows.
//!
//! Glue between the translation layer and draft persistence, covering the
//! two journeys a record takes through the client:
//!
//! - **Intake**: a document photo is sent to the extraction service (outside
//!   this crate), producing one best-effort, server-shaped JSON object per
//!   pass. The passes are merged without losing captured values, normalised
//!   into form state and parked in a fresh draft; the UI then redirects into
//!   the form with the new draft id.
//! - **Submission**: the finished form becomes a sanitised create payload
//!   for the backend, and the draft is retired. Autosave is suspended
//!   *before* anything else so a stale debounce commit cannot race the
//!   deletion and resurrect the draft.
//!
//! The HTTP client that transports extraction requests and create payloads
//! is an external collaborator; everything here is in-process.

use nursia_drafts::{Clock, DraftSession, DraftStore, KeyValueStorage};
use nursia_record::{create_payload, deep_merge_prefer_a, schema_to_form, FormState};
use serde_json::Value;

/// Merges extraction passes into one record-shaped object, preferring
/// earlier passes on conflict.
///
/// A non-empty value captured by any pass survives the merge; later passes
/// only fill in what earlier ones missed. Returns `Value::Null` when there
/// are no passes at all.
pub fn merge_extraction_passes(passes: &[Value]) -> Value {
    let mut iter = passes.iter();
    let Some(first) = iter.next() else {
        return Value::Null;
    };
    iter.fold(first.clone(), |merged, next| {
        deep_merge_prefer_a(&merged, next)
    })
}

/// Normalises merged extraction output and parks it in a new draft,
/// returning the draft id for the redirect into the form.
pub fn draft_from_extraction<S: KeyValueStorage>(
    store: &DraftStore<S>,
    extraction: &Value,
) -> String {
    let form = schema_to_form(extraction);
    let fields = form.to_fields();
    let id = store.create_draft(fields);
    tracing::info!(draft_id = %id, "created draft from document extraction");
    id
}

/// Finalises a draft for submission: suspends autosave, builds the
/// sanitised create payload and retires the draft.
///
/// The returned payload is what the HTTP client posts to the backend. The
/// draft is gone from durable storage by the time this returns, and the
/// session can never autosave again.
pub fn finalise_submission<S: KeyValueStorage, C: Clock>(
    session: &mut DraftSession<S, C>,
    form: &FormState,
) -> Value {
    session.suspend_autosave();
    let payload = create_payload(form);
    session.remove_draft();
    tracing::info!("draft retired after submission");
    payload
}
