//! Nursing record schema translation.
//!
//! This crate provides **pure translation helpers** between the three shapes a
//! nursing assessment record takes on its way through the system:
//!
//! - [`FormState`]: the flat, UI-oriented shape consumed by input components,
//!   with short coded tokens for enumerated fields (for example `"propria"`).
//! - [`ServerRecord`]: the nested wire shape persisted by the backend, with
//!   human-readable enumeration labels (for example `"Própria"`).
//! - Raw document-extraction output: structurally similar to the server shape
//!   but noisy (missing, extra or mistyped keys), handled as untyped JSON.
//!
//! Responsibilities:
//! - Define the flat form model and the strict server wire model
//! - Translate in both directions via fixed label ⇄ code lookup tables
//! - Normalise best-effort extraction output without ever failing
//! - Merge, prune and sanitise payloads before submission
//!
//! Every function in this crate is total: translation edge cases (unknown
//! labels, malformed dates, absent nested paths) degrade to empty or default
//! values instead of surfacing errors. The backend remains the durable record
//! of truth; this layer only reshapes data on the client side.

pub mod dates;
pub mod form;
pub mod merge;
pub mod server;
pub mod translate;

pub use dates::{br_to_iso, to_date_br};
pub use form::{
    DietComposition, DietProfile, DrinkingFrequency, FormState, HousingKind, InformantKind,
    RecreationFrequency, SleepSatisfaction, YesNo,
};
pub use merge::{deep_merge_prefer_a, is_empty, prune, sanitize_for_create};
pub use server::ServerRecord;
pub use translate::{create_payload, form_to_server, schema_to_form, server_to_form};
