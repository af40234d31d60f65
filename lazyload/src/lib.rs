//! A headless lazy-loading engine for off-screen images.
//!
//! For adapter-level utilities (a simulated page, eager fallback, an event-driven controller),
//! see the `lazyload-adapter` crate.
//!
//! A [`Session`] takes a snapshot of candidate elements, loads the ones already in view, and
//! then re-evaluates on debounced scroll/resize notifications until nothing is pending. At that
//! point it releases its subscriptions and fires a one-shot completion signal.
//!
//! It is UI-agnostic. A DOM/TUI/GUI layer is expected to provide (see [`Document`] and
//! [`EventSource`]):
//! - client size and per-candidate bounding boxes
//! - read/clear of the placeholder source and assignment of the real one
//! - scroll/resize subscriptions, plus a clock for the debounce window
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod coordinator;
mod debounce;
mod error;
mod host;
mod options;
mod session;
mod signal;
mod types;
mod viewport;


pub use coordinator::LoadCoordinator;
pub use debounce::{ScheduledEvaluation, ScrollDebouncer};
pub use error::{Axis, ConfigError, LazyLoadError};
pub use host::{Document, EventSource, Host};
pub use options::{DEFAULT_DELAY_MS, LazyLoadOptions, OnCompleteCallback};
pub use session::{Session, create_session};
pub use signal::CompletionSignal;
pub use types::{
    BoundingBox, CandidateId, CandidateState, ClientSize, EventKind, Evaluation, FailedLoad,
    FailureReason, Margins, SessionState, SessionSummary,
};
pub use viewport::{Viewport, is_in_viewport};
