use alloc::string::String;

use crate::{BoundingBox, CandidateId, ClientSize, EventKind};

/// The page the session runs against.
///
/// Enumerating candidates and the placeholder-attribute convention belong to the
/// implementor; the session only reads geometry and moves sources around.
pub trait Document {
    /// An opaque handle to a displayable element.
    type Candidate;

    /// Current client area of the document.
    fn client_size(&self) -> ClientSize;

    /// Bounding box relative to the viewport, or `None` when the host has no way to report
    /// element geometry.
    fn bounding_box(&self, candidate: &Self::Candidate) -> Option<BoundingBox>;

    /// The placeholder (deferred) source, if the candidate still carries one.
    fn deferred_source(&self, candidate: &Self::Candidate) -> Option<String>;

    fn clear_deferred_source(&mut self, candidate: &Self::Candidate);

    fn assign_source(&mut self, candidate: &Self::Candidate, source: &str);

    /// Attaches a load-failure observer.
    ///
    /// Called right before the source is assigned. When the resource later fails, the host
    /// reports it back with [`crate::Session::record_load_failure`] using `id`.
    fn observe_failure(&mut self, candidate: &Self::Candidate, id: CandidateId) {
        let _ = (candidate, id);
    }
}

/// Scroll/resize notification stream of the document.
pub trait EventSource {
    type Subscription;

    fn subscribe(&mut self, event: EventKind) -> Self::Subscription;

    fn unsubscribe(&mut self, subscription: Self::Subscription);
}

/// Everything a [`crate::Session`] needs from its environment.
pub trait Host: Document + EventSource {}

impl<T: Document + EventSource> Host for T {}
