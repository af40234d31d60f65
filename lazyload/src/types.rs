use alloc::vec::Vec;

/// A candidate's bounding rectangle, relative to the viewport's top-left corner.
///
/// Mirrors what a DOM `getBoundingClientRect()` reports: `top`/`left` go negative once the
/// element has scrolled past the viewport origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub height: f64,
    pub width: f64,
}

impl BoundingBox {
    pub fn new(top: f64, left: f64, height: f64, width: f64) -> Self {
        Self {
            top,
            left,
            height,
            width,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// The document's visible client area (`clientWidth` x `clientHeight`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClientSize {
    pub width: f64,
    pub height: f64,
}

impl ClientSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Extra space around the viewport that still counts as "in view".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Margins {
    pub fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Identity of a candidate: its index in the snapshot handed to the session at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateId(pub usize);

impl CandidateId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl core::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CandidateState {
    Pending,
    Transitioned,
    Failed,
}

impl CandidateState {
    /// Settled candidates are never evaluated again.
    pub fn is_settled(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionState {
    Init,
    Active,
    Settled,
}

/// The host notifications that re-trigger an evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    Scroll,
    Resize,
}

impl EventKind {
    pub const ALL: [EventKind; 2] = [EventKind::Scroll, EventKind::Resize];

    pub fn name(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Resize => "resize",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureReason {
    /// The host reported that the assigned resource failed to load.
    LoadError,
    /// The candidate carried no placeholder source to assign.
    MissingSource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FailedLoad {
    pub id: CandidateId,
    pub reason: FailureReason,
}

/// Outcome of a single evaluation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// Candidates whose source was assigned, in pending-set order.
    pub transitioned: Vec<CandidateId>,
    /// In-view candidates that settled as failed without a source assignment.
    pub failed: Vec<CandidateId>,
    /// Pending candidates left after this pass.
    pub remaining: usize,
}

impl Evaluation {
    pub fn is_empty(&self) -> bool {
        self.transitioned.is_empty() && self.failed.is_empty()
    }

    pub fn settled_count(&self) -> usize {
        self.transitioned.len() + self.failed.len()
    }
}

/// Delivered to completion handlers once no pending candidates remain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSummary {
    pub total: usize,
    pub transitioned: usize,
    pub failed: usize,
}
