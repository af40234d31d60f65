use alloc::vec::Vec;

use crate::host::Document;
use crate::viewport::is_in_viewport;
use crate::{
    CandidateId, CandidateState, Evaluation, FailedLoad, FailureReason, LazyLoadError, Margins,
    SessionSummary,
};

/// Drives the per-candidate load transition and tracks what is still pending.
///
/// The pending set keeps construction order and only ever shrinks. A candidate's handle is
/// dropped as soon as it settles; only its id and state are kept for diagnostics.
#[derive(Clone, Debug)]
pub struct LoadCoordinator<C> {
    slots: Vec<Option<C>>,
    states: Vec<CandidateState>,
    pending: Vec<CandidateId>,
    failed: Vec<FailedLoad>,
    transitioned: usize,
}

impl<C> LoadCoordinator<C> {
    pub fn new(candidates: impl IntoIterator<Item = C>) -> Self {
        let slots: Vec<Option<C>> = candidates.into_iter().map(Some).collect();
        let count = slots.len();
        Self {
            slots,
            states: alloc::vec![CandidateState::Pending; count],
            pending: (0..count).map(CandidateId).collect(),
            failed: Vec::new(),
            transitioned: 0,
        }
    }

    /// Total number of candidates in the construction snapshot.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn pending(&self) -> &[CandidateId] {
        &self.pending
    }

    pub fn failed(&self) -> &[FailedLoad] {
        &self.failed
    }

    pub fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn state(&self, id: CandidateId) -> Option<CandidateState> {
        self.states.get(id.0).copied()
    }

    /// The candidate handle, while it is still pending.
    pub fn candidate(&self, id: CandidateId) -> Option<&C> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            total: self.len(),
            transitioned: self.transitioned,
            failed: self.failed.len(),
        }
    }

    /// Loads every pending candidate that is currently in view.
    ///
    /// Geometry is read for all pending candidates before anything changes, so a capability
    /// error leaves the coordinator untouched. Transitions then happen in pending-set order.
    /// Calling this again without a geometry change is a no-op.
    pub fn evaluate<D>(
        &mut self,
        doc: &mut D,
        margins: Margins,
    ) -> Result<Evaluation, LazyLoadError>
    where
        D: Document<Candidate = C> + ?Sized,
    {
        let mut in_view = Vec::new();
        for &id in &self.pending {
            let Some(candidate) = self.candidate(id) else {
                continue;
            };
            if is_in_viewport(&*doc, candidate, id, margins)? {
                in_view.push(id);
            }
        }

        let mut out = Evaluation::default();
        if in_view.is_empty() {
            out.remaining = self.pending.len();
            return Ok(out);
        }

        for &id in &in_view {
            let Some(candidate) = self.slots[id.0].take() else {
                continue;
            };
            match doc.deferred_source(&candidate) {
                Some(source) => {
                    doc.observe_failure(&candidate, id);
                    doc.assign_source(&candidate, &source);
                    doc.clear_deferred_source(&candidate);
                    self.states[id.0] = CandidateState::Transitioned;
                    self.transitioned += 1;
                    ltrace!(id = id.0, "LoadCoordinator: transitioned");
                    out.transitioned.push(id);
                }
                None => {
                    lwarn!(id = id.0, "LoadCoordinator: candidate has no deferred source");
                    self.states[id.0] = CandidateState::Failed;
                    self.failed.push(FailedLoad {
                        id,
                        reason: FailureReason::MissingSource,
                    });
                    out.failed.push(id);
                }
            }
        }

        // Order-preserving removal of everything that settled in this pass.
        let states = &self.states;
        self.pending.retain(|id| !states[id.0].is_settled());

        out.remaining = self.pending.len();
        Ok(out)
    }

    /// Records that a transitioned candidate's resource failed to load.
    ///
    /// Returns `false` (and changes nothing) for unknown, still-pending or already-failed ids.
    pub fn record_failure(&mut self, id: CandidateId) -> bool {
        match self.states.get(id.0) {
            Some(CandidateState::Transitioned) => {}
            _ => {
                lwarn!(
                    id = id.0,
                    "LoadCoordinator: ignoring failure for non-transitioned candidate"
                );
                return false;
            }
        }
        self.states[id.0] = CandidateState::Failed;
        self.transitioned -= 1;
        self.failed.push(FailedLoad {
            id,
            reason: FailureReason::LoadError,
        });
        ldebug!(id = id.0, "LoadCoordinator: resource failed to load");
        true
    }
}
