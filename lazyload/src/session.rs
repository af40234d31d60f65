use alloc::vec::Vec;

use crate::coordinator::LoadCoordinator;
use crate::debounce::ScrollDebouncer;
use crate::host::Host;
use crate::signal::CompletionSignal;
use crate::{
    CandidateId, CandidateState, EventKind, Evaluation, FailedLoad, LazyLoadError,
    LazyLoadOptions, SessionState, SessionSummary,
};

/// One lazy-load run, from construction until every candidate has settled.
///
/// The session holds no UI objects. It owns the candidate snapshot, the debouncer, the
/// completion signal and the host subscription handles; the host itself is passed into each
/// call that needs it. Adapters drive it by calling:
/// - `handle_event` when the page scrolls or resizes
/// - `tick(now_ms)` from a timer/frame loop to run the debounced evaluation
/// - `record_load_failure` when an assigned resource fails
///
/// Once settled (`SessionState::Settled`) nothing is evaluated again.
pub struct Session<H: Host> {
    options: LazyLoadOptions,
    coordinator: LoadCoordinator<H::Candidate>,
    debouncer: ScrollDebouncer,
    completion: CompletionSignal<SessionSummary>,
    subscriptions: Vec<H::Subscription>,
    state: SessionState,
}

/// Creates a session over `candidates` and runs the first evaluation immediately.
///
/// Scroll and resize subscriptions are only taken if candidates are still pending after that
/// first pass; a session that settles right away never subscribes at all.
///
/// Fails on invalid options, or with [`LazyLoadError::Capability`] when the host cannot report
/// geometry.
pub fn create_session<H: Host>(
    options: LazyLoadOptions,
    candidates: impl IntoIterator<Item = H::Candidate>,
    host: &mut H,
) -> Result<Session<H>, LazyLoadError> {
    Session::new(options, candidates, host)
}

impl<H: Host> Session<H> {
    pub fn new(
        options: LazyLoadOptions,
        candidates: impl IntoIterator<Item = H::Candidate>,
        host: &mut H,
    ) -> Result<Self, LazyLoadError> {
        options.validate()?;

        let coordinator = LoadCoordinator::new(candidates);
        let mut completion = CompletionSignal::<SessionSummary>::new();
        if let Some(on_complete) = options.on_complete.clone() {
            completion.await_once(move |summary| on_complete(summary));
        }
        ldebug!(
            candidates = coordinator.len(),
            delay_ms = options.delay_ms,
            margin_h = options.margin_h,
            margin_v = options.margin_v,
            "Session::new"
        );

        let mut session = Self {
            debouncer: ScrollDebouncer::new(options.delay_ms),
            options,
            coordinator,
            completion,
            subscriptions: Vec::new(),
            state: SessionState::Init,
        };

        if session.coordinator.is_empty() {
            session.settle(host);
            return Ok(session);
        }

        session.run_evaluation(host)?;
        if session.state == SessionState::Init {
            session.subscriptions = EventKind::ALL
                .iter()
                .map(|&kind| host.subscribe(kind))
                .collect();
            session.state = SessionState::Active;
        }
        Ok(session)
    }

    pub fn options(&self) -> &LazyLoadOptions {
        &self.options
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_settled(&self) -> bool {
        self.state == SessionState::Settled
    }

    pub fn pending(&self) -> &[CandidateId] {
        self.coordinator.pending()
    }

    pub fn failed(&self) -> &[FailedLoad] {
        self.coordinator.failed()
    }

    pub fn candidate_state(&self, id: CandidateId) -> Option<CandidateState> {
        self.coordinator.state(id)
    }

    pub fn summary(&self) -> SessionSummary {
        self.coordinator.summary()
    }

    /// Number of host subscriptions currently held (0 or 2).
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// When the adapter should next call [`tick`](Self::tick), if an evaluation is scheduled.
    pub fn next_deadline(&self) -> Option<u64> {
        self.debouncer.next_deadline()
    }

    /// Feeds a scroll/resize notification into the debouncer.
    ///
    /// Returns `false` when the session has settled and the signal was dropped.
    pub fn handle_event(&mut self, kind: EventKind, now_ms: u64) -> bool {
        #[cfg(not(feature = "tracing"))]
        let _ = kind;
        if self.is_settled() {
            ltrace!(event = kind.name(), "Session: signal after settle ignored");
            return false;
        }
        ltrace!(event = kind.name(), now_ms, "Session::handle_event");
        self.debouncer.signal(now_ms)
    }

    /// Runs the debounced evaluation if it is due.
    pub fn tick(
        &mut self,
        host: &mut H,
        now_ms: u64,
    ) -> Result<Option<Evaluation>, LazyLoadError> {
        if self.is_settled() || !self.debouncer.poll(now_ms) {
            return Ok(None);
        }
        self.run_evaluation(host).map(Some)
    }

    /// Evaluates right away, bypassing the debouncer. A settled session returns an empty result.
    pub fn evaluate(&mut self, host: &mut H) -> Result<Evaluation, LazyLoadError> {
        if self.is_settled() {
            return Ok(Evaluation::default());
        }
        self.run_evaluation(host)
    }

    /// Records that the resource assigned to `id` failed to load.
    ///
    /// The candidate moves to the failed set; it stays settled and never blocks completion.
    pub fn record_load_failure(&mut self, id: CandidateId) -> bool {
        self.coordinator.record_failure(id)
    }

    /// Registers an extra completion handler. Runs immediately if the session already settled.
    pub fn on_settled(&mut self, handler: impl FnOnce(&SessionSummary) + Send + 'static) {
        self.completion.await_once(handler);
    }

    fn run_evaluation(&mut self, host: &mut H) -> Result<Evaluation, LazyLoadError> {
        let evaluation = self.coordinator.evaluate(host, self.options.margins())?;
        ldebug!(
            remaining = evaluation.remaining,
            transitioned = evaluation.transitioned.len(),
            failed = evaluation.failed.len(),
            "Session: evaluated"
        );
        if self.coordinator.is_settled() {
            self.settle(host);
        }
        Ok(evaluation)
    }

    fn settle(&mut self, host: &mut H) {
        if self.state == SessionState::Settled {
            return;
        }
        self.debouncer.close();
        for subscription in self.subscriptions.drain(..) {
            host.unsubscribe(subscription);
        }
        self.state = SessionState::Settled;
        let summary = self.coordinator.summary();
        ldebug!(
            total = summary.total,
            transitioned = summary.transitioned,
            failed = summary.failed,
            "Session: settled"
        );
        self.completion.fire(summary);
    }
}

impl<H: Host> core::fmt::Debug for Session<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("options", &self.options)
            .field("state", &self.state)
            .field("pending", &self.coordinator.pending())
            .field("failed", &self.coordinator.failed())
            .field("subscriptions", &self.subscriptions.len())
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}
