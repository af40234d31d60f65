use alloc::vec::Vec;

use lazyload::{
    CandidateId, EventKind, Evaluation, Host, LazyLoadError, LazyLoadOptions, Session,
    SessionState, SessionSummary,
};

use crate::{SimulatedPage, load_all_eagerly};

/// How a [`Controller`] started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Startup {
    /// A lazy-load session is running (or already settled).
    Lazy,
    /// Geometry was unavailable; everything was loaded up front.
    Eager { loaded: usize },
}

/// A framework-neutral controller that owns a host and the session running against it.
///
/// This type does not hold any UI objects beyond the host. Adapters drive it by calling:
/// - `on_scroll` / `on_resize` when UI events occur
/// - `tick(now_ms)` from a timer or frame loop (runs the debounced evaluation)
/// - `report_failure` when an assigned resource fails to load
pub struct Controller<H: Host> {
    host: H,
    session: Option<Session<H>>,
    startup: Startup,
}

impl<H: Host> Controller<H> {
    /// Starts a lazy-load session. Any error (including a missing geometry capability) is
    /// returned as-is.
    pub fn new(
        options: LazyLoadOptions,
        candidates: impl IntoIterator<Item = H::Candidate>,
        mut host: H,
    ) -> Result<Self, LazyLoadError> {
        let session = Session::new(options, candidates, &mut host)?;
        Ok(Self {
            host,
            session: Some(session),
            startup: Startup::Lazy,
        })
    }

    /// Like [`new`](Self::new), but falls back to eager loading when the host cannot report
    /// geometry. Configuration errors are still returned.
    ///
    /// The configured `on_complete` runs once in either mode. After an eager start its summary
    /// counts candidates without a placeholder as failed.
    pub fn new_or_eager(
        options: LazyLoadOptions,
        candidates: impl IntoIterator<Item = H::Candidate>,
        mut host: H,
    ) -> Result<Self, LazyLoadError>
    where
        H::Candidate: Clone,
    {
        let candidates: Vec<H::Candidate> = candidates.into_iter().collect();
        let on_complete = options.on_complete.clone();
        match Session::new(options, candidates.iter().cloned(), &mut host) {
            Ok(session) => Ok(Self {
                host,
                session: Some(session),
                startup: Startup::Lazy,
            }),
            Err(err) if err.is_capability() => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    target: "lazyload_adapter",
                    error = %err,
                    "geometry unavailable, loading all candidates eagerly"
                );
                let total = candidates.len();
                let loaded = load_all_eagerly(&mut host, candidates);
                if let Some(on_complete) = on_complete {
                    on_complete(&SessionSummary {
                        total,
                        transitioned: loaded,
                        failed: total - loaded,
                    });
                }
                Ok(Self {
                    host,
                    session: None,
                    startup: Startup::Eager { loaded },
                })
            }
            Err(err) => Err(err),
        }
    }

    pub fn startup(&self) -> Startup {
        self.startup
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn session(&self) -> Option<&Session<H>> {
        self.session.as_ref()
    }

    /// An eager controller is settled from the start.
    pub fn state(&self) -> SessionState {
        self.session
            .as_ref()
            .map_or(SessionState::Settled, Session::state)
    }

    pub fn is_settled(&self) -> bool {
        self.state() == SessionState::Settled
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.session.as_ref()?.next_deadline()
    }

    /// Call this when the UI reports a scroll. Returns `false` if nothing is listening anymore.
    pub fn on_scroll(&mut self, now_ms: u64) -> bool {
        self.on_event(EventKind::Scroll, now_ms)
    }

    /// Call this when the UI reports a resize. Returns `false` if nothing is listening anymore.
    pub fn on_resize(&mut self, now_ms: u64) -> bool {
        self.on_event(EventKind::Resize, now_ms)
    }

    pub fn on_event(&mut self, kind: EventKind, now_ms: u64) -> bool {
        match &mut self.session {
            Some(session) => session.handle_event(kind, now_ms),
            None => false,
        }
    }

    /// Advances the controller; runs the debounced evaluation when it is due.
    pub fn tick(&mut self, now_ms: u64) -> Result<Option<Evaluation>, LazyLoadError> {
        match &mut self.session {
            Some(session) => session.tick(&mut self.host, now_ms),
            None => Ok(None),
        }
    }

    /// Forces an evaluation now, bypassing the debounce window.
    pub fn evaluate(&mut self) -> Result<Evaluation, LazyLoadError> {
        match &mut self.session {
            Some(session) => session.evaluate(&mut self.host),
            None => Ok(Evaluation::default()),
        }
    }

    pub fn report_failure(&mut self, id: CandidateId) -> bool {
        self.session
            .as_mut()
            .is_some_and(|session| session.record_load_failure(id))
    }
}

impl Controller<SimulatedPage> {
    /// Scrolls the simulated document and delivers the event if a scroll listener is live.
    pub fn scroll_to(&mut self, x: f64, y: f64, now_ms: u64) -> bool {
        self.host.scroll_to(x, y);
        self.host.has_listener(EventKind::Scroll) && self.on_scroll(now_ms)
    }

    /// Resizes the simulated window and delivers the event if a resize listener is live.
    pub fn resize(&mut self, client_width: f64, client_height: f64, now_ms: u64) -> bool {
        self.host.resize(client_width, client_height);
        self.host.has_listener(EventKind::Resize) && self.on_resize(now_ms)
    }

    /// Fails every element showing `source` and reports it to the session.
    ///
    /// Returns how many candidates were recorded as failed.
    pub fn fail_resource(&mut self, source: &str) -> usize {
        let ids = self.host.fail_resource(source);
        ids.into_iter()
            .filter(|&id| self.report_failure(id))
            .count()
    }
}

impl<H: Host + core::fmt::Debug> core::fmt::Debug for Controller<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("host", &self.host)
            .field("session", &self.session)
            .field("startup", &self.startup)
            .finish()
    }
}
