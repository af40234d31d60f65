/// A trailing-edge evaluation scheduled by [`ScrollDebouncer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledEvaluation {
    pub due_ms: u64,
}

impl ScheduledEvaluation {
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.due_ms
    }
}

/// Collapses bursts of scroll/resize signals into one evaluation.
///
/// The debouncer owns no timer. The adapter feeds it signals and clock ticks:
/// - `signal(now_ms)` on every scroll/resize notification
/// - `poll(now_ms)` from its timer/frame loop; `true` means "evaluate now"
///
/// Each signal cancels the pending evaluation and schedules a new one `delay_ms` later, so a
/// burst ends in exactly one evaluation once the signals stop. After [`close`](Self::close)
/// nothing fires again.
#[derive(Clone, Debug)]
pub struct ScrollDebouncer {
    delay_ms: u64,
    scheduled: Option<ScheduledEvaluation>,
    closed: bool,
}

impl ScrollDebouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            scheduled: None,
            closed: false,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Records a trigger signal. Returns `false` if the debouncer is closed.
    pub fn signal(&mut self, now_ms: u64) -> bool {
        if self.closed {
            return false;
        }
        let due_ms = now_ms.saturating_add(self.delay_ms);
        if self.scheduled.replace(ScheduledEvaluation { due_ms }).is_some() {
            ltrace!(due_ms, "ScrollDebouncer: rescheduled pending evaluation");
        }
        true
    }

    /// Drops the pending evaluation, if any.
    pub fn cancel(&mut self) -> Option<ScheduledEvaluation> {
        self.scheduled.take()
    }

    /// Returns `true` exactly once per burst, when the scheduled evaluation is due.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if self.closed {
            return false;
        }
        match self.scheduled {
            Some(s) if s.is_due(now_ms) => {
                self.scheduled = None;
                true
            }
            _ => false,
        }
    }

    /// Cancels any pending evaluation and ignores every later signal.
    pub fn close(&mut self) {
        self.scheduled = None;
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn scheduled(&self) -> Option<ScheduledEvaluation> {
        self.scheduled
    }

    /// When the adapter should next call `poll`.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduled.map(|s| s.due_ms)
    }
}
