use alloc::sync::Arc;

use crate::error::{Axis, ConfigError};
use crate::{Margins, SessionSummary};

/// A callback fired once, when the session settles.
///
/// By the time it runs the scroll/resize subscriptions have already been released.
pub type OnCompleteCallback = Arc<dyn Fn(&SessionSummary) + Send + Sync>;

pub const DEFAULT_DELAY_MS: u64 = 100;

/// Configuration for [`crate::Session`].
///
/// Cheap to clone: the completion callback lives in an `Arc`. A session copies its options at
/// construction and never changes them afterwards.
pub struct LazyLoadOptions {
    /// Debounce window for scroll/resize bursts.
    pub delay_ms: u64,
    /// Horizontal viewport margin in pixels.
    pub margin_h: f64,
    /// Vertical viewport margin in pixels.
    pub margin_v: f64,
    pub on_complete: Option<OnCompleteCallback>,
}

impl Clone for LazyLoadOptions {
    fn clone(&self) -> Self {
        Self {
            delay_ms: self.delay_ms,
            margin_h: self.margin_h,
            margin_v: self.margin_v,
            on_complete: self.on_complete.clone(),
        }
    }
}

impl Default for LazyLoadOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl LazyLoadOptions {
    pub fn new() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            margin_h: 0.0,
            margin_v: 0.0,
            on_complete: None,
        }
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_margins(mut self, margin_h: f64, margin_v: f64) -> Self {
        self.margin_h = margin_h;
        self.margin_v = margin_v;
        self
    }

    pub fn with_margin_h(mut self, margin_h: f64) -> Self {
        self.margin_h = margin_h;
        self
    }

    pub fn with_margin_v(mut self, margin_v: f64) -> Self {
        self.margin_v = margin_v;
        self
    }

    pub fn with_on_complete(
        mut self,
        on_complete: Option<impl Fn(&SessionSummary) + Send + Sync + 'static>,
    ) -> Self {
        self.on_complete = on_complete.map(|f| Arc::new(f) as _);
        self
    }

    pub fn margins(&self) -> Margins {
        Margins::new(self.margin_h, self.margin_v)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_margin(Axis::Horizontal, self.margin_h)?;
        check_margin(Axis::Vertical, self.margin_v)
    }
}

fn check_margin(axis: Axis, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFiniteMargin { axis });
    }
    if value < 0.0 {
        return Err(ConfigError::NegativeMargin { axis, value });
    }
    Ok(())
}

impl core::fmt::Debug for LazyLoadOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LazyLoadOptions")
            .field("delay_ms", &self.delay_ms)
            .field("margin_h", &self.margin_h)
            .field("margin_v", &self.margin_v)
            .field("on_complete", &self.on_complete.as_ref().map(|_| ".."))
            .finish()
    }
}
