use alloc::boxed::Box;
use alloc::vec::Vec;

type Handler<T> = Box<dyn FnOnce(&T) + Send>;

/// A one-shot notification with any number of handlers.
///
/// `fire` runs the handlers in registration order and then clears them; later `fire` calls
/// are no-ops. A handler registered after the signal fired runs immediately with the stored
/// payload, so every handler observes completion exactly once.
pub struct CompletionSignal<T> {
    handlers: Vec<Handler<T>>,
    payload: Option<T>,
}

impl<T> Default for CompletionSignal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CompletionSignal<T> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            payload: None,
        }
    }

    pub fn await_once(&mut self, handler: impl FnOnce(&T) + Send + 'static) {
        match &self.payload {
            Some(payload) => handler(payload),
            None => self.handlers.push(Box::new(handler)),
        }
    }

    /// Returns `true` only for the call that actually fired.
    pub fn fire(&mut self, payload: T) -> bool {
        if self.payload.is_some() {
            return false;
        }
        let payload = self.payload.insert(payload);
        for handler in core::mem::take(&mut self.handlers) {
            handler(&*payload);
        }
        true
    }

    pub fn is_fired(&self) -> bool {
        self.payload.is_some()
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for CompletionSignal<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CompletionSignal")
            .field("handlers", &self.handlers.len())
            .field("payload", &self.payload)
            .finish()
    }
}
