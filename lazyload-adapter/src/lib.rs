//! Adapter utilities for the `lazyload` crate.
//!
//! The `lazyload` crate is UI-agnostic and focuses on the core decisions and state. This crate
//! provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - A simulated page host following the `lazyload-img` / `data-src` markup convention
//! - An eager-load fallback for hosts without geometry support
//! - A controller that owns host + session and is driven by UI events and a clock
//!
//! This crate is intentionally framework-agnostic (no DOM/wasm bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod eager;
mod page;

#[cfg(test)]
mod tests;

pub use controller::{Controller, Startup};
pub use eager::load_all_eagerly;
pub use page::{
    CANDIDATE_CLASS, DEFERRED_SOURCE_ATTR, DocumentRect, ElementId, ListenerId, PageElement,
    SimulatedPage,
};
