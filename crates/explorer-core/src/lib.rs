#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: key events, input throttling, listener registration, and config.
//!
//! # Role in explorer
//! `explorer-core` is the input layer. It owns the normalized key event
//! types the tree controller consumes, the throttle that keeps held keys
//! from flooding it, and the scoped listener registry hosts dispatch into.
//!
//! # Primary responsibilities
//! - **KeyEvent / TargetedKeyEvent**: canonical key input plus host context.
//! - **Throttle**: at most one handled event per time window.
//! - **KeyListeners**: RAII subscribe/unsubscribe for key handlers.
//! - **NavigationConfig**: env-driven timing and enablement.

pub mod config;
pub mod event;
pub mod listeners;
pub mod logging;
pub mod throttle;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
