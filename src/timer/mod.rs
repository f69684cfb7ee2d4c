// src/timer/mod.rs

//! Timer scheduling layer.
//!
//! The session core never sleeps; it emits arm/cancel commands and consumes
//! `TimerFired` events. This module provides the backend those commands are
//! executed against.
//!
//! - [`backend`] provides the `TimerBackend` trait and the concrete
//!   `TokioTimerBackend` used in production, which tests can replace with a
//!   fake implementation.

pub mod backend;

pub use backend::{TimerBackend, TimerRequest, TokioTimerBackend};
