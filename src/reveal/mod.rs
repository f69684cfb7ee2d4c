// src/reveal/mod.rs

//! Activity revelation scheduling.
//!
//! - [`scheduler`] holds the visible-count state machine for one run.
//! - [`pacing`] defines the per-item-type reveal delays.

pub mod pacing;
pub mod scheduler;

pub use pacing::{reveal_delay, FILE_CARD_REVEAL_INTERVAL, TEXT_REVEAL_INTERVAL};
pub use scheduler::RevealScheduler;
