// src/flow/mod.rs

//! Generation-flow state machine.
//!
//! - [`stage`] defines the stage enum, per-stage display configuration, and
//!   the fixed per-mode sequences.
//! - [`machine`] contains the run state machine that walks a sequence and
//!   guards against stale timers from superseded runs.
//! - [`step`] defines the structured result of a machine step.

pub mod machine;
pub mod stage;
pub mod step;

pub use machine::{FlowMachine, FlowSnapshot, StartOptions};
pub use stage::{config, resolve_message, sequence, Stage, StageConfig, StageStep};
pub use step::{FlowStep, StageEntry};
