// src/flow/step.rs

//! Step-by-step result types for the flow machine.

use std::time::Duration;

use crate::flow::stage::Stage;

/// Everything an observer needs to know about a newly entered stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageEntry {
    /// Run this entry belongs to; timers echo it back so stale callbacks can
    /// be discarded.
    pub run_id: u64,
    pub stage: Stage,
    pub message: String,
    pub progress: u8,
    pub current_file: Option<&'static str>,
}

/// Structured result of a single flow-machine step.
///
/// This is the machine's whole output contract: which stage (if any) became
/// current, whether the run just completed, and which dwell timer (if any)
/// should be armed next. Useful for tests that manually step a run and make
/// assertions about what changed.
#[derive(Debug, Clone, Default)]
pub struct FlowStep {
    /// Stage that became current in this step, if any.
    pub entered: Option<StageEntry>,
    /// Whether this step reached the terminal `Complete` stage.
    pub completed: bool,
    /// Dwell to wait before advancing, if the machine expects to advance.
    pub arm_after: Option<Duration>,
}

impl FlowStep {
    /// A step that changed nothing (e.g. a stale advance was ignored).
    pub fn noop() -> Self {
        Self::default()
    }
}
