// src/engine/mod.rs

//! Orchestration engine for stagehand.
//!
//! This module ties together:
//! - the scenario registry/selector
//! - the generation-flow state machine
//! - the activity revelation scheduler
//! - the session event loop that reacts to:
//!   - submitted prompts
//!   - dwell and reveal timer expiry
//!   - reset and shutdown requests
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use std::sync::Arc;

use crate::flow::{FlowSnapshot, Stage, StageEntry};
use crate::registry::{ActivityItem, Scenario};

/// Canonical run identifier used throughout the engine.
pub type RunId = u64;

/// The two independently scheduled timers of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Stage dwell timer: fires to advance the flow machine.
    Stage,
    /// Reveal tick timer: fires to show the next activity item.
    Reveal,
}

/// Events flowing into the session from the embedding UI and the timer
/// backend.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The user submitted free text; supersedes any active run.
    PromptSubmitted { prompt: String },
    /// A delayed task armed for `run_id` expired.
    TimerFired { kind: TimerKind, run_id: RunId },
    /// Abandon the current run and return to idle (e.g. UI teardown).
    ResetRequested,
    /// Stop the session loop entirely.
    ShutdownRequested,
}

/// Notices emitted toward observers.
///
/// `StageChanged` fires the instant a stage becomes current (including the
/// first stage right after a start); `RunCompleted` fires exactly once per
/// run, after the terminal stage's own `StageChanged`.
#[derive(Debug, Clone)]
pub enum SessionNotice {
    StageChanged(StageEntry),
    RunCompleted { run_id: RunId },
}

/// Options that influence how the session behaves.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// If true, the session loop exits after a run completes. Useful for
    /// embedders (and tests) that drive exactly one generation.
    pub exit_when_complete: bool,
}

/// Read-only snapshot of the whole session, published after every step.
///
/// Observers only ever see a consistent pairing: the flow never reports
/// inactive while activity items are still partially revealed.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub flow: FlowSnapshot,
    /// Scenario driving the current (or most recent) run.
    pub scenario: Option<Arc<Scenario>>,
    /// How many activity items are currently revealed.
    pub visible_count: usize,
}

impl SessionSnapshot {
    /// The revealed prefix of the scenario's activity stream.
    pub fn visible_items(&self) -> &[ActivityItem] {
        match self.scenario {
            Some(ref scenario) => &scenario.activity[..self.visible_count],
            None => &[],
        }
    }

    /// The finalized transcript, available once the run has completed.
    pub fn transcript(&self) -> Option<&str> {
        if self.flow.stage == Stage::Complete {
            self.scenario.as_deref().map(|s| s.transcript.as_str())
        } else {
            None
        }
    }

    /// The fabricated "generated code", available once the run has completed.
    pub fn source_content(&self) -> Option<&str> {
        if self.flow.stage == Stage::Complete {
            self.scenario.as_deref().map(|s| s.source_content.as_str())
        } else {
            None
        }
    }
}

pub mod core;
pub mod event_handlers;
pub mod runtime;

pub use core::CoreSession;
pub use event_handlers::{CoreCommand, CoreStep};
pub use runtime::Session;
