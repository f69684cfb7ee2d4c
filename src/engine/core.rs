// src/engine/core.rs

//! Pure core session state machine.
//!
//! This module contains a synchronous, deterministic "core session" that
//! consumes [`SessionEvent`]s and produces:
//! - an updated core state
//! - a list of "commands" describing what the IO shell should do next
//!
//! The async/IO-heavy shell (`engine::runtime::Session`) is responsible for:
//! - reading events from channels
//! - arming and cancelling timers through a `TimerBackend`
//! - publishing notices and snapshots
//!
//! The core is intended to be extensively unit tested without any Tokio,
//! channels, or real time.

use std::sync::Arc;

use crate::engine::event_handlers::{
    handle_prompt_submitted, handle_reset, handle_timer_fired, CoreStep,
};
use crate::engine::{SessionEvent, SessionOptions, SessionSnapshot};
use crate::flow::FlowMachine;
use crate::registry::{Scenario, ScenarioRegistry};
use crate::reveal::RevealScheduler;

/// Pure core session state.
///
/// This owns:
/// - the scenario registry (injected, shared)
/// - the flow machine
/// - the reveal scheduler
/// - the scenario of the current (or most recent) run
///
/// It has **no** channels, no Tokio types, and does not perform any IO.
#[derive(Debug)]
pub struct CoreSession {
    registry: Arc<ScenarioRegistry>,
    machine: FlowMachine,
    reveal: RevealScheduler,
    scenario: Option<Arc<Scenario>>,
    options: SessionOptions,
}

impl CoreSession {
    pub fn new(registry: Arc<ScenarioRegistry>, options: SessionOptions) -> Self {
        Self {
            registry,
            machine: FlowMachine::new(),
            reveal: RevealScheduler::new(),
            scenario: None,
            options,
        }
    }

    /// Handle a single session event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: SessionEvent) -> CoreStep {
        match event {
            SessionEvent::PromptSubmitted { prompt } => handle_prompt_submitted(
                &self.registry,
                &mut self.machine,
                &mut self.reveal,
                &mut self.scenario,
                &self.options,
                &prompt,
            ),
            SessionEvent::TimerFired { kind, run_id } => handle_timer_fired(
                &mut self.machine,
                &mut self.reveal,
                &self.options,
                kind,
                run_id,
            ),
            SessionEvent::ResetRequested => {
                handle_reset(&mut self.machine, &mut self.reveal, &mut self.scenario)
            }
            SessionEvent::ShutdownRequested => CoreStep {
                commands: Vec::new(),
                keep_running: false,
            },
        }
    }

    /// Consistent snapshot of flow state, scenario, and reveal progress.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            flow: self.machine.snapshot(),
            scenario: self.scenario.clone(),
            visible_count: self.reveal.visible_count(),
        }
    }

    /// Expose whether a run is in flight (for tests).
    pub fn is_active(&self) -> bool {
        self.machine.is_active()
    }

    /// Expose the current run id (for tests).
    pub fn current_run_id(&self) -> Option<u64> {
        self.machine.current_run_id()
    }
}
