// src/flow/machine.rs

//! The generation-flow state machine.
//!
//! One machine drives at most one active run at a time. Each `start` bumps a
//! monotonically increasing run id; dwell timers echo the id back through
//! [`FlowMachine::advance`], and an id mismatch means the timer belongs to a
//! superseded run and is ignored. That guard, together with cancel-by-handle
//! in the timer backend, is what makes re-entrant starts safe.

use tracing::{debug, warn};

use crate::flow::stage::{self, Stage};
use crate::flow::step::{FlowStep, StageEntry};
use crate::types::FlowMode;

/// Options for starting a new run.
#[derive(Debug, Clone, Default)]
pub struct StartOptions {
    /// Workflow name used to parameterise the THINKING message.
    pub mentioned_workflow: Option<String>,
    /// Stage sequence to run; `None` means `happy_path`.
    pub mode: Option<FlowMode>,
}

/// Read-only snapshot of the machine's run state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowSnapshot {
    pub stage: Stage,
    pub message: String,
    pub progress: u8,
    pub current_file: Option<&'static str>,
    /// True while the stage is neither idle nor complete.
    pub is_active: bool,
    /// Position within the active sequence; `None` before the first start.
    pub stage_index: Option<usize>,
}

/// Flow machine holding the state of the current (or most recent) run.
///
/// It is responsible for:
/// - walking the stage sequence of the selected flow mode
/// - resolving per-stage messages, progress, and file labels
/// - rejecting stale advances from superseded runs
/// - reporting which dwell timer to arm after each transition
#[derive(Debug, Default)]
pub struct FlowMachine {
    /// Monotonically increasing run ID.
    run_counter: u64,
    /// Currently active run ID, or `None` before the first start / after reset.
    current_run_id: Option<u64>,
    mode: FlowMode,
    stage_index: Option<usize>,
    mentioned_workflow: Option<String>,
}

impl FlowMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new run, superseding any active one.
    ///
    /// The previous run's pending timers become stale the moment the run
    /// counter advances; the caller is still responsible for cancelling them
    /// so they don't fire at all.
    pub fn start(&mut self, opts: StartOptions) -> FlowStep {
        self.run_counter += 1;
        self.current_run_id = Some(self.run_counter);
        self.mode = opts.mode.unwrap_or_default();
        self.mentioned_workflow = opts.mentioned_workflow;
        self.stage_index = Some(0);

        debug!(
            run_id = self.run_counter,
            mode = self.mode.as_str(),
            workflow = ?self.mentioned_workflow,
            "flow: starting new generation run"
        );

        self.enter_current()
    }

    /// Advance to the next sequence position, on behalf of the dwell timer
    /// armed for `run_id`.
    ///
    /// A mismatched id means the timer outlived its run; the machine ignores
    /// it rather than corrupting the newer run's state.
    pub fn advance(&mut self, run_id: u64) -> FlowStep {
        if self.current_run_id != Some(run_id) {
            warn!(
                stale_run_id = run_id,
                current_run_id = ?self.current_run_id,
                "flow: ignoring stale advance from superseded run"
            );
            return FlowStep::noop();
        }

        let sequence = stage::sequence(self.mode);
        let Some(index) = self.stage_index else {
            warn!(run_id, "flow: advance with no current stage; ignoring");
            return FlowStep::noop();
        };

        if index + 1 >= sequence.len() {
            // Terminal position never arms a timer, so this is unreachable in
            // practice; guard anyway rather than index out of bounds.
            warn!(run_id, index, "flow: advance past end of sequence; ignoring");
            return FlowStep::noop();
        }

        self.stage_index = Some(index + 1);
        self.enter_current()
    }

    /// Forcibly return to idle: clear the run, the captured workflow, and
    /// the sequence position. The caller must also cancel pending timers.
    pub fn reset(&mut self) {
        debug!(run_id = ?self.current_run_id, "flow: reset to idle");
        self.current_run_id = None;
        self.mode = FlowMode::default();
        self.stage_index = None;
        self.mentioned_workflow = None;
    }

    pub fn current_run_id(&self) -> Option<u64> {
        self.current_run_id
    }

    /// True while the current stage is neither idle nor complete.
    pub fn is_active(&self) -> bool {
        self.current_stage().is_active()
    }

    fn current_stage(&self) -> Stage {
        match (self.current_run_id, self.stage_index) {
            (Some(_), Some(index)) => stage::sequence(self.mode)[index].stage,
            _ => Stage::Idle,
        }
    }

    /// Enter the stage at the current sequence position and describe what
    /// should happen next.
    fn enter_current(&self) -> FlowStep {
        let (Some(run_id), Some(index)) = (self.current_run_id, self.stage_index) else {
            return FlowStep::noop();
        };

        let sequence = stage::sequence(self.mode);
        let current = sequence[index];
        let cfg = stage::config(current.stage);
        let message =
            stage::resolve_message(current.stage, self.mentioned_workflow.as_deref());

        debug!(
            run_id,
            stage = %current.stage,
            index,
            progress = current.progress,
            "flow: entering stage"
        );

        let entered = Some(StageEntry {
            run_id,
            stage: current.stage,
            message,
            progress: current.progress,
            current_file: cfg.current_file,
        });

        if current.stage == Stage::Complete {
            // Terminal: no further timer, run is finished and inert until the
            // next start.
            return FlowStep {
                entered,
                completed: true,
                arm_after: None,
            };
        }

        let arm_after = if !cfg.duration.is_zero() && index + 1 < sequence.len() {
            Some(cfg.duration)
        } else {
            None
        };

        FlowStep {
            entered,
            completed: false,
            arm_after,
        }
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        let stage = self.current_stage();

        if stage == Stage::Idle {
            return FlowSnapshot::default();
        }

        // Stage is non-idle, so both ids are present.
        let index = self.stage_index.unwrap_or(0);
        let current = stage::sequence(self.mode)[index];
        let cfg = stage::config(stage);

        FlowSnapshot {
            stage,
            message: stage::resolve_message(stage, self.mentioned_workflow.as_deref()),
            progress: current.progress,
            current_file: cfg.current_file,
            is_active: stage.is_active(),
            stage_index: self.stage_index,
        }
    }
}
