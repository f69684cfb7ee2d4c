// src/engine/event_handlers.rs

//! Event handling logic for the core session.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::engine::{RunId, SessionNotice, SessionOptions, TimerKind};
use crate::flow::{FlowMachine, FlowStep, Stage, StartOptions};
use crate::registry::{extract_mentions, Scenario, ScenarioRegistry};
use crate::reveal::RevealScheduler;
use crate::timer::TimerRequest;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone)]
pub enum CoreCommand {
    /// Arm a delayed callback; replaces any pending timer of the same kind.
    ArmTimer(TimerRequest),
    /// Cancel the pending timer of this kind, if any.
    CancelTimer(TimerKind),
    /// Publish a notice to observers.
    Notify(SessionNotice),
    /// Request that the session loop exits (`exit_when_complete`).
    RequestExit,
}

/// Decision returned by the core after handling a single `SessionEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer session loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    pub fn noop() -> Self {
        Self {
            commands: Vec::new(),
            keep_running: true,
        }
    }
}

/// Handle a submitted prompt.
///
/// Always starts a fresh run, superseding any active one:
/// - both pending timers are cancelled so callbacks from the old run never
///   fire
/// - the scenario is re-selected from the new prompt
/// - the reveal scheduler is reloaded with the new activity stream
/// - the flow machine bumps its run id, making any already-queued timer
///   events from the old run stale
pub fn handle_prompt_submitted(
    registry: &ScenarioRegistry,
    machine: &mut FlowMachine,
    reveal: &mut RevealScheduler,
    scenario_slot: &mut Option<Arc<Scenario>>,
    options: &SessionOptions,
    prompt: &str,
) -> CoreStep {
    let scenario = registry.select(prompt);

    // The THINKING message names the workflow the prompt mentioned, falling
    // back to the scenario's own primary mention.
    let mentioned_workflow = extract_mentions(prompt)
        .into_iter()
        .next()
        .or_else(|| scenario.default_workflow_mention().map(str::to_string));

    debug!(
        scenario = %scenario.id,
        mode = scenario.flow_mode.as_str(),
        workflow = ?mentioned_workflow,
        "session: prompt accepted"
    );

    let mut commands = vec![
        CoreCommand::CancelTimer(TimerKind::Stage),
        CoreCommand::CancelTimer(TimerKind::Reveal),
    ];

    reveal.load(scenario.activity.clone());

    let step = machine.start(StartOptions {
        mentioned_workflow,
        mode: Some(scenario.flow_mode),
    });

    *scenario_slot = Some(scenario);

    let mut flow_step = apply_flow_step(step, reveal, options);
    commands.append(&mut flow_step.commands);

    CoreStep {
        commands,
        keep_running: flow_step.keep_running,
    }
}

/// Handle a fired timer, routing by kind.
pub fn handle_timer_fired(
    machine: &mut FlowMachine,
    reveal: &mut RevealScheduler,
    options: &SessionOptions,
    kind: TimerKind,
    run_id: RunId,
) -> CoreStep {
    match kind {
        TimerKind::Stage => {
            let step = machine.advance(run_id);
            apply_flow_step(step, reveal, options)
        }
        TimerKind::Reveal => handle_reveal_fired(machine, reveal, run_id),
    }
}

/// Handle a reveal tick.
///
/// The machine's stale-id guard only covers stage timers, so the same check
/// is applied here: a reveal callback whose run id no longer matches belongs
/// to a superseded run and must not touch the new run's stream.
fn handle_reveal_fired(
    machine: &FlowMachine,
    reveal: &mut RevealScheduler,
    run_id: RunId,
) -> CoreStep {
    if machine.current_run_id() != Some(run_id) {
        warn!(
            stale_run_id = run_id,
            current_run_id = ?machine.current_run_id(),
            "reveal: ignoring stale tick from superseded run"
        );
        return CoreStep::noop();
    }

    let mut commands = Vec::new();
    if let Some(delay) = reveal.tick() {
        commands.push(CoreCommand::ArmTimer(TimerRequest {
            kind: TimerKind::Reveal,
            run_id,
            delay,
        }));
    }

    CoreStep {
        commands,
        keep_running: true,
    }
}

/// Handle a reset request: cancel all timers and return everything to the
/// pre-run state.
pub fn handle_reset(
    machine: &mut FlowMachine,
    reveal: &mut RevealScheduler,
    scenario_slot: &mut Option<Arc<Scenario>>,
) -> CoreStep {
    machine.reset();
    reveal.reset();
    *scenario_slot = None;

    CoreStep {
        commands: vec![
            CoreCommand::CancelTimer(TimerKind::Stage),
            CoreCommand::CancelTimer(TimerKind::Reveal),
        ],
        keep_running: true,
    }
}

/// Translate a flow-machine step into shell commands.
///
/// Ordering matters: the stage-change notice goes out before the timer that
/// will end the stage is armed, and on completion the reveal stream snaps to
/// fully revealed before `RunCompleted` is published, so observers never see
/// a completed run with a partial stream.
fn apply_flow_step(
    step: FlowStep,
    reveal: &mut RevealScheduler,
    options: &SessionOptions,
) -> CoreStep {
    let mut commands = Vec::new();

    let Some(entered) = step.entered else {
        return CoreStep::noop();
    };

    let run_id = entered.run_id;
    let stage = entered.stage;
    commands.push(CoreCommand::Notify(SessionNotice::StageChanged(entered)));

    // Streaming starts when the flow reaches PLANNING; the first item shows
    // immediately and the returned delay paces the second.
    if stage == Stage::Planning && !reveal.is_streaming() {
        if let Some(delay) = reveal.begin() {
            commands.push(CoreCommand::ArmTimer(TimerRequest {
                kind: TimerKind::Reveal,
                run_id,
                delay,
            }));
        }
    }

    if step.completed {
        reveal.force_complete();
        commands.push(CoreCommand::CancelTimer(TimerKind::Reveal));
        commands.push(CoreCommand::Notify(SessionNotice::RunCompleted { run_id }));

        let mut keep_running = true;
        if options.exit_when_complete {
            keep_running = false;
            commands.push(CoreCommand::RequestExit);
        }

        return CoreStep {
            commands,
            keep_running,
        };
    }

    if let Some(delay) = step.arm_after {
        commands.push(CoreCommand::ArmTimer(TimerRequest {
            kind: TimerKind::Stage,
            run_id,
            delay,
        }));
    }

    CoreStep {
        commands,
        keep_running: true,
    }
}
