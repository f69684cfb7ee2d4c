#![allow(dead_code)]

pub use stagehand_test_utils::init_tracing;

use std::sync::Arc;

use stagehand::engine::{
    CoreCommand, CoreSession, SessionEvent, SessionNotice, SessionOptions, TimerKind,
};
use stagehand::registry::ScenarioRegistry;
use stagehand::timer::TimerRequest;
use stagehand_test_utils::builders::{RegistryBuilder, ScenarioBuilder};

/// Drives the pure core by hand, playing the role of the IO shell: it keeps
/// the one-pending-timer-per-kind book and collects notices, so tests can
/// fire timers deterministically and assert on what was published.
pub struct CoreHarness {
    pub core: CoreSession,
    pub pending: Vec<TimerRequest>,
    pub notices: Vec<SessionNotice>,
    pub exit_requested: bool,
    pub keep_running: bool,
}

impl CoreHarness {
    pub fn new(registry: Arc<ScenarioRegistry>, options: SessionOptions) -> Self {
        Self {
            core: CoreSession::new(registry, options),
            pending: Vec::new(),
            notices: Vec::new(),
            exit_requested: false,
            keep_running: true,
        }
    }

    /// Step the core with one event and book-keep the resulting commands.
    pub fn step(&mut self, event: SessionEvent) {
        let step = self.core.step(event);
        for command in step.commands {
            match command {
                CoreCommand::ArmTimer(request) => {
                    self.pending.retain(|r| r.kind != request.kind);
                    self.pending.push(request);
                }
                CoreCommand::CancelTimer(kind) => {
                    self.pending.retain(|r| r.kind != kind);
                }
                CoreCommand::Notify(notice) => self.notices.push(notice),
                CoreCommand::RequestExit => self.exit_requested = true,
            }
        }
        self.keep_running = step.keep_running;
    }

    pub fn submit(&mut self, prompt: &str) {
        self.step(SessionEvent::PromptSubmitted {
            prompt: prompt.to_string(),
        });
    }

    pub fn pending_of(&self, kind: TimerKind) -> Option<TimerRequest> {
        self.pending.iter().find(|r| r.kind == kind).copied()
    }

    /// Fire the pending timer of this kind, as the backend would after its
    /// delay elapsed. Panics if none is pending.
    pub fn fire(&mut self, kind: TimerKind) {
        let request = self
            .pending_of(kind)
            .unwrap_or_else(|| panic!("no pending {kind:?} timer"));
        self.pending.retain(|r| r.kind != kind);
        self.step(SessionEvent::TimerFired {
            kind: request.kind,
            run_id: request.run_id,
        });
    }

    /// Fire pending timers (stage first) until the run completes or nothing
    /// is pending. Bounded so a broken machine fails the test instead of
    /// spinning.
    pub fn run_to_completion(&mut self) {
        for _ in 0..200 {
            if self.completed_run_ids().last().is_some() && self.pending.is_empty() {
                return;
            }
            if self.pending_of(TimerKind::Stage).is_some() {
                self.fire(TimerKind::Stage);
            } else if self.pending_of(TimerKind::Reveal).is_some() {
                self.fire(TimerKind::Reveal);
            } else {
                return;
            }
        }
        panic!("run did not complete within 200 timer firings");
    }

    /// Stages entered so far, in notice order.
    pub fn entered_stages(&self) -> Vec<stagehand::flow::Stage> {
        self.notices
            .iter()
            .filter_map(|n| match n {
                SessionNotice::StageChanged(entry) => Some(entry.stage),
                _ => None,
            })
            .collect()
    }

    /// Progress values published so far, in notice order.
    pub fn progress_values(&self) -> Vec<u8> {
        self.notices
            .iter()
            .filter_map(|n| match n {
                SessionNotice::StageChanged(entry) => Some(entry.progress),
                _ => None,
            })
            .collect()
    }

    pub fn completed_run_ids(&self) -> Vec<u64> {
        self.notices
            .iter()
            .filter_map(|n| match n {
                SessionNotice::RunCompleted { run_id } => Some(*run_id),
                _ => None,
            })
            .collect()
    }
}

/// A three-scenario registry exercising all selection paths.
pub fn fixture_registry() -> Arc<ScenarioRegistry> {
    RegistryBuilder::new()
        .scenario(
            ScenarioBuilder::new("dashboard")
                .title("Analytics dashboard")
                .mention("analytics")
                .keyword("dashboard")
                .keyword("chart")
                .flow_mode("happy_path")
                .with_default_activity()
                .build(),
        )
        .scenario(
            ScenarioBuilder::new("inbox")
                .title("Email inbox")
                .mention("gmail")
                .keyword("email")
                .keyword("inbox")
                .flow_mode("build_retry")
                .with_default_activity()
                .build(),
        )
        .scenario(
            ScenarioBuilder::new("notes")
                .title("Notes app")
                .keyword("notes")
                .flow_mode("interrupt_resume")
                .with_default_activity()
                .build(),
        )
        .default_id("dashboard")
        .build_arc()
}
