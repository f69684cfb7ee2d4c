// src/flow/stage.rs

//! Stage definitions for the generation flow.
//!
//! Each stage carries a display message (THINKING optionally parameterised
//! by a mentioned workflow), a dwell duration, and an optional "current
//! file" label. Progress percentages live on the *sequence*, not the stage:
//! `BUILDING` appears twice in `build_retry` and each occurrence reports a
//! different progress value so that progress is non-decreasing across every
//! sequence by construction.

use std::fmt;
use std::time::Duration;

use crate::types::FlowMode;

/// One named phase of the simulated generation process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    #[default]
    Idle,
    Thinking,
    Planning,
    Generating,
    Building,
    BuildFailed,
    Recovering,
    Interrupted,
    Complete,
}

impl Stage {
    /// A run is active while its stage is neither idle nor complete.
    pub fn is_active(self) -> bool {
        !matches!(self, Stage::Idle | Stage::Complete)
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Idle => "IDLE",
            Stage::Thinking => "THINKING",
            Stage::Planning => "PLANNING",
            Stage::Generating => "GENERATING",
            Stage::Building => "BUILDING",
            Stage::BuildFailed => "BUILD_FAILED",
            Stage::Recovering => "RECOVERING",
            Stage::Interrupted => "INTERRUPTED",
            Stage::Complete => "COMPLETE",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static per-stage display configuration.
#[derive(Debug, Clone, Copy)]
pub struct StageConfig {
    pub message: &'static str,
    /// Override applied only for THINKING when a workflow was mentioned.
    pub workflow_message: Option<fn(&str) -> String>,
    /// Dwell time before advancing to the next sequence position.
    pub duration: Duration,
    /// Decorative file label passed through verbatim to the UI.
    pub current_file: Option<&'static str>,
}

/// Display configuration for a stage.
pub fn config(stage: Stage) -> StageConfig {
    match stage {
        Stage::Idle => StageConfig {
            message: "",
            workflow_message: None,
            duration: Duration::ZERO,
            current_file: None,
        },
        Stage::Thinking => StageConfig {
            message: "Understanding your request...",
            workflow_message: Some(|workflow| format!("Fetching @{workflow} schema...")),
            duration: Duration::from_millis(1200),
            current_file: None,
        },
        Stage::Planning => StageConfig {
            message: "Planning component structure...",
            workflow_message: None,
            duration: Duration::from_millis(1600),
            current_file: None,
        },
        Stage::Generating => StageConfig {
            message: "Writing code...",
            workflow_message: None,
            duration: Duration::from_millis(2800),
            current_file: Some("app/page.tsx"),
        },
        Stage::Building => StageConfig {
            message: "Building preview...",
            workflow_message: None,
            duration: Duration::from_millis(1800),
            current_file: None,
        },
        Stage::BuildFailed => StageConfig {
            message: "Build failed. Reading error logs...",
            workflow_message: None,
            duration: Duration::from_millis(1400),
            current_file: Some("build.log"),
        },
        Stage::Recovering => StageConfig {
            message: "Applying automatic fix and retrying...",
            workflow_message: None,
            duration: Duration::from_millis(1700),
            current_file: Some("next.config.ts"),
        },
        Stage::Interrupted => StageConfig {
            message: "Connection interrupted. Attempting to resume...",
            workflow_message: None,
            duration: Duration::from_millis(1300),
            current_file: None,
        },
        Stage::Complete => StageConfig {
            message: "Complete!",
            workflow_message: None,
            duration: Duration::ZERO,
            current_file: None,
        },
    }
}

/// One position in a flow-mode's stage sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageStep {
    pub stage: Stage,
    /// Progress percentage reported at this position (0-100).
    pub progress: u8,
}

const fn step(stage: Stage, progress: u8) -> StageStep {
    StageStep { stage, progress }
}

const HAPPY_PATH: &[StageStep] = &[
    step(Stage::Thinking, 8),
    step(Stage::Planning, 24),
    step(Stage::Generating, 56),
    step(Stage::Building, 82),
    step(Stage::Complete, 100),
];

const BUILD_RETRY: &[StageStep] = &[
    step(Stage::Thinking, 8),
    step(Stage::Planning, 24),
    step(Stage::Generating, 56),
    step(Stage::Building, 70),
    step(Stage::BuildFailed, 70),
    step(Stage::Recovering, 76),
    step(Stage::Building, 82),
    step(Stage::Complete, 100),
];

const INTERRUPT_RESUME: &[StageStep] = &[
    step(Stage::Thinking, 8),
    step(Stage::Planning, 24),
    step(Stage::Generating, 40),
    step(Stage::Interrupted, 48),
    step(Stage::Recovering, 52),
    step(Stage::Generating, 56),
    step(Stage::Building, 82),
    step(Stage::Complete, 100),
];

/// The fixed stage sequence for a flow mode.
///
/// Every sequence ends in `Complete`, and every stage before `Complete` has
/// a positive dwell duration, so runs always terminate on their own.
pub fn sequence(mode: FlowMode) -> &'static [StageStep] {
    match mode {
        FlowMode::HappyPath => HAPPY_PATH,
        FlowMode::BuildRetry => BUILD_RETRY,
        FlowMode::InterruptResume => INTERRUPT_RESUME,
    }
}

/// Resolve the display message for a stage, applying the workflow override
/// where the stage supports one.
pub fn resolve_message(stage: Stage, workflow: Option<&str>) -> String {
    let cfg = config(stage);
    match (workflow, cfg.workflow_message) {
        (Some(name), Some(render)) => render(name),
        _ => cfg.message.to_string(),
    }
}
