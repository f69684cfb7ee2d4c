// src/types.rs

use std::str::FromStr;

use serde::Deserialize;
use tracing::warn;

/// Which fixed stage sequence a generation run follows.
///
/// - `HappyPath`: straight thinking → planning → generating → building →
///   complete.
/// - `BuildRetry`: demonstrates a build failure and recovery loop (the
///   building stage appears twice).
/// - `InterruptResume`: demonstrates a mid-stream connectivity interruption
///   and resume (the generating stage appears twice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowMode {
    HappyPath,
    BuildRetry,
    InterruptResume,
}

impl Default for FlowMode {
    fn default() -> Self {
        FlowMode::HappyPath
    }
}

impl FromStr for FlowMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy_path" => Ok(FlowMode::HappyPath),
            "build_retry" => Ok(FlowMode::BuildRetry),
            "interrupt_resume" => Ok(FlowMode::InterruptResume),
            other => Err(format!(
                "invalid flow mode: {other} (expected \"happy_path\", \"build_retry\" or \"interrupt_resume\")"
            )),
        }
    }
}

impl FlowMode {
    /// Parse a flow-mode string from scenario authoring, normalising unknown
    /// values to [`FlowMode::HappyPath`] instead of failing.
    ///
    /// An unrecognised mode is an authoring mistake; the engine must never
    /// refuse to run because of one.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.parse() {
            Ok(mode) => mode,
            Err(err) => {
                warn!(%err, "unknown flow mode; falling back to happy_path");
                FlowMode::HappyPath
            }
        }
    }

    /// Stable string form used in scenario packs and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            FlowMode::HappyPath => "happy_path",
            FlowMode::BuildRetry => "build_retry",
            FlowMode::InterruptResume => "interrupt_resume",
        }
    }
}

/// Kind of simulated file mutation shown in the activity stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    Add,
    Edit,
}

impl FileAction {
    /// Upper-case label used when flattening activity items into a transcript
    /// (`[ADD] path - description`).
    pub fn label(self) -> &'static str {
        match self {
            FileAction::Add => "ADD",
            FileAction::Edit => "EDIT",
        }
    }
}
