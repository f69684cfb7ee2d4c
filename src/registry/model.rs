// src/registry/model.rs

//! Scenario data model.
//!
//! A [`Scenario`] is a canned, pre-authored bundle of fake "generation"
//! content: matching rules (mention tags + keywords), an activity stream,
//! fabricated source content, and a flow-mode tag. Scenarios are authored as
//! [`RawScenario`] (pack TOML or test builders) and converted once into the
//! validated, immutable [`Scenario`] form used everywhere else.

use serde::Deserialize;

use crate::types::{FileAction, FlowMode};

/// One typed input or output slot of a simulated workflow.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkflowField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

/// Schema of a simulated workflow/integration a scenario pretends to call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkflowSchema {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub inputs: Vec<WorkflowField>,
    #[serde(default)]
    pub outputs: Vec<WorkflowField>,
}

/// One unit of simulated assistant output, revealed incrementally during a
/// run.
///
/// `Done` is always the last item logically, though nothing enforces this
/// structurally; ids must be unique within one scenario (authoring contract,
/// not runtime-checked).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActivityItem {
    /// A line of assistant narration.
    Text { id: String, text: String },
    /// A simulated file mutation card.
    File {
        id: String,
        action: FileAction,
        path: String,
        description: String,
    },
    /// Terminal narration line.
    Done { id: String, text: String },
}

impl ActivityItem {
    pub fn id(&self) -> &str {
        match self {
            ActivityItem::Text { id, .. }
            | ActivityItem::File { id, .. }
            | ActivityItem::Done { id, .. } => id,
        }
    }

    /// File cards get a longer reveal dwell than narration lines.
    pub fn is_file(&self) -> bool {
        matches!(self, ActivityItem::File { .. })
    }
}

/// Flatten activity items into a single display transcript.
///
/// Text/done items contribute their text verbatim; file items contribute a
/// formatted `[ACTION] path - description` line. This is the only place the
/// derivation lives; consumers read the cached copy on [`Scenario`].
pub fn render_transcript(items: &[ActivityItem]) -> String {
    items
        .iter()
        .map(|item| match item {
            ActivityItem::Text { text, .. } | ActivityItem::Done { text, .. } => text.clone(),
            ActivityItem::File {
                action,
                path,
                description,
                ..
            } => format!("[{}] {} - {}", action.label(), path, description),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Scenario as authored, before normalisation.
///
/// `flow_mode` is kept as a plain string here so that an unknown mode in a
/// pack normalises to `happy_path` with a warning instead of failing
/// deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScenario {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mentions: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub flow_mode: Option<String>,
    #[serde(default)]
    pub activity: Vec<ActivityItem>,
    #[serde(default)]
    pub source_content: String,
    #[serde(default)]
    pub preview: Option<String>,
    #[serde(default)]
    pub workflows: Vec<WorkflowSchema>,
}

/// Validated, immutable scenario.
///
/// Constructed once (at registry build time) and shared via `Arc`; nothing
/// mutates a scenario after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub id: String,
    pub title: String,
    pub description: String,
    /// `@tag`s that force-select this scenario.
    pub mentions: Vec<String>,
    /// Lowercase substrings used for keyword scoring.
    pub keywords: Vec<String>,
    pub flow_mode: FlowMode,
    pub activity: Vec<ActivityItem>,
    /// Derived once from `activity` via [`render_transcript`].
    pub transcript: String,
    /// Fabricated file content shown as the "generated code" on completion.
    pub source_content: String,
    /// Opaque handle the embedding UI maps to a rendered preview.
    pub preview: Option<String>,
    pub workflows: Vec<WorkflowSchema>,
}

impl Scenario {
    /// Normalise an authored scenario: resolve the flow mode, lowercase the
    /// keywords, and cache the derived transcript.
    pub fn from_raw(raw: RawScenario) -> Self {
        let flow_mode = raw
            .flow_mode
            .as_deref()
            .map(FlowMode::from_str_or_default)
            .unwrap_or_default();

        let keywords = raw
            .keywords
            .iter()
            .map(|k| k.to_lowercase())
            .collect::<Vec<_>>();

        let transcript = render_transcript(&raw.activity);

        Self {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            mentions: raw.mentions,
            keywords,
            flow_mode,
            activity: raw.activity,
            transcript,
            source_content: raw.source_content,
            preview: raw.preview,
            workflows: raw.workflows,
        }
    }

    /// The workflow tag used to parameterise the THINKING message when the
    /// prompt itself carried no `@mention`.
    pub fn default_workflow_mention(&self) -> Option<&str> {
        self.mentions.first().map(String::as_str)
    }
}
