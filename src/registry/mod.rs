// src/registry/mod.rs

//! Scenario registry and selection.
//!
//! - [`model`] defines the scenario data model and transcript derivation.
//! - [`select`] implements prompt → scenario matching.
//! - [`loader`] reads scenario packs from TOML files.
//! - [`validate`] converts raw pack data into a validated registry.
//! - [`builtin`] provides the canned scenario set shipped with the crate.

pub mod builtin;
pub mod loader;
pub mod model;
pub mod select;
pub mod validate;

use std::sync::Arc;

use tracing::warn;

use crate::errors::{Result, StagehandError};

pub use builtin::builtin_registry;
pub use loader::{load_and_validate, load_from_path};
pub use model::{
    render_transcript, ActivityItem, RawScenario, Scenario, WorkflowField, WorkflowSchema,
};
pub use select::extract_mentions;
pub use validate::{RawRegistryFile, RegistrySection};

/// Immutable table of registered scenarios.
///
/// Registry order is selection-priority order: both mention overrides and
/// keyword-score ties resolve to the earliest registered scenario. Built once
/// at startup and injected into the session (never a process-wide singleton),
/// so tests can supply isolated fixture registries.
#[derive(Debug, Clone)]
pub struct ScenarioRegistry {
    scenarios: Vec<Arc<Scenario>>,
    default_id: Option<String>,
}

impl ScenarioRegistry {
    /// Build a registry from validated scenarios.
    ///
    /// An empty scenario list is a fatal construction error: every other
    /// component depends on a non-empty registry, so the system must refuse
    /// to initialise rather than limp along without a default.
    pub fn new(
        scenarios: Vec<Scenario>,
        default_id: Option<String>,
    ) -> Result<Self> {
        if scenarios.is_empty() {
            return Err(StagehandError::EmptyRegistry);
        }

        if let Some(ref id) = default_id {
            if !scenarios.iter().any(|s| &s.id == id) {
                warn!(
                    default_id = %id,
                    "default scenario id not present in registry; first scenario will be used"
                );
            }
        }

        Ok(Self {
            scenarios: scenarios.into_iter().map(Arc::new).collect(),
            default_id,
        })
    }

    /// Look up a scenario by id.
    pub fn get(&self, id: &str) -> Option<Arc<Scenario>> {
        self.scenarios.iter().find(|s| s.id == id).cloned()
    }

    /// The scenario used when nothing matches a prompt: the configured
    /// default id, or the first registered scenario if that id is absent.
    pub fn default_scenario(&self) -> Arc<Scenario> {
        self.default_id
            .as_deref()
            .and_then(|id| self.get(id))
            // Registry is non-empty by construction.
            .unwrap_or_else(|| Arc::clone(&self.scenarios[0]))
    }

    /// Scenarios in registration (priority) order.
    pub fn scenarios(&self) -> impl Iterator<Item = &Arc<Scenario>> {
        self.scenarios.iter()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Deterministically pick the scenario for a free-text prompt.
    ///
    /// Pure function of `(prompt, registry)`; always succeeds.
    pub fn select(&self, prompt: &str) -> Arc<Scenario> {
        select::select_scenario(self, prompt)
    }
}
