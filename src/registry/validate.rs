// src/registry/validate.rs

use serde::Deserialize;

use crate::errors::{Result, StagehandError};
use crate::registry::model::Scenario;
use crate::registry::{RawScenario, ScenarioRegistry};

/// Top-level shape of a scenario pack file.
///
/// ```toml
/// [registry]
/// default_scenario = "cv-review"
///
/// [[scenario]]
/// id = "cv-review"
/// flow_mode = "happy_path"
/// keywords = ["cv", "resume"]
///
/// [[scenario.activity]]
/// type = "text"
/// id = "intro"
/// text = "..."
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRegistryFile {
    #[serde(default)]
    pub registry: RegistrySection,
    #[serde(default)]
    pub scenario: Vec<RawScenario>,
}

/// Global `[registry]` section of a pack file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrySection {
    /// Scenario id used when no mention or keyword matches a prompt.
    #[serde(default)]
    pub default_scenario: Option<String>,
}

impl TryFrom<RawRegistryFile> for ScenarioRegistry {
    type Error = StagehandError;

    fn try_from(raw: RawRegistryFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_registry(&raw)?;

        let scenarios = raw
            .scenario
            .into_iter()
            .map(Scenario::from_raw)
            .collect::<Vec<_>>();

        ScenarioRegistry::new(scenarios, raw.registry.default_scenario)
    }
}

fn validate_raw_registry(raw: &RawRegistryFile) -> Result<()> {
    ensure_has_scenarios(raw)?;
    validate_scenario_ids(raw)?;
    Ok(())
}

fn ensure_has_scenarios(raw: &RawRegistryFile) -> Result<()> {
    if raw.scenario.is_empty() {
        return Err(StagehandError::EmptyRegistry);
    }
    Ok(())
}

fn validate_scenario_ids(raw: &RawRegistryFile) -> Result<()> {
    for scenario in raw.scenario.iter() {
        if scenario.id.trim().is_empty() {
            return Err(StagehandError::RegistryError(
                "every [[scenario]] must have a non-empty id".to_string(),
            ));
        }
    }
    Ok(())
}
