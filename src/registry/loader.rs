// src/registry/loader.rs

use std::fs;
use std::path::Path;

use crate::errors::Result;
use crate::registry::validate::RawRegistryFile;
use crate::registry::ScenarioRegistry;

/// Load a scenario pack from a given path and return the raw
/// [`RawRegistryFile`].
///
/// This only performs TOML deserialization; it does **not** perform
/// validation or flow-mode normalisation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawRegistryFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawRegistryFile = toml::from_str(&contents)?;

    Ok(raw)
}

/// Load a scenario pack from path and run validation.
///
/// This is the recommended entry point for embedders authoring their own
/// packs:
///
/// - Reads TOML.
/// - Checks the pack is non-empty and every scenario has an id.
/// - Normalises flow-mode strings (unknown modes become `happy_path` with a
///   warning) and caches the derived transcripts.
///
/// Pack order is selection-priority order: keyword-score ties resolve to the
/// earliest scenario in the file.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ScenarioRegistry> {
    let raw = load_from_path(&path)?;
    let registry = ScenarioRegistry::try_from(raw)?;
    Ok(registry)
}
