// tests/registry_pack.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::io::Write;

use tempfile::NamedTempFile;

use stagehand::registry::{load_and_validate, render_transcript};
use stagehand::types::FlowMode;
use stagehand::StagehandError;

type TestResult = Result<(), Box<dyn Error>>;

fn write_pack(contents: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

const VALID_PACK: &str = r#"
[registry]
default_scenario = "crm"

[[scenario]]
id = "crm"
title = "CRM board"
mentions = ["salesforce"]
keywords = ["CRM", "Pipeline"]
flow_mode = "build_retry"
source_content = "export default function Crm() {}"

[[scenario.activity]]
type = "text"
id = "intro"
text = "Setting up your CRM..."

[[scenario.activity]]
type = "file"
id = "page"
action = "add"
path = "app/page.tsx"
description = "Board layout"

[[scenario.activity]]
type = "done"
id = "outro"
text = "Your CRM is ready."

[[scenario]]
id = "todo"
keywords = ["todo"]

[[scenario.activity]]
type = "done"
id = "d"
text = "Done."
"#;

#[test]
fn loads_and_validates_a_pack() -> TestResult {
    init_tracing();
    let file = write_pack(VALID_PACK)?;

    let registry = load_and_validate(file.path())?;
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.default_scenario().id, "crm");

    let crm = registry.get("crm").expect("crm scenario");
    assert_eq!(crm.flow_mode, FlowMode::BuildRetry);
    // Keywords are normalised to lowercase at load time.
    assert_eq!(crm.keywords, vec!["crm", "pipeline"]);
    assert_eq!(crm.activity.len(), 3);
    Ok(())
}

#[test]
fn transcript_is_derived_at_load_time() -> TestResult {
    init_tracing();
    let file = write_pack(VALID_PACK)?;

    let registry = load_and_validate(file.path())?;
    let crm = registry.get("crm").unwrap();

    assert_eq!(
        crm.transcript,
        "Setting up your CRM...\n\
         [ADD] app/page.tsx - Board layout\n\
         Your CRM is ready."
    );
    assert_eq!(crm.transcript, render_transcript(&crm.activity));
    Ok(())
}

#[test]
fn empty_pack_is_rejected() -> TestResult {
    init_tracing();
    let file = write_pack("[registry]\n")?;

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, StagehandError::EmptyRegistry));
    Ok(())
}

#[test]
fn scenario_without_id_is_rejected() -> TestResult {
    init_tracing();
    let file = write_pack(
        r#"
[[scenario]]
id = ""
keywords = ["x"]
"#,
    )?;

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, StagehandError::RegistryError(_)));
    Ok(())
}

#[test]
fn unknown_flow_mode_normalises_to_happy_path() -> TestResult {
    init_tracing();
    let file = write_pack(
        r#"
[[scenario]]
id = "weird"
flow_mode = "explode_everything"

[[scenario.activity]]
type = "done"
id = "d"
text = "Done."
"#,
    )?;

    let registry = load_and_validate(file.path())?;
    assert_eq!(registry.get("weird").unwrap().flow_mode, FlowMode::HappyPath);
    Ok(())
}

#[test]
fn malformed_toml_is_an_error() -> TestResult {
    init_tracing();
    let file = write_pack("this is not toml [[")?;

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, StagehandError::TomlError(_)));
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    init_tracing();
    let err = load_and_validate("/nonexistent/pack.toml").unwrap_err();
    assert!(matches!(err, StagehandError::IoError(_)));
}

#[test]
fn builtin_registry_is_well_formed() {
    init_tracing();
    let registry = stagehand::builtin_registry();

    assert!(!registry.is_empty());
    for scenario in registry.scenarios() {
        assert!(!scenario.id.is_empty());
        assert!(!scenario.activity.is_empty());
        assert_eq!(scenario.transcript, render_transcript(&scenario.activity));
    }
    // The shipped default resolves.
    assert_eq!(registry.default_scenario().id, "cv-review");
}
