// src/lib.rs

//! stagehand: a scripted prompt-to-UI generation core.
//!
//! The crate simulates an AI app builder's generation pipeline with fully
//! deterministic, pre-scripted content: a prompt selects a canned scenario,
//! a staged flow machine plays the scenario's generation theatre on timers,
//! and a reveal scheduler streams the scenario's activity items alongside.

pub mod engine;
pub mod errors;
pub mod flow;
pub mod logging;
pub mod registry;
pub mod reveal;
pub mod session;
pub mod timer;
pub mod types;

pub use engine::{
    CoreSession, RunId, SessionEvent, SessionNotice, SessionOptions, SessionSnapshot,
    TimerKind,
};
pub use errors::{Result, StagehandError};
pub use registry::{builtin_registry, ScenarioRegistry};
pub use session::{spawn_session, SessionHandle};
pub use types::FlowMode;
