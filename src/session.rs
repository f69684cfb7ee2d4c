// src/session.rs

//! Public session wiring.
//!
//! [`spawn_session`] constructs the channels, the timer backend, the pure
//! core, and the async shell, then spawns the event loop and returns a
//! [`SessionHandle`] the embedding UI drives it through.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use crate::engine::{
    CoreSession, Session, SessionEvent, SessionNotice, SessionOptions, SessionSnapshot,
};
use crate::errors::{Result, StagehandError};
use crate::registry::ScenarioRegistry;
use crate::timer::TokioTimerBackend;

const EVENT_CHANNEL_CAPACITY: usize = 64;
const NOTICE_CHANNEL_CAPACITY: usize = 64;

/// Cloneable handle for driving a running session.
///
/// All methods translate a closed event channel (session already exited)
/// into [`StagehandError::SessionClosed`].
#[derive(Debug, Clone)]
pub struct SessionHandle {
    event_tx: mpsc::Sender<SessionEvent>,
    notice_tx: broadcast::Sender<SessionNotice>,
    snapshot_rx: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Submit a free-text prompt, starting a new run (and superseding any
    /// active one).
    pub async fn submit_prompt(&self, prompt: impl Into<String>) -> Result<()> {
        self.send(SessionEvent::PromptSubmitted {
            prompt: prompt.into(),
        })
        .await
    }

    /// Abandon the current run and return the session to idle.
    pub async fn reset(&self) -> Result<()> {
        self.send(SessionEvent::ResetRequested).await
    }

    /// Ask the session loop to exit.
    pub async fn shutdown(&self) -> Result<()> {
        self.send(SessionEvent::ShutdownRequested).await
    }

    /// Subscribe to stage-change and run-completion notices.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionNotice> {
        self.notice_tx.subscribe()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Watch receiver for awaiting snapshot changes.
    pub fn watch_snapshots(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_rx.clone()
    }

    async fn send(&self, event: SessionEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .await
            .map_err(|_| StagehandError::SessionClosed)
    }
}

/// Spawn a session backed by real Tokio timers.
///
/// Returns the driving handle and the join handle of the event loop task.
pub fn spawn_session(
    registry: Arc<ScenarioRegistry>,
    options: SessionOptions,
) -> (SessionHandle, JoinHandle<Result<()>>) {
    let (event_tx, event_rx) = mpsc::channel::<SessionEvent>(EVENT_CHANNEL_CAPACITY);
    let (notice_tx, _) = broadcast::channel::<SessionNotice>(NOTICE_CHANNEL_CAPACITY);
    let (snapshot_tx, snapshot_rx) = watch::channel(SessionSnapshot::default());

    let timers = TokioTimerBackend::new(event_tx.clone());
    let core = CoreSession::new(registry, options);
    let session = Session::new(core, event_rx, timers, notice_tx.clone(), snapshot_tx);

    let join = tokio::spawn(session.run());

    (
        SessionHandle {
            event_tx,
            notice_tx,
            snapshot_rx,
        },
        join,
    )
}
