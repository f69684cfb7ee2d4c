// src/timer/backend.rs

//! Pluggable timer backend abstraction.
//!
//! The session talks to a `TimerBackend` instead of spawning sleeps directly.
//! This makes it easy to swap in a fake backend in tests that records arm and
//! cancel calls instead of waiting on real time.
//!
//! - `TokioTimerBackend` is the default implementation. Each armed timer is a
//!   spawned task that sleeps and then sends a `TimerFired` event back into
//!   the session's event channel.
//! - Tests can provide their own `TimerBackend` that captures requests and
//!   lets the test fire them deterministically.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::engine::{RunId, SessionEvent, TimerKind};
use crate::errors::Result;

/// A request to arm one delayed callback.
///
/// The `run_id` is echoed back in the resulting `TimerFired` event so the
/// core can discard callbacks that outlived their run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub kind: TimerKind,
    pub run_id: RunId,
    pub delay: Duration,
}

/// Trait abstracting how delayed callbacks are scheduled.
///
/// At most one timer per [`TimerKind`] is pending at a time: arming a kind
/// implicitly cancels any pending timer of the same kind.
pub trait TimerBackend: Send {
    /// Arm a timer; after `request.delay` the backend must deliver a
    /// `TimerFired` event carrying the request's kind and run id.
    fn arm(
        &mut self,
        request: TimerRequest,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    /// Cancel the pending timer of this kind, if any. Cancelling a kind with
    /// no pending timer is a no-op.
    fn cancel(&mut self, kind: TimerKind);

    /// Cancel everything. Called when the session loop exits.
    fn cancel_all(&mut self);
}

/// Real timer backend used in production.
///
/// Arming spawns a task that sleeps and then sends the event; the join
/// handle is kept so a later arm or cancel of the same kind can abort it
/// before it fires.
pub struct TokioTimerBackend {
    event_tx: mpsc::Sender<SessionEvent>,
    pending: HashMap<TimerKind, JoinHandle<()>>,
}

impl TokioTimerBackend {
    pub fn new(event_tx: mpsc::Sender<SessionEvent>) -> Self {
        Self {
            event_tx,
            pending: HashMap::new(),
        }
    }
}

impl TimerBackend for TokioTimerBackend {
    fn arm(
        &mut self,
        request: TimerRequest,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        // One pending timer per kind: a re-arm replaces the old sleep.
        self.cancel(request.kind);

        // Clone the sender so the future doesn't borrow `self` across `await`.
        let tx = self.event_tx.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(request.delay).await;
            let event = SessionEvent::TimerFired {
                kind: request.kind,
                run_id: request.run_id,
            };
            // A closed channel means the session already shut down; the
            // callback has nowhere to go and that's fine.
            if tx.send(event).await.is_err() {
                debug!(?request, "timer fired after session closed; dropping");
            }
        });

        self.pending.insert(request.kind, handle);

        Box::pin(async move { Ok(()) })
    }

    fn cancel(&mut self, kind: TimerKind) {
        if let Some(handle) = self.pending.remove(&kind) {
            handle.abort();
            debug!(?kind, "timer cancelled");
        }
    }

    fn cancel_all(&mut self) {
        for (kind, handle) in self.pending.drain() {
            handle.abort();
            debug!(?kind, "timer cancelled on shutdown");
        }
    }
}

impl Drop for TokioTimerBackend {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
