use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tracing::debug;

use stagehand::engine::TimerKind;
use stagehand::errors::Result;
use stagehand::timer::{TimerBackend, TimerRequest};

/// A fake timer backend that records arm/cancel calls instead of sleeping.
///
/// Tests inspect the recorded requests and fire them back into the session
/// by hand, making timer-driven flows fully deterministic.
pub struct FakeTimerBackend {
    log: Arc<Mutex<TimerLog>>,
}

/// Shared record of everything the session asked the backend to do.
#[derive(Debug, Default)]
pub struct TimerLog {
    /// Every arm call, in order.
    pub armed: Vec<TimerRequest>,
    /// Every explicit cancel call, in order.
    pub cancelled: Vec<TimerKind>,
    /// The currently pending request per kind, mirroring the real backend's
    /// one-timer-per-kind rule.
    pub pending: Vec<TimerRequest>,
}

impl TimerLog {
    fn remove_pending(&mut self, kind: TimerKind) {
        self.pending.retain(|r| r.kind != kind);
    }

    /// The pending request of this kind, if any.
    pub fn pending_of(&self, kind: TimerKind) -> Option<TimerRequest> {
        self.pending.iter().find(|r| r.kind == kind).copied()
    }
}

impl FakeTimerBackend {
    pub fn new() -> (Self, Arc<Mutex<TimerLog>>) {
        let log = Arc::new(Mutex::new(TimerLog::default()));
        (
            Self {
                log: Arc::clone(&log),
            },
            log,
        )
    }
}

impl TimerBackend for FakeTimerBackend {
    fn arm(
        &mut self,
        request: TimerRequest,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        {
            let mut log = self.log.lock().unwrap();
            log.remove_pending(request.kind);
            log.armed.push(request);
            log.pending.push(request);
        }
        debug!(?request, "fake timer armed");
        Box::pin(async move { Ok(()) })
    }

    fn cancel(&mut self, kind: TimerKind) {
        let mut log = self.log.lock().unwrap();
        log.remove_pending(kind);
        log.cancelled.push(kind);
        debug!(?kind, "fake timer cancelled");
    }

    fn cancel_all(&mut self) {
        let mut log = self.log.lock().unwrap();
        log.pending.clear();
    }
}
