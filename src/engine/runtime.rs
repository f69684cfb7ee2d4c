// src/engine/runtime.rs

use std::fmt;

use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info};

use crate::engine::{SessionEvent, SessionNotice, SessionSnapshot};
use crate::errors::Result;
use crate::timer::TimerBackend;

use super::core::CoreSession;
use super::CoreCommand;

/// Drives the core session in response to `SessionEvent`s, and delegates
/// timer scheduling to a `TimerBackend`.
///
/// This is a pure IO shell around `CoreSession`, which contains all the
/// session semantics. This struct handles async IO: reading events from the
/// channel, arming/cancelling timers, and publishing notices and snapshots.
pub struct Session<T: TimerBackend> {
    core: CoreSession,
    event_rx: mpsc::Receiver<SessionEvent>,
    timers: T,
    notice_tx: broadcast::Sender<SessionNotice>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl<T: TimerBackend> fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<T: TimerBackend> Session<T> {
    pub fn new(
        core: CoreSession,
        event_rx: mpsc::Receiver<SessionEvent>,
        timers: T,
        notice_tx: broadcast::Sender<SessionNotice>,
        snapshot_tx: watch::Sender<SessionSnapshot>,
    ) -> Self {
        Self {
            core,
            event_rx,
            timers,
            notice_tx,
            snapshot_tx,
        }
    }

    /// Main event loop.
    ///
    /// - Consumes `SessionEvent`s from `event_rx`.
    /// - Feeds them into the core session.
    /// - Executes commands returned by the core (arm/cancel timers, notify).
    /// - Publishes a fresh snapshot after every step, so observers see the
    ///   flow state and the reveal count change together.
    pub async fn run(mut self) -> Result<()> {
        info!("stagehand session started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("session event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "session received event");

            // Feed the event into the pure core and get commands back.
            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command).await?;
            }

            // Snapshot after the whole step so a completion is never
            // observable with a partially revealed stream.
            self.snapshot_tx.send_replace(self.core.snapshot());

            if !step.keep_running {
                info!("core requested exit; stopping session");
                break;
            }
        }

        self.timers.cancel_all();
        info!("session exiting");
        Ok(())
    }

    /// Execute a single command from the core.
    async fn execute_command(&mut self, command: CoreCommand) -> Result<()> {
        match command {
            CoreCommand::ArmTimer(request) => {
                debug!(?request, "arming timer");
                self.timers.arm(request).await?;
            }
            CoreCommand::CancelTimer(kind) => {
                self.timers.cancel(kind);
            }
            CoreCommand::Notify(notice) => {
                // No receivers is fine; snapshots still carry the state.
                let _ = self.notice_tx.send(notice);
            }
            CoreCommand::RequestExit => {
                // The core also returns keep_running=false in this case, so
                // this command only marks the intent in the logs.
                info!("core issued RequestExit command");
            }
        }
        Ok(())
    }
}
