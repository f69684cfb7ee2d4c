// tests/session_runtime.rs

mod common;
use crate::common::{fixture_registry, init_tracing};

use std::error::Error;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::Duration;

use stagehand::engine::{
    CoreSession, Session, SessionEvent, SessionNotice, SessionOptions, SessionSnapshot,
};
use stagehand::flow::Stage;
use stagehand::session::spawn_session;
use stagehand::StagehandError;
use stagehand_test_utils::fake_timer::FakeTimerBackend;

type TestResult = Result<(), Box<dyn Error>>;

/// Await notices until this run's completion, collecting the stages seen.
async fn stages_until_complete(
    notices: &mut broadcast::Receiver<SessionNotice>,
) -> Vec<Stage> {
    let mut stages = Vec::new();
    loop {
        match notices.recv().await.expect("notice channel open") {
            SessionNotice::StageChanged(entry) => stages.push(entry.stage),
            SessionNotice::RunCompleted { .. } => return stages,
        }
    }
}

#[tokio::test(start_paused = true)]
async fn full_run_completes_on_real_timers() -> TestResult {
    init_tracing();

    let (handle, _join) = spawn_session(fixture_registry(), SessionOptions::default());
    let mut notices = handle.subscribe();

    handle.submit_prompt("dashboard with a chart").await?;
    let stages = stages_until_complete(&mut notices).await;

    assert_eq!(
        stages,
        vec![
            Stage::Thinking,
            Stage::Planning,
            Stage::Generating,
            Stage::Building,
            Stage::Complete,
        ]
    );

    // Let the final snapshot publish land.
    let mut snapshots = handle.watch_snapshots();
    let snapshot = snapshots
        .wait_for(|s| s.flow.stage == Stage::Complete)
        .await?
        .clone();
    assert_eq!(snapshot.flow.progress, 100);
    assert!(snapshot.transcript().is_some());
    assert_eq!(
        snapshot.visible_count,
        snapshot.scenario.as_ref().unwrap().activity.len()
    );

    handle.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn exit_when_complete_stops_the_loop() -> TestResult {
    init_tracing();

    let (handle, join) = spawn_session(
        fixture_registry(),
        SessionOptions {
            exit_when_complete: true,
        },
    );

    handle.submit_prompt("notes").await?;

    // The loop exits on its own once the run completes.
    join.await??;

    // Further events have nowhere to go.
    let err = handle.submit_prompt("dashboard").await.unwrap_err();
    assert!(matches!(err, StagehandError::SessionClosed));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn second_prompt_mid_run_completes_once() -> TestResult {
    init_tracing();

    let (handle, _join) = spawn_session(fixture_registry(), SessionOptions::default());
    let mut notices = handle.subscribe();

    handle.submit_prompt("email inbox").await?;
    // Let the first run get partway in (THINKING lasts 1.2s).
    tokio::time::sleep(Duration::from_millis(2000)).await;

    handle.submit_prompt("dashboard").await?;

    let mut completions = 0u32;
    let mut last_stages = Vec::new();
    loop {
        match notices.recv().await? {
            SessionNotice::StageChanged(entry) => last_stages.push(entry.stage),
            SessionNotice::RunCompleted { .. } => {
                completions += 1;
                break;
            }
        }
    }

    // Give any stray callbacks from the superseded run time to surface.
    tokio::time::sleep(Duration::from_secs(10)).await;
    while let Ok(notice) = notices.try_recv() {
        if matches!(notice, SessionNotice::RunCompleted { .. }) {
            completions += 1;
        }
    }

    assert_eq!(completions, 1);
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.scenario.as_ref().unwrap().id, "dashboard");
    assert_eq!(snapshot.flow.stage, Stage::Complete);

    handle.shutdown().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn reset_mid_run_goes_idle_and_stays_idle() -> TestResult {
    init_tracing();

    let (handle, _join) = spawn_session(fixture_registry(), SessionOptions::default());
    let mut snapshots = handle.watch_snapshots();

    handle.submit_prompt("notes").await?;
    snapshots.wait_for(|s| s.flow.is_active).await?;

    handle.reset().await?;
    snapshots.wait_for(|s| s.flow.stage == Stage::Idle).await?;

    // No timer from the abandoned run may revive the flow.
    tokio::time::sleep(Duration::from_secs(30)).await;
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.flow.stage, Stage::Idle);
    assert!(snapshot.scenario.is_none());
    assert_eq!(snapshot.visible_count, 0);

    handle.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn shell_drives_fake_timer_backend() -> TestResult {
    init_tracing();

    let (event_tx, event_rx) = mpsc::channel::<SessionEvent>(16);
    let (notice_tx, _) = broadcast::channel(16);
    let (snapshot_tx, mut snapshot_rx) = watch::channel(SessionSnapshot::default());

    let (timers, log) = FakeTimerBackend::new();
    let core = CoreSession::new(fixture_registry(), SessionOptions::default());
    let session = Session::new(core, event_rx, timers, notice_tx, snapshot_tx);
    let join = tokio::spawn(session.run());

    event_tx
        .send(SessionEvent::PromptSubmitted {
            prompt: "dashboard".to_string(),
        })
        .await?;
    snapshot_rx.wait_for(|s| s.flow.stage == Stage::Thinking).await?;

    // The shell armed exactly one dwell timer for the new run.
    let pending = {
        let log = log.lock().unwrap();
        assert_eq!(log.pending.len(), 1);
        log.pending[0]
    };

    // Fire it by hand; the shell advances and re-arms.
    event_tx
        .send(SessionEvent::TimerFired {
            kind: pending.kind,
            run_id: pending.run_id,
        })
        .await?;
    snapshot_rx.wait_for(|s| s.flow.stage == Stage::Planning).await?;
    assert_eq!(snapshot_rx.borrow().visible_count, 1);

    event_tx.send(SessionEvent::ShutdownRequested).await?;
    join.await??;

    // The loop cancels everything on the way out.
    assert!(log.lock().unwrap().pending.is_empty());
    Ok(())
}
