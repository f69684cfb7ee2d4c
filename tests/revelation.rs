// tests/revelation.rs

mod common;
use crate::common::{init_tracing, CoreHarness};

use stagehand::engine::{SessionOptions, TimerKind};
use stagehand::flow::Stage;
use stagehand::reveal::{FILE_CARD_REVEAL_INTERVAL, TEXT_REVEAL_INTERVAL};
use stagehand::types::FileAction;
use stagehand_test_utils::builders::{RegistryBuilder, ScenarioBuilder};

fn one_scenario_harness(scenario: stagehand::registry::Scenario) -> CoreHarness {
    let registry = RegistryBuilder::new().scenario(scenario).build_arc();
    CoreHarness::new(registry, SessionOptions::default())
}

#[test]
fn items_reveal_in_authored_order() {
    init_tracing();
    let mut harness = one_scenario_harness(
        ScenarioBuilder::new("s")
            .text_item("a", "first")
            .text_item("b", "second")
            .text_item("c", "third")
            .done_item("d", "done")
            .build(),
    );

    harness.submit("anything");
    // THINKING: nothing revealed yet.
    assert_eq!(harness.core.snapshot().visible_count, 0);

    // Advance into PLANNING: the first item appears immediately.
    harness.fire(TimerKind::Stage);
    assert_eq!(harness.core.snapshot().visible_count, 1);
    assert_eq!(harness.core.snapshot().visible_items()[0].id(), "a");

    harness.fire(TimerKind::Reveal);
    assert_eq!(harness.core.snapshot().visible_count, 2);
    assert_eq!(harness.core.snapshot().visible_items()[1].id(), "b");
}

#[test]
fn final_item_withheld_until_completion() {
    init_tracing();
    let mut harness = one_scenario_harness(
        ScenarioBuilder::new("s")
            .text_item("a", "first")
            .text_item("b", "second")
            .done_item("d", "done")
            .build(),
    );

    harness.submit("anything");
    harness.fire(TimerKind::Stage); // PLANNING, reveal begins

    // Exhaust the reveal stream: it stops one short of the full list.
    while harness.pending_of(TimerKind::Reveal).is_some() {
        harness.fire(TimerKind::Reveal);
    }
    assert_eq!(harness.core.snapshot().visible_count, 2);

    harness.run_to_completion();
    let snapshot = harness.core.snapshot();
    assert_eq!(snapshot.flow.stage, Stage::Complete);
    assert_eq!(snapshot.visible_count, 3);
    assert_eq!(snapshot.visible_items()[2].id(), "d");
}

#[test]
fn completion_snaps_stream_even_when_reveals_lag() {
    init_tracing();
    // Many file cards: their long reveal dwell means the stage sequence
    // finishes long before the stream would.
    let mut builder = ScenarioBuilder::new("s").text_item("t", "starting");
    for i in 0..10 {
        builder = builder.file_item(
            &format!("f{i}"),
            FileAction::Add,
            &format!("src/file{i}.tsx"),
            "A file",
        );
    }
    let mut harness = one_scenario_harness(builder.done_item("d", "done").build());

    harness.submit("anything");
    // Drive only stage timers; never let a reveal tick fire.
    while harness.pending_of(TimerKind::Stage).is_some() {
        harness.fire(TimerKind::Stage);
    }

    let snapshot = harness.core.snapshot();
    assert_eq!(snapshot.flow.stage, Stage::Complete);
    assert_eq!(snapshot.visible_count, 12);
    // The reveal timer was cancelled along with the snap.
    assert!(harness.pending_of(TimerKind::Reveal).is_none());
}

#[test]
fn reveal_delay_depends_on_next_item_type() {
    init_tracing();
    let mut harness = one_scenario_harness(
        ScenarioBuilder::new("s")
            .text_item("a", "first")
            .file_item("f", FileAction::Add, "app/page.tsx", "Main page")
            .text_item("b", "after the file")
            .done_item("d", "done")
            .build(),
    );

    harness.submit("anything");
    harness.fire(TimerKind::Stage); // PLANNING

    // Next up is the file card: the longer interval applies.
    let pending = harness.pending_of(TimerKind::Reveal).unwrap();
    assert_eq!(pending.delay, FILE_CARD_REVEAL_INTERVAL);

    harness.fire(TimerKind::Reveal);
    // Next up is a text line again.
    let pending = harness.pending_of(TimerKind::Reveal).unwrap();
    assert_eq!(pending.delay, TEXT_REVEAL_INTERVAL);
}

#[test]
fn single_item_scenario_never_streams_early() {
    init_tracing();
    let mut harness =
        one_scenario_harness(ScenarioBuilder::new("s").done_item("d", "done").build());

    harness.submit("anything");
    harness.fire(TimerKind::Stage); // PLANNING

    // Revealing the only item would show the done marker mid-run.
    assert_eq!(harness.core.snapshot().visible_count, 0);
    assert!(harness.pending_of(TimerKind::Reveal).is_none());

    harness.run_to_completion();
    assert_eq!(harness.core.snapshot().visible_count, 1);
}

#[test]
fn visible_items_are_always_a_prefix() {
    init_tracing();
    let mut harness = one_scenario_harness(
        ScenarioBuilder::new("s")
            .text_item("a", "one")
            .text_item("b", "two")
            .file_item("f", FileAction::Edit, "lib/data.ts", "Data layer")
            .done_item("d", "done")
            .build(),
    );

    harness.submit("anything");
    let ids = ["a", "b", "f", "d"];
    let mut last_count = 0;

    loop {
        let snapshot = harness.core.snapshot();
        assert!(snapshot.visible_count >= last_count);
        for (i, item) in snapshot.visible_items().iter().enumerate() {
            assert_eq!(item.id(), ids[i]);
        }
        last_count = snapshot.visible_count;

        if harness.pending_of(TimerKind::Reveal).is_some() {
            harness.fire(TimerKind::Reveal);
        } else if harness.pending_of(TimerKind::Stage).is_some() {
            harness.fire(TimerKind::Stage);
        } else {
            break;
        }
    }

    assert_eq!(harness.core.snapshot().visible_count, 4);
}
