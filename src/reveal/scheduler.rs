// src/reveal/scheduler.rs

//! Progressive revelation of a scenario's activity items.
//!
//! The scheduler owns a `visible_count` that grows from 0 to the full item
//! count over one run. It starts streaming when the flow enters PLANNING,
//! paces itself independently of the flow's own stage timers, and always
//! withholds the final item (the "done" marker) until the run completes, at
//! which point [`RevealScheduler::force_complete`] snaps the count to the
//! full length in the same step as the completion notice.

use tracing::debug;

use crate::registry::ActivityItem;
use crate::reveal::pacing;

use std::time::Duration;

/// Visible-count state machine for one run's activity stream.
///
/// Lifecycle is tied 1:1 to a flow run: `load` on start, `begin` on
/// PLANNING, `tick` per reveal timer, `force_complete` on completion,
/// `reset` on abandonment.
#[derive(Debug, Default)]
pub struct RevealScheduler {
    items: Vec<ActivityItem>,
    visible_count: usize,
    streaming: bool,
}

impl RevealScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the activity items for a new run, discarding any previous state.
    pub fn load(&mut self, items: Vec<ActivityItem>) {
        self.items = items;
        self.visible_count = 0;
        self.streaming = false;
    }

    /// Begin streaming: the first item appears immediately (not after the
    /// first delay). Returns the delay before the next reveal, or `None` if
    /// everything up to the withheld final item is already visible.
    ///
    /// Scenarios with fewer than two items never stream: revealing the only
    /// item would show the "done" marker before the run completes, so the
    /// count stays at zero until `force_complete` snaps it.
    pub fn begin(&mut self) -> Option<Duration> {
        if self.items.len() < 2 {
            debug!(
                items = self.items.len(),
                "reveal: too few items to stream; waiting for completion"
            );
            return None;
        }

        self.streaming = true;
        self.visible_count = 1;
        debug!(visible = self.visible_count, "reveal: streaming started");
        self.next_delay()
    }

    /// Reveal one more item. Returns the delay before the following reveal,
    /// or `None` once all but the final item are visible.
    pub fn tick(&mut self) -> Option<Duration> {
        if !self.streaming || self.visible_count >= self.max_before_complete() {
            return None;
        }

        self.visible_count += 1;
        debug!(visible = self.visible_count, "reveal: item revealed");
        self.next_delay()
    }

    /// Delay before revealing `items[visible_count]`, if any reveal remains
    /// before the withheld final item.
    fn next_delay(&self) -> Option<Duration> {
        if self.visible_count < self.max_before_complete() {
            Some(pacing::reveal_delay(&self.items, self.visible_count))
        } else {
            None
        }
    }

    /// All items except the final one, which is withheld until completion.
    fn max_before_complete(&self) -> usize {
        self.items.len().saturating_sub(1)
    }

    /// Snap to fully revealed. Called when the run completes so the flow and
    /// the stream reach their terminal states in the same step.
    pub fn force_complete(&mut self) {
        self.visible_count = self.items.len();
        self.streaming = false;
        debug!(visible = self.visible_count, "reveal: force-completed");
    }

    /// Return to the pre-run state and drop the loaded items.
    pub fn reset(&mut self) {
        self.items.clear();
        self.visible_count = 0;
        self.streaming = false;
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// The currently revealed prefix of the activity stream.
    pub fn visible_items(&self) -> &[ActivityItem] {
        &self.items[..self.visible_count]
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }
}
