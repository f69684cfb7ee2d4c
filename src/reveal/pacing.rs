// src/reveal/pacing.rs

//! Reveal pacing.
//!
//! The delay before revealing the next activity item depends on the *next*
//! item's type, not the one just revealed: a file-change card needs more
//! dwell time for a reader to absorb than a line of prose.

use std::time::Duration;

use crate::registry::ActivityItem;

/// Delay before revealing the next narration line.
pub const TEXT_REVEAL_INTERVAL: Duration = Duration::from_millis(1100);

/// Delay before revealing the next file-change card.
pub const FILE_CARD_REVEAL_INTERVAL: Duration = Duration::from_millis(3600);

/// Delay to wait before revealing `items[next_index]`.
pub fn reveal_delay(items: &[ActivityItem], next_index: usize) -> Duration {
    match items.get(next_index) {
        Some(item) if item.is_file() => FILE_CARD_REVEAL_INTERVAL,
        _ => TEXT_REVEAL_INTERVAL,
    }
}
