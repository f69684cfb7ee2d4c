// src/registry/select.rs

//! Prompt → scenario matching.
//!
//! Selection is a pure function of `(prompt, registry)`:
//! 1. an explicit `@mention` matching a scenario's mention tags wins
//!    outright (first matching scenario in registry order),
//! 2. otherwise the scenario with the strictly highest keyword score wins
//!    (ties resolve to registry order),
//! 3. otherwise the registry's default scenario.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::debug;

use super::model::Scenario;
use super::ScenarioRegistry;

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([A-Za-z0-9_]+)").expect("mention regex is valid"));

/// Extract all `@token` workflow mentions from user text.
///
/// The pattern deliberately requires no word boundary before the `@`, so a
/// mid-word `@` run like the `example` in `email@example.com` is extracted
/// too. Scenario mention tags are what filter those out downstream.
pub fn extract_mentions(text: &str) -> Vec<String> {
    MENTION_RE
        .captures_iter(text)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Count how many of the scenario's keywords occur as substrings of the
/// lowercased prompt. Keywords are stored lowercased at construction time.
fn keyword_score(normalized_prompt: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .filter(|kw| normalized_prompt.contains(kw.as_str()))
        .count()
}

pub(super) fn select_scenario(registry: &ScenarioRegistry, prompt: &str) -> Arc<Scenario> {
    let mentions = extract_mentions(prompt);

    // Mention match is an exact override, never subject to scoring.
    if !mentions.is_empty() {
        for scenario in registry.scenarios() {
            if mentions.iter().any(|m| scenario.mentions.contains(m)) {
                debug!(
                    scenario = %scenario.id,
                    ?mentions,
                    "scenario selected by mention override"
                );
                return Arc::clone(scenario);
            }
        }
    }

    let normalized = prompt.to_lowercase();
    let mut best: Option<(&Arc<Scenario>, usize)> = None;

    for scenario in registry.scenarios() {
        let score = keyword_score(&normalized, &scenario.keywords);
        // Strictly-greater comparison keeps ties on the earlier scenario.
        if score > 0 && best.map_or(true, |(_, s)| score > s) {
            best = Some((scenario, score));
        }
    }

    match best {
        Some((scenario, score)) => {
            debug!(scenario = %scenario.id, score, "scenario selected by keyword score");
            Arc::clone(scenario)
        }
        None => {
            let fallback = registry.default_scenario();
            debug!(scenario = %fallback.id, "no match; falling back to default scenario");
            fallback
        }
    }
}
