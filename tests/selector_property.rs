// tests/selector_property.rs

mod common;
use crate::common::fixture_registry;

use proptest::prelude::*;

use stagehand::registry::extract_mentions;

proptest! {
    // Selection must be total: any prompt, however mangled, resolves to some
    // registered scenario without panicking.
    #[test]
    fn selection_is_total(prompt in ".{0,200}") {
        let registry = fixture_registry();
        let selected = registry.select(&prompt);
        prop_assert!(registry.get(&selected.id).is_some());
    }

    // Same prompt, same registry, same answer.
    #[test]
    fn selection_is_a_pure_function(prompt in ".{0,200}") {
        let registry = fixture_registry();
        let first = registry.select(&prompt);
        let second = registry.select(&prompt);
        prop_assert_eq!(&first.id, &second.id);
    }

    // A known mention wins no matter what surrounds it.
    #[test]
    fn mention_override_beats_any_noise(
        prefix in "[a-z ]{0,60}",
        suffix in "[a-z ]{0,60}",
    ) {
        let registry = fixture_registry();
        let prompt = format!("{prefix} @gmail {suffix}");
        let selected = registry.select(&prompt);
        prop_assert_eq!(&selected.id, "inbox");
    }

    // Extracted mentions are exactly the alphanumeric runs following '@'.
    #[test]
    fn extracted_mentions_are_wellformed(text in ".{0,200}") {
        for mention in extract_mentions(&text) {
            prop_assert!(!mention.is_empty());
            prop_assert!(mention
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }
    }

    // Prompts with no keywords and no known mention land on the default.
    #[test]
    fn unmatched_prompts_get_the_default(prompt in "[0-9 ]{0,60}") {
        let registry = fixture_registry();
        let selected = registry.select(&prompt);
        prop_assert_eq!(&selected.id, "dashboard");
    }
}
