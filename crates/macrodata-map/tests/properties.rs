//! Property tests for the fuzzy matcher.

use macrodata_map::FuzzyMatcher;
use macrodata_model::{DataSource, VariableEntry};
use proptest::prelude::*;

fn entry(name: &str, description: &str) -> VariableEntry {
    VariableEntry::new("code", name, description, DataSource::Historical)
}

proptest! {
    #[test]
    fn scores_stay_in_unit_interval(
        query in "[a-zA-Z0-9 ,.-]{0,40}",
        name in "[a-zA-Z0-9 ]{0,30}",
        description in "[a-zA-Z0-9 ,]{0,60}",
    ) {
        let score = FuzzyMatcher::new().score(&query, &entry(&name, &description));
        prop_assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
    }

    #[test]
    fn display_name_matches_itself(name in "[A-Za-z][A-Za-z0-9 ]{0,30}") {
        let score = FuzzyMatcher::new().score(&name, &entry(&name, "unrelated words"));
        prop_assert_eq!(score, 1.0);
    }

    #[test]
    fn description_matches_itself(
        name in "[A-Za-z]{1,12}",
        description in "[A-Za-z][A-Za-z0-9 ,]{0,60}",
    ) {
        let score = FuzzyMatcher::new().score(&description, &entry(&name, &description));
        prop_assert_eq!(score, 1.0);
    }

    #[test]
    fn alias_matches_itself(alias in "[A-Za-z][A-Za-z0-9 ]{0,30}") {
        let target = entry("Unrelated Name", "unrelated words").with_aliases([alias.clone()]);
        let score = FuzzyMatcher::new().score(&alias.to_uppercase(), &target);
        prop_assert_eq!(score, 1.0);
    }

    #[test]
    fn case_and_padding_do_not_matter(
        query in "[a-z ]{1,30}",
        name in "[A-Za-z ]{1,30}",
        description in "[a-z ]{0,40}",
        left in " {0,3}",
        right in " {0,3}",
    ) {
        let matcher = FuzzyMatcher::new();
        let target = entry(&name, &description);
        let plain = matcher.score(&query, &target);
        let shouted = matcher.score(&format!("{left}{}{right}", query.to_uppercase()), &target);
        prop_assert_eq!(plain, shouted);
    }
}
