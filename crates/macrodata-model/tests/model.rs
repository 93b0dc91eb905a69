//! Tests for macrodata-model types.

use chrono::NaiveDate;
use macrodata_model::{
    ClassificationResult, DataSource, Frequency, MatchCandidate, Resolution, ResolutionOutcome,
    UNAVAILABLE_REASONING, VariableEntry,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn unavailable_classification_defaults_to_historical() {
    let result = ClassificationResult::unavailable();
    assert_eq!(result.source, DataSource::Historical);
    assert_eq!(result.reasoning, UNAVAILABLE_REASONING);
    assert!(result.confidence.is_none());
    assert!(result.is_fallback());
}

#[test]
fn confidence_is_clamped() {
    let result = ClassificationResult::new(DataSource::Forecast, "mentions greenbook")
        .with_confidence(1.7);
    assert_eq!(result.confidence, Some(1.0));
}

#[test]
fn upstream_id_falls_back_to_code() {
    let entry = VariableEntry::new("UNRATE", "Unemployment Rate", "", DataSource::Historical);
    assert_eq!(entry.upstream_id(), "UNRATE");
    let entry = entry.with_series_id("UNRATE2");
    assert_eq!(entry.upstream_id(), "UNRATE2");
}

#[test]
fn source_deserializes_from_provider_alias() {
    let source: DataSource = serde_json::from_str("\"greenbook\"").unwrap();
    assert_eq!(source, DataSource::Forecast);
    let source: DataSource = serde_json::from_str("\"historical\"").unwrap();
    assert_eq!(source, DataSource::Historical);
}

#[test]
fn resolution_serializes_outcome_tag() {
    let entry = VariableEntry::new("real_gdp", "Real GDP", "", DataSource::Historical);
    let resolution = Resolution {
        query: "real gdp".to_string(),
        classification: ClassificationResult::new(DataSource::Historical, "no forecast terms"),
        outcome: ResolutionOutcome::Resolved {
            candidate: MatchCandidate::new(entry, 1.0),
        },
    };
    let json = serde_json::to_string(&resolution).expect("serialize resolution");
    assert!(json.contains("\"outcome\":\"resolved\""));
    assert!(json.contains("\"real_gdp\""));
    assert_eq!(resolution.reasoning(), "no forecast terms");
}

#[test]
fn no_match_resolution_round_trips_through_json() {
    let resolution = Resolution {
        query: "xyz123 nonsense".to_string(),
        classification: ClassificationResult::unavailable(),
        outcome: ResolutionOutcome::no_match("xyz123 nonsense"),
    };
    let json = serde_json::to_string(&resolution).expect("serialize resolution");
    assert_eq!(json.matches("\"query\"").count(), 1, "{json}");
    assert!(json.contains("\"outcome\":\"no_match\""));
    assert!(json.contains("\"unmatched_query\":\"xyz123 nonsense\""));

    let parsed: Resolution = serde_json::from_str(&json).expect("parse resolution");
    assert_eq!(parsed, resolution);
}

#[test]
fn resolved_resolution_round_trips_through_json() {
    let entry = VariableEntry::new("cpi", "Consumer Price Index", "", DataSource::Historical)
        .with_series_id("CPIAUCSL")
        .with_aliases(["inflation"]);
    let resolution = Resolution {
        query: "inflation".to_string(),
        classification: ClassificationResult::new(DataSource::Historical, "no forecast terms")
            .with_confidence(0.6),
        outcome: ResolutionOutcome::Resolved {
            candidate: MatchCandidate::new(entry, 1.0).with_explanation("exact alias"),
        },
    };
    let json = serde_json::to_string_pretty(&resolution).expect("serialize resolution");
    let parsed: Resolution = serde_json::from_str(&json).expect("parse resolution");
    assert_eq!(parsed, resolution);
}

#[test]
fn aliases_are_omitted_when_empty() {
    let entry = VariableEntry::new("gdp", "Nominal GDP", "", DataSource::Historical);
    let json = serde_json::to_string(&entry).expect("serialize entry");
    assert!(!json.contains("aliases"));
    let entry: VariableEntry = serde_json::from_str(&json).expect("parse entry");
    assert!(entry.aliases.is_empty());
}

#[test]
fn no_match_has_no_entry() {
    let outcome = ResolutionOutcome::no_match("xyz");
    assert!(!outcome.is_resolved());
    assert!(outcome.resolved_entry().is_none());
    assert_eq!(outcome.kind(), "no_match");
}

#[test]
fn quarterly_dates_move_to_quarter_end() {
    let q = Frequency::Quarterly;
    assert_eq!(q.period_end(date(2024, 1, 1)), date(2024, 3, 31));
    assert_eq!(q.period_end(date(2024, 4, 1)), date(2024, 6, 30));
    assert_eq!(q.period_end(date(2024, 10, 1)), date(2024, 12, 31));
}

#[test]
fn monthly_dates_move_to_month_end() {
    let m = Frequency::Monthly;
    assert_eq!(m.period_end(date(2024, 2, 1)), date(2024, 2, 29));
    assert_eq!(m.period_end(date(2023, 12, 1)), date(2023, 12, 31));
    assert_eq!(Frequency::Daily.period_end(date(2023, 12, 1)), date(2023, 12, 1));
}

#[test]
fn frequency_parses_fred_codes() {
    assert_eq!("Q".parse::<Frequency>().unwrap(), Frequency::Quarterly);
    assert_eq!("sa".parse::<Frequency>().unwrap(), Frequency::SemiAnnual);
    assert!("X".parse::<Frequency>().is_err());
}
