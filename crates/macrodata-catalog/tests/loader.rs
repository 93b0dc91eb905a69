use std::io::Write;

use macrodata_catalog::{CatalogError, load_catalog, parse_catalog, BUILTIN_CATALOG};
use macrodata_model::DataSource;

#[test]
fn builtin_catalog_has_both_sources() {
    let catalog = parse_catalog(BUILTIN_CATALOG, "<built-in>").expect("parse built-in catalog");
    let counts = catalog.sources();
    assert!(counts[&DataSource::Historical] >= 10);
    assert!(counts[&DataSource::Forecast] >= 10);

    let price = catalog.get("gdp.price_gdp").expect("gdp.price_gdp");
    assert_eq!(price.source, DataSource::Forecast);
    assert_eq!(price.upstream_id(), "gPGDP");

    let cpi = catalog.get("cpi").expect("cpi");
    assert!(cpi.aliases.iter().any(|alias| alias == "inflation"));
    let fed_funds = catalog.get("fed_funds").expect("fed_funds");
    assert!(fed_funds.aliases.iter().any(|alias| alias == "interest rate"));

    let real = catalog.get("real_gdp").expect("real_gdp");
    assert_eq!(real.display_name, "Real GDP");
    assert_eq!(real.upstream_id(), "GDPC1");
}

#[test]
fn loads_catalog_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        r#"
[[variable]]
code = "UNRATE"
display_name = "Unemployment Rate"
description = "Civilian unemployment rate"
source = "fred"
"#
    )
    .expect("write catalog");

    let catalog = load_catalog(file.path()).expect("load catalog");
    assert_eq!(catalog.len(), 1);
    let entry = catalog.get("unrate").expect("entry");
    assert_eq!(entry.source, DataSource::Historical);
    assert!(entry.series_id.is_none());
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = load_catalog(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn rejects_duplicate_codes() {
    let text = r#"
[[variable]]
code = "gdp"
display_name = "GDP"
description = ""
source = "historical"

[[variable]]
code = "gdp"
display_name = "GDP again"
description = ""
source = "forecast"
"#;
    let err = parse_catalog(text, "test").unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateCode { code } if code == "gdp"));
}

#[test]
fn rejects_malformed_toml() {
    let err = parse_catalog("[[variable]\ncode = ", "broken").unwrap_err();
    assert!(matches!(err, CatalogError::Toml { ref origin, .. } if origin == "broken"));
}

#[test]
fn rejects_missing_fields() {
    let text = r#"
[[variable]]
code = "gdp"
source = "historical"
"#;
    assert!(matches!(
        parse_catalog(text, "test"),
        Err(CatalogError::Toml { .. })
    ));
}

#[test]
fn rejects_unknown_source() {
    let text = r#"
[[variable]]
code = "eur"
display_name = "Euro"
description = ""
source = "lseg"
"#;
    let err = parse_catalog(text, "test").unwrap_err();
    assert!(matches!(err, CatalogError::UnknownSource { value, .. } if value == "lseg"));
}

#[test]
fn rejects_empty_display_name() {
    let text = r#"
[[variable]]
code = "gdp"
display_name = "  "
description = ""
source = "historical"
"#;
    let err = parse_catalog(text, "test").unwrap_err();
    assert!(matches!(
        err,
        CatalogError::EmptyField {
            index: 0,
            field: "display_name"
        }
    ));
}

#[test]
fn empty_catalog_is_valid() {
    let catalog = parse_catalog("", "empty").expect("empty catalog");
    assert!(catalog.is_empty());
}

#[test]
fn aliases_are_trimmed_and_blank_ones_dropped() {
    let catalog = parse_catalog(
        r#"
[[variable]]
code = "fed_funds"
display_name = "Federal Funds Rate"
description = ""
source = "historical"
aliases = [" interest rate ", "", "fed funds"]
"#,
        "<test>",
    )
    .expect("parse catalog");
    let entry = catalog.get("fed_funds").expect("entry");
    assert_eq!(entry.aliases, ["interest rate", "fed funds"]);
}
