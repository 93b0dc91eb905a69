use std::io::{Cursor, Write};

use chrono::{Duration, NaiveDate, Utc};
use macrodata_fetch::{
    ArchiveFile, DataStore, FetchOutput, FetcherSet, LocalStore, SeriesFetcher, extract_archive,
};
use macrodata_model::{DataSource, Frequency, Observation, SeriesData, VariableEntry};
use zip::write::SimpleFileOptions;

fn fred_entry() -> VariableEntry {
    VariableEntry::new("real_gdp", "Real GDP", "Real gross domestic product", DataSource::Historical)
        .with_series_id("GDPC1")
}

fn greenbook_entry() -> VariableEntry {
    VariableEntry::new(
        "gdp.price_gdp",
        "GDP Price Inflation",
        "Greenbook projection of the GDP price index",
        DataSource::Forecast,
    )
    .with_series_id("gPGDP")
}

fn sample_series() -> SeriesData {
    SeriesData {
        series_id: "GDPC1".to_string(),
        title: "Real Gross Domestic Product".to_string(),
        frequency: Some(Frequency::Quarterly),
        units: "Billions of Chained 2017 Dollars".to_string(),
        observations: vec![
            Observation {
                date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
                value: Some(22679.255),
            },
            Observation {
                date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
                value: None,
            },
        ],
    }
}

fn zip_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    writer.add_directory("docs/", options).unwrap();
    for (name, contents) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[test]
fn writes_fred_csv_and_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path());
    let paths = store
        .save("Real GDP!", &fred_entry(), &FetchOutput::Series(sample_series()))
        .expect("save series");

    let csv_path = dir.path().join("real_gdp__series_id=GDPC1.csv");
    assert_eq!(paths[0], csv_path);
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv, "date,value\n2023-12-31,22679.255\n2024-03-31,\n");

    let metadata = LocalStore::read_metadata(&paths[1]).expect("metadata");
    assert_eq!(metadata.variable, "real_gdp");
    assert_eq!(metadata.provider, "FRED");
    assert_eq!(metadata.frequency.as_deref(), Some("Quarterly"));
    assert_eq!(metadata.files, ["real_gdp__series_id=GDPC1.csv"]);
}

#[test]
fn extracts_archive_files() {
    let data = zip_bytes(&[("gPGDP.csv", "date,value\n"), ("docs/readme.txt", "hello")]);
    let files = extract_archive(&data).expect("extract");
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["gPGDP.csv", "docs/readme.txt"]);
    assert_eq!(files[1].contents, b"hello");
}

#[test]
fn rejects_non_zip_data() {
    assert!(extract_archive(b"not a zip").is_err());
}

#[test]
fn archive_freshness_follows_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path());
    let entry = greenbook_entry();
    let max_age = Duration::days(30);
    assert!(store.is_stale(&entry, max_age));

    let output = FetchOutput::Archive {
        series_id: "gPGDP".to_string(),
        files: vec![ArchiveFile {
            name: "gPGDP.csv".to_string(),
            contents: b"x".to_vec(),
        }],
    };
    let paths = store.save("greenbook gdp price", &entry, &output).unwrap();
    assert!(dir.path().join("greenbook/gPGDP/gPGDP.csv").exists());
    assert!(!store.is_stale(&entry, max_age));

    let meta_path = paths.last().unwrap();
    let mut metadata = LocalStore::read_metadata(meta_path).unwrap();
    metadata.download_date = Utc::now() - Duration::days(45);
    std::fs::write(meta_path, serde_json::to_string(&metadata).unwrap()).unwrap();
    assert!(store.is_stale(&entry, max_age));
}

#[test]
fn historical_entries_are_always_stale() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path());
    assert!(store.is_stale(&fred_entry(), Duration::days(30)));
}

struct StaticFetcher(&'static str);

impl SeriesFetcher for StaticFetcher {
    fn name(&self) -> &str {
        self.0
    }

    fn fetch(&self, entry: &VariableEntry) -> macrodata_fetch::Result<FetchOutput> {
        Ok(FetchOutput::Archive {
            series_id: format!("{}:{}", self.0, entry.code),
            files: Vec::new(),
        })
    }
}

#[test]
fn fetcher_set_dispatches_on_source() {
    let set = FetcherSet::new(
        Box::new(StaticFetcher("fred")),
        Box::new(StaticFetcher("greenbook")),
    );
    assert_eq!(set.for_source(DataSource::Historical).name(), "fred");
    assert_eq!(set.for_source(DataSource::Forecast).name(), "greenbook");
    let FetchOutput::Archive { series_id, .. } = set.fetch(&greenbook_entry()).unwrap() else {
        panic!("expected archive output");
    };
    assert_eq!(series_id, "greenbook:gdp.price_gdp");
}
