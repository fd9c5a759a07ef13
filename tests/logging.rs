//! Checks that recoverable problems are reported through `log` rather than
//! failing the caller.
//!
//! `logtest` captures records process-wide, so every check lives in one test.

use std::fs;

use camino::Utf8Path;
use logtest::Logger;
use parlance::DayPeriods;
use parlance::catalog::{CatalogStore, FluentCatalogStore};
use parlance::rates::{RateCache, RateError, RateSource};
use tempfile::TempDir;

struct Offline;

impl RateSource for Offline {
    fn fetch(&self) -> Result<String, RateError> {
        Err(RateError::Http {
            url: String::from("https://rates.invalid/daily.xml"),
            reason: String::from("offline"),
        })
    }
}

fn drain(logger: &mut Logger) -> Vec<(String, String)> {
    let mut records = Vec::new();
    while let Some(record) = logger.pop() {
        records.push((record.target().to_owned(), record.args().to_string()));
    }
    records
}

fn warned(records: &[(String, String)], target: &str, fragment: &str) -> bool {
    records
        .iter()
        .any(|(logged, message)| logged == target && message.contains(fragment))
}

#[test]
fn recoverable_problems_are_logged() {
    let mut logger = Logger::start();

    let mut periods = DayPeriods::default();
    assert!(!periods.set(Vec::new()));
    assert_eq!(periods, DayPeriods::default());

    let directory = TempDir::new().expect("temporary directory");
    let root = Utf8Path::from_path(directory.path()).expect("UTF-8 temporary path");
    fs::create_dir_all(root.join("de")).expect("language directory");
    fs::write(root.join("de/app.ftl"), "greeting = Hallo\n").expect("valid catalog");
    fs::write(root.join("de/broken.ftl"), "greeting = Hallo\n!!! nonsense\n")
        .expect("broken catalog");
    let store = FluentCatalogStore::from_directory(root).expect("scan catalogs");
    assert!(store.contains("app", "de"));
    assert!(!store.contains("broken", "de"));

    let rates = RateCache::new(Offline, None);
    assert_eq!(rates.convert(1.0, "EUR", "USD"), None);
    let schillings = rates.convert(13.7603, "ATS", "EUR").expect("fixed rate");
    assert!((schillings - 1.0).abs() < 1e-9);

    let records = drain(&mut logger);
    assert!(
        warned(&records, "day_period", "invalid entries"),
        "{records:?}"
    );
    assert!(warned(&records, "catalog", "broken.ftl"), "{records:?}");
    assert!(warned(&records, "rates", "keeping previous rates"), "{records:?}");
}
