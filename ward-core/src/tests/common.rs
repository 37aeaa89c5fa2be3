use crate::Config;
use crate::store::Store;
use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(data_dir: PathBuf, reference_time: Option<NaiveDateTime>) -> Config {
    Config {
        data_dir,
        reference_time: reference_time.unwrap_or_else(default_reference_time),
        boundary_date_format: "%Y-%m-%d".to_string(),
        display_datetime_format: "%Y-%m-%d %H:%M".to_string(),
        input_datetime_formats: None,
    }
}

/// A store rooted in a fresh temp dir. Keep the `TempDir` alive for the test.
pub fn mk_store() -> (Store, TempDir) {
    let tmp = tempdir().unwrap();
    let store = Store::open(&tmp.path().join("ward")).unwrap();
    (store, tmp)
}

/// Sunday 10 March 2024, 09:00.
pub fn default_reference_time() -> NaiveDateTime {
    at(2024, 3, 10, 9, 0)
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}
