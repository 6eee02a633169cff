use std::fs;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use smogview::{load, CachedLoader, LoadError};
use tempfile::TempDir;

const HEADER: &str =
    "No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station";

fn csv_with_rows(rows: &[&str]) -> String {
    let mut out = String::from(HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(row);
    }
    out.push('\n');
    out
}

fn three_row_csv() -> String {
    csv_with_rows(&[
        "1,2016,3,1,0,12.5,20.0,3.1,15.0,800.0,60.2,10.0,1012.0,-2.0,0.0,NW,2.1,Tiantan",
        "2,2016,3,1,1,NaN-ish text,22.0,3.4,16.0,810.0,58.9,10.2,1012.5,-1.8,0.0,NNW,2.4,Tiantan",
        "3,2016,3,1,2,9.8,18.5,2.9,14.2,790.0,61.0,10.4,1011.8,-1.5,0.0,N,2.0,Changping",
    ])
}

#[test]
fn load_preserves_every_row() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("air.csv");
    fs::write(&path, three_row_csv()).expect("write fixture");

    let table = load(&path).expect("load should succeed");
    assert_eq!(table.len(), 3);
    assert_eq!(table.stations, vec!["Changping", "Tiantan"]);
}

#[test]
fn missing_columns_are_reported_together() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("air.csv");
    fs::write(
        &path,
        "No,year,month,day,hour,PM10,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,WSPM,station\n",
    )
    .expect("write fixture");

    let err = load(&path).expect_err("schema check should fail");
    match &err {
        LoadError::Schema { missing } => {
            assert_eq!(
                missing,
                &vec!["PM2.5".to_string(), "SO2".to_string(), "wd".to_string()]
            );
        }
        other => panic!("expected Schema error, got {other:?}"),
    }
    // The message names every missing column for display.
    let message = err.to_string();
    assert!(message.contains("PM2.5"));
    assert!(message.contains("SO2"));
    assert!(message.contains("wd"));
}

#[test]
fn nonexistent_location_is_not_found() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("nope.csv");

    let err = load(&path).expect_err("missing file should fail");
    match err {
        LoadError::NotFound { path: reported } => assert_eq!(reported, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn loading_twice_yields_identical_tables() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("air.csv");
    fs::write(&path, three_row_csv()).expect("write fixture");

    let first = load(&path).expect("first load");
    let second = load(&path).expect("second load");
    assert_eq!(first, second);
}

#[test]
fn cached_loader_reuses_parse_until_content_changes() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("air.csv");
    fs::write(&path, three_row_csv()).expect("write fixture");

    let mut loader = CachedLoader::new();
    let first = loader.load(&path).expect("first load");
    let second = loader.load(&path).expect("second load");
    assert!(Arc::ptr_eq(&first, &second));

    // Same path, new content: the fingerprint changes and the file is
    // re-parsed.
    fs::write(
        &path,
        csv_with_rows(&[
            "1,2016,3,1,0,12.5,20.0,3.1,15.0,800.0,60.2,10.0,1012.0,-2.0,0.0,NW,2.1,Tiantan",
        ]),
    )
    .expect("rewrite fixture");

    let third = loader.load(&path).expect("third load");
    assert!(!Arc::ptr_eq(&second, &third));
    assert_eq!(third.len(), 1);
}

#[test]
fn nan_ish_text_nulls_only_that_cell() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("air.csv");
    fs::write(&path, three_row_csv()).expect("write fixture");

    let table = load(&path).expect("load should succeed");
    assert_eq!(table.len(), 3);
    assert_eq!(table.observations[0].pm2_5, Some(12.5));
    assert_eq!(table.observations[1].pm2_5, None);
    assert_eq!(table.observations[2].pm2_5, Some(9.8));
    // Neighbouring cells in the coerced row are untouched.
    assert_eq!(table.observations[1].pm10, Some(22.0));
    assert_eq!(table.observations[1].wd.as_deref(), Some("NNW"));
}
