use super::export::{to_csv_bytes, DERIVED_COLUMNS};
use super::html::render_table;
use super::storage::ExportStore;
use crate::logic::analysis::{analyze_csv, Analysis};
use crate::logic::dataset::ColumnSchema;
use crate::logic::envelope::EnvelopeConfig;
use crate::logic::run::RunMetadata;
use chrono::{NaiveDate, NaiveTime};
use std::fs;
use std::io::ErrorKind;
use std::time::Duration;
use tempfile::tempdir;

fn sample_analysis() -> Analysis {
    let file = "\
Section Time,TPS (Main),Lambda <A>,Fuel Pressure,IAT,ECT,Comment
0.0,99,0.86,340,30,30,\"start, clean\"
0.3,99,0.95,340,30,30,rich
0.4,99,x,340,30,30,sensor glitch
0.9,99,0.95,340,30,30,still rich
1.0,60,0.95,340,30,30,lift
";
    let meta = RunMetadata::new(
        NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
        NaiveTime::from_hms_opt(11, 15, 0).unwrap(),
        "7",
        20.0,
    );
    analyze_csv(
        file.as_bytes(),
        0,
        meta,
        &ColumnSchema::default(),
        &EnvelopeConfig::default(),
    )
    .unwrap()
}

#[test]
fn test_csv_export_keeps_original_columns_and_evaluated_rows() {
    let analysis = sample_analysis();
    let text = String::from_utf8(to_csv_bytes(&analysis).unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    // header + 4 evaluated rows (glitch row dropped)
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Section Time,TPS (Main),Lambda <A>"));
    assert!(lines[0].ends_with(&DERIVED_COLUMNS.join(",")));
    assert!(lines[1].starts_with("0.0,99,0.86,340,30,30,\"start, clean\",0.8600,true"));
    // streak 0.3 s + 0.6 s gap over the dropped row
    assert!(lines[3].starts_with("0.9,"));
    assert!(lines[3].ends_with("0.600,0.900,true,false"));
    assert!(!text.contains("sensor glitch"));
}

#[test]
fn test_html_preview_escapes_and_limits_rows() {
    let analysis = sample_analysis();

    let html = render_table(&analysis, 2);
    assert!(html.contains("<th>Lambda &lt;A&gt;</th>"));
    assert_eq!(html.matches("<tr").count(), 3, "header row + 2 data rows");
    assert!(!html.contains("table-danger"));

    let full = render_table(&analysis, 60);
    assert_eq!(full.matches("table-danger").count(), 1);
    assert!(full.contains("<tr class=\"table-danger\" title=\"mixture\">"));
}

#[test]
fn test_export_store_save_load_remove() {
    let dir = tempdir().unwrap();
    let store = ExportStore::from_path(dir.path().join("exports")).unwrap();
    let analysis = sample_analysis();

    let path = store.save(&analysis).unwrap();
    assert!(path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .contains(&analysis.id.to_string()));

    let bytes = store.load(analysis.id).unwrap();
    assert_eq!(bytes, to_csv_bytes(&analysis).unwrap());

    store.remove(analysis.id).unwrap();
    assert_eq!(
        store.load(analysis.id).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn test_prune_removes_only_expired_exports() {
    let dir = tempdir().unwrap();
    let store = ExportStore::from_path(dir.path().to_path_buf()).unwrap();
    let analysis = sample_analysis();
    store.save(&analysis).unwrap();
    fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

    // Fresh file survives a long TTL
    assert_eq!(store.prune_older_than(Duration::from_secs(3600)).unwrap(), 0);
    assert!(store.load(analysis.id).is_ok());

    // Zero TTL expires everything we own, nothing else
    assert_eq!(store.prune_older_than(Duration::ZERO).unwrap(), 1);
    assert_eq!(
        store.load(analysis.id).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert!(dir.path().join("notes.txt").exists());
}
