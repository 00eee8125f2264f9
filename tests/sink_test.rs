//! Tests for the CSV sink: file naming, header and row layout, and output
//! directory creation.

mod common;

use common::place;
use poi_harvest::{CsvSink, PlaceRecord, RecordSink};
use tempfile::TempDir;

#[test]
fn writes_one_csv_per_query_with_expected_columns() {
    let dir = TempDir::new().unwrap();
    let sink = CsvSink::new(dir.path());

    let records = vec![
        PlaceRecord {
            id: "B2094757D06FA7FE4399".to_string(),
            title: "外滩".to_string(),
            latitude: 31.23,
            longitude: 121.49,
        },
        place("B0001", "豫园"),
    ];

    let path = sink.write("上海", &records).unwrap();
    assert_eq!(path.file_name().unwrap(), "上海_place.csv");

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next().unwrap(), "poiid,title,lat,lon");
    assert_eq!(
        lines.next().unwrap(),
        "B2094757D06FA7FE4399,外滩,31.23,121.49"
    );
    assert!(lines.next().unwrap().starts_with("B0001,豫园,"));
    assert!(lines.next().is_none());
}

#[test]
fn empty_record_list_still_leaves_a_well_formed_file() {
    let dir = TempDir::new().unwrap();
    let sink = CsvSink::new(dir.path());

    let path = sink.write("上海崇明区", &[]).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.trim_end(), "poiid,title,lat,lon");
}

#[test]
fn missing_output_directory_is_created() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("place_all").join("run_1");
    let sink = CsvSink::new(&nested);

    let path = sink.write("上海", &[place("B0002", "静安寺")]).unwrap();
    assert!(path.exists());
    assert!(path.starts_with(&nested));
}
