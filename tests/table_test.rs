use labelmap::source::{read_csv, read_csv_path};
use labelmap::{IdType, LabelId, LabelMap, LabelMapError, Table};

#[test]
fn csv_labels_only() {
    let data = "label\ncat\ndog\ncat\nbird\n";
    let table = read_csv(data.as_bytes()).unwrap();
    let map = LabelMap::from_table(table, "label", None, IdType::Int).unwrap();

    assert_eq!(map.labels().collect::<Vec<_>>(), ["cat", "dog", "bird"]);
    assert_eq!(map.to_id("bird").unwrap(), LabelId::Int(2));
    assert_eq!(map.source_table().map(Table::len), Some(4));
}

#[test]
fn csv_with_id_column_and_extra_columns() {
    let data = "id,name,description\n10,cat,small\n20,dog,loyal\n";
    let table = read_csv(data.as_bytes()).unwrap();
    let mut map = LabelMap::from_table(table, "name", Some("id"), IdType::Int).unwrap();

    assert_eq!(map.to_id("dog").unwrap(), LabelId::Int(20));
    assert_eq!(map.to_text(10).unwrap(), "cat");
}

#[test]
fn csv_header_only_gives_empty_map() {
    let table = read_csv("label,id\n".as_bytes()).unwrap();
    assert!(table.is_empty());
    let map = LabelMap::from_table(table, "label", Some("id"), IdType::Int).unwrap();
    assert!(map.is_empty());
    assert_eq!(map.next_id(), 0);
}

#[test]
fn csv_file_round_trip_through_disk() {
    let dir = std::env::temp_dir().join(format!("labelmap-table-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("labels.csv");
    std::fs::write(&path, "label,id\ncat,3\ndog,4\n").unwrap();

    let table = read_csv_path(&path).unwrap();
    let map = LabelMap::from_table(table, "label", Some("id"), IdType::Float).unwrap();
    assert_eq!(map.to_id("dog").unwrap(), LabelId::Float(4.0));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn second_load_appends_and_replaces_source() {
    let first = Table::new(["label"]).with_row(["cat"]).unwrap();
    let second = Table::new(["class"])
        .with_row(["dog"])
        .unwrap()
        .with_row(["cat"])
        .unwrap();

    let mut map = LabelMap::from_table(first, "label", None, IdType::Int).unwrap();
    let summary = map
        .populate_from_table(second.clone(), "class", None)
        .unwrap();

    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(map.to_id("dog").unwrap(), LabelId::Int(1));
    assert_eq!(map.source_table(), Some(&second));
}

#[test]
fn loading_marks_reverse_index_dirty() {
    let mut map = LabelMap::new();
    map.add("cat");
    map.to_text(0).unwrap();
    assert!(!map.is_dirty());

    let table = Table::new(["label"]).with_row(["dog"]).unwrap();
    map.populate_from_table(table, "label", None).unwrap();
    assert!(map.is_dirty());
    assert_eq!(map.to_text(1).unwrap(), "dog");
}

#[test]
fn deserialized_ragged_table_is_rejected_by_loader() {
    let table: Table =
        serde_json::from_str(r#"{ "columns": ["label", "id"], "rows": [["cat"]] }"#).unwrap();
    let err = LabelMap::from_table(table, "label", None, IdType::Int).unwrap_err();
    assert!(
        matches!(
            err,
            LabelMapError::RowWidth {
                row: 0,
                expected: 2,
                found: 1
            }
        ),
        "got {:?}",
        err
    );
}
