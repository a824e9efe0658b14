use crate::test_helpers::factory::Factory;
use serde_json::json;

#[test]
fn test_record_factory() {
    let record = Factory::record()
        .with("Name", "John")
        .with("Address", json!({ "City": "Paris" }))
        .create();

    assert_eq!(record.payload()["Name"], json!("John"));
    assert_eq!(record.payload()["Address"]["City"], json!("Paris"));
}

#[test]
fn test_record_factory_list_indexes_records() {
    let records = Factory::record().with("kind", "row").create_list(3);
    let indexes: Vec<_> = records.iter().map(|r| r.payload()["index"].clone()).collect();
    assert_eq!(indexes, vec![json!(0), json!(1), json!(2)]);
    assert!(records.iter().all(|r| r.payload()["kind"] == json!("row")));
}
