use crate::test_helpers::factory::Factory;
use serde_json::json;

#[test]
fn test_summary_fixture_factory() {
    let fixture = Factory::summary_fixture().collapsed();
    let records = fixture.records();
    let request = fixture.request();

    assert_eq!(records.len(), 5);
    assert_eq!(records[1].payload()["Value"], json!(1));
    assert_eq!(request.group.len(), 2);
    assert!(request.group[0].is_expanded);
    assert!(!request.group[1].is_expanded);
    assert_eq!(request.group_summary.len(), 5);
    assert_eq!(request.total_summary.len(), 5);
    assert!(request.filter.is_none());
}
