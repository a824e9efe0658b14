use crate::test_helpers::factory::Factory;
use serde_json::json;

#[test]
fn test_load_request_factory() {
    let request = Factory::load_request()
        .with_filter(json!(["Value", ">", 1]))
        .with_group("Group1", true)
        .with_group_desc("Group2", false)
        .with_summary("Value", "sum")
        .require_total_count()
        .create();

    assert_eq!(request.group.len(), 2);
    assert!(!request.group[0].desc);
    assert!(request.group[1].desc);
    assert!(!request.group[1].is_expanded);
    assert_eq!(request.group_summary, request.total_summary);
    assert!(request.require_total_count);
    assert!(!request.require_group_count);
    assert!(request.parsed_filter().unwrap().is_some());
}
