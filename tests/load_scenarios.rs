use std::fs;

use indoc::indoc;
use serde_json::{Value, json};
use snel_shape::command::types::LoadRequest;
use snel_shape::engine::core::CancellationToken;
use snel_shape::engine::core::record::Record;
use snel_shape::engine::query::{
    DataSource, MemoryProvider, ProviderCapabilities, QueryExecutor, load,
};
use snel_shape::shared::config::EngineConfig;

fn fixture_records() -> Vec<Record> {
    let raw = fs::read_to_string("tests/data/summary_records.json").unwrap();
    serde_json::from_str(&raw).unwrap()
}

async fn run(source: &DataSource, raw_request: &str) -> Value {
    let request = LoadRequest::from_json(raw_request).unwrap();
    let executor = QueryExecutor::new(EngineConfig::default());
    let result = load(source, &request, &executor, &CancellationToken::new())
        .await
        .unwrap();
    serde_json::to_value(&result).unwrap()
}

const GROUPED: &str = indoc! {r#"
    {
      "group": [
        { "selector": "Group1", "isExpanded": true },
        { "selector": "Group2", "isExpanded": false }
      ],
      "groupSummary": [
        { "selector": "Value", "summaryType": "count" },
        { "selector": "Value", "summaryType": "min" },
        { "selector": "Value", "summaryType": "max" },
        { "selector": "Value", "summaryType": "sum" },
        { "selector": "Value", "summaryType": "avg" }
      ],
      "totalSummary": [
        { "selector": "Value", "summaryType": "count" },
        { "selector": "Value", "summaryType": "min" },
        { "selector": "Value", "summaryType": "max" },
        { "selector": "Value", "summaryType": "sum" },
        { "selector": "Value", "summaryType": "avg" }
      ],
      "requireTotalCount": true,
      "requireGroupCount": true
    }
"#};

#[tokio::test]
async fn grouped_summary_end_to_end() {
    let expected = json!({
        "data": [
            {
                "key": "A",
                "count": 4,
                "summary": [4, 1, 5, 9, 3],
                "items": [
                    { "key": "A", "count": 2, "summary": [2, 1, 1, 1, 1], "items": null },
                    { "key": "B", "count": 2, "summary": [2, 3, 5, 8, 4], "items": null }
                ]
            },
            {
                "key": "B",
                "count": 1,
                "summary": [1, null, null, 0, null],
                "items": [
                    { "key": "A", "count": 1, "summary": [1, null, null, 0, null], "items": null }
                ]
            }
        ],
        "summary": [5, 1, 5, 9, 3],
        "totalCount": 5,
        "groupCount": 2
    });

    let local = DataSource::memory(fixture_records());
    assert_eq!(run(&local, GROUPED).await, expected);

    let pushed = DataSource::provider(MemoryProvider::new(fixture_records()));
    assert_eq!(run(&pushed, GROUPED).await, expected);

    let fetch_only = DataSource::provider(
        MemoryProvider::new(fixture_records()).with_capabilities(ProviderCapabilities::none()),
    );
    assert_eq!(run(&fetch_only, GROUPED).await, expected);
}

#[tokio::test]
async fn flat_filtered_load_end_to_end() {
    let request = indoc! {r#"
        {
          "filter": [["Group1", "=", "A"], "and", ["!", ["Value", "=", null]]],
          "totalSummary": [{ "selector": "Value", "summaryType": "avg" }],
          "requireTotalCount": true
        }
    "#};
    let result = run(&DataSource::memory(fixture_records()), request).await;
    assert_eq!(result["totalCount"], json!(3));
    assert_eq!(result["summary"], json!([3]));
    assert_eq!(result["data"].as_array().map(|d| d.len()), Some(3));
    assert!(result.get("groupCount").is_none());
}
