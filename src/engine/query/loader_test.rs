use serde_json::json;

use crate::command::types::LoadRequest;
use crate::engine::core::cancel::CancellationToken;
use crate::engine::errors::{LoadError, ValidationError};
use crate::engine::query::{DataSource, QueryExecutor, load};
use crate::shared::config::EngineConfig;
use crate::test_helpers::factory::Factory;

fn executor() -> QueryExecutor {
    QueryExecutor::new(EngineConfig::default())
}

#[tokio::test]
async fn load_resolves_and_executes_a_wire_request() {
    let raw = r#"{
        "group": [{ "selector": "Group1", "isExpanded": false }],
        "groupSummary": [{ "selector": "Value", "summaryType": "sum" }],
        "totalSummary": [{ "summaryType": "count" }],
        "requireTotalCount": true
    }"#;
    let request = LoadRequest::from_json(raw).unwrap();
    let source = DataSource::memory(Factory::summary_fixture().records());

    let result = load(&source, &request, &executor(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(
        result.to_json(),
        json!({
            "data": [
                { "key": "A", "items": null, "count": 4, "summary": [9] },
                { "key": "B", "items": null, "count": 1, "summary": [0] }
            ],
            "summary": [5],
            "totalCount": 5
        })
    );
}

#[tokio::test]
async fn nonexistent_filter_value_yields_identity_summary() {
    let fixture = Factory::summary_fixture().with_filter(json!(["Group1", "nonexistent"]));
    let source = DataSource::memory(fixture.records());
    let result = load(&source, &fixture.request(), &executor(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&result.summary).unwrap(),
        json!([0, null, null, 0, null])
    );
    assert_eq!(result.groups().map(|g| g.len()), Some(0));
    assert_eq!(result.total_count, Some(0));
}

#[tokio::test]
async fn nonexistent_filter_field_yields_identity_summary() {
    let fixture = Factory::summary_fixture().with_filter(json!(["nonexistent", "=", "A"]));
    let source = DataSource::memory(fixture.records());
    let result = load(&source, &fixture.request(), &executor(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&result.summary).unwrap(),
        json!([0, null, null, 0, null])
    );
    assert_eq!(result.groups().map(|g| g.len()), Some(0));
}

#[tokio::test]
async fn validation_errors_surface_before_execution() {
    let request = Factory::load_request()
        .with_total_summary("Value", "median")
        .create();
    let source = DataSource::memory(Factory::summary_fixture().records());
    let err = load(&source, &request, &executor(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LoadError::Validation(ValidationError::UnknownSummaryType(_))
    ));
}

#[tokio::test]
async fn runtime_type_mismatch_on_mixed_field() {
    let records = vec![
        Factory::record().with("v", 1).create(),
        Factory::record().with("v", "x").create(),
    ];
    let request = Factory::load_request().with_total_summary("v", "avg").create();
    let err = load(
        &DataSource::memory(records),
        &request,
        &executor(),
        &CancellationToken::new(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, LoadError::AggregateTypeMismatch { .. }));
}

#[tokio::test]
async fn cancelled_before_start() {
    let token = CancellationToken::new();
    token.cancel();
    let err = load(
        &DataSource::memory(Vec::new()),
        &LoadRequest::default(),
        &executor(),
        &token,
    )
    .await
    .unwrap_err();
    assert!(err.is_cancelled());
}
