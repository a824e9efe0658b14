use crate::engine::core::summary::AggregateKind;
use crate::engine::errors::{LoadError, SourceError, ValidationError};
use crate::engine::types::LogicalType;

#[test]
fn source_mismatch_keeps_its_category() {
    let err: LoadError = SourceError::mismatch("Value", AggregateKind::Avg, LogicalType::String).into();
    match err {
        LoadError::AggregateTypeMismatch {
            field,
            aggregate,
            found,
        } => {
            assert_eq!(field, "Value");
            assert_eq!(aggregate, AggregateKind::Avg);
            assert_eq!(found, LogicalType::String);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn source_overflow_keeps_its_category() {
    let err: LoadError = SourceError::NumericOverflow {
        field: "Value".into(),
    }
    .into();
    assert!(matches!(err, LoadError::NumericOverflow { ref field } if field == "Value"));
}

#[test]
fn transport_failure_is_wrapped() {
    let err: LoadError = SourceError::Transport("reset".into()).into();
    assert!(matches!(err, LoadError::Source(SourceError::Transport(_))));
    assert_eq!(err.to_string(), "Data source failed: Transport error: reset");
}

#[test]
fn validation_errors_convert_and_display() {
    let err: LoadError = ValidationError::UnknownSummaryType("median".into()).into();
    assert_eq!(
        err.to_string(),
        "Invalid load options: Unknown summary type: median"
    );
    assert!(!err.is_cancelled());
    assert!(LoadError::Cancelled.is_cancelled());
}

#[test]
fn load_error_round_trips_into_source_error() {
    let err = SourceError::from(LoadError::NumericOverflow { field: "x".into() });
    assert!(matches!(err, SourceError::NumericOverflow { ref field } if field == "x"));
    let err = SourceError::from(LoadError::Cancelled);
    assert!(matches!(err, SourceError::Other(_)));
}
