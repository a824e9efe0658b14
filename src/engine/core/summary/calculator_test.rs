use rust_decimal::Decimal;
use serde_json::json;

use crate::engine::core::cancel::CancellationToken;
use crate::engine::core::context::ExecutionContext;
use crate::engine::core::record::{FieldAccessor, FieldPath, Record, RecordSchema};
use crate::engine::core::summary::{
    AggregateKind, SummaryCalculator, SummarySpec, SummaryValue, finalize_states, merge_states,
    summarize,
};
use crate::engine::errors::LoadError;
use crate::test_helpers::factory::Factory;

fn specs(records: &[Record]) -> Vec<SummarySpec> {
    let schema = RecordSchema::infer(records);
    let field = FieldAccessor::resolve(FieldPath::parse("index").unwrap(), &schema);
    vec![
        SummarySpec::count(),
        SummarySpec::new(field.clone(), AggregateKind::Min),
        SummarySpec::new(field.clone(), AggregateKind::Max),
        SummarySpec::new(field.clone(), AggregateKind::Sum),
        SummarySpec::new(field, AggregateKind::Avg),
    ]
}

#[test]
fn summarize_produces_values_in_spec_order() {
    let records = Factory::record().create_list(5);
    let specs = specs(&records);
    let vector = summarize(&records, &specs, &ExecutionContext::detached()).unwrap();
    assert_eq!(
        vector.values(),
        &[
            SummaryValue::Count(5),
            SummaryValue::int(0),
            SummaryValue::int(4),
            SummaryValue::decimal(Decimal::from(10)),
            SummaryValue::decimal(Decimal::from(2)),
        ]
    );
}

#[test]
fn empty_specs_yield_empty_vector() {
    let records = Factory::record().create_list(3);
    let vector = summarize(&records, &[], &ExecutionContext::detached()).unwrap();
    assert!(vector.is_empty());
}

#[test]
fn empty_input_yields_identity_values() {
    let records: Vec<Record> = Vec::new();
    let specs = specs(&Factory::record().create_list(1));
    let vector = summarize(&records, &specs, &ExecutionContext::detached()).unwrap();
    assert_eq!(vector.values()[0], SummaryValue::Count(0));
    assert!(vector.values()[1].is_null());
    assert!(vector.values()[2].is_null());
    assert_eq!(vector.values()[3], SummaryValue::decimal(Decimal::ZERO));
    assert!(vector.values()[4].is_null());
}

#[test]
fn partial_states_finalize_to_the_same_vector() {
    let records = Factory::record().create_list(7);
    let specs = specs(&records);
    let ctx = ExecutionContext::detached();
    let calc = SummaryCalculator::new(&specs);
    let direct = calc.summarize(&records, &ctx).unwrap();
    let states = calc.partial_states(&records, &ctx).unwrap();
    assert_eq!(finalize_states(&states), direct);
}

#[test]
fn split_partials_merge_to_the_whole() {
    let records = Factory::record().create_list(6);
    let specs = specs(&records);
    let ctx = ExecutionContext::detached();
    let calc = SummaryCalculator::new(&specs);

    let mut left = calc.partial_states(&records[..2], &ctx).unwrap();
    let right = calc.partial_states(&records[2..], &ctx).unwrap();
    for (l, r) in left.iter_mut().zip(right.iter()) {
        assert!(l.merge(r));
    }
    assert_eq!(finalize_states(&left), calc.summarize(&records, &ctx).unwrap());
}

#[test]
fn cancellation_is_observed() {
    let records = vec![Record::new(json!({ "index": 1 }))];
    let specs = specs(&records);
    let token = CancellationToken::new();
    token.cancel();
    let ctx = ExecutionContext::new(Default::default(), token);
    let err = summarize(&records, &specs, &ctx).unwrap_err();
    assert!(matches!(err, LoadError::Cancelled));
}

#[test]
fn repeated_kinds_keep_their_positions() {
    let records: Vec<Record> = vec![
        json!({ "a": 1, "b": 10 }),
        json!({ "a": 4, "b": 20 }),
        json!({ "a": 2 }),
    ]
    .into_iter()
    .map(Record::new)
    .collect();
    let schema = RecordSchema::infer(&records);
    let a = FieldAccessor::resolve(FieldPath::parse("a").unwrap(), &schema);
    let b = FieldAccessor::resolve(FieldPath::parse("b").unwrap(), &schema);
    let specs = vec![
        SummarySpec::new(a.clone(), AggregateKind::Sum),
        SummarySpec::count(),
        SummarySpec::new(b, AggregateKind::Sum),
        SummarySpec::new(a.clone(), AggregateKind::Min),
        SummarySpec::new(a, AggregateKind::Sum),
    ];

    let vector = summarize(&records, &specs, &ExecutionContext::detached()).unwrap();
    assert_eq!(
        vector.values(),
        &[
            SummaryValue::decimal(Decimal::from(7)),
            SummaryValue::Count(3),
            SummaryValue::decimal(Decimal::from(30)),
            SummaryValue::int(1),
            SummaryValue::decimal(Decimal::from(7)),
        ]
    );
}

#[test]
fn merge_states_folds_parts_per_position() {
    let records = Factory::record().create_list(6);
    let specs = specs(&records);
    let ctx = ExecutionContext::detached();
    let calc = SummaryCalculator::new(&specs);
    let left = calc.partial_states(&records[..4], &ctx).unwrap();
    let right = calc.partial_states(&records[4..], &ctx).unwrap();

    let merged = merge_states([left.as_slice(), right.as_slice()], &specs).unwrap();
    assert_eq!(finalize_states(&merged), calc.summarize(&records, &ctx).unwrap());
}
