use crate::engine::core::summary::AggregateKind;
use crate::engine::query::QueryProvider;
use crate::test_helpers::factory::Factory;

#[test]
fn test_memory_provider_factory() {
    let provider = Factory::memory_provider()
        .with_records(Factory::record().create_list(2))
        .with_grouping(false)
        .with_aggregates(&[AggregateKind::Count])
        .create();

    let caps = provider.capabilities();
    assert!(caps.filter);
    assert!(!caps.grouping);
    assert!(caps.supports(AggregateKind::Count));
    assert!(!caps.supports(AggregateKind::Avg));
}
