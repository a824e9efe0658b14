use std::collections::HashMap;

use ahash::RandomState as AHashRandomState;
use async_trait::async_trait;
use tracing::debug;

use crate::engine::core::filter::Predicate;
use crate::engine::core::group::GroupKey;
use crate::engine::core::record::{FieldAccessor, Record, RecordSchema};
use crate::engine::core::summary::SummarySpec;
use crate::engine::core::summary::ops::AggregatorImpl;
use crate::engine::errors::SourceError;
use crate::engine::query::provider::{AggregateRow, ProviderCapabilities, QueryProvider};

/// In-process provider over a record list. Capabilities are configurable so the
/// push-down paths can be driven without a real store.
#[derive(Debug, Clone)]
pub struct MemoryProvider {
    records: Vec<Record>,
    schema: RecordSchema,
    capabilities: ProviderCapabilities,
}

impl MemoryProvider {
    pub fn new(records: Vec<Record>) -> Self {
        let schema = RecordSchema::infer(&records);
        Self {
            records,
            schema,
            capabilities: ProviderCapabilities::all(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: ProviderCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    fn matching(&self, filter: Option<&Predicate>) -> Result<Vec<&Record>, SourceError> {
        match filter {
            None => Ok(self.records.iter().collect()),
            Some(_) if !self.capabilities.filter => {
                Err(SourceError::Unsupported("filter".to_string()))
            }
            Some(predicate) => Ok(self
                .records
                .iter()
                .filter(|r| predicate.evaluate(r))
                .collect()),
        }
    }
}

#[async_trait]
impl QueryProvider for MemoryProvider {
    async fn schema(&self) -> Result<RecordSchema, SourceError> {
        Ok(self.schema.clone())
    }

    fn capabilities(&self) -> ProviderCapabilities {
        self.capabilities.clone()
    }

    async fn fetch(&self, filter: Option<&Predicate>) -> Result<Vec<Record>, SourceError> {
        let matching = self.matching(filter)?;
        Ok(matching.into_iter().cloned().collect())
    }

    async fn aggregate(
        &self,
        filter: Option<&Predicate>,
        group_fields: &[FieldAccessor],
        specs: &[SummarySpec],
    ) -> Result<Vec<AggregateRow>, SourceError> {
        if !group_fields.is_empty() && !self.capabilities.grouping {
            return Err(SourceError::Unsupported("grouping".to_string()));
        }
        if let Some(spec) = specs.iter().find(|s| !self.capabilities.supports(s.aggregate)) {
            return Err(SourceError::Unsupported(format!(
                "aggregate {}",
                spec.aggregate
            )));
        }

        let matching = self.matching(filter)?;
        let mut groups: HashMap<Vec<GroupKey>, (u64, Vec<AggregatorImpl>), AHashRandomState> =
            HashMap::with_hasher(AHashRandomState::new());
        if group_fields.is_empty() {
            groups.insert(
                Vec::new(),
                (0, specs.iter().map(AggregatorImpl::from_spec).collect()),
            );
        }

        for record in matching {
            let keys: Vec<GroupKey> = group_fields
                .iter()
                .map(|f| GroupKey::from_field_value(record.get_field_scalar(f)))
                .collect();
            let (count, aggs) = groups
                .entry(keys)
                .or_insert_with(|| (0, specs.iter().map(AggregatorImpl::from_spec).collect()));
            *count += 1;
            for agg in aggs.iter_mut() {
                agg.update_from_record(record)?;
            }
        }

        debug!(
            target: "shape::provider",
            rows = groups.len(),
            levels = group_fields.len(),
            "Memory provider aggregated"
        );
        Ok(groups
            .into_iter()
            .map(|(keys, (count, aggs))| AggregateRow {
                keys,
                count,
                states: aggs.iter().map(|a| a.snapshot()).collect(),
            })
            .collect())
    }
}
