use async_trait::async_trait;

use crate::engine::core::filter::Predicate;
use crate::engine::core::group::GroupKey;
use crate::engine::core::record::{FieldAccessor, Record, RecordSchema};
use crate::engine::core::summary::{AggState, AggregateKind, SummarySpec};
use crate::engine::errors::SourceError;

/// Which concerns a provider can evaluate on its side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCapabilities {
    pub filter: bool,
    pub grouping: bool,
    pub aggregates: Vec<AggregateKind>,
}

impl ProviderCapabilities {
    /// Fetch only: everything is evaluated locally.
    pub fn none() -> Self {
        Self {
            filter: false,
            grouping: false,
            aggregates: Vec::new(),
        }
    }

    pub fn all() -> Self {
        Self {
            filter: true,
            grouping: true,
            aggregates: AggregateKind::ALL.to_vec(),
        }
    }

    pub fn with_filter(mut self, filter: bool) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_grouping(mut self, grouping: bool) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_aggregates(mut self, aggregates: &[AggregateKind]) -> Self {
        self.aggregates = aggregates.to_vec();
        self
    }

    pub fn supports(&self, kind: AggregateKind) -> bool {
        self.aggregates.contains(&kind)
    }

    pub fn supports_all(&self, specs: &[SummarySpec]) -> bool {
        specs.iter().all(|s| self.supports(s.aggregate))
    }
}

/// One distinct key tuple of a pushed-down aggregation. `states` align with the specs
/// passed to [`QueryProvider::aggregate`].
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub keys: Vec<GroupKey>,
    pub count: u64,
    pub states: Vec<AggState>,
}

/// A remote or otherwise external record store.
///
/// Filters and field accessors handed to a provider are resolved against its own
/// [`schema`](QueryProvider::schema). Callers only push a concern down when
/// [`capabilities`](QueryProvider::capabilities) advertises it.
#[async_trait]
pub trait QueryProvider: Send + Sync {
    async fn schema(&self) -> Result<RecordSchema, SourceError>;

    fn capabilities(&self) -> ProviderCapabilities;

    /// Returns the records matching `filter` (all records when `None`), in store order.
    async fn fetch(&self, filter: Option<&Predicate>) -> Result<Vec<Record>, SourceError>;

    /// Groups the records matching `filter` by the full `group_fields` tuple and returns
    /// partial aggregate states per tuple. With no group fields it returns a single row
    /// with an empty key tuple.
    async fn aggregate(
        &self,
        filter: Option<&Predicate>,
        group_fields: &[FieldAccessor],
        specs: &[SummarySpec],
    ) -> Result<Vec<AggregateRow>, SourceError>;
}
