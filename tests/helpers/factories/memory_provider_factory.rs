use crate::engine::core::record::Record;
use crate::engine::core::summary::AggregateKind;
use crate::engine::query::{MemoryProvider, ProviderCapabilities};

pub struct MemoryProviderFactory {
    records: Vec<Record>,
    capabilities: ProviderCapabilities,
}

impl MemoryProviderFactory {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            capabilities: ProviderCapabilities::all(),
        }
    }

    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    pub fn with_filter(mut self, filter: bool) -> Self {
        self.capabilities.filter = filter;
        self
    }

    pub fn with_grouping(mut self, grouping: bool) -> Self {
        self.capabilities.grouping = grouping;
        self
    }

    pub fn with_aggregates(mut self, aggregates: &[AggregateKind]) -> Self {
        self.capabilities.aggregates = aggregates.to_vec();
        self
    }

    pub fn with_capabilities(mut self, capabilities: ProviderCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn create(self) -> MemoryProvider {
        MemoryProvider::new(self.records).with_capabilities(self.capabilities)
    }
}
