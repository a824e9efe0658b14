use std::time::Duration;

use async_trait::async_trait;

use crate::engine::core::filter::Predicate;
use crate::engine::core::record::{FieldAccessor, Record, RecordSchema};
use crate::engine::core::summary::SummarySpec;
use crate::engine::errors::SourceError;
use crate::engine::query::{AggregateRow, ProviderCapabilities, QueryProvider};

/// Provider whose data calls always fail with a transport error.
pub struct FailingProvider {
    pub capabilities: ProviderCapabilities,
}

impl FailingProvider {
    pub fn new() -> Self {
        Self {
            capabilities: ProviderCapabilities::all(),
        }
    }
}

#[async_trait]
impl QueryProvider for FailingProvider {
    async fn schema(&self) -> Result<RecordSchema, SourceError> {
        Ok(RecordSchema::new())
    }

    fn capabilities(&self) -> ProviderCapabilities {
        self.capabilities.clone()
    }

    async fn fetch(&self, _filter: Option<&Predicate>) -> Result<Vec<Record>, SourceError> {
        Err(SourceError::Transport("connection reset".to_string()))
    }

    async fn aggregate(
        &self,
        _filter: Option<&Predicate>,
        _group_fields: &[FieldAccessor],
        _specs: &[SummarySpec],
    ) -> Result<Vec<AggregateRow>, SourceError> {
        Err(SourceError::Transport("connection reset".to_string()))
    }
}

/// Provider that never answers within any reasonable test timeout.
pub struct SlowProvider {
    pub delay: Duration,
}

impl SlowProvider {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_secs(3600),
        }
    }
}

#[async_trait]
impl QueryProvider for SlowProvider {
    async fn schema(&self) -> Result<RecordSchema, SourceError> {
        Ok(RecordSchema::new())
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::none()
    }

    async fn fetch(&self, _filter: Option<&Predicate>) -> Result<Vec<Record>, SourceError> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }

    async fn aggregate(
        &self,
        _filter: Option<&Predicate>,
        _group_fields: &[FieldAccessor],
        _specs: &[SummarySpec],
    ) -> Result<Vec<AggregateRow>, SourceError> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }
}
