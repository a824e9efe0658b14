use std::fmt;
use std::sync::Arc;

use crate::engine::core::record::{Record, RecordSchema};
use crate::engine::errors::LoadError;
use crate::engine::query::provider::QueryProvider;

/// Records held in process, with the schema inferred once at construction.
#[derive(Debug, Clone)]
pub struct MemorySource {
    records: Vec<Record>,
    schema: RecordSchema,
}

impl MemorySource {
    pub fn new(records: Vec<Record>) -> Self {
        let schema = RecordSchema::infer(&records);
        Self { records, schema }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }
}

/// Where a load reads its records from.
#[derive(Clone)]
pub enum DataSource {
    Memory(Arc<MemorySource>),
    Provider(Arc<dyn QueryProvider>),
}

impl DataSource {
    pub fn memory(records: Vec<Record>) -> Self {
        DataSource::Memory(Arc::new(MemorySource::new(records)))
    }

    pub fn provider<P: QueryProvider + 'static>(provider: P) -> Self {
        DataSource::Provider(Arc::new(provider))
    }

    pub async fn schema(&self) -> Result<RecordSchema, LoadError> {
        match self {
            DataSource::Memory(source) => Ok(source.schema().clone()),
            DataSource::Provider(provider) => Ok(provider.schema().await?),
        }
    }
}

impl fmt::Debug for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Memory(source) => f
                .debug_struct("Memory")
                .field("records", &source.records().len())
                .finish(),
            DataSource::Provider(provider) => f
                .debug_struct("Provider")
                .field("capabilities", &provider.capabilities())
                .finish(),
        }
    }
}
