pub mod data_source;
pub mod executor;
pub mod loader;
pub mod memory_provider;
pub mod options;
pub mod plan;
pub mod provider;
pub mod pushdown;

pub use data_source::{DataSource, MemorySource};
pub use executor::QueryExecutor;
pub use loader::load;
pub use memory_provider::MemoryProvider;
pub use options::LoadOptions;
pub use plan::{ExecutionPlan, Placement};
pub use provider::{AggregateRow, ProviderCapabilities, QueryProvider};

#[cfg(test)]
mod loader_test;
