pub mod load_request_factory;
pub mod memory_provider_factory;
pub mod record_factory;
pub mod stub_providers;
pub mod summary_fixture_factory;

pub use load_request_factory::LoadRequestFactory;
pub use memory_provider_factory::MemoryProviderFactory;
pub use record_factory::RecordFactory;
pub use stub_providers::{FailingProvider, SlowProvider};
pub use summary_fixture_factory::SummaryFixtureFactory;

#[cfg(test)]
mod load_request_factory_test;
#[cfg(test)]
mod memory_provider_factory_test;
#[cfg(test)]
mod record_factory_test;
#[cfg(test)]
mod summary_fixture_factory_test;
