pub use super::factories::{
    LoadRequestFactory, MemoryProviderFactory, RecordFactory, SummaryFixtureFactory,
};

pub struct Factory;

impl Factory {
    pub fn record() -> RecordFactory {
        RecordFactory::new()
    }

    pub fn load_request() -> LoadRequestFactory {
        LoadRequestFactory::new()
    }

    pub fn summary_fixture() -> SummaryFixtureFactory {
        SummaryFixtureFactory::new()
    }

    pub fn memory_provider() -> MemoryProviderFactory {
        MemoryProviderFactory::new()
    }
}
