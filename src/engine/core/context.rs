use crate::engine::core::cancel::CancellationToken;
use crate::engine::errors::LoadError;
use crate::shared::config::EngineConfig;

/// Per-request execution knobs plus the request's cancellation token.
#[derive(Clone, Debug)]
pub struct ExecutionContext {
    pub settings: EngineConfig,
    pub cancel: CancellationToken,
}

impl ExecutionContext {
    pub fn new(settings: EngineConfig, cancel: CancellationToken) -> Self {
        Self { settings, cancel }
    }

    /// Context with default settings and a token nobody holds.
    pub fn detached() -> Self {
        Self::new(EngineConfig::default(), CancellationToken::new())
    }

    #[inline]
    pub fn check_cancelled(&self) -> Result<(), LoadError> {
        self.cancel.check()
    }

    /// Checks the token every `cancel_check_interval` items; `index` is the position of
    /// the item about to be processed.
    #[inline]
    pub fn checkpoint(&self, index: usize) -> Result<(), LoadError> {
        let interval = self.settings.cancel_check_interval.max(1);
        if index % interval == 0 {
            self.cancel.check()
        } else {
            Ok(())
        }
    }
}
