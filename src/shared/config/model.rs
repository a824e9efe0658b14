use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Minimum number of sibling groups at one level before they are built on the rayon pool
    #[serde(default = "default_parallel_group_threshold")]
    pub parallel_group_threshold: usize,
    /// How many records are processed between two cancellation checks
    #[serde(default = "default_cancel_check_interval")]
    pub cancel_check_interval: usize,
    /// Upper bound on the number of group selectors a request may carry
    #[serde(default = "default_max_group_depth")]
    pub max_group_depth: usize,
}

fn default_parallel_group_threshold() -> usize {
    64
}

fn default_cancel_check_interval() -> usize {
    1024
}

fn default_max_group_depth() -> usize {
    16
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel_group_threshold: default_parallel_group_threshold(),
            cancel_check_interval: default_cancel_check_interval(),
            max_group_depth: default_max_group_depth(),
        }
    }
}

use std::env;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("SNELSHAPE_CONFIG").unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

/// Defaults, then the optional file at `config_path`, then `SNELSHAPE__*` overrides.
pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .set_default("logging.log_dir", "../logs")?
        .set_default("logging.stdout_level", "info")?
        .set_default("logging.file_level", "debug")?
        .set_default(
            "engine.parallel_group_threshold",
            default_parallel_group_threshold() as i64,
        )?
        .set_default(
            "engine.cancel_check_interval",
            default_cancel_check_interval() as i64,
        )?
        .set_default("engine.max_group_depth", default_max_group_depth() as i64)?
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(config::Environment::with_prefix("SNELSHAPE").separator("__"))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
