//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, CacheSettings, DashboardSettings, DataSettings, LoggingConfig,
    DEFAULT_LOG_FILE,
};

use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use config::builder::DefaultState;
use std::path::Path;

fn with_environment(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, ConfigError> {
    builder
        .add_source(
            Environment::with_prefix("RADAR")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    with_environment(Config::builder().add_source(File::from(path).required(true)))
}

/// Load configuration, falling back to defaults when the file is absent.
pub fn load_config_or_default(path: &Path) -> Result<AppConfig, ConfigError> {
    with_environment(Config::builder().add_source(File::from(path).required(false)))
}

/// Parse configuration from a TOML string, then apply the environment.
pub fn from_toml_str(toml: &str) -> Result<AppConfig, ConfigError> {
    with_environment(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
}
