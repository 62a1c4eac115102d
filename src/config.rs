use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "keyshard.toml";

/// Defaults for the `split` command.
///
/// Values come from an optional TOML file overlaid by `KEYSHARD_*`
/// environment variables, e.g. `KEYSHARD_THRESHOLD=3`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyshardConfig {
    /// Number of shares to produce.
    pub shares: Option<usize>,
    /// Number of shares needed to recover.
    pub threshold: Option<usize>,
}

impl KeyshardConfig {
    /// Loads the configuration from `path`, or from [`DEFAULT_CONFIG_FILE`]
    /// when no path is given. A missing default file is not an error; a
    /// missing explicit file is.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("KEYSHARD").try_parsing(true))
            .build()?;

        let config: KeyshardConfig = settings.try_deserialize()?;
        debug!("📝 Loaded config: {:?}", config);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(contents, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
