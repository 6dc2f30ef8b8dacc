//! Layered settings: built-in defaults, then an optional `signup.toml` in the
//! working directory, then `SIGNUP_*` environment variables
//! (`SIGNUP_SCHEMA__MIN_TECHS=3`).

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use signup::SchemaConfig;

#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub schema: SchemaConfig,
}

impl Settings {
    /// The well-known filename for the settings file.
    pub fn filename() -> &'static str {
        "signup.toml"
    }

    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                File::with_name(Self::filename())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("SIGNUP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

/// Schema limits for the form, falling back to the defaults on a bad file.
pub fn schema_config() -> SchemaConfig {
    match Settings::new() {
        Ok(settings) => settings.schema,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            SchemaConfig::default()
        }
    }
}
