//! Configuration loading
//!
//! Layers, lowest precedence first:
//! 1. the preset of the detected environment (`AppConfig::from_env`)
//! 2. `config.<environment>.toml` in the working directory, if present
//! 3. `HM__`-prefixed environment variables, `__` separating sections,
//!    e.g. `HM__STORE__BACKEND=mysql` or `HM__DATABASE__URL=mysql://...`

use ::config::{Config, Environment, File};

use hm_shared::config::AppConfig;

use crate::InfrastructureError;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "HM";

/// Load the application configuration
///
/// A `.env` file in the working directory is read first when present.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let preset = AppConfig::from_env();
    let file = preset.environment.config_file().to_string();

    let config = Config::builder()
        .add_source(Config::try_from(&preset)?)
        .add_source(File::with_name(&file).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let loaded: AppConfig = config.try_deserialize()?;

    tracing::info!(
        environment = %loaded.environment,
        store = loaded.store.backend.as_str(),
        "Configuration loaded"
    );
    Ok(loaded)
}
