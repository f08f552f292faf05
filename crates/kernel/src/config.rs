use config::{Config, Environment, File};
use seforim_attributes::FactoryConfig;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default configuration file stem, resolved against the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "seforim";
/// Prefix of environment overrides, e.g. `SEFORIM__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "SEFORIM";

#[seforim_derive::seforim_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads `T` from a configuration file layered with `SEFORIM__` environment overrides.
///
/// Nested keys use double underscores: `SEFORIM__STORE__SHARED_ARENA_MAX_PERMITS=64`
/// sets `store.shared_arena_max_permits`. The file format is taken from its extension;
/// without `path` the `seforim` file in the working directory is used.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or unreadable, or if the merged
/// settings do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use seforim_kernel::config::{SeforimConfig, load_config};
///
/// let cfg: SeforimConfig = load_config(Some("config/local")).unwrap_or_default();
/// assert!(cfg.attributes.resolution_cache.enabled);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layered(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator("__")
}

fn load_layered<T>(path: Option<impl AsRef<Path>>, environment: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(environment);

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

/// Top-level settings.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeforimConfig {
    pub attributes: FactoryConfig,
    pub store: StoreConfig,
    pub fonts: FontConfig,
    pub logging: LoggingConfig,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Raw permit count for the memory-mapped shared arena. Kept unparsed so invalid
    /// values fall back to the default instead of failing the whole load.
    pub shared_arena_max_permits: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Windows directory to use instead of `%WINDIR%`.
    pub windows_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub console: bool,
    pub json: bool,
    pub env_filter: Option<String>,
    /// Directory for rolling log files; no file output when unset.
    pub path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), console: true, json: false, env_filter: None, path: None }
    }
}
