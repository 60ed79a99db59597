use serde::{Deserialize, Serialize};

use std::{
    env,
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    /// `PostgreSQL` DSN. Notes are kept in memory when unset.
    #[serde(default)]
    pub pg_dsn: Option<String>,
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid configuration in environment variables: {0}")]
    Env(#[from] envy::Error),
}

fn read_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads `PORT` and `PG_DSN` from the given variables.
pub fn from_vars<I>(vars: I) -> Result<Config, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    envy::from_iter(vars).map_err(Into::into)
}

pub fn load_config() -> Result<Config, ConfigError> {
    // Retrieve env variable
    let config_path = env::var("NOTES_APP_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    load_config_from(Path::new(&config_path))
}

pub fn load_config_from(config_path: &Path) -> Result<Config, ConfigError> {
    // Try requested path
    if config_path.exists() {
        return read_file(config_path);
    }

    // Fallback to config.yaml
    let default_path = Path::new("config.yaml");
    if config_path != default_path && default_path.exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path.display()
        );
        return read_file(default_path);
    }

    // Fallback to config.example.yaml
    let example_path = Path::new("config.example.yaml");
    if example_path.exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path.display()
        );
        return read_file(example_path);
    }

    // Fallback to environment variables
    tracing::info!("No config file found, loading configuration from environment variables");
    from_vars(utf8_vars(env::vars_os()))
}

/// Skips variables whose name or value is not valid Unicode.
fn utf8_vars<I>(vars: I) -> impl Iterator<Item = (String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
}
