use std::io::ErrorKind;
use std::path::Path;

use super::{schema::Config, validate::ConfigError};

/// Reads the config file, overlaying every key it contains on the defaults.
/// A missing file yields the defaults unchanged.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(source) if source.kind() == ErrorKind::NotFound => {
            log::info!("config_file_missing path={} using=defaults", path_str);
            return Ok(Config::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path_str,
                source,
            });
        }
    };
    let config: Config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path_str,
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Rewrites the whole file with the given record.
pub fn save_config(path: impl AsRef<Path>, config: &Config) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    config.validate()?;
    let mut body = serde_json::to_string_pretty(config).map_err(|source| {
        ConfigError::Serialize {
            path: path_str.clone(),
            source,
        }
    })?;
    body.push('\n');
    std::fs::write(path, body).map_err(|source| ConfigError::Write {
        path: path_str,
        source,
    })
}
