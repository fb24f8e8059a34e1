use crate::error::ConfigError;
use crate::format::DEFAULT_SIGNIFICANT_DIGITS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Calculator settings, read from a TOML file
///
/// ```
/// # use deskcalc::Config;
/// let config: Config = toml::from_str("[display]\nsignificant_digits = 10").unwrap();
/// assert_eq!(config.display.significant_digits, 10);
/// assert_eq!(config.logging.level, "warn");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How results are shown
    pub display: DisplayConfig,
    /// Diagnostics output of the terminal front end
    pub logging: LoggingConfig,
}

/// How results are shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Significant digits kept for non-integral results
    pub significant_digits: usize,
}

/// Diagnostics output of the terminal front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter, such as `warn` or `deskcalc=debug`
    pub level: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Default location of the configuration file
    #[must_use]
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("deskcalc")
            .join("config.toml")
    }

    /// Load the configuration from `path`, or from
    /// [`config_path`](#method.config_path) when `path` is `None`. A missing
    /// file gives the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map_or_else(Self::config_path, Path::to_path_buf);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Write the configuration to `path`, creating its parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let contents = toml::to_string(self)?;
        fs::write(path, contents).map_err(io_error)?;
        Ok(())
    }

    /// Check that every setting is within its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let digits = self.display.significant_digits;
        if !(1..=17).contains(&digits) {
            return Err(ConfigError::Invalid {
                key: "display.significant_digits",
                message: format!("{} is not between 1 and 17", digits),
            });
        }
        Ok(())
    }
}
