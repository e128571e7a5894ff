//! Configuration file handling for TabJoint
//!
//! The configuration holds the operator's intersection parameters and the
//! output format. Files are JSON or TOML, chosen by extension, and live in
//! the platform config directory unless a path is given.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tabjoint_camtools::intersection::{IntersectionMaker, IntersectionParameters};
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};

/// Renderer used for generated edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Standalone SVG document
    #[default]
    Svg,
    /// Laser G-code
    Gcode,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Svg => write!(f, "svg"),
            Self::Gcode => write!(f, "gcode"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "gcode" | "nc" => Ok(Self::Gcode),
            other => Err(SettingsError::InvalidSetting {
                key: "output".to_string(),
                reason: format!("unknown output format '{}'", other),
            }),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputFormat,
    pub intersection: IntersectionParameters,
}

enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(Self::Json)
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            Ok(Self::Toml)
        } else {
            Err(SettingsError::InvalidSetting {
                key: path.display().to_string(),
                reason: "Config file must be .json or .toml".to_string(),
            })
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config_dir>/tabjoint/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("tabjoint").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("No config directory on this platform".to_string())
            })
    }

    /// Load and validate configuration from a `.json` or `.toml` file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = FileFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load from `path` if given, else from the default location when a file
    /// exists there, else fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        let default_path = Self::default_path()?;
        if default_path.exists() {
            Self::load_from_file(&default_path)
        } else {
            debug!("No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate and save configuration, creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match FileFormat::from_path(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// The intersection parameters must be accepted by the intersection maker.
    pub fn validate(&self) -> SettingsResult<()> {
        IntersectionMaker::new(self.intersection.clone())?;
        Ok(())
    }
}
