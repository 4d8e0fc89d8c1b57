//! Configuration and settings management for Gridpoly
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats; the default location is the
//! platform config directory (`<config_dir>/gridpoly/config.toml`).
//!
//! Configuration is organized into logical sections:
//! - Grid settings (initial spacing, slider range and step)
//! - View settings (initial visible area, canvas size in pixels)
//! - Capture settings (vertex grab range)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Grid spacing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Initial spacing along X
    pub spacing_x: f64,
    /// Initial spacing along Y
    pub spacing_y: f64,
    /// Smallest spacing selectable from the sliders
    pub min_spacing: f64,
    /// Largest spacing selectable from the sliders
    pub max_spacing: f64,
    /// Slider step
    pub step: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            spacing_x: 1.0,
            spacing_y: 1.0,
            min_spacing: 0.5,
            max_spacing: 10.0,
            step: 0.5,
        }
    }
}

impl GridSettings {
    /// Map a raw slider value onto the slider lattice.
    ///
    /// The value is clamped to `[min_spacing, max_spacing]`, rounded to the
    /// nearest multiple of `step` and finally rounded to one decimal.
    /// Non-finite input falls back to `min_spacing`.
    pub fn quantize(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min_spacing;
        }
        let clamped = value.clamp(self.min_spacing, self.max_spacing);
        let stepped = if self.step > 0.0 {
            (clamped / self.step).round() * self.step
        } else {
            clamped
        };
        (stepped * 10.0).round() / 10.0
    }

    fn validate(&self) -> ConfigResult<()> {
        for (key, value) in [
            ("grid.spacing_x", self.spacing_x),
            ("grid.spacing_y", self.spacing_y),
            ("grid.min_spacing", self.min_spacing),
            ("grid.max_spacing", self.max_spacing),
            ("grid.step", self.step),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValueOutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }
        if self.min_spacing > self.max_spacing {
            return Err(ConfigError::Inconsistent(
                "grid.min_spacing must not exceed grid.max_spacing".to_string(),
            ));
        }
        Ok(())
    }
}

/// Initial view settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Canvas width in pixels
    pub canvas_width: f64,
    /// Canvas height in pixels
    pub canvas_height: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 10.0,
            canvas_width: 700.0,
            canvas_height: 700.0,
        }
    }
}

impl ViewSettings {
    fn validate(&self) -> ConfigResult<()> {
        let corners = [self.x_min, self.x_max, self.y_min, self.y_max];
        if !corners.iter().all(|v| v.is_finite()) {
            return Err(ConfigError::ValueOutOfRange {
                key: "view.x_min/x_max/y_min/y_max".to_string(),
                value: format!("{:?}", corners),
            });
        }
        if !(self.x_min < self.x_max) || !(self.y_min < self.y_max) {
            return Err(ConfigError::Inconsistent(
                "view minimum must be below view maximum on both axes".to_string(),
            ));
        }
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.canvas_width) || !positive(self.canvas_height) {
            return Err(ConfigError::ValueOutOfRange {
                key: "view.canvas_width/canvas_height".to_string(),
                value: format!("{}x{}", self.canvas_width, self.canvas_height),
            });
        }
        Ok(())
    }
}

/// Vertex capture settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    /// Pixel distance within which a press grabs an existing vertex and a
    /// click on the first vertex closes the polygon
    pub grab_range: f64,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self { grab_range: 15.0 }
    }
}

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Grid settings
    pub grid: GridSettings,
    /// View settings
    pub view: ViewSettings,
    /// Capture settings
    pub capture: CaptureSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location in the platform config directory.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("gridpoly").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("platform config directory not found".to_string())
            })
    }

    /// Load config from the default location, or defaults when no file exists.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        self.grid.validate()?;
        self.view.validate()?;

        if !self.capture.grab_range.is_finite() || self.capture.grab_range <= 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "capture.grab_range".to_string(),
                value: self.capture.grab_range.to_string(),
            });
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
