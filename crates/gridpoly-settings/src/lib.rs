//! Gridpoly Settings Crate
//!
//! Handles application configuration: grid spacing, initial view and
//! capture tolerances, loaded from JSON or TOML files.

pub mod config;
pub mod error;

pub use config::{CaptureSettings, Config, GridSettings, ViewSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
