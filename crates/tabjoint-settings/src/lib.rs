//! TabJoint Settings Crate
//!
//! Loads, validates and saves the intersection configuration file.

pub mod config;
pub mod error;

pub use config::{Config, OutputFormat};
pub use error::{SettingsError, SettingsResult};
