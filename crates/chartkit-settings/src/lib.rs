//! ChartKit Settings Crate
//!
//! Handles interaction and history configuration for the drawing layer,
//! including file persistence and validation.

pub mod config;
pub mod error;

pub use config::{Config, HistorySettings, InteractionSettings, ReselectPolicy};
pub use error::{SettingsError, SettingsResult};
