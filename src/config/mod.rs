//! Calculation-system settings and their on-disk JSON file.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, GradingSystem};
