//! Domain-driven configuration management for Sprocket
//!
//! Configuration is split by functional domain, with validation, defaults,
//! and environment variable overrides.

pub mod domains;
pub mod error;
pub mod loader;
pub mod validation;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

// Re-export domain configurations
pub use domains::{
    execution::ExecutionConfig, logging::LoggingConfig, storage::StorageConfig, SprocketConfig,
};
