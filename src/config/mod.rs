//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (YAML or TOML)
//!     → loader.rs (read & deserialize by extension)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable for the run)
//!     → handed by value to the monitor loop
//! ```
//!
//! # Design Decisions
//! - Config is loaded once; there is no hot reload
//! - Required sections have no defaults, so a missing field fails the load
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError, ConfigFormat};
pub use schema::{
    LogFormat, LoggingConfig, MonitorConfig, MonitoringConfig, ObservabilityConfig,
    ServiceConfig, ThresholdBand, ThresholdConfig,
};
