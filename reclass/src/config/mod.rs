//! Configuration system for reclass.
//!
//! Resolver behaviour is configured through [`ResolverConfig`], assembled
//! by [`ConfigBuilder`] from several layers.
//!
//! # Configuration Precedence
//!
//! From highest to lowest:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`RECLASS_*`)
//! 3. Configuration file (`reclass-config.yml`, discovered or explicit)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use reclass::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
//! assert_eq!(config.class_extension(), "yml");
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{ResolverConfig, DEFAULT_CLASS_EXTENSION};
pub use validator::ConfigValidator;
