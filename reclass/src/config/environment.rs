//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `RECLASS_*` environment variables that
//! override configuration file values.

use crate::config::schema::ResolverConfig;
use crate::error::{Error, Result};
use std::env;

/// Overrides the class file extension.
pub const CLASS_EXTENSION_ENV: &str = "RECLASS_CLASS_EXTENSION";

/// Enables or disables reference resolution inside sequences.
pub const RESOLVE_SEQUENCES_ENV: &str = "RECLASS_RESOLVE_SEQUENCES";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use reclass::config::{EnvironmentConfig, ResolverConfig};
///
/// let mut config = ResolverConfig::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid.
    pub fn apply_overrides(config: &mut ResolverConfig) -> Result<()> {
        if let Ok(extension) = env::var(CLASS_EXTENSION_ENV) {
            config.class_extension = Some(extension);
        }

        if let Ok(val) = env::var(RESOLVE_SEQUENCES_ENV) {
            config.resolve_sequences = Some(Self::parse_bool(RESOLVE_SEQUENCES_ENV, &val)?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Configuration {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
