//! Configuration schema definitions.
//!
//! This module defines the settings that control how inventories are
//! resolved. Every field is optional so that partial configurations from
//! different sources can be layered; the accessors fall back to defaults.

use serde::{Deserialize, Serialize};

/// Extension used for class files when none is configured.
pub const DEFAULT_CLASS_EXTENSION: &str = "yml";

/// Resolver configuration.
///
/// # Examples
///
/// ```
/// use reclass::config::ResolverConfig;
///
/// let config = ResolverConfig {
///     class_extension: Some("yaml".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(config.class_extension(), "yaml");
/// assert!(!config.resolve_sequences());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Extension of class files, without the leading dot.
    pub class_extension: Option<String>,

    /// Resolve references inside sequence elements as well as mappings.
    pub resolve_sequences: Option<bool>,
}

impl ResolverConfig {
    /// The effective class file extension.
    #[must_use]
    pub fn class_extension(&self) -> &str {
        self.class_extension
            .as_deref()
            .unwrap_or(DEFAULT_CLASS_EXTENSION)
    }

    /// Whether references inside sequences are resolved.
    #[must_use]
    pub fn resolve_sequences(&self) -> bool {
        self.resolve_sequences.unwrap_or(false)
    }
}
