//! Configuration validation.

use crate::config::schema::ResolverConfig;
use crate::error::{Error, Result};

/// Validates resolver configuration.
///
/// # Examples
///
/// ```
/// use reclass::config::{ConfigValidator, ResolverConfig};
///
/// ConfigValidator::validate(&ResolverConfig::default()).unwrap();
///
/// let bad = ResolverConfig { class_extension: Some(".yml".to_string()), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming the first invalid field.
    pub fn validate(config: &ResolverConfig) -> Result<()> {
        if let Some(ref extension) = config.class_extension {
            Self::validate_extension(extension)?;
        }
        Ok(())
    }

    /// A class extension must be a bare, non-empty file extension.
    fn validate_extension(extension: &str) -> Result<()> {
        let invalid = |message: &str| Error::Configuration {
            field: "class_extension".into(),
            message: message.into(),
        };

        if extension.trim().is_empty() {
            return Err(invalid("Cannot be empty or only whitespace"));
        }
        if extension.starts_with('.') {
            return Err(invalid("Must not start with '.'"));
        }
        if extension.contains(['/', '\\']) {
            return Err(invalid("Must not contain path separators"));
        }
        if extension.contains('\0') {
            return Err(invalid("Cannot contain null bytes"));
        }

        Ok(())
    }
}
