//! Configuration file discovery and loading.
//!
//! A resolver configuration file is named `reclass-config.yml` and is
//! discovered by walking up from a working directory, typically the
//! directory holding the node being resolved.

use crate::config::schema::ResolverConfig;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for during discovery.
pub const CONFIG_FILE_NAME: &str = "reclass-config.yml";

/// A configuration file together with where it was found.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Where the configuration came from.
    pub path: PathBuf,
    /// Parsed configuration.
    pub config: ResolverConfig,
}

/// Loads resolver configuration files.
///
/// # Examples
///
/// ```no_run
/// use reclass::config::ConfigLoader;
/// use std::path::Path;
///
/// if let Some(source) = ConfigLoader::discover(Path::new("inventory/nodes")).unwrap() {
///     println!("using {}", source.path.display());
/// }
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Find the nearest `reclass-config.yml` at or above `start_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a discovered file cannot be read or parsed.
    pub fn discover(start_dir: &Path) -> Result<Option<ConfigSource>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                log::debug!("using resolver configuration {}", candidate.display());
                return Self::load_source(&candidate).map(Some);
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Load a configuration file as a [`ConfigSource`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_source(path: &Path) -> Result<ConfigSource> {
        Ok(ConfigSource {
            path: path.to_path_buf(),
            config: Self::load_file(path)?,
        })
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the file cannot be read and
    /// [`Error::Configuration`] if the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<ResolverConfig> {
        let contents = fs::read_to_string(path).map_err(|source| Error::NotFound {
            path: path.to_path_buf(),
            source,
        })?;

        serde_yaml::from_str::<Option<ResolverConfig>>(&contents)
            .map(Option::unwrap_or_default)
            .map_err(|e| Error::Configuration {
                field: format!("{}", path.display()),
                message: format!("Invalid YAML: {e}"),
            })
    }
}
