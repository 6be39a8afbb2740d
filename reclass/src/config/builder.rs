//! Layered configuration builder.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::ResolverConfig;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds a [`ResolverConfig`] from defaults, files, environment and code.
///
/// Layers are applied from lowest to highest precedence:
///
/// 1. Built-in defaults
/// 2. Configuration file (explicit via [`ConfigBuilder::with_file`], or
///    discovered from [`ConfigBuilder::with_working_dir`])
/// 3. `RECLASS_*` environment variables
/// 4. Programmatic overrides ([`ConfigBuilder::with_config`])
///
/// # Examples
///
/// ```
/// use reclass::config::{ConfigBuilder, ResolverConfig};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(ResolverConfig {
///         class_extension: Some("yaml".to_string()),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
/// assert_eq!(config.class_extension(), "yaml");
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<ResolverConfig>,
}

impl ConfigBuilder {
    /// Creates a builder with every layer enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover `reclass-config.yml` from `dir` upwards.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Load configuration from `path` instead of discovering it.
    #[must_use]
    pub fn with_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Do not load any configuration file.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `RECLASS_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Apply `config` on top of every other layer.
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Merge and validate all enabled layers.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be loaded, an
    /// environment variable is malformed, or the merged configuration is
    /// invalid.
    pub fn build(self) -> Result<ResolverConfig> {
        let mut config = ResolverConfig::default();

        if !self.skip_files {
            let source = match (&self.config_file, &self.working_dir) {
                (Some(path), _) => Some(ConfigLoader::load_source(path)?),
                (None, Some(dir)) => ConfigLoader::discover(dir)?,
                (None, None) => None,
            };
            if let Some(source) = source {
                ConfigMerger::merge_into(&mut config, &source.config);
            }
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
