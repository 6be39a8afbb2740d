//! Error types for the reclass library.
//!
//! This module provides the error hierarchy for inventory resolution,
//! using `thiserror` for ergonomic error handling. Errors raised while a
//! class is being resolved are wrapped in [`Error::Class`] as they travel up
//! the class graph, so the final error names every class on the failing path
//! while the underlying cause remains inspectable via [`Error::root_cause`].

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a reclass error.
///
/// # Examples
///
/// ```
/// use reclass::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the reclass library.
#[derive(Debug, Error)]
pub enum Error {
    /// A node or class file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    NotFound {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A node or class file is not valid YAML.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        /// The file that failed to decode.
        path: PathBuf,
        /// The underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A resolved inventory could not be written as YAML.
    #[error("failed to encode inventory as YAML: {source}")]
    Encode {
        /// The underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A file decoded as YAML but does not have the shape of a node document.
    #[error("invalid node document {}: {reason}", path.display())]
    InvalidDocument {
        /// The offending file.
        path: PathBuf,
        /// What is wrong with the document.
        reason: String,
    },

    /// A `${...}` placeholder does not point at an existing parameter.
    #[error("invalid reference '{reference}': {reason}")]
    InvalidReference {
        /// The placeholder text, including `${` and `}`.
        reference: String,
        /// Why the lookup failed.
        reason: String,
    },

    /// A placeholder embedded in a larger string resolved to a non-string value.
    #[error("reference '{reference}' embedded in a string must refer to a string, found {found}")]
    InvalidReferenceType {
        /// The placeholder text, including `${` and `}`.
        reference: String,
        /// The kind of value the reference resolved to.
        found: &'static str,
    },

    /// A class (transitively) includes itself.
    #[error("cyclic class graph: {cycle}")]
    CyclicClassGraph {
        /// The cycle, rendered as `a -> b -> a`.
        cycle: String,
    },

    /// An error raised while resolving a class, annotated with that class.
    #[error("failed to resolve class '{class}' ({}): {source}", path.display())]
    Class {
        /// The class being resolved.
        class: String,
        /// The file backing the class.
        path: PathBuf,
        /// The error raised while resolving it.
        #[source]
        source: Box<Error>,
    },

    /// A resolver configuration value is invalid.
    #[error("configuration error for '{field}': {message}")]
    Configuration {
        /// The field or environment variable at fault.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// A global logger is already installed.
    #[error("failed to install logger: {0}")]
    Logging(#[from] log::SetLoggerError),
}

impl Error {
    /// Wrap `self` with the class whose resolution failed.
    #[must_use]
    pub fn in_class(self, class: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Class {
            class: class.into(),
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through [`Error::Class`] wrappers.
    ///
    /// # Examples
    ///
    /// ```
    /// use reclass::Error;
    ///
    /// let err = Error::CyclicClassGraph { cycle: "a -> a".to_string() }
    ///     .in_class("a", "classes/a.yml");
    /// assert!(matches!(err.root_cause(), Error::CyclicClassGraph { .. }));
    /// ```
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::Class { source, .. } = current {
            current = source;
        }
        current
    }

    /// Returns the classes on the failing path, outermost first.
    #[must_use]
    pub fn class_chain(&self) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut current = self;
        while let Self::Class { class, source, .. } = current {
            chain.push(class.as_str());
            current = source;
        }
        chain
    }

    /// Check if the root cause is an unreadable file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.root_cause(), Self::NotFound { .. })
    }

    /// Check if the root cause is a file that failed to decode.
    ///
    /// Both malformed YAML and YAML that is not a node document count.
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self.root_cause(),
            Self::Decode { .. } | Self::InvalidDocument { .. }
        )
    }

    /// Check if the root cause is a placeholder that does not resolve.
    #[must_use]
    pub fn is_invalid_reference(&self) -> bool {
        matches!(self.root_cause(), Self::InvalidReference { .. })
    }

    /// Check if the root cause is an embedded placeholder of the wrong type.
    #[must_use]
    pub fn is_invalid_reference_type(&self) -> bool {
        matches!(self.root_cause(), Self::InvalidReferenceType { .. })
    }

    /// Check if the root cause is a cyclic class graph.
    #[must_use]
    pub fn is_cyclic_class_graph(&self) -> bool {
        matches!(self.root_cause(), Self::CyclicClassGraph { .. })
    }
}
