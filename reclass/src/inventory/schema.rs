//! Inventory data model.
//!
//! An [`Inventory`] pairs the list of classes visited while resolving a node
//! with the parameter tree produced by merging them. Parameter trees are
//! plain [`serde_yaml`] mappings; references and override markers are
//! recognised structurally rather than through dedicated types.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// The parameter tree of a node, class or resolved inventory.
pub type Parameters = Mapping;

/// A node or class, either as declared in a file or fully resolved.
///
/// # Examples
///
/// ```
/// use reclass::Inventory;
///
/// let inventory = Inventory::from_yaml_str("classes: [base]\nparameters:\n  port: 80\n").unwrap();
/// assert_eq!(inventory.classes, vec!["base".to_string()]);
/// assert_eq!(inventory.parameters.get("port").and_then(|v| v.as_u64()), Some(80));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    /// Class names, in visitation order once resolved.
    #[serde(default)]
    pub classes: Vec<String>,

    /// The parameter tree.
    #[serde(default)]
    pub parameters: Parameters,
}

impl Inventory {
    /// Creates an inventory from its parts.
    #[must_use]
    pub fn new(classes: Vec<String>, parameters: Parameters) -> Self {
        Self {
            classes,
            parameters,
        }
    }

    /// Looks up a parameter by a colon-separated path such as `app:port`.
    ///
    /// # Examples
    ///
    /// ```
    /// use reclass::Inventory;
    ///
    /// let inventory = Inventory::from_yaml_str("parameters: {app: {port: 80}}").unwrap();
    /// assert_eq!(inventory.get("app:port").and_then(|v| v.as_u64()), Some(80));
    /// assert!(inventory.get("app:host").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split(':');
        let mut current = self.parameters.get(segments.next()?)?;
        for segment in segments {
            current = current.as_mapping()?.get(segment)?;
        }
        Some(current)
    }

    /// Decodes an inventory written with explicit `classes` and `parameters`
    /// keys, as produced by [`Inventory::to_yaml`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the text is not a valid inventory.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|source| Error::Decode {
            path: "<inline>".into(),
            source,
        })
    }

    /// Encodes the inventory as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if a value cannot be represented as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|source| Error::Encode { source })
    }
}

/// Human-readable name of a value's kind, used in error messages.
#[must_use]
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
