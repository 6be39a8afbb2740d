//! Node and class file loading.
//!
//! This module reads a single node or class file and turns it into an
//! unresolved [`Inventory`]: the classes it declares and its local
//! parameters. It also owns the naming rules that map class names to files
//! and files back to class names.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::inventory::schema::{value_kind, Inventory};

/// Top-level key listing the classes a node includes.
pub const CLASSES_KEY: &str = "classes";

/// Top-level key holding parameters in the dedicated layout.
pub const PARAMETERS_KEY: &str = "parameters";

/// Loads node and class files.
///
/// # Examples
///
/// ```
/// use reclass::inventory::ClassLoader;
/// use std::path::Path;
///
/// let path = ClassLoader::class_path(Path::new("nodes/web.yml"), "common", "yml").unwrap();
/// assert_eq!(path, Path::new("nodes/common.yml"));
/// assert_eq!(ClassLoader::class_name(&path, "yml"), "common");
/// ```
pub struct ClassLoader;

impl ClassLoader {
    /// Load and decode a node or class file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the file cannot be read, and
    /// [`Error::Decode`] or [`Error::InvalidDocument`] if its contents are
    /// not a node document.
    pub fn load_file(path: &Path) -> Result<Inventory> {
        let contents = fs::read_to_string(path).map_err(|source| Error::NotFound {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse_document(path, &contents)
    }

    /// Decode the contents of a node or class file.
    ///
    /// Parameters may either live under a `parameters` mapping or be laid
    /// out flat next to `classes`. When a `parameters` key is present, any
    /// other top-level keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] for malformed YAML and
    /// [`Error::InvalidDocument`] when the YAML has the wrong shape.
    pub fn parse_document(path: &Path, contents: &str) -> Result<Inventory> {
        let document: Value = serde_yaml::from_str(contents).map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let mut root = match document {
            Value::Null => Mapping::new(),
            Value::Mapping(root) => root,
            other => {
                return Err(invalid_document(
                    path,
                    format!("root must be a mapping, found {}", value_kind(&other)),
                ))
            }
        };

        let classes = match root.shift_remove(CLASSES_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(class) => Ok(class),
                    other => Err(invalid_document(
                        path,
                        format!("class names must be strings, found {}", value_kind(&other)),
                    )),
                })
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(invalid_document(
                    path,
                    format!("'classes' must be a sequence, found {}", value_kind(&other)),
                ))
            }
        };

        let parameters = match root.shift_remove(PARAMETERS_KEY) {
            None => root,
            Some(Value::Null) => Mapping::new(),
            Some(Value::Mapping(parameters)) => {
                for key in root.keys() {
                    log::warn!(
                        "{}: ignoring top-level key {key:?} next to 'parameters'",
                        path.display()
                    );
                }
                parameters
            }
            Some(other) => {
                return Err(invalid_document(
                    path,
                    format!("'parameters' must be a mapping, found {}", value_kind(&other)),
                ))
            }
        };

        Ok(Inventory::new(classes, parameters))
    }

    /// Location of the file backing `class`, relative to the file that
    /// declared it.
    ///
    /// Class names may contain `/` to reach into sub-directories or parent
    /// directories of the declaring file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDocument`] for an absolute class name, which
    /// would otherwise escape the declaring file's directory.
    pub fn class_path(declared_in: &Path, class: &str, extension: &str) -> Result<PathBuf> {
        let file_name = format!("{class}.{extension}");
        let relative = Path::new(&file_name);
        if relative
            .components()
            .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
        {
            return Err(invalid_document(
                declared_in,
                format!("class '{class}' must be relative to the declaring file"),
            ));
        }

        let dir = declared_in.parent().unwrap_or_else(|| Path::new(""));
        Ok(dir.join(relative))
    }

    /// Class name of a file: its file name without the class extension.
    #[must_use]
    pub fn class_name(path: &Path, extension: &str) -> String {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let suffix = format!(".{extension}");
        match file_name.strip_suffix(&suffix) {
            Some(stem) => stem.to_string(),
            None => file_name,
        }
    }
}

fn invalid_document(path: &Path, reason: String) -> Error {
    Error::InvalidDocument {
        path: path.to_path_buf(),
        reason,
    }
}
