//! Common test utilities for integration tests.
//!
//! This module provides helpers for locating the checked-in model fixtures
//! and a builder for throwaway class directories.

use std::fs;
use std::path::{Path, PathBuf};

use reclass::Inventory;
use tempfile::TempDir;

/// Returns the directory holding the checked-in model fixtures.
#[allow(dead_code)]
pub fn model_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("model")
}

/// Returns the node file of a fixture model, e.g. `featured/with-refs`.
#[allow(dead_code)]
pub fn model_node(model: &str) -> PathBuf {
    model_root().join(model).join("classes").join("first.yml")
}

/// Loads the expected inventory stored next to a fixture model.
#[allow(dead_code)]
pub fn expected_inventory(model: &str) -> Inventory {
    let path = model_root().join(format!("{model}.reclassed.yml"));
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    Inventory::from_yaml_str(&text)
        .unwrap_or_else(|e| panic!("cannot parse {}: {e}", path.display()))
}

/// Builder for a temporary directory of class files.
///
/// # Examples
///
/// ```no_run
/// # use common::ClassDirFixture;
/// let fixture = ClassDirFixture::new()
///     .with_class("base", "parameters: {port: 80}\n")
///     .with_class("web01", "classes: [base]\n");
/// let node = fixture.path("web01");
/// ```
#[allow(dead_code)]
pub struct ClassDirFixture {
    dir: TempDir,
    extension: String,
}

#[allow(dead_code)]
impl ClassDirFixture {
    /// Creates an empty class directory using the `yml` extension.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temporary directory"),
            extension: "yml".to_string(),
        }
    }

    /// Uses a different file extension for classes written afterwards.
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.to_string();
        self
    }

    /// Writes `<name>.<extension>` with the given contents.
    ///
    /// `name` may contain `/` to place the class in a subdirectory.
    #[must_use]
    pub fn with_class(self, name: &str, contents: &str) -> Self {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create class subdirectory");
        }
        fs::write(&path, contents).expect("failed to write class file");
        self
    }

    /// Path of the file backing class `name`.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(format!("{name}.{}", self.extension))
    }

    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for ClassDirFixture {
    fn default() -> Self {
        Self::new()
    }
}
