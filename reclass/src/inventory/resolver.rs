//! Class graph resolution.
//!
//! [`InventoryResolver`] turns a node file into a resolved [`Inventory`]:
//!
//! 1. The node file is loaded.
//! 2. Each declared class is resolved recursively, and the node's
//!    accumulated parameters are merged *into* it, so the class wins. The
//!    last declared class therefore has the highest precedence, above the
//!    node's own parameters.
//! 3. The node's own class name is appended to the visited classes.
//! 4. References are resolved, then override markers are promoted.
//!
//! Every level of the recursion performs all four steps. A class reached
//! through several paths is resolved again on each visit.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ResolverConfig;
use crate::error::{Error, Result};
use crate::inventory::loader::ClassLoader;
use crate::inventory::merger::ParameterMerger;
use crate::inventory::overrides::OverrideStripper;
use crate::inventory::references::ReferenceResolver;
use crate::inventory::schema::Inventory;

/// Resolves node files into inventories.
///
/// # Examples
///
/// ```no_run
/// use reclass::config::ResolverConfig;
/// use reclass::InventoryResolver;
/// use std::path::Path;
///
/// let resolver = InventoryResolver::new(ResolverConfig::default());
/// let inventory = resolver.build(Path::new("inventory/classes/web01.yml")).unwrap();
/// println!("{}", inventory.classes.join(", "));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InventoryResolver {
    config: ResolverConfig,
}

impl InventoryResolver {
    /// Creates a resolver using `config`.
    #[must_use]
    pub const fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// The configuration this resolver uses.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Build the inventory for the node file at `node`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the node or a class file cannot be read
    /// - [`Error::Decode`] / [`Error::InvalidDocument`] if a file is not a
    ///   valid node document
    /// - [`Error::CyclicClassGraph`] if a class includes itself
    /// - [`Error::InvalidReference`] / [`Error::InvalidReferenceType`] if a
    ///   placeholder cannot be substituted
    ///
    /// Errors raised inside a class are wrapped in [`Error::Class`] once per
    /// class on the path from the node. Reference errors raised by the node
    /// itself are wrapped with the node, so every reference error names the
    /// file it came from.
    pub fn build(&self, node: &Path) -> Result<Inventory> {
        let mut active = Vec::new();
        self.resolve(node, &mut active).map_err(|e| {
            if matches!(
                e,
                Error::InvalidReference { .. } | Error::InvalidReferenceType { .. }
            ) {
                let name = ClassLoader::class_name(node, self.config.class_extension());
                e.in_class(name, node)
            } else {
                e
            }
        })
    }

    /// Resolve `path`, tracking the files currently being resolved.
    fn resolve(&self, path: &Path, active: &mut Vec<PathBuf>) -> Result<Inventory> {
        let canonical = fs::canonicalize(path).map_err(|source| Error::NotFound {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(start) = active.iter().position(|p| *p == canonical) {
            let cycle = active[start..]
                .iter()
                .chain(std::iter::once(&canonical))
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(Error::CyclicClassGraph { cycle });
        }

        active.push(canonical);
        let result = self.resolve_file(path, active);
        active.pop();
        result
    }

    fn resolve_file(&self, path: &Path, active: &mut Vec<PathBuf>) -> Result<Inventory> {
        let extension = self.config.class_extension();
        log::debug!("resolving {}", path.display());

        let local = ClassLoader::load_file(path)?;
        let mut accumulated = Inventory::new(Vec::new(), local.parameters);

        for class in &local.classes {
            let class_path = ClassLoader::class_path(path, class, extension)?;
            log::debug!("{}: including class '{class}'", path.display());

            let resolved = self
                .resolve(&class_path, active)
                .map_err(|e| e.in_class(class.as_str(), &class_path))?;

            accumulated.classes.extend(resolved.classes);
            accumulated.parameters =
                ParameterMerger::merge(resolved.parameters, accumulated.parameters);
        }

        accumulated
            .classes
            .push(ClassLoader::class_name(path, extension));

        ReferenceResolver::resolve_parameters(
            &mut accumulated.parameters,
            self.config.resolve_sequences(),
        )?;
        OverrideStripper::strip(&mut accumulated.parameters);
        debug_assert!(!OverrideStripper::has_overrides(&accumulated.parameters));

        Ok(accumulated)
    }
}

/// Build the inventory for the node file at `path` with default settings.
///
/// # Errors
///
/// See [`InventoryResolver::build`].
///
/// # Examples
///
/// ```no_run
/// let inventory = reclass::build_inventory("inventory/classes/web01.yml").unwrap();
/// assert_eq!(inventory.classes.last().map(String::as_str), Some("web01"));
/// ```
pub fn build_inventory(path: impl AsRef<Path>) -> Result<Inventory> {
    InventoryResolver::default().build(path.as_ref())
}

/// Build the inventory for the node file at `path` with `config`.
///
/// # Errors
///
/// See [`InventoryResolver::build`].
pub fn build_inventory_with(path: impl AsRef<Path>, config: &ResolverConfig) -> Result<Inventory> {
    InventoryResolver::new(config.clone()).build(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;
    use tempfile::TempDir;

    /// Writes `files` (name without extension, contents) into a temp dir.
    fn inventory_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, contents) in files {
            let path = dir.path().join(format!("{name}.yml"));
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, contents).unwrap();
        }
        dir
    }

    fn build(dir: &TempDir, node: &str) -> Result<Inventory> {
        build_inventory(dir.path().join(format!("{node}.yml")))
    }

    #[test]
    fn test_node_without_classes() {
        let dir = inventory_dir(&[("first", "parameters:\n  a: 1\n  b: '${a}'\n")]);
        let inventory = build(&dir, "first").unwrap();

        assert_eq!(inventory.classes, vec!["first"]);
        assert_eq!(inventory.get("b"), Some(&Value::from(1)));
    }

    #[test]
    fn test_last_class_wins_over_node_and_earlier_classes() {
        let dir = inventory_dir(&[
            ("first", "classes: [one, two]\nparameters:\n  a: node\n  own: node\n"),
            ("one", "parameters:\n  a: one\n  b: one\n"),
            ("two", "parameters:\n  a: two\n"),
        ]);
        let inventory = build(&dir, "first").unwrap();

        assert_eq!(inventory.classes, vec!["one", "two", "first"]);
        assert_eq!(inventory.get("a"), Some(&Value::from("two")));
        assert_eq!(inventory.get("b"), Some(&Value::from("one")));
        assert_eq!(inventory.get("own"), Some(&Value::from("node")));
    }

    #[test]
    fn test_node_override_wins() {
        let dir = inventory_dir(&[
            ("first", "classes: [base]\nparameters:\n  '~a': 3\n"),
            ("base", "parameters:\n  a: 2\n"),
        ]);
        let inventory = build(&dir, "first").unwrap();
        assert_eq!(inventory.get("a"), Some(&Value::from(3)));
        assert!(inventory.get("~a").is_none());
    }

    #[test]
    fn test_nested_class_graph_order() {
        let dir = inventory_dir(&[
            ("first", "classes: [web, db]\n"),
            ("web", "classes: [common]\nparameters: {role: web}\n"),
            ("db", "classes: [common]\nparameters: {role: db}\n"),
            ("common", "parameters: {role: none, shared: true}\n"),
        ]);
        let inventory = build(&dir, "first").unwrap();

        // common is visited once per path
        assert_eq!(inventory.classes, vec!["common", "web", "common", "db", "first"]);
        // an included class outranks the file including it, at every level
        assert_eq!(inventory.get("role"), Some(&Value::from("none")));
        assert_eq!(inventory.get("shared"), Some(&Value::from(true)));
    }

    #[test]
    fn test_missing_class_is_not_found_with_context() {
        let dir = inventory_dir(&[("first", "classes: [ghost]\n")]);
        let err = build(&dir, "first").unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.class_chain(), vec!["ghost"]);
    }

    #[test]
    fn test_missing_node_is_not_found() {
        let dir = inventory_dir(&[]);
        let err = build(&dir, "first").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_decode_error_in_class() {
        let dir = inventory_dir(&[("first", "classes: [bad]\n"), ("bad", "a: [unclosed\n")]);
        let err = build(&dir, "first").unwrap_err();
        assert!(err.is_decode_error());
        assert_eq!(err.class_chain(), vec!["bad"]);
    }

    #[test]
    fn test_self_cycle_detected() {
        let dir = inventory_dir(&[("first", "classes: [first]\n")]);
        let err = build(&dir, "first").unwrap_err();
        assert!(err.is_cyclic_class_graph());
    }

    #[test]
    fn test_indirect_cycle_detected() {
        let dir = inventory_dir(&[
            ("first", "classes: [a]\n"),
            ("a", "classes: [b]\n"),
            ("b", "classes: [a]\n"),
        ]);
        let err = build(&dir, "first").unwrap_err();

        assert!(err.is_cyclic_class_graph());
        assert_eq!(err.class_chain(), vec!["a", "b", "a"]);
        let Error::CyclicClassGraph { cycle } = err.root_cause() else {
            panic!("expected a cycle, got {err}");
        };
        assert_eq!(cycle.matches(" -> ").count(), 2);
        assert!(cycle.ends_with("a.yml"));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let dir = inventory_dir(&[
            ("first", "classes: [a, b]\n"),
            ("a", "classes: [c]\n"),
            ("b", "classes: [c]\n"),
            ("c", "x: 1\n"),
        ]);
        assert!(build(&dir, "first").is_ok());
    }

    #[test]
    fn test_class_references_resolve_within_class() {
        let dir = inventory_dir(&[
            ("first", "classes: [base]\nparameters:\n  name: node\n"),
            ("base", "parameters:\n  name: base\n  greeting: 'hello ${name}'\n"),
        ]);
        let inventory = build(&dir, "first").unwrap();
        assert_eq!(inventory.get("greeting"), Some(&Value::from("hello base")));
    }

    #[test]
    fn test_class_reference_to_node_parameter_fails() {
        let dir = inventory_dir(&[
            ("first", "classes: [base]\nparameters:\n  name: node\n"),
            ("base", "parameters:\n  greeting: 'hello ${name}'\n"),
        ]);
        let err = build(&dir, "first").unwrap_err();
        assert!(err.is_invalid_reference());
        assert_eq!(err.class_chain(), vec!["base"]);
    }

    #[test]
    fn test_node_reference_error_names_node_file() {
        let dir = inventory_dir(&[("first", "parameters:\n  b: '${missing}'\n")]);
        let err = build(&dir, "first").unwrap_err();

        assert!(err.is_invalid_reference());
        assert_eq!(err.class_chain(), vec!["first"]);
        let Error::Class { path, .. } = &err else {
            panic!("expected node context, got {err}");
        };
        assert!(path.ends_with("first.yml"));
    }

    #[test]
    fn test_node_decode_error_is_not_rewrapped() {
        let dir = inventory_dir(&[("first", "classes: 3\n")]);
        let err = build(&dir, "first").unwrap_err();
        assert!(matches!(err, Error::InvalidDocument { .. }));
        assert!(err.class_chain().is_empty());
    }

    #[test]
    fn test_absolute_class_name_is_rejected() {
        let outside = inventory_dir(&[("evil", "parameters:\n  leak: true\n")]);
        let absolute = outside.path().join("evil");
        let node = format!("classes: ['{}']\n", absolute.display());
        let dir = inventory_dir(&[("first", node.as_str())]);

        let err = build(&dir, "first").unwrap_err();

        assert!(err.is_decode_error(), "unexpected error: {err}");
        assert!(err.class_chain().is_empty());
        assert!(format!("{err}").contains("must be relative"));
    }

    #[test]
    fn test_relative_class_name() {
        let dir = inventory_dir(&[
            ("first", "classes: [roles/web]\n"),
            ("roles/web", "classes: [../common]\nparameters: {role: web}\n"),
            ("common", "parameters: {env: prod}\n"),
        ]);
        let inventory = build(&dir, "first").unwrap();
        assert_eq!(inventory.classes, vec!["common", "web", "first"]);
        assert_eq!(inventory.get("env"), Some(&Value::from("prod")));
    }

    #[test]
    fn test_custom_extension() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("node.yaml"), "classes: [base]\n").unwrap();
        fs::write(dir.path().join("base.yaml"), "a: 1\n").unwrap();

        let config = ResolverConfig {
            class_extension: Some("yaml".to_string()),
            ..Default::default()
        };
        let inventory = build_inventory_with(dir.path().join("node.yaml"), &config).unwrap();
        assert_eq!(inventory.classes, vec!["base", "node"]);
    }
}
