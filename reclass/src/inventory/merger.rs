//! Parameter tree merging.
//!
//! Merging combines a higher-precedence `destination` tree with a
//! lower-precedence `source` tree. Only mappings merge; every other value
//! in the destination shadows the source wholesale.

use serde_yaml::{Mapping, Value};

/// Merges parameter trees with the destination taking precedence.
///
/// # Examples
///
/// ```
/// use reclass::inventory::ParameterMerger;
/// use serde_yaml::Mapping;
///
/// let destination: Mapping = serde_yaml::from_str("a: 2\nnested: {x: 1}").unwrap();
/// let source: Mapping = serde_yaml::from_str("a: 1\nb: 1\nnested: {x: 0, y: 0}").unwrap();
///
/// let merged = ParameterMerger::merge(destination, source);
/// let expected: Mapping = serde_yaml::from_str("a: 2\nb: 1\nnested: {x: 1, y: 0}").unwrap();
/// assert_eq!(merged, expected);
/// ```
pub struct ParameterMerger;

impl ParameterMerger {
    /// Merge `source` into `destination`, returning the combined tree.
    ///
    /// # Merging Rules
    ///
    /// - Keys only in `source`: copied
    /// - Keys in both, both mappings: merged recursively
    /// - Keys in both, anything else: destination kept, source dropped
    ///
    /// `key` and `~key` are distinct keys here; override markers are only
    /// interpreted after merging, by [`crate::inventory::OverrideStripper`].
    #[must_use]
    pub fn merge(destination: Mapping, source: Mapping) -> Mapping {
        let mut result = destination;

        for (key, source_value) in source {
            if let Some(existing) = result.get_mut(&key) {
                match (existing, source_value) {
                    (Value::Mapping(dest_map), Value::Mapping(src_map)) => {
                        let dest_map_owned = std::mem::take(dest_map);
                        *dest_map = Self::merge(dest_map_owned, src_map);
                    }
                    (_, shadowed) => {
                        log::trace!("merge: keeping destination value for {key:?}, dropping {shadowed:?}");
                    }
                }
                continue;
            }
            result.insert(key, source_value);
        }

        result
    }

}
