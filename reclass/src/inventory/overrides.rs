//! Override marker handling.
//!
//! A key written as `~name` carries a value that must win over `name`
//! whatever the merge precedence. Merging keeps both keys side by side;
//! [`OverrideStripper::strip`] then promotes every marked value onto its
//! plain key as the last step of resolution.

use serde_yaml::{Mapping, Value};

/// Prefix marking a key as an override.
pub const OVERRIDE_SIGIL: char = '~';

/// Promotes override-marked keys onto their plain counterparts.
///
/// # Examples
///
/// ```
/// use reclass::inventory::OverrideStripper;
/// use serde_yaml::Mapping;
///
/// let mut parameters: Mapping = serde_yaml::from_str("a: 2\n'~a': 3\nb: {'~c': 1}").unwrap();
/// OverrideStripper::strip(&mut parameters);
///
/// let expected: Mapping = serde_yaml::from_str("a: 3\nb: {c: 1}").unwrap();
/// assert_eq!(parameters, expected);
/// ```
pub struct OverrideStripper;

impl OverrideStripper {
    /// Returns the plain key name if `key` carries the override marker.
    ///
    /// Repeated markers (`~~a`) name the same plain key as a single one.
    #[must_use]
    pub fn overridden_key(key: &Value) -> Option<&str> {
        let marked = key.as_str()?;
        let plain = marked.trim_start_matches(OVERRIDE_SIGIL);
        (plain.len() < marked.len()).then_some(plain)
    }

    /// Promote every `~key` in `parameters`, at any mapping depth.
    ///
    /// Nested mappings are normalised before the enclosing mapping's own
    /// keys. Sequences are not entered. When several marked keys name the
    /// same plain key, they are promoted in key order and the last one wins.
    pub fn strip(parameters: &mut Mapping) {
        for (_, value) in parameters.iter_mut() {
            if let Value::Mapping(child) = value {
                Self::strip(child);
            }
        }

        let marked: Vec<Value> = parameters
            .keys()
            .filter(|key| Self::overridden_key(key).is_some())
            .cloned()
            .collect();

        for key in marked {
            let Some(plain) = Self::overridden_key(&key).map(str::to_string) else {
                continue;
            };
            if let Some(value) = parameters.shift_remove(&key) {
                log::trace!("override: promoting {key:?} onto '{plain}'");
                parameters.insert(Value::String(plain), value);
            }
        }
    }

    /// Returns true if any mapping in `parameters` still has a marked key.
    #[must_use]
    pub fn has_overrides(parameters: &Mapping) -> bool {
        parameters.iter().any(|(key, value)| {
            Self::overridden_key(key).is_some()
                || matches!(value, Value::Mapping(child) if Self::has_overrides(child))
        })
    }
}
