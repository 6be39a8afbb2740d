//! Reference resolution.
//!
//! A string parameter may point at another parameter with a `${a:b:c}`
//! placeholder, one colon-separated segment per mapping level. A string that
//! is exactly one placeholder takes the referenced value verbatim, whatever
//! its type. Placeholders embedded in surrounding text are interpolated and
//! must refer to strings.
//!
//! Lookups read a snapshot of the tree taken when resolution starts, so the
//! result never depends on the order sibling keys are visited in. A
//! referenced value that itself contains placeholders is resolved before it
//! is substituted.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::inventory::schema::value_kind;

static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\w+(?::\w+)*)\}").expect("reference pattern is valid"));

/// Separator between path segments inside a placeholder.
pub const PATH_SEPARATOR: char = ':';

/// Substitutes `${...}` placeholders with values from a parameter tree.
///
/// # Examples
///
/// ```
/// use reclass::inventory::ReferenceResolver;
/// use serde_yaml::{Mapping, Value};
///
/// let mut parameters: Mapping =
///     serde_yaml::from_str("port: 80\nhost: web\nurl: 'http://${host}'\nlisten: '${port}'").unwrap();
/// ReferenceResolver::resolve_parameters(&mut parameters, false).unwrap();
///
/// assert_eq!(parameters.get("url"), Some(&Value::from("http://web")));
/// assert_eq!(parameters.get("listen"), Some(&Value::from(80)));
/// ```
pub struct ReferenceResolver<'a> {
    root: &'a Mapping,
    resolve_sequences: bool,
}

impl<'a> ReferenceResolver<'a> {
    /// Creates a resolver that looks references up in `root`.
    const fn new(root: &'a Mapping) -> Self {
        Self {
            root,
            resolve_sequences: false,
        }
    }

    /// Also rewrite strings found inside sequences.
    const fn with_sequences(mut self, enabled: bool) -> Self {
        self.resolve_sequences = enabled;
        self
    }

    /// Resolve every placeholder in `parameters` against a snapshot of it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReference`] if a placeholder path does not
    /// exist (or a reference chain loops back on itself), and
    /// [`Error::InvalidReferenceType`] if an embedded placeholder resolves to
    /// a non-string value.
    pub fn resolve_parameters(parameters: &mut Mapping, resolve_sequences: bool) -> Result<()> {
        let snapshot = parameters.clone();
        let resolver = ReferenceResolver::new(&snapshot).with_sequences(resolve_sequences);
        resolver.resolve_mapping(parameters, &mut Vec::new())
    }

    fn resolve_mapping(&self, mapping: &mut Mapping, stack: &mut Vec<String>) -> Result<()> {
        for (_, value) in mapping.iter_mut() {
            self.resolve_in_place(value, stack)?;
        }
        Ok(())
    }

    fn resolve_in_place(&self, value: &mut Value, stack: &mut Vec<String>) -> Result<()> {
        let replacement = match value {
            Value::String(text) => self.interpolate(text, stack)?,
            Value::Mapping(mapping) => {
                self.resolve_mapping(mapping, stack)?;
                None
            }
            Value::Sequence(items) if self.resolve_sequences => {
                for item in items {
                    self.resolve_in_place(item, stack)?;
                }
                None
            }
            _ => None,
        };
        if let Some(resolved) = replacement {
            *value = resolved;
        }
        Ok(())
    }

    /// Returns the replacement for `text`, or `None` if it has no placeholders.
    fn interpolate(&self, text: &str, stack: &mut Vec<String>) -> Result<Option<Value>> {
        let mut placeholders = REFERENCE_RE.captures_iter(text).peekable();
        let Some(first) = placeholders.peek() else {
            return Ok(None);
        };

        let whole = first.get(0).is_some_and(|m| m.start() == 0 && m.end() == text.len());
        if whole {
            let (reference, path) = placeholder_parts(first);
            return self.lookup(reference, path, stack).map(Some);
        }

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in placeholders {
            let (reference, path) = placeholder_parts(&caps);
            let Some(whole_match) = caps.get(0) else {
                continue;
            };
            out.push_str(&text[last..whole_match.start()]);
            match self.lookup(reference, path, stack)? {
                Value::String(resolved) => out.push_str(&resolved),
                other => {
                    return Err(Error::InvalidReferenceType {
                        reference: reference.to_string(),
                        found: value_kind(&other),
                    })
                }
            }
            last = whole_match.end();
        }
        out.push_str(&text[last..]);

        Ok(Some(Value::String(out)))
    }

    /// Finds the value at `path` and resolves its own placeholders.
    fn lookup(&self, reference: &str, path: &str, stack: &mut Vec<String>) -> Result<Value> {
        if stack.iter().any(|visited| visited == path) {
            let mut chain = stack.clone();
            chain.push(path.to_string());
            return Err(Error::InvalidReference {
                reference: reference.to_string(),
                reason: format!("circular reference {}", chain.join(" -> ")),
            });
        }

        let mut found = self.find(reference, path)?.clone();
        log::trace!("reference {reference} -> {found:?}");

        stack.push(path.to_string());
        let result = self.resolve_in_place(&mut found, stack);
        stack.pop();
        result.map(|()| found)
    }

    fn find(&self, reference: &str, path: &str) -> Result<&'a Value> {
        let mut current: Option<&'a Value> = None;
        let mut walked = String::new();

        for segment in path.split(PATH_SEPARATOR) {
            let mapping = match current {
                None => self.root,
                Some(Value::Mapping(mapping)) => mapping,
                Some(other) => {
                    return Err(Error::InvalidReference {
                        reference: reference.to_string(),
                        reason: format!(
                            "'{walked}' is a {}, not a mapping",
                            value_kind(other)
                        ),
                    })
                }
            };

            current = Some(mapping.get(segment).ok_or_else(|| Error::InvalidReference {
                reference: reference.to_string(),
                reason: if walked.is_empty() {
                    format!("no parameter named '{segment}'")
                } else {
                    format!("'{walked}' has no key '{segment}'")
                },
            })?);

            if !walked.is_empty() {
                walked.push(PATH_SEPARATOR);
            }
            walked.push_str(segment);
        }

        current.ok_or_else(|| Error::InvalidReference {
            reference: reference.to_string(),
            reason: "empty path".to_string(),
        })
    }
}

fn placeholder_parts<'t>(caps: &Captures<'t>) -> (&'t str, &'t str) {
    let reference = caps.get(0).map_or("", |m| m.as_str());
    let path = caps.get(1).map_or("", |m| m.as_str());
    (reference, path)
}
