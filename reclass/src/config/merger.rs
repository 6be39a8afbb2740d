//! Configuration layer merging.

use crate::config::schema::ResolverConfig;

/// Merges one configuration layer over another.
///
/// # Examples
///
/// ```
/// use reclass::config::{ConfigMerger, ResolverConfig};
///
/// let low = ResolverConfig { class_extension: Some("yml".to_string()), ..Default::default() };
/// let high = ResolverConfig { class_extension: Some("yaml".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.class_extension(), "yaml");
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge source config into target (source overwrites target if set).
    pub fn merge_into(target: &mut ResolverConfig, source: &ResolverConfig) {
        if source.class_extension.is_some() {
            target.class_extension.clone_from(&source.class_extension);
        }

        if source.resolve_sequences.is_some() {
            target.resolve_sequences = source.resolve_sequences;
        }
    }
}
