//! Property-based tests for merging, override stripping and references.

use super::merger::ParameterMerger;
use super::overrides::OverrideStripper;
use super::references::ReferenceResolver;
use proptest::prelude::*;
use serde_yaml::{Mapping, Value};

// Scalars that never look like placeholders
fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z ]{0,8}".prop_map(Value::from),
    ]
}

// Small key space so that merged trees actually collide
fn key_strategy() -> impl Strategy<Value = Value> {
    "~?[a-d]".prop_map(Value::from)
}

fn tree_strategy() -> impl Strategy<Value = Mapping> {
    let leaf = prop_oneof![
        scalar_strategy(),
        prop::collection::vec(scalar_strategy(), 0..3).prop_map(Value::Sequence),
    ];
    let value = leaf.prop_recursive(3, 24, 4, |inner| {
        prop::collection::vec((key_strategy(), inner), 0..4)
            .prop_map(|entries| Value::Mapping(entries.into_iter().collect()))
    });
    prop::collection::vec((key_strategy(), value), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        .. ProptestConfig::default()
    })]

    // Merging with an empty tree on either side changes nothing
    #[test]
    fn merge_empty_is_identity(tree in tree_strategy()) {
        prop_assert_eq!(ParameterMerger::merge(tree.clone(), Mapping::new()), tree.clone());
        prop_assert_eq!(ParameterMerger::merge(Mapping::new(), tree.clone()), tree);
    }

    // Non-mapping destination values always survive a merge unchanged
    #[test]
    fn merge_destination_scalars_win(destination in tree_strategy(), source in tree_strategy()) {
        let merged = ParameterMerger::merge(destination.clone(), source);
        for (key, value) in &destination {
            if !value.is_mapping() {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
    }

    // The merged tree has exactly the keys of both inputs
    #[test]
    fn merge_keeps_union_of_keys(destination in tree_strategy(), source in tree_strategy()) {
        let merged = ParameterMerger::merge(destination.clone(), source.clone());
        for key in destination.keys().chain(source.keys()) {
            prop_assert!(merged.contains_key(key));
        }
        prop_assert!(merged.len() <= destination.len() + source.len());
    }

    // Merging a tree with itself is a no-op
    #[test]
    fn merge_is_idempotent(tree in tree_strategy()) {
        prop_assert_eq!(ParameterMerger::merge(tree.clone(), tree.clone()), tree);
    }

    // Stripping removes every marker and a second pass does nothing
    #[test]
    fn strip_is_idempotent(tree in tree_strategy()) {
        let mut once = tree;
        OverrideStripper::strip(&mut once);
        prop_assert!(!OverrideStripper::has_overrides(&once));

        let mut twice = once.clone();
        OverrideStripper::strip(&mut twice);
        prop_assert_eq!(once, twice);
    }

    // Trees without placeholders are left untouched by reference resolution
    #[test]
    fn resolve_without_placeholders_is_noop(tree in tree_strategy()) {
        let mut resolved = tree.clone();
        ReferenceResolver::resolve_parameters(&mut resolved, true).unwrap();
        prop_assert_eq!(resolved, tree);
    }

    // Resolving already resolved parameters again changes nothing
    #[test]
    fn resolve_is_idempotent(
        name in "[a-z]{1,8}",
        port in any::<u16>(),
        prefix in "[a-z]{0,4}",
    ) {
        let mut parameters: Mapping = serde_yaml::from_str(&format!(
            "name: '{name}'\nport: {port}\nlisten: '${{port}}'\nlabel: '{prefix}-${{name}}'\nnested: {{copy: '${{name}}'}}"
        )).unwrap();

        ReferenceResolver::resolve_parameters(&mut parameters, false).unwrap();
        prop_assert_eq!(parameters.get("listen"), Some(&Value::from(port)));
        prop_assert_eq!(parameters.get("label"), Some(&Value::from(format!("{prefix}-{name}"))));

        let mut again = parameters.clone();
        ReferenceResolver::resolve_parameters(&mut again, false).unwrap();
        prop_assert_eq!(again, parameters);
    }
}
