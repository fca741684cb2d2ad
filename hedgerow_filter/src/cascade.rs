// Copyright 2025 the Hedgerow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dependency cascading: narrowing a dependent category's values by the
//! parent category's current selection.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::catalog::{Catalog, Category, CategoryValue};
use crate::state::FilterState;

/// The values of `category` that survive its declared dependency, if any.
///
/// The parent selection is global: every instance of the parent category in
/// the whole state contributes its discrete ids, regardless of which instance
/// of `category` the caller is populating. Ranges contribute nothing, since
/// cascading is defined only for discrete categories.
///
/// - No declared dependency, an unknown parent category, or an empty parent
///   selection all leave the value list unnarrowed.
/// - Otherwise a value survives when at least one parent id (OR semantics)
///   matches its label or its id under the dependency's [`MatchMode`]
///   (case-insensitive containment or equality).
/// - The result may legitimately be empty; no fallback is invented.
///
/// Sibling-value exclusion ([`candidate_values`](crate::candidate_values))
/// operates on the list this returns.
///
/// [`MatchMode`]: crate::MatchMode
pub fn cascaded_values<'a>(
    catalog: &Catalog,
    state: &FilterState,
    category: &'a Category,
) -> Vec<&'a CategoryValue> {
    let Some(dependency) = &category.dependency else {
        return category.values.iter().collect();
    };
    // Validate the parent reference against the catalog; a dangling parent id
    // narrows nothing.
    if catalog.category(&dependency.parent).is_none() {
        return category.values.iter().collect();
    }

    let mut selected: SmallVec<[&str; 8]> = SmallVec::new();
    for instance in state.instances_of(&dependency.parent) {
        if let Some(value) = instance.value() {
            selected.extend(value.discrete_ids());
        }
    }
    if selected.is_empty() {
        return category.values.iter().collect();
    }

    category
        .values
        .iter()
        .filter(|value| {
            selected.iter().any(|parent| {
                dependency.mode.matches(&value.label, parent)
                    || dependency.mode.matches(&value.id, parent)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MatchMode, Variant};
    use crate::value::FilterValue;
    use alloc::string::ToString;
    use alloc::vec;

    fn payer_catalog(mode: MatchMode) -> Catalog {
        Catalog::new([
            Category::new("payer_family", "Payer family", Variant::Single).with_values([
                CategoryValue::labeled("United Healthcare"),
                CategoryValue::labeled("Aetna"),
            ]),
            Category::new("payer", "Payer", Variant::Multi)
                .with_values([
                    CategoryValue::labeled("United Healthcare - PPO"),
                    CategoryValue::labeled("United Healthcare - HMO"),
                    CategoryValue::labeled("Aetna - Commercial"),
                ])
                .with_dependency("payer_family", mode),
        ])
    }

    fn labels<'a>(values: &[&'a CategoryValue]) -> vec::Vec<&'a str> {
        values.iter().map(|v| v.label.as_str()).collect()
    }

    #[test]
    fn no_parent_selection_leaves_values_unnarrowed() {
        let catalog = payer_catalog(MatchMode::Substring);
        let payer = catalog.category("payer").unwrap();

        // No parent instance at all.
        let state = FilterState::new();
        assert_eq!(cascaded_values(&catalog, &state, payer).len(), 3);

        // A parent instance with an absent value narrows nothing either.
        let (state, _) = state.add(&catalog, "payer_family").unwrap();
        assert_eq!(cascaded_values(&catalog, &state, payer).len(), 3);
    }

    #[test]
    fn substring_narrows_to_matching_family() {
        let catalog = payer_catalog(MatchMode::Substring);
        let payer = catalog.category("payer").unwrap();

        let (state, id) = FilterState::new().add(&catalog, "payer_family").unwrap();
        let state = state
            .update(&catalog, id, FilterValue::One("United Healthcare".to_string()))
            .unwrap();

        let narrowed = cascaded_values(&catalog, &state, payer);
        assert_eq!(
            labels(&narrowed),
            ["United Healthcare - PPO", "United Healthcare - HMO"]
        );
    }

    #[test]
    fn exact_mode_matches_whole_label_or_id() {
        let catalog = payer_catalog(MatchMode::Exact);
        let payer = catalog.category("payer").unwrap();

        let (state, id) = FilterState::new().add(&catalog, "payer_family").unwrap();
        let state = state
            .update(&catalog, id, FilterValue::One("United Healthcare".to_string()))
            .unwrap();

        // "United Healthcare" is not equal to any payer label, so nothing
        // survives; an empty cascade is a valid terminal state.
        assert!(cascaded_values(&catalog, &state, payer).is_empty());
    }

    #[test]
    fn multiple_parent_selections_use_or_semantics() {
        let catalog = Catalog::new([
            Category::new("payer_family", "Payer family", Variant::Multi).with_values([
                CategoryValue::labeled("United Healthcare"),
                CategoryValue::labeled("Aetna"),
            ]),
            Category::new("payer", "Payer", Variant::Multi)
                .with_values([
                    CategoryValue::labeled("United Healthcare - PPO"),
                    CategoryValue::labeled("United Healthcare - HMO"),
                    CategoryValue::labeled("Aetna - Commercial"),
                ])
                .with_dependency("payer_family", MatchMode::Substring),
        ]);
        let payer = catalog.category("payer").unwrap();

        let (state, id) = FilterState::new().add(&catalog, "payer_family").unwrap();
        let state = state
            .update(
                &catalog,
                id,
                FilterValue::Many(vec!["United Healthcare".to_string(), "Aetna".to_string()]),
            )
            .unwrap();

        assert_eq!(cascaded_values(&catalog, &state, payer).len(), 3);
    }

    #[test]
    fn parent_selection_is_collected_across_all_parent_instances() {
        let catalog = payer_catalog(MatchMode::Substring);
        let payer = catalog.category("payer").unwrap();

        let (state, a) = FilterState::new().add(&catalog, "payer_family").unwrap();
        let (state, b) = state.add(&catalog, "payer_family").unwrap();
        let state = state
            .update(&catalog, a, FilterValue::One("United Healthcare".to_string()))
            .unwrap();
        let state = state
            .update(&catalog, b, FilterValue::One("Aetna".to_string()))
            .unwrap();

        assert_eq!(cascaded_values(&catalog, &state, payer).len(), 3);
    }

    #[test]
    fn cascade_is_a_subset_of_declared_values() {
        let catalog = payer_catalog(MatchMode::Substring);
        let payer = catalog.category("payer").unwrap();

        let (state, id) = FilterState::new().add(&catalog, "payer_family").unwrap();
        let state = state
            .update(&catalog, id, FilterValue::One("Aetna".to_string()))
            .unwrap();

        let narrowed = cascaded_values(&catalog, &state, payer);
        assert!(narrowed.iter().all(|v| payer.values.contains(v)));
    }

    #[test]
    fn dangling_parent_reference_narrows_nothing() {
        let catalog = Catalog::new([Category::new("payer", "Payer", Variant::Multi)
            .with_values([CategoryValue::labeled("Aetna - Commercial")])
            .with_dependency("missing_parent", MatchMode::Substring)]);
        let payer = catalog.category("payer").unwrap();
        assert_eq!(cascaded_values(&catalog, &FilterState::new(), payer).len(), 1);
    }
}
