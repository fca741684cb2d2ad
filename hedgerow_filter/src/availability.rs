// Copyright 2025 the Hedgerow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derived view data for selection UIs: which categories can still be added,
//! and which values an instance may still pick.

use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::catalog::{Catalog, Category, CategoryValue, UNSET_ID};
use crate::cascade::cascaded_values;
use crate::state::{FilterState, InstanceId};
use crate::util::contains_ignore_case;

/// The categories a caller may add an instance of.
///
/// Every catalog category qualifies: duplicate instances of one category are
/// allowed by design, so an active instance never exhausts its category. Any
/// further narrowing (hiding categories for UI reasons) is caller intent, not
/// engine policy.
pub fn addable_categories(catalog: &Catalog) -> impl Iterator<Item = &Category> {
    catalog.iter()
}

/// The values instance `id` may currently pick.
///
/// Starting from the instance's category values narrowed by the dependency
/// cascade, removes every discrete id already claimed by a *different*
/// instance of the same category (the instance's own selection stays
/// offered), then appends the category's unset pseudo-value when declared and
/// unclaimed. Two sibling instances are thus never offered overlapping
/// choices.
///
/// Unknown instance ids, and instances whose category is missing from the
/// catalog, yield an empty list.
pub fn candidate_values(
    catalog: &Catalog,
    state: &FilterState,
    id: InstanceId,
) -> Vec<CategoryValue> {
    let Some(instance) = state.get(id) else {
        return Vec::new();
    };
    let Some(category) = catalog.category(instance.category()) else {
        return Vec::new();
    };

    let mut claimed: HashSet<&str> = HashSet::new();
    for sibling in state.instances_of(instance.category()) {
        if sibling.id() == id {
            continue;
        }
        if let Some(value) = sibling.value() {
            claimed.extend(value.discrete_ids());
        }
    }

    let mut candidates: Vec<CategoryValue> = cascaded_values(catalog, state, category)
        .into_iter()
        .filter(|value| !claimed.contains(value.id.as_str()))
        .cloned()
        .collect();
    if let Some(unset) = category.unset_value()
        && !claimed.contains(UNSET_ID)
    {
        candidates.push(unset);
    }
    candidates
}

/// Filter a candidate list by a palette search query.
///
/// Case-insensitive substring containment against each value's label and id,
/// preserving order. An empty query keeps everything.
pub fn search_values(values: &[CategoryValue], query: &str) -> Vec<CategoryValue> {
    if query.is_empty() {
        return values.to_vec();
    }
    values
        .iter()
        .filter(|value| {
            contains_ignore_case(&value.label, query) || contains_ignore_case(&value.id, query)
        })
        .cloned()
        .collect()
}
