// Copyright 2025 the Hedgerow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered collection of active filter instances and its pure
//! transitions.
//!
//! A [`FilterState`] is an immutable snapshot owned by the caller. Every
//! transition borrows the current snapshot and returns a fresh one; no
//! instance is ever mutated after creation. Two snapshots can therefore be
//! evaluated concurrently without any locking discipline.

use alloc::string::String;
use alloc::vec::Vec;

use crate::catalog::Catalog;
use crate::value::FilterValue;

/// Opaque identifier of a filter instance.
///
/// Ids are allocated from a monotone counter carried by the state, so an id
/// never recurs within one state lineage, not even across
/// [`FilterState::clear`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceId(u64);

/// One active use of a category within the filter state.
///
/// Created with an absent value when its category is chosen, replaced (never
/// mutated) when a value is picked, destroyed when removed or when the state
/// is cleared.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterInstance {
    id: InstanceId,
    category: String,
    value: Option<FilterValue>,
}

impl FilterInstance {
    /// This instance's id.
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Id of the category this instance filters on.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The held value, if one has been picked.
    pub fn value(&self) -> Option<&FilterValue> {
        self.value.as_ref()
    }

    /// Whether this instance currently imposes a constraint.
    pub fn is_active(&self) -> bool {
        self.value.is_some()
    }
}

/// An ordered sequence of filter instances.
///
/// Order is insertion order and carries no evaluation semantics; the
/// predicate combines instances with AND, which is order-independent.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterState {
    instances: Vec<FilterInstance>,
    next_id: u64,
}

/// Equality compares the instance sequence. The id counter is an allocation
/// detail, so adding an instance and removing it again restores a state equal
/// to the original.
impl PartialEq for FilterState {
    fn eq(&self, other: &Self) -> bool {
        self.instances == other.instances
    }
}

impl FilterState {
    /// An empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new instance of `category` with an absent value.
    ///
    /// Returns the successor state and the new instance's id, or `None` when
    /// the category id is unknown to the catalog (the caller keeps the prior
    /// state). Duplicate instances of one category are allowed.
    pub fn add(&self, catalog: &Catalog, category: &str) -> Option<(Self, InstanceId)> {
        catalog.category(category)?;
        let id = InstanceId(self.next_id);
        let mut next = self.clone();
        next.next_id += 1;
        next.instances.push(FilterInstance {
            id,
            category: String::from(category),
            value: None,
        });
        Some((next, id))
    }

    /// Replace an instance's value with its normalized form.
    ///
    /// Returns `None` when the instance is unknown, its category is missing
    /// from the catalog, or normalization rejects the value (shape mismatch,
    /// undeclared single-select id, non-finite span end); the caller keeps
    /// the prior state, retaining the prior value.
    pub fn update(&self, catalog: &Catalog, id: InstanceId, value: FilterValue) -> Option<Self> {
        let index = self.index_of(id)?;
        let category = catalog.category(&self.instances[index].category)?;
        let value = value.normalized(category)?;
        let mut next = self.clone();
        next.instances[index].value = Some(value);
        Some(next)
    }

    /// Return an instance to the absent state without removing it.
    ///
    /// Unknown ids are a no-op.
    #[must_use]
    pub fn clear_value(&self, id: InstanceId) -> Self {
        let mut next = self.clone();
        if let Some(index) = next.index_of(id) {
            next.instances[index].value = None;
        }
        next
    }

    /// Remove an instance. No other instance is affected; unknown ids are a
    /// no-op.
    #[must_use]
    pub fn remove(&self, id: InstanceId) -> Self {
        let mut next = self.clone();
        next.instances.retain(|instance| instance.id != id);
        next
    }

    /// Remove every instance. The id counter is retained so ids stay unique
    /// across the state's whole lineage.
    #[must_use]
    pub fn clear(&self) -> Self {
        Self {
            instances: Vec::new(),
            next_id: self.next_id,
        }
    }

    /// Look up an instance by id.
    pub fn get(&self, id: InstanceId) -> Option<&FilterInstance> {
        self.index_of(id).map(|i| &self.instances[i])
    }

    /// All instances, in insertion order.
    pub fn instances(&self) -> &[FilterInstance] {
        &self.instances
    }

    /// The instances of one category, in insertion order.
    pub fn instances_of<'s>(
        &'s self,
        category: &'s str,
    ) -> impl Iterator<Item = &'s FilterInstance> {
        self.instances
            .iter()
            .filter(move |instance| instance.category == category)
    }

    /// Number of instances, active or not.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the state holds no instances.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Number of instances currently holding a value.
    pub fn active_len(&self) -> usize {
        self.instances.iter().filter(|i| i.is_active()).count()
    }

    fn index_of(&self, id: InstanceId) -> Option<usize> {
        self.instances.iter().position(|instance| instance.id == id)
    }
}
