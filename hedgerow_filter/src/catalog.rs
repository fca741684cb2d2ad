// Copyright 2025 the Hedgerow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Catalog types: the immutable description of what can be filtered on.
//!
//! A [`Catalog`] is caller-supplied, read-only input. The engine never creates
//! or destroys categories or values; it only derives views over them.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::util::{contains_ignore_case, eq_ignore_case};

/// Reserved value id for the "unset/none" pseudo-value.
///
/// A category that declares an unset label (see [`Category::unset`]) offers
/// this pseudo-value alongside its declared values. At evaluation time it
/// matches records whose field is absent or explicitly empty rather than
/// records carrying the id itself.
pub const UNSET_ID: &str = "__unset__";

/// The shape of values a category accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    /// Exactly one discrete value at a time.
    Single,
    /// A set of discrete values.
    Multi,
    /// An inclusive numeric `[min, max]` pair.
    Range,
}

/// How a dependent category's candidates are matched against a parent
/// category's selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchMode {
    /// Case-insensitive substring containment.
    Substring,
    /// Case-insensitive equality.
    Exact,
}

impl MatchMode {
    /// Test a candidate string against one selected parent value.
    pub fn matches(self, candidate: &str, selected: &str) -> bool {
        match self {
            Self::Substring => contains_ignore_case(candidate, selected),
            Self::Exact => eq_ignore_case(candidate, selected),
        }
    }
}

/// One selectable value of a category.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryValue {
    /// Stable identifier, unique within the owning category.
    pub id: String,
    /// Human-readable label. Dependency matching consults both id and label.
    pub label: String,
}

impl CategoryValue {
    /// Create a value from an id and a label.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Create a value whose label doubles as its id.
    pub fn labeled(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: label.clone(),
            label,
        }
    }
}

/// A declared dependency of one category on another.
///
/// The dependent category's candidate values are narrowed by whatever is
/// currently selected for the parent category, across the whole filter state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dependency {
    /// Id of the parent category.
    pub parent: String,
    /// How candidates are matched against the parent's selected values.
    pub mode: MatchMode,
}

/// Declared bounds for a range category.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpanBounds {
    /// Smallest selectable value.
    pub min: f64,
    /// Largest selectable value.
    pub max: f64,
    /// Suggested increment for the host's range control.
    pub step: f64,
}

impl SpanBounds {
    pub(crate) fn ordered(&self) -> (f64, f64) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }
}

/// A named axis of filtering: a declared variant plus the values (or bounds)
/// it offers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category {
    /// Stable identifier; also names the record field the category constrains.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// The shape of values this category accepts.
    pub variant: Variant,
    /// Discrete values offered by this category. Empty for range categories.
    pub values: Vec<CategoryValue>,
    /// Declared bounds, for range categories.
    pub bounds: Option<SpanBounds>,
    /// Optional dependency on another category.
    pub dependency: Option<Dependency>,
    /// When present, the label of the "unset/none" pseudo-value this category
    /// offers (with id [`UNSET_ID`]).
    pub unset: Option<String>,
}

impl Category {
    /// Create a category with no values, bounds, dependency, or unset label.
    pub fn new(id: impl Into<String>, label: impl Into<String>, variant: Variant) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            variant,
            values: Vec::new(),
            bounds: None,
            dependency: None,
            unset: None,
        }
    }

    /// Replace the declared values.
    #[must_use]
    pub fn with_values(mut self, values: impl IntoIterator<Item = CategoryValue>) -> Self {
        self.values = values.into_iter().collect();
        self
    }

    /// Declare range bounds.
    #[must_use]
    pub fn with_bounds(mut self, min: f64, max: f64, step: f64) -> Self {
        self.bounds = Some(SpanBounds { min, max, step });
        self
    }

    /// Declare a dependency on a parent category.
    #[must_use]
    pub fn with_dependency(mut self, parent: impl Into<String>, mode: MatchMode) -> Self {
        self.dependency = Some(Dependency {
            parent: parent.into(),
            mode,
        });
        self
    }

    /// Declare an "unset/none" pseudo-value with the given label.
    #[must_use]
    pub fn with_unset(mut self, label: impl Into<String>) -> Self {
        self.unset = Some(label.into());
        self
    }

    /// Look up a declared value by id.
    pub fn value(&self, id: &str) -> Option<&CategoryValue> {
        self.values.iter().find(|v| v.id == id)
    }

    /// Whether `id` names a declared value or this category's unset
    /// pseudo-value.
    pub fn accepts_id(&self, id: &str) -> bool {
        (self.unset.is_some() && id == UNSET_ID) || self.values.iter().any(|v| v.id == id)
    }

    /// The synthesized unset pseudo-value, when declared.
    pub fn unset_value(&self) -> Option<CategoryValue> {
        self.unset
            .as_ref()
            .map(|label| CategoryValue::new(UNSET_ID, label.clone()))
    }
}

/// An ordered, id-indexed collection of categories.
///
/// Construction is the only mutation; the engine treats the catalog as a
/// read-only snapshot. On duplicate category ids the first declaration wins
/// and later ones are dropped.
///
/// With the `serde` feature enabled, hosts typically deserialize a
/// `Vec<Category>` from configuration and hand it to [`Catalog::new`]; the
/// catalog itself carries a derived index and is not serialized directly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    categories: Vec<Category>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, dropping later duplicates of any category id.
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        let mut out = Self::default();
        for category in categories {
            if out.by_id.contains_key(&category.id) {
                continue;
            }
            out.by_id.insert(category.id.clone(), out.categories.len());
            out.categories.push(category);
        }
        out
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.by_id.get(id).map(|&i| &self.categories[i])
    }

    /// All categories, in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Iterate over categories in declaration order.
    pub fn iter(&self) -> core::slice::Iter<'_, Category> {
        self.categories.iter()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the catalog declares no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Category;
    type IntoIter = core::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
