// Copyright 2025 the Hedgerow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Record evaluation: free-text search plus the AND of all active instances.
//!
//! Evaluation is total: unrecognized shapes, malformed fields, and dangling
//! references degrade to a failed (or vacuous) match, never a panic.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::catalog::{Catalog, UNSET_ID, Variant};
use crate::state::{FilterInstance, FilterState};
use crate::util::lower;
use crate::value::FilterValue;

/// The content of one record field.
///
/// Fields are scalars or lists of scalars. A nested list is tolerated but
/// never matches anything.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldValue {
    /// An explicitly empty field.
    Null,
    /// A text scalar.
    Text(String),
    /// A numeric scalar.
    Number(f64),
    /// A list of scalars.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Whether this field counts as "unset" for the sentinel pseudo-value:
    /// `Null`, the empty string, or the literal strings `"none"` / `"null"`.
    pub fn is_nullish(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => matches!(text.as_str(), "" | "none" | "null"),
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(String::from(text))
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for FieldValue {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// A row the engine can evaluate: an opaque mapping from field name to
/// [`FieldValue`], looked up by category id (for instance constraints) or by
/// caller-declared field name (for free-text search).
///
/// Implementations are provided for the obvious map types; hosts with their
/// own row representation implement the single lookup method instead of
/// copying rows into a map.
pub trait Record {
    /// Look up a field by name. `None` means the field is absent.
    fn field(&self, name: &str) -> Option<&FieldValue>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<&FieldValue> {
        (**self).field(name)
    }
}

impl<S: core::hash::BuildHasher> Record for hashbrown::HashMap<String, FieldValue, S> {
    fn field(&self, name: &str) -> Option<&FieldValue> {
        self.get(name)
    }
}

impl Record for alloc::collections::BTreeMap<String, FieldValue> {
    fn field(&self, name: &str) -> Option<&FieldValue> {
        self.get(name)
    }
}

/// A free-text term over caller-declared searchable fields.
///
/// An empty query imposes no constraint. A non-empty query matches when its
/// lower-cased form is a substring of at least one searchable field (OR
/// across fields): text scalars match case-insensitively, numbers match
/// against their display form, lists match when any element does.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TextSearch<'a> {
    /// The query as typed.
    pub query: &'a str,
    /// Names of the record fields that participate in the search.
    pub fields: &'a [&'a str],
}

impl Default for TextSearch<'_> {
    /// The inert search: empty query, no fields.
    fn default() -> Self {
        Self {
            query: "",
            fields: &[],
        }
    }
}

impl<'a> TextSearch<'a> {
    /// A search over the given fields.
    pub fn new(query: &'a str, fields: &'a [&'a str]) -> Self {
        Self { query, fields }
    }
}

/// Whether a record passes the free-text term and every active instance.
///
/// Instances with absent values impose nothing; instances referencing a
/// category the catalog does not declare are ignored. Instance order is
/// irrelevant: constraints combine with AND.
pub fn matches_record<R: Record + ?Sized>(
    catalog: &Catalog,
    state: &FilterState,
    search: &TextSearch<'_>,
    record: &R,
) -> bool {
    matches_search(search, record)
        && state
            .instances()
            .iter()
            .all(|instance| instance_matches(catalog, instance, record))
}

/// The records that match, in their original relative order.
pub fn filter_records<'r, R: Record>(
    catalog: &Catalog,
    state: &FilterState,
    search: &TextSearch<'_>,
    records: &'r [R],
) -> Vec<&'r R> {
    records
        .iter()
        .filter(|record| matches_record(catalog, state, search, *record))
        .collect()
}

fn matches_search<R: Record + ?Sized>(search: &TextSearch<'_>, record: &R) -> bool {
    if search.query.is_empty() {
        return true;
    }
    let needle = lower(search.query);
    search.fields.iter().any(|name| {
        record
            .field(name)
            .is_some_and(|field| field_contains(field, &needle))
    })
}

fn field_contains(field: &FieldValue, needle_lower: &str) -> bool {
    match field {
        FieldValue::Null => false,
        FieldValue::Text(text) => lower(text).contains(needle_lower),
        FieldValue::Number(number) => format!("{number}").contains(needle_lower),
        FieldValue::List(items) => items.iter().any(|item| field_contains(item, needle_lower)),
    }
}

fn instance_matches<R: Record + ?Sized>(
    catalog: &Catalog,
    instance: &FilterInstance,
    record: &R,
) -> bool {
    let Some(value) = instance.value() else {
        // Absent value: vacuously true.
        return true;
    };
    let Some(category) = catalog.category(instance.category()) else {
        // Dangling category reference: the instance is ignored.
        return true;
    };
    let field = record.field(instance.category());

    match (category.variant, value) {
        (Variant::Single, FilterValue::One(id)) => {
            if id == UNSET_ID {
                field_is_nullish(field)
            } else {
                matches!(field, Some(FieldValue::Text(text)) if text == id)
            }
        }
        (Variant::Multi, FilterValue::Many(ids)) => {
            if ids.iter().any(|id| id == UNSET_ID) && field_is_nullish(field) {
                return true;
            }
            match field {
                Some(FieldValue::Text(text)) => ids.iter().any(|id| id == text),
                Some(FieldValue::List(items)) => items.iter().any(|item| {
                    matches!(item, FieldValue::Text(text) if ids.iter().any(|id| id == text))
                }),
                _ => false,
            }
        }
        (Variant::Range, FilterValue::Span(lo, hi)) => match field {
            Some(FieldValue::Number(number)) => *lo <= *number && *number <= *hi,
            Some(FieldValue::List(items)) => items.iter().any(
                |item| matches!(item, FieldValue::Number(number) if *lo <= *number && *number <= *hi),
            ),
            _ => false,
        },
        // Value shape disagrees with the declared variant: failed match.
        _ => false,
    }
}

fn field_is_nullish(field: Option<&FieldValue>) -> bool {
    field.is_none_or(FieldValue::is_nullish)
}
