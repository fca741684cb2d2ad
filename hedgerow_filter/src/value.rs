// Copyright 2025 the Hedgerow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tagged filter value and its normalization into canonical form.

use alloc::string::String;
use alloc::vec::Vec;

use crate::catalog::{Category, Variant};

/// The value held by a filter instance.
///
/// The tag is always interpreted through the owning category's declared
/// [`Variant`]; the engine never infers meaning from runtime shape alone. A
/// value stored in a [`FilterState`](crate::FilterState) has passed
/// [`normalized`](Self::normalized) and is canonical: `Many` sets are sorted
/// and deduplicated, `Span` pairs satisfy `min <= max` with finite ends.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterValue {
    /// A single discrete value id (single-select).
    One(String),
    /// A set of discrete value ids (multi-select).
    Many(Vec<String>),
    /// An inclusive numeric pair (range).
    Span(f64, f64),
}

impl FilterValue {
    /// The variant this value's shape corresponds to.
    pub fn variant(&self) -> Variant {
        match self {
            Self::One(_) => Variant::Single,
            Self::Many(_) => Variant::Multi,
            Self::Span(..) => Variant::Range,
        }
    }

    /// Canonicalize this value for the given category, or reject it.
    ///
    /// Returns `None` when the value's shape disagrees with the category's
    /// declared variant, when a single-select id is not offered by the
    /// category, or when a span has a non-finite end. `Many` sets are
    /// restricted to ids the category offers, then sorted and deduplicated
    /// (an empty result is still a value and matches no record). Spans are
    /// reordered to `min <= max` and clamped into declared bounds.
    pub fn normalized(self, category: &Category) -> Option<Self> {
        match (category.variant, self) {
            (Variant::Single, Self::One(id)) => category.accepts_id(&id).then_some(Self::One(id)),
            (Variant::Multi, Self::Many(mut ids)) => {
                ids.retain(|id| category.accepts_id(id));
                ids.sort_unstable();
                ids.dedup();
                Some(Self::Many(ids))
            }
            (Variant::Range, Self::Span(a, b)) => {
                if !a.is_finite() || !b.is_finite() {
                    return None;
                }
                let (mut lo, mut hi) = if a <= b { (a, b) } else { (b, a) };
                if let Some(bounds) = &category.bounds {
                    let (bmin, bmax) = bounds.ordered();
                    lo = lo.clamp(bmin, bmax);
                    hi = hi.clamp(bmin, bmax);
                }
                Some(Self::Span(lo, hi))
            }
            _ => None,
        }
    }

    /// The discrete value ids this value claims.
    ///
    /// `One` yields its id, `Many` yields each member, `Span` yields nothing
    /// (a range has no discrete value to claim). Sibling-value exclusion and
    /// dependency cascading are both built on this flattening.
    pub fn discrete_ids(&self) -> impl Iterator<Item = &str> {
        let (one, many): (Option<&str>, &[String]) = match self {
            Self::One(id) => (Some(id), &[]),
            Self::Many(ids) => (None, ids),
            Self::Span(..) => (None, &[]),
        };
        one.into_iter().chain(many.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategoryValue, UNSET_ID};
    use alloc::string::ToString;
    use alloc::vec;

    fn payer_family() -> Category {
        Category::new("payer_family", "Payer family", Variant::Single).with_values([
            CategoryValue::labeled("United Healthcare"),
            CategoryValue::labeled("Aetna"),
        ])
    }

    fn status() -> Category {
        Category::new("status", "Status", Variant::Multi)
            .with_values([
                CategoryValue::labeled("active"),
                CategoryValue::labeled("inactive"),
            ])
            .with_unset("No status")
    }

    fn copay() -> Category {
        Category::new("copay", "Copay", Variant::Range).with_bounds(0.0, 100.0, 5.0)
    }

    #[test]
    fn single_accepts_only_declared_ids() {
        let c = payer_family();
        assert_eq!(
            FilterValue::One("Aetna".to_string()).normalized(&c),
            Some(FilterValue::One("Aetna".to_string()))
        );
        assert_eq!(FilterValue::One("Cigna".to_string()).normalized(&c), None);
        // No unset pseudo-value declared on this category.
        assert_eq!(FilterValue::One(UNSET_ID.to_string()).normalized(&c), None);
    }

    #[test]
    fn many_is_filtered_sorted_deduplicated() {
        let c = status();
        let raw = FilterValue::Many(vec![
            "inactive".to_string(),
            "bogus".to_string(),
            "active".to_string(),
            "inactive".to_string(),
            UNSET_ID.to_string(),
        ]);
        let normalized = raw.normalized(&c).unwrap();
        assert_eq!(
            normalized,
            FilterValue::Many(vec![
                UNSET_ID.to_string(),
                "active".to_string(),
                "inactive".to_string(),
            ])
        );
    }

    #[test]
    fn empty_many_survives_normalization() {
        let c = status();
        assert_eq!(
            FilterValue::Many(vec!["bogus".to_string()]).normalized(&c),
            Some(FilterValue::Many(vec![]))
        );
    }

    #[test]
    fn span_is_reordered_and_clamped() {
        let c = copay();
        assert_eq!(
            FilterValue::Span(80.0, 20.0).normalized(&c),
            Some(FilterValue::Span(20.0, 80.0))
        );
        assert_eq!(
            FilterValue::Span(-10.0, 500.0).normalized(&c),
            Some(FilterValue::Span(0.0, 100.0))
        );
        assert_eq!(FilterValue::Span(0.0, f64::NAN).normalized(&c), None);
        assert_eq!(FilterValue::Span(f64::INFINITY, 1.0).normalized(&c), None);
    }

    #[test]
    fn shape_must_match_declared_variant() {
        assert_eq!(
            FilterValue::Many(vec!["Aetna".to_string()]).normalized(&payer_family()),
            None
        );
        assert_eq!(FilterValue::Span(0.0, 1.0).normalized(&status()), None);
        assert_eq!(FilterValue::One("5".to_string()).normalized(&copay()), None);
    }

    #[test]
    fn discrete_ids_flatten() {
        let one = FilterValue::One("a".to_string());
        assert_eq!(one.discrete_ids().collect::<vec::Vec<_>>(), ["a"]);

        let many = FilterValue::Many(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(many.discrete_ids().collect::<vec::Vec<_>>(), ["a", "b"]);

        let span = FilterValue::Span(0.0, 1.0);
        assert_eq!(span.discrete_ids().count(), 0);
    }
}
