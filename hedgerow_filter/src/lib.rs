// Copyright 2025 the Hedgerow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=hedgerow_filter --heading-base-level=0

//! Hedgerow Filter: a composable filter-criteria engine for selection UIs.
//!
//! Hedgerow Filter is the logic core behind a filter-pill bar and its
//! searchable selection palette. It renders nothing; it computes state
//! transitions and derived data for a presentation layer to consume.
//!
//! - Keep an ordered [`FilterState`] of filter instances over a read-only
//!   [`Catalog`] of categories, with pure add/update/remove/clear
//!   transitions (every transition returns a fresh snapshot).
//! - Resolve what a selection palette should offer: [`candidate_values`]
//!   excludes values already claimed by sibling instances of the same
//!   category, [`cascaded_values`] narrows a dependent category by its
//!   parent's current selection, and [`search_values`] applies the palette's
//!   own search box.
//! - Evaluate records with [`matches_record`] / [`filter_records`]:
//!   free-text search over caller-declared fields plus the AND of every
//!   active instance, with per-variant semantics for single-select,
//!   multi-select, and numeric ranges.
//!
//! The engine is fully synchronous and total: operations are pure
//! computations over immutable snapshots, malformed input degrades to empty
//! or failed matches, and nothing panics on documented input. Callers that
//! want to debounce recomputation do so outside the engine; recomputing on
//! every keystroke is equally correct.
//!
//! # Example
//!
//! ```rust
//! use hedgerow_filter::{
//!     Catalog, Category, CategoryValue, FieldValue, FilterState, FilterValue, MatchMode,
//!     TextSearch, Variant, candidate_values, filter_records,
//! };
//!
//! // A catalog with a dependent category: picking a payer family narrows
//! // which payers the palette offers.
//! let catalog = Catalog::new([
//!     Category::new("payer_family", "Payer family", Variant::Single).with_values([
//!         CategoryValue::labeled("United Healthcare"),
//!         CategoryValue::labeled("Aetna"),
//!     ]),
//!     Category::new("payer", "Payer", Variant::Multi)
//!         .with_values([
//!             CategoryValue::labeled("United Healthcare - PPO"),
//!             CategoryValue::labeled("United Healthcare - HMO"),
//!             CategoryValue::labeled("Aetna - Commercial"),
//!         ])
//!         .with_dependency("payer_family", MatchMode::Substring),
//! ]);
//!
//! // Pick a payer family…
//! let (state, family) = FilterState::new().add(&catalog, "payer_family").unwrap();
//! let state = state
//!     .update(&catalog, family, FilterValue::One("United Healthcare".into()))
//!     .unwrap();
//!
//! // …and the payer palette now offers only that family's plans.
//! let (state, payer) = state.add(&catalog, "payer").unwrap();
//! let offered = candidate_values(&catalog, &state, payer);
//! assert_eq!(offered.len(), 2);
//!
//! // Evaluate some records.
//! let state = state
//!     .update(
//!         &catalog,
//!         payer,
//!         FilterValue::Many(vec!["United Healthcare - PPO".into()]),
//!     )
//!     .unwrap();
//! let rows = [
//!     hashbrown::HashMap::from([(
//!         "payer".to_string(),
//!         FieldValue::from("United Healthcare - PPO"),
//!     )]),
//!     hashbrown::HashMap::from([("payer".to_string(), FieldValue::from("Aetna - Commercial"))]),
//! ];
//! let matched = filter_records(&catalog, &state, &TextSearch::default(), &rows);
//! assert_eq!(matched.len(), 1);
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` derives on catalog, value, and state
//!   types. Hosts typically deserialize a `Vec<Category>` from configuration
//!   and pass it to [`Catalog::new`]; the catalog itself carries a derived
//!   index and is rebuilt rather than serialized.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod availability;
mod cascade;
mod catalog;
mod predicate;
mod state;
pub(crate) mod util;
mod value;

pub use availability::{addable_categories, candidate_values, search_values};
pub use cascade::cascaded_values;
pub use catalog::{
    Catalog, Category, CategoryValue, Dependency, MatchMode, SpanBounds, UNSET_ID, Variant,
};
pub use predicate::{FieldValue, Record, TextSearch, filter_records, matches_record};
pub use state::{FilterInstance, FilterState, InstanceId};
pub use value::FilterValue;
