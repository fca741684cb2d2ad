// Copyright 2025 the Hedgerow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filter pills end to end: catalog, cascading palette, record filtering.
//!
//! This example shows how a host drives the engine:
//! - build a read-only catalog (one cascading pair, a multi-select with an
//!   "unset" pseudo-value, and a numeric range),
//! - add and fill filter instances the way a pill bar would,
//! - query the palette's candidate values after each change,
//! - evaluate a record table with free-text search on top.
//!
//! Run:
//! - `cargo run -p hedgerow_demos --example filter_palette`

use hashbrown::HashMap;
use hedgerow_filter::{
    Catalog, Category, CategoryValue, FieldValue, FilterState, FilterValue, MatchMode, Record,
    TextSearch, Variant, candidate_values, filter_records, search_values,
};

fn catalog() -> Catalog {
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
            .with_dependency("payer_family", MatchMode::Substring),
        Category::new("status", "Status", Variant::Multi)
            .with_values([
                CategoryValue::labeled("active"),
                CategoryValue::labeled("inactive"),
            ])
            .with_unset("No status"),
        Category::new("copay", "Copay", Variant::Range).with_bounds(0.0, 100.0, 5.0),
    ])
}

fn row(name: &str, family: &str, payer: &str, status: Option<&str>, copay: f64) -> HashMap<String, FieldValue> {
    let mut row = HashMap::from([
        (String::from("name"), FieldValue::from(name)),
        (String::from("payer_family"), FieldValue::from(family)),
        (String::from("payer"), FieldValue::from(payer)),
        (String::from("copay"), FieldValue::from(copay)),
    ]);
    match status {
        Some(status) => row.insert(String::from("status"), FieldValue::from(status)),
        None => row.insert(String::from("status"), FieldValue::Null),
    };
    row
}

fn main() {
    let catalog = catalog();
    let rows = [
        row("Riverbend Clinic", "United Healthcare", "United Healthcare - PPO", Some("active"), 25.0),
        row("Summit Care", "United Healthcare", "United Healthcare - HMO", Some("inactive"), 40.0),
        row("Harbor Medical", "Aetna", "Aetna - Commercial", Some("active"), 10.0),
        row("Cedar Family Health", "United Healthcare", "United Healthcare - PPO", None, 60.0),
    ];

    // Pick a payer family, as if the user added a pill and chose a value.
    let (state, family) = FilterState::new().add(&catalog, "payer_family").unwrap();
    let state = state
        .update(&catalog, family, FilterValue::One("United Healthcare".into()))
        .unwrap();

    // The payer palette cascades from the family selection.
    let (state, payer) = state.add(&catalog, "payer").unwrap();
    let offered = candidate_values(&catalog, &state, payer);
    println!("payer palette after choosing United Healthcare:");
    for value in &offered {
        println!("  {}", value.label);
    }

    // The palette's search box narrows further.
    let searched = search_values(&offered, "ppo");
    println!("…and after typing \"ppo\": {} value(s)", searched.len());

    // Select a payer, add a status pill that also matches unset records.
    let state = state
        .update(
            &catalog,
            payer,
            FilterValue::Many(vec!["United Healthcare - PPO".into()]),
        )
        .unwrap();
    let (state, status) = state.add(&catalog, "status").unwrap();
    let state = state
        .update(
            &catalog,
            status,
            FilterValue::Many(vec!["active".into(), hedgerow_filter::UNSET_ID.into()]),
        )
        .unwrap();

    let search = TextSearch::default();
    let matched = filter_records(&catalog, &state, &search, &rows);
    println!("matched without free text:");
    for record in &matched {
        if let Some(FieldValue::Text(name)) = record.field("name") {
            println!("  {name}");
        }
    }

    // Layer a free-text term over the same state.
    let search = TextSearch::new("cedar", &["name"]);
    let matched = filter_records(&catalog, &state, &search, &rows);
    println!("matched with free text \"cedar\": {} record(s)", matched.len());
}
