//! Reconciler integration tests
//!
//! Positioning-option shaped trees, deep nesting, and properties that must
//! hold for any well-formed tree.

use popkit_merge::{merge_config, MergeOptions};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

// ============================================================================
// OPTION TREES
// ============================================================================

#[test]
fn test_modifiers_keyed_by_name() {
    let defaults = json!({
        "placement": "bottom",
        "strategy": "absolute",
        "modifiers": [
            { "name": "offset", "options": { "offset": [0, 8] } },
            { "name": "flip", "enabled": true, "options": { "padding": 4 } },
            { "name": "preventOverflow", "options": { "altAxis": false } }
        ]
    });
    let user = json!({
        "placement": "top-start",
        "modifiers": [
            { "name": "flip", "options": { "fallbackPlacements": ["left", "right"] } },
            { "name": "eventListeners", "enabled": false }
        ]
    });

    let merged = merge_config(&user, &defaults, &MergeOptions::keyed_by("name"));
    assert_eq!(
        merged,
        json!({
            "placement": "top-start",
            "strategy": "absolute",
            "modifiers": [
                {
                    "name": "flip",
                    "enabled": true,
                    "options": { "padding": 4, "fallbackPlacements": ["left", "right"] }
                },
                { "name": "eventListeners", "enabled": false },
                { "name": "offset", "options": { "offset": [0, 8] } },
                { "name": "preventOverflow", "options": { "altAxis": false } }
            ]
        })
    );
}

#[test]
fn test_three_levels_keep_siblings() {
    let base = json!({
        "outer": {
            "keep": 1,
            "list": [
                { "id": "a", "inner": { "x": 1, "y": 2, "deep": [{ "id": 1, "p": 0, "q": 0 }] } },
                { "id": "b", "inner": { "x": 9 } }
            ]
        },
        "sibling": true
    });
    let priority = json!({
        "outer": {
            "list": [
                { "id": "a", "inner": { "y": 20, "deep": [{ "id": "1", "q": 5 }] } }
            ]
        }
    });

    let merged = merge_config(&priority, &base, &MergeOptions::default());
    assert_eq!(
        merged,
        json!({
            "outer": {
                "keep": 1,
                "list": [
                    { "id": "a", "inner": { "x": 1, "y": 20, "deep": [{ "id": "1", "p": 0, "q": 5 }] } },
                    { "id": "b", "inner": { "x": 9 } }
                ]
            },
            "sibling": true
        })
    );
}

#[test]
fn test_no_append_only_drops_top_level() {
    let base = json!({ "m": { "a": 0 }, "list": [{ "id": 1, "v": 0 }, { "id": 2 }] });
    let priority = json!({ "m": { "a": 1, "extra": 1 }, "list": [{ "id": 1, "w": 1 }], "top": 1 });

    let merged = merge_config(&priority, &base, &MergeOptions::default().append_unmatched(false));
    assert_eq!(
        merged,
        json!({ "m": { "a": 1, "extra": 1 }, "list": [{ "id": 1, "v": 0, "w": 1 }, { "id": 2 }] })
    );
}

#[test]
fn test_no_append_keeps_nested_modifiers() {
    let defaults = json!({
        "modifiers": [
            { "name": "flip", "options": { "padding": 8 } },
            { "name": "offset" }
        ]
    });
    let user = json!({
        "modifiers": [{ "name": "flip", "options": { "fallbackPlacements": ["left"] } }],
        "onFirstUpdate": "cb"
    });

    let merged = merge_config(&user, &defaults, &MergeOptions::keyed_by("name").append_unmatched(false));
    assert_eq!(
        merged,
        json!({
            "modifiers": [
                { "name": "flip", "options": { "padding": 8, "fallbackPlacements": ["left"] } },
                { "name": "offset" }
            ]
        })
    );
}

#[test]
fn test_equivalent_numeric_ids_merge_into_one_record() {
    let options = MergeOptions::default();
    assert_eq!(
        merge_config(&json!([{ "id": -0.0, "a": 1 }]), &json!([{ "id": 0, "b": 2 }]), &options),
        json!([{ "id": -0.0, "b": 2, "a": 1 }])
    );
    assert_eq!(
        merge_config(
            &json!([{ "id": 1e15, "a": 1 }]),
            &json!([{ "id": 1_000_000_000_000_000i64, "b": 2 }]),
            &options
        ),
        json!([{ "id": 1e15, "b": 2, "a": 1 }])
    );
}

#[test]
fn test_absent_branches_degrade() {
    let base = json!({ "modifiers": [{ "name": "arrow" }] });
    assert_eq!(merge_config(&json!(null), &base, &MergeOptions::default()), base);
    assert_eq!(
        merge_config(&json!({ "modifiers": null }), &base, &MergeOptions::default()),
        json!({ "modifiers": null })
    );
    assert_eq!(
        merge_config(&json!({ "modifiers": "off" }), &base, &MergeOptions::default()),
        json!({ "modifiers": "off" })
    );
}

// ============================================================================
// PROPERTIES
// ============================================================================

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::String),
    ]
}

/// Trees whose array records carry unique identities
fn well_formed_tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(|items| {
                let records = items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| match item {
                        Value::Object(mut map) => {
                            map.insert("id".to_string(), Value::from(i as i64));
                            Value::Object(map)
                        }
                        other => other,
                    })
                    .collect();
                Value::Array(records)
            }),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..5)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

proptest! {
    #[test]
    fn merge_is_idempotent(tree in well_formed_tree()) {
        prop_assert_eq!(merge_config(&tree, &tree, &MergeOptions::default()), tree.clone());
        prop_assert_eq!(
            merge_config(&tree, &tree, &MergeOptions::default().append_unmatched(false)),
            tree
        );
    }

    #[test]
    fn numeric_and_string_ids_name_same_record(id in -10_000i64..10_000, a in any::<bool>()) {
        let priority = json!([{ "id": id, "a": a }]);
        let base = json!([{ "id": id.to_string(), "b": 1 }]);
        let merged = merge_config(&priority, &base, &MergeOptions::default());
        prop_assert_eq!(merged, json!([{ "id": id, "b": 1, "a": a }]));
    }

    #[test]
    fn distinct_ids_never_pair(id in 0i64..1000) {
        let priority = json!([{ "id": id, "a": 1 }]);
        let base = json!([{ "id": format!("{id}x"), "b": 1 }]);
        let merged = merge_config(&priority, &base, &MergeOptions::default());
        prop_assert_eq!(merged.as_array().map(Vec::len), Some(2));
    }
}
