//! Reconciliation
//!
//! Each step classifies both sides into a [`MergeNode`] and handles the
//! pairing explicitly:
//!
//! | priority \ base | Mapping        | Sequence        | Scalar / Absent |
//! |-----------------|----------------|-----------------|-----------------|
//! | Mapping         | merge keys     | base            | priority        |
//! | Sequence        | priority       | merge records   | priority        |
//! | Scalar          | priority       | base            | priority        |
//! | Absent          | base           | base            | base            |

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::{Identity, MergeNode, MergeOptions};

/// Merge `priority` over `base`
pub fn merge_config(priority: &Value, base: &Value, options: &MergeOptions) -> Value {
    match (MergeNode::of(priority), MergeNode::of(base)) {
        (MergeNode::Mapping(p), MergeNode::Mapping(b)) => Value::Object(merge_mappings(p, b, options)),
        (MergeNode::Sequence(p), MergeNode::Sequence(b)) => Value::Array(merge_sequences(p, b, options)),
        (MergeNode::Sequence(_), _) => priority.clone(),
        (_, MergeNode::Sequence(_)) | (MergeNode::Absent, _) => base.clone(),
        _ => priority.clone(),
    }
}

/// Merge two mappings key by key
///
/// The result holds base's keys in base's order; values present on both
/// sides recurse when both are mappings or both are sequences, otherwise the
/// priority value (an explicit `null` included) wins. Priority-only keys
/// follow at the end when `append_unmatched` is set. The flag only applies
/// here; recursive merges always append.
pub fn merge_mappings(
    priority: &Map<String, Value>,
    base: &Map<String, Value>,
    options: &MergeOptions,
) -> Map<String, Value> {
    let nested = options.nested();
    let mut merged = Map::with_capacity(base.len());

    for (key, base_value) in base {
        let value = match priority.get(key) {
            Some(priority_value) => merge_child(priority_value, base_value, &nested),
            None => base_value.clone(),
        };
        merged.insert(key.clone(), value);
    }

    if options.append_unmatched {
        for (key, priority_value) in priority {
            if !base.contains_key(key) {
                merged.insert(key.clone(), priority_value.clone());
            }
        }
    }

    merged
}

/// Merge two arrays
///
/// Arrays holding only scalars are atomic: priority replaces base outright.
/// Otherwise every priority element is paired with the base record sharing
/// its identity (or, for elements without one, with the identity-less base
/// element at the same position) and merged with it. Base records with a
/// truthy identity that no priority record mentions follow at the end when
/// `append_unmatched` is set; `0`, `""` and `false` still pair but are never
/// appended.
pub fn merge_sequences(priority: &[Value], base: &[Value], options: &MergeOptions) -> Vec<Value> {
    let all_leaves = |items: &[Value]| items.iter().all(|v| MergeNode::of(v).is_leaf());
    if all_leaves(priority) && all_leaves(base) {
        return priority.to_vec();
    }

    let key = options.identity_key.as_str();
    let nested = options.nested();
    let mut merged: Vec<Value> = priority
        .iter()
        .enumerate()
        .map(|(index, item)| match counterpart(item, index, base, key) {
            Some(base_item) => merge_child(item, base_item, &nested),
            None => item.clone(),
        })
        .collect();

    if options.append_unmatched {
        let mentioned: HashSet<Identity> = priority
            .iter()
            .filter_map(|item| Identity::of_truthy_record(item, key))
            .collect();
        let before = merged.len();
        merged.extend(
            base.iter()
                .filter(|item| Identity::of_truthy_record(item, key).is_some_and(|id| !mentioned.contains(&id)))
                .cloned(),
        );
        if merged.len() > before {
            tracing::trace!("Kept {} base-only record(s) keyed by {}", merged.len() - before, key);
        }
    }

    merged
}

/// Drop records whose identity already appeared earlier in the array
///
/// Elements without an identity are always kept.
pub fn dedupe_by_identity(items: &[Value], key: &str) -> Vec<Value> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| match Identity::of_record(item, key) {
            Some(id) => seen.insert(id),
            None => true,
        })
        .cloned()
        .collect()
}

/// Merge two values found under the same key or identity
fn merge_child(priority: &Value, base: &Value, options: &MergeOptions) -> Value {
    match (MergeNode::of(priority), MergeNode::of(base)) {
        (MergeNode::Mapping(p), MergeNode::Mapping(b)) => Value::Object(merge_mappings(p, b, options)),
        (MergeNode::Sequence(p), MergeNode::Sequence(b)) => Value::Array(merge_sequences(p, b, options)),
        _ => priority.clone(),
    }
}

fn counterpart<'a>(item: &Value, index: usize, base: &'a [Value], key: &str) -> Option<&'a Value> {
    match Identity::of_record(item, key) {
        Some(id) => base
            .iter()
            .find(|candidate| Identity::of_record(candidate, key).as_ref() == Some(&id)),
        None => base
            .get(index)
            .filter(|candidate| Identity::of_record(candidate, key).is_none()),
    }
}
