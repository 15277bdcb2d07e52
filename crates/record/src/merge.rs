//! Merge and sanitisation utilities for untyped record payloads.
//!
//! These operate on `serde_json::Value` because their inputs are the
//! partially-overlapping, loosely-shaped objects produced by document
//! extraction and by payload assembly. There is no unmergeable case: every
//! function is total and merge conflicts are resolved by preference, never
//! reported as errors.

use serde_json::{Map, Value};
use std::collections::HashSet;

/// Emptiness as the merge rules understand it: `null`, whitespace-only
/// strings and empty arrays. `0`, `false` and empty objects are not empty.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Structural merge of two values of matching shape, preferring `a`.
///
/// - Arrays (either side): concatenate with `a` first, then deduplicate by a
///   stable serialisation of each element, preserving first-seen order.
///   A non-empty scalar on one side is treated as a single-element array.
/// - Objects on both sides: union of keys, merged recursively; after the
///   recursion, an empty value from `a` is overridden by a non-empty value
///   from `b` (this also fires for leaf scalars, covering the case where one
///   extraction pass missed a field the other captured).
/// - Anything else: `a` wins unless it is empty and `b` is not.
///
/// A non-empty leaf present in either input is never silently dropped.
pub fn deep_merge_prefer_a(a: &Value, b: &Value) -> Value {
    if a.is_array() || b.is_array() {
        return merge_arrays(a, b);
    }

    if let (Value::Object(map_a), Value::Object(map_b)) = (a, b) {
        let mut out = Map::new();
        for (key, value_a) in map_a {
            let merged = match map_b.get(key) {
                Some(value_b) => {
                    if is_empty(value_a) && !is_empty(value_b) {
                        value_b.clone()
                    } else {
                        deep_merge_prefer_a(value_a, value_b)
                    }
                }
                None => value_a.clone(),
            };
            out.insert(key.clone(), merged);
        }
        for (key, value_b) in map_b {
            if !map_a.contains_key(key) {
                out.insert(key.clone(), value_b.clone());
            }
        }
        return Value::Object(out);
    }

    if is_empty(a) && !is_empty(b) {
        b.clone()
    } else {
        a.clone()
    }
}

fn merge_arrays(a: &Value, b: &Value) -> Value {
    let mut joined: Vec<Value> = Vec::new();
    for side in [a, b] {
        match side {
            Value::Array(items) => joined.extend(items.iter().cloned()),
            other if !is_empty(other) => joined.push(other.clone()),
            _ => {}
        }
    }

    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for item in joined {
        let key = serde_json::to_string(&item).unwrap_or_default();
        if seen.insert(key) {
            unique.push(item);
        }
    }
    Value::Array(unique)
}

/// Recursively removes null and blank entries.
///
/// Object entries whose value is `null` or a whitespace-only string are
/// dropped; objects and arrays left empty collapse to `None` so a parent can
/// in turn drop them. Scalars (including `false` and `0`) survive.
pub fn prune(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Array(items) => {
            let kept: Vec<Value> = items.iter().filter_map(prune).collect();
            if kept.is_empty() {
                None
            } else {
                Some(Value::Array(kept))
            }
        }
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, entry) in map {
                let kept = match entry {
                    Value::String(s) if s.trim().is_empty() => None,
                    other => prune(other),
                };
                if let Some(v) = kept {
                    out.insert(key.clone(), v);
                }
            }
            if out.is_empty() {
                None
            } else {
                Some(Value::Object(out))
            }
        }
        scalar => Some(scalar.clone()),
    }
}

/// Optional groups dropped entirely when nothing in them survives pruning.
const PRUNABLE_GROUPS: [&str; 5] = [
    "cuidadoCorporal",
    "nutricaoHidratacao",
    "recreacao",
    "moradia",
    "tabagismo",
];

/// Prepares a create/update payload for submission.
///
/// Prunes the known optional groups, clears `informante` when it lacks its
/// `tipo` discriminant and `religiao` when it lacks `nome`, then prunes the
/// whole payload. Returns `Value::Null` when nothing at all was filled in.
pub fn sanitize_for_create(payload: Value) -> Value {
    let Value::Object(mut map) = payload else {
        return prune(&payload).unwrap_or(Value::Null);
    };

    for group in PRUNABLE_GROUPS {
        if let Some(value) = map.get(group) {
            if !value.is_null() {
                let pruned = prune(value).unwrap_or(Value::Null);
                map.insert(group.to_string(), pruned);
            }
        }
    }

    if group_missing_discriminant(&map, "informante", "tipo") {
        map.insert("informante".to_string(), Value::Null);
    }
    if group_missing_discriminant(&map, "religiao", "nome") {
        map.insert("religiao".to_string(), Value::Null);
    }

    prune(&Value::Object(map)).unwrap_or(Value::Null)
}

fn group_missing_discriminant(map: &Map<String, Value>, group: &str, field: &str) -> bool {
    match map.get(group) {
        Some(Value::Object(inner)) => match inner.get(field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        },
        _ => false,
    }
}
