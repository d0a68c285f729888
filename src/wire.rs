//! Key-case translation between the API's camelCase wire format and the
//! snake_case attribute names used throughout this crate.
//!
//! The translation is heuristic and deliberately one-directional: a wire key
//! such as `DNSName` becomes `dns_name`, which camelizes back to `dnsName`,
//! not `DNSName`. Callers that need an exact wire key must carry it through
//! rather than round-trip it.

use serde_json::{Map, Value};

/// Converts a camelCase wire key to snake_case.
///
/// An underscore is inserted before an uppercase letter that follows a
/// lowercase letter, and before an uppercase letter that starts a new word
/// at the end of an acronym run (the last capital of `DNSName`). The result
/// is lowercased with any leading or trailing underscores trimmed.
///
/// # Example
///
/// ```rust
/// use dcm_api::wire::uncamel;
///
/// assert_eq!(uncamel("deviceId"), "device_id");
/// assert_eq!(uncamel("DNSName"), "dns_name");
/// assert_eq!(uncamel("budget"), "budget");
/// ```
#[must_use]
pub fn uncamel(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let after_lower = i > 0 && chars[i - 1].is_lowercase();
            let before_non_upper = chars
                .get(i + 1)
                .is_some_and(|next| !next.is_uppercase());
            if after_lower || before_non_upper {
                out.push('_');
            }
        }
        for lower in c.to_lowercase() {
            out.push(lower);
        }
    }

    out.trim_matches('_').to_string()
}

/// Converts a snake_case attribute name to a camelCase wire key.
///
/// Each underscore-delimited segment is capitalized, then the first
/// character of the whole result is lowercased.
///
/// # Example
///
/// ```rust
/// use dcm_api::wire::camelize;
///
/// assert_eq!(camelize("device_id"), "deviceId");
/// assert_eq!(camelize("budget"), "budget");
/// ```
#[must_use]
pub fn camelize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());

    for segment in key.split('_') {
        if segment.is_empty() {
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            for upper in first.to_uppercase() {
                out.push(upper);
            }
            for c in chars {
                for lower in c.to_lowercase() {
                    out.push(lower);
                }
            }
        }
    }

    let mut chars = out.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => out,
    }
}

/// Recursively converts all object keys in a JSON value to snake_case.
///
/// Arrays are walked element by element; non-container values pass through
/// unchanged.
#[must_use]
pub fn to_attribute_case(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let converted: Map<String, Value> = map
                .into_iter()
                .map(|(k, v)| (uncamel(&k), to_attribute_case(v)))
                .collect();
            Value::Object(converted)
        }
        Value::Array(items) => {
            Value::Array(items.into_iter().map(to_attribute_case).collect())
        }
        other => other,
    }
}

/// Recursively converts all object keys in a JSON value to camelCase.
///
/// The inverse operation of [`to_attribute_case`] for keys that round-trip;
/// see the module docs for keys that do not.
#[must_use]
pub fn to_wire_case(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let converted: Map<String, Value> = map
                .into_iter()
                .map(|(k, v)| (camelize(&k), to_wire_case(v)))
                .collect();
            Value::Object(converted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(to_wire_case).collect()),
        other => other,
    }
}
