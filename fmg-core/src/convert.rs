//! Conversion between state values and FortiManager API payloads
//!
//! State uses underscore attribute names (`filter_list`), the API uses hyphens
//! (`filter-list`). Flatten turns an API value into a state value, expand goes
//! the other way. Both are driven by the attribute type, so nested blocks are
//! converted row by row with their keys renamed at every level.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::Value as Json;

use crate::resource::Value;
use crate::schema::{AttributeType, BlockSchema};

/// Convert a state attribute name to its API field name
/// e.g., "admin_https_redirect" -> "admin-https-redirect"
pub fn to_api_name(s: &str) -> String {
    s.replace('_', "-")
}

/// Convert an API field name to a state attribute name
/// e.g., "filter-list" -> "filter_list"
pub fn to_schema_name(s: &str) -> String {
    s.replace('-', "_")
}

/// Expand a list of strings into a JSON array, preserving order.
/// A bare string expands to a one-element array.
pub fn expand_string_list(value: &Value) -> Json {
    match value {
        Value::List(items) => Json::Array(
            items
                .iter()
                .map(|v| Json::String(v.to_key_string()))
                .collect(),
        ),
        other => Json::Array(vec![Json::String(other.to_key_string())]),
    }
}

/// Flatten a JSON array into a list of strings, preserving order.
/// Numbers are stringified; a bare string flattens to a one-element list.
pub fn flatten_string_list(json: &Json) -> Value {
    let item = |j: &Json| match j {
        Json::String(s) => Some(Value::String(s.clone())),
        Json::Number(n) => Some(Value::String(n.to_string())),
        Json::Bool(b) => Some(Value::String(b.to_string())),
        _ => None,
    };
    match json {
        Json::Array(arr) => Value::List(arr.iter().filter_map(item).collect()),
        Json::Null => Value::List(Vec::new()),
        other => Value::List(item(other).into_iter().collect()),
    }
}

/// Expand a list of integers into a JSON array, preserving order
pub fn expand_integer_list(value: &Value) -> Json {
    match value {
        Value::List(items) => Json::Array(items.iter().filter_map(int_to_json).collect()),
        other => Json::Array(int_to_json(other).into_iter().collect()),
    }
}

fn int_to_json(value: &Value) -> Option<Json> {
    match value {
        Value::Int(i) => Some(Json::from(*i)),
        Value::String(s) => s.trim().parse::<i64>().ok().map(Json::from),
        _ => None,
    }
}

/// Flatten a JSON array into a list of integers. Numeric strings are accepted.
pub fn flatten_integer_list(json: &Json) -> Value {
    let item = |j: &Json| match j {
        Json::Number(n) => n.as_i64().map(Value::Int),
        Json::String(s) => s.trim().parse::<i64>().ok().map(Value::Int),
        _ => None,
    };
    match json {
        Json::Array(arr) => Value::List(arr.iter().filter_map(item).collect()),
        Json::Null => Value::List(Vec::new()),
        other => Value::List(item(other).into_iter().collect()),
    }
}

fn is_int_list(inner: &AttributeType) -> bool {
    matches!(inner.base(), AttributeType::Int)
}

/// Flatten an API value into a state value.
///
/// Scalars pass through unchanged; a shape mismatch is left for the caller
/// to detect (see [`forti_api_patch`]).
pub fn flatten(json: &Json, attr_type: &AttributeType) -> Option<Value> {
    match attr_type {
        AttributeType::List(inner) | AttributeType::Set(inner) => {
            if json.is_null() {
                return None;
            }
            if is_int_list(inner) {
                Some(flatten_integer_list(json))
            } else {
                Some(flatten_string_list(json))
            }
        }
        AttributeType::Block(block) => flatten_block(json, block),
        _ => Value::from_json(json),
    }
}

fn flatten_block(json: &Json, block: &BlockSchema) -> Option<Value> {
    let rows: Vec<&serde_json::Map<String, Json>> = match json {
        Json::Array(arr) => arr.iter().filter_map(Json::as_object).collect(),
        Json::Object(obj) => vec![obj],
        _ => return None,
    };

    let rows = rows
        .into_iter()
        .map(|obj| {
            let mut row = HashMap::new();
            for (name, schema) in &block.attributes {
                let Some(raw) = obj.get(&schema.api_name()) else {
                    continue;
                };
                if let Some(v) = flatten_checked(raw, &schema.attr_type) {
                    row.insert(name.clone(), v);
                }
            }
            Value::Map(row)
        })
        .collect();
    Some(Value::List(rows))
}

/// Flatten, falling back to the API patch when the direct value does not
/// match the attribute type. Returns the direct value when neither fits.
pub fn flatten_checked(json: &Json, attr_type: &AttributeType) -> Option<Value> {
    let direct = flatten(json, attr_type)?;
    if attr_type.validate(&direct).is_ok() {
        return Some(direct);
    }
    match forti_api_patch(json, attr_type) {
        Some(patched) if attr_type.validate(&patched).is_ok() => Some(patched),
        _ => Some(direct),
    }
}

/// Expand a state value into an API value, in canonical form
pub fn expand(value: &Value, attr_type: &AttributeType) -> Option<Json> {
    match attr_type {
        AttributeType::List(inner) | AttributeType::Set(inner) => {
            if is_int_list(inner) {
                Some(expand_integer_list(value))
            } else {
                Some(expand_string_list(&attr_type.canonicalize(value)))
            }
        }
        AttributeType::Block(block) => {
            let Value::List(rows) = value else {
                return None;
            };
            let rows = rows
                .iter()
                .filter_map(|row| match row {
                    Value::Map(fields) => Some(expand_row(fields, block)),
                    _ => None,
                })
                .collect();
            Some(Json::Array(rows))
        }
        _ => Some(attr_type.canonicalize(value).to_json()),
    }
}

fn expand_row(fields: &HashMap<String, Value>, block: &BlockSchema) -> Json {
    let mut obj = serde_json::Map::new();
    for (name, value) in fields {
        match block.attributes.get(name) {
            Some(schema) => {
                if let Some(v) = expand(value, &schema.attr_type) {
                    obj.insert(schema.api_name(), v);
                }
            }
            None => {
                obj.insert(to_api_name(name), value.to_json());
            }
        }
    }
    Json::Object(obj)
}

/// Coerce an API value whose shape does not match the attribute type.
///
/// FortiManager returns some scalars wrapped in one-element arrays, address
/// and mask pairs as two-element arrays, integers as strings and toggles as
/// "enable"/"disable". Returns `None` when the value is null or no coercion
/// applies.
pub fn forti_api_patch(json: &Json, attr_type: &AttributeType) -> Option<Value> {
    if json.is_null() {
        return None;
    }

    match (attr_type.base(), json) {
        (
            AttributeType::String
            | AttributeType::Int
            | AttributeType::Bool
            | AttributeType::Enum(_),
            Json::Array(arr),
        ) => match arr.as_slice() {
            [single] => forti_api_patch(single, attr_type).or_else(|| Value::from_json(single)),
            [_, _, ..] if matches!(attr_type.base(), AttributeType::String) => join_scalars(arr),
            _ => None,
        },

        (AttributeType::String | AttributeType::Enum(_), Json::Number(n)) => {
            Some(Value::String(n.to_string()))
        }
        (AttributeType::String | AttributeType::Enum(_), Json::Bool(b)) => {
            Some(Value::String(if *b { "enable" } else { "disable" }.to_string()))
        }

        (AttributeType::Int, Json::String(s)) => s.trim().parse::<i64>().ok().map(Value::Int),
        (AttributeType::Int, Json::Bool(b)) => Some(Value::Int(i64::from(*b))),

        (AttributeType::Bool, Json::String(s)) => match s.as_str() {
            "enable" | "true" => Some(Value::Bool(true)),
            "disable" | "false" => Some(Value::Bool(false)),
            _ => None,
        },
        (AttributeType::Bool, Json::Number(n)) => n.as_i64().map(|i| Value::Bool(i != 0)),

        (AttributeType::List(inner) | AttributeType::Set(inner), scalar)
            if !scalar.is_array() && !scalar.is_object() =>
        {
            if is_int_list(inner) {
                Some(flatten_integer_list(scalar))
            } else {
                Some(flatten_string_list(scalar))
            }
        }

        (AttributeType::Block(block), Json::Object(_)) => flatten_block(json, block),

        _ => None,
    }
}

/// `["10.0.0.0", "255.255.255.0"]` -> `"10.0.0.0 255.255.255.0"`
fn join_scalars(items: &[Json]) -> Option<Value> {
    let parts = items
        .iter()
        .map(|item| match item {
            Json::String(s) => Some(s.clone()),
            Json::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some(Value::String(parts.join(" ")))
}

/// Ordering applied to table rows on read (`dynamic_sort_subtable`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Keep the order returned by the API
    #[default]
    Off,
    /// Lexical order of the row key
    Lexical,
    /// Numeric-aware order ("port2" < "port10")
    Natural,
}

impl SortMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "false" => Some(SortMode::Off),
            "true" => Some(SortMode::Lexical),
            "natural" => Some(SortMode::Natural),
            _ => None,
        }
    }
}

/// Sort the rows of a block (and of nested blocks) by their mkey
pub fn sort_table(rows: &mut [Value], block: &BlockSchema, mode: SortMode) {
    if mode == SortMode::Off {
        return;
    }

    for row in rows.iter_mut() {
        let Value::Map(fields) = row else { continue };
        for (name, schema) in &block.attributes {
            if let AttributeType::Block(inner) = &schema.attr_type
                && let Some(Value::List(nested)) = fields.get_mut(name)
            {
                sort_table(nested, inner, mode);
            }
        }
    }

    let Some(mkey) = &block.mkey else { return };
    let key_of = |v: &Value| match v {
        Value::Map(fields) => fields.get(mkey).map(Value::to_key_string),
        _ => None,
    };
    rows.sort_by(|a, b| {
        let (ka, kb) = (key_of(a).unwrap_or_default(), key_of(b).unwrap_or_default());
        match mode {
            SortMode::Natural => natural_cmp(&ka, &kb),
            _ => ka.cmp(&kb),
        }
    });
}

/// Compare strings treating runs of digits as numbers
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) if ca.is_ascii_digit() && cb.is_ascii_digit() => {
                let na = take_number(&mut ai);
                let nb = take_number(&mut bi);
                match na.cmp(&nb) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
            (Some(ca), Some(cb)) => {
                ai.next();
                bi.next();
                match ca.cmp(&cb) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
        }
    }
}

fn take_number(it: &mut std::iter::Peekable<std::str::Chars<'_>>) -> u128 {
    let mut n: u128 = 0;
    while let Some(c) = it.peek().copied() {
        let Some(d) = c.to_digit(10) else { break };
        n = n.saturating_mul(10).saturating_add(u128::from(d));
        it.next();
    }
    n
}
