//! Coercion rules shared by every operator.
//!
//! Records are loosely typed JSON documents, so each comparison family
//! projects values explicitly rather than leaning on any ambient language
//! behavior: one equality rule, one numeric rule, one text rule. All
//! projections are total; a value that does not fit a projection compares
//! as no-match, never as an error.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

/// A single record: a flat JSON object. A missing key and an explicit
/// `null` are both treated as absent.
pub type Record = serde_json::Map<String, Value>;

/// Empty means JSON null (or a missing key, which resolves to null) or the
/// empty string. `0`, `false`, and `[]` are values, not emptiness.
pub fn value_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Numeric projection used by the ordered comparisons and `between`.
///
/// Numbers pass through; booleans map to 1/0; strings parse after
/// trimming, falling back to date forms (`YYYY-MM-DD`, RFC 3339) read as
/// epoch milliseconds so date fields work over string-dated documents.
/// Everything else is non-numeric and makes every ordered comparison
/// false.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            if let Ok(f) = trimmed.parse::<f64>() {
                return Some(f);
            }
            date_epoch_millis(trimmed)
        }
        _ => None,
    }
}

fn date_epoch_millis(s: &str) -> Option<f64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis() as f64);
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(midnight.and_utc().timestamp_millis() as f64)
}

/// Text projection used by the substring/prefix/suffix operators. Null
/// projects to the empty string; arrays join their elements with commas.
pub fn as_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(as_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// The one equality rule. Same-type values compare directly (strings
/// case-sensitively, arrays and objects structurally); null equals only
/// null; any other pairing compares through [`as_number`], which is what
/// makes `"5"` equal `5`.
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Array(_), _)
        | (_, Value::Array(_))
        | (Value::Object(_), _)
        | (_, Value::Object(_)) => left == right,
        _ => match (as_number(left), as_number(right)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

/// Membership operand for `in`/`notIn`: an array is taken as-is, any
/// scalar (including null) is a one-element list.
pub fn value_list(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items.as_slice(),
        other => std::slice::from_ref(other),
    }
}
