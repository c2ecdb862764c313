use crate::operator::FilterOperator;
use crate::value::{as_number, as_text, loose_eq, value_is_empty, value_list, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One predicate: field key, operator, and up to two operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    pub id: String,
    pub field: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: Value,
    /// Second operand, read by `between` only.
    #[serde(default)]
    pub value2: Value,
}

impl FilterCondition {
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            field: field.into(),
            operator,
            value: value.into(),
            value2: Value::Null,
        }
    }

    pub fn between(
        field: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        let mut cond = Self::new(field, FilterOperator::Between, low);
        cond.value2 = high.into();
        cond
    }
}

/// What evaluating one condition against one record produced.
/// `Unmatched` appears only for [`FilterOperator::Unrecognized`]; the
/// match policy decides whether that counts as a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOutcome {
    Matched,
    NotMatched,
    Unmatched,
}

/// How an `Unmatched` outcome collapses to a boolean. Fail-open keeps the
/// record (historical behavior); fail-closed drops it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchPolicy {
    #[default]
    FailOpen,
    FailClosed,
}

impl MatchPolicy {
    pub fn from_fail_open(fail_open: bool) -> Self {
        if fail_open {
            MatchPolicy::FailOpen
        } else {
            MatchPolicy::FailClosed
        }
    }
}

/// Evaluate one condition against one record. Total: every coercion
/// failure is a no-match, never an error or a panic.
pub fn evaluate_condition(record: &Record, condition: &FilterCondition) -> ConditionOutcome {
    let raw = record.get(&condition.field).unwrap_or(&Value::Null);

    use FilterOperator::*;
    let matched = match condition.operator {
        IsEmpty => value_is_empty(raw),
        IsNotEmpty => !value_is_empty(raw),
        Equals => loose_eq(raw, &condition.value),
        NotEquals => !loose_eq(raw, &condition.value),
        Contains => text_match(raw, &condition.value, |v, f| v.contains(f)),
        NotContains => !text_match(raw, &condition.value, |v, f| v.contains(f)),
        StartsWith => text_match(raw, &condition.value, |v, f| v.starts_with(f)),
        EndsWith => text_match(raw, &condition.value, |v, f| v.ends_with(f)),
        GreaterThan => number_match(raw, &condition.value, |a, b| a > b),
        LessThan => number_match(raw, &condition.value, |a, b| a < b),
        GreaterThanOrEqual => number_match(raw, &condition.value, |a, b| a >= b),
        LessThanOrEqual => number_match(raw, &condition.value, |a, b| a <= b),
        Between => match (
            as_number(raw),
            as_number(&condition.value),
            as_number(&condition.value2),
        ) {
            (Some(v), Some(low), Some(high)) => v >= low && v <= high,
            _ => false,
        },
        In => value_list(&condition.value)
            .iter()
            .any(|candidate| loose_eq(raw, candidate)),
        NotIn => !value_list(&condition.value)
            .iter()
            .any(|candidate| loose_eq(raw, candidate)),
        Unrecognized => return ConditionOutcome::Unmatched,
    };

    if matched {
        ConditionOutcome::Matched
    } else {
        ConditionOutcome::NotMatched
    }
}

/// Evaluate and collapse with the given policy.
pub fn condition_matches(
    record: &Record,
    condition: &FilterCondition,
    policy: MatchPolicy,
) -> bool {
    match evaluate_condition(record, condition) {
        ConditionOutcome::Matched => true,
        ConditionOutcome::NotMatched => false,
        ConditionOutcome::Unmatched => {
            let keep = policy == MatchPolicy::FailOpen;
            if keep {
                tracing::warn!(
                    condition = %condition.id,
                    field = %condition.field,
                    "unrecognized operator fell through as a match"
                );
            }
            keep
        }
    }
}

// case-insensitive: both sides lower-cased before the closure runs
fn text_match(raw: &Value, operand: &Value, test: impl Fn(&str, &str) -> bool) -> bool {
    let value = as_text(raw).to_lowercase();
    let filter = as_text(operand).to_lowercase();
    test(&value, &filter)
}

fn number_match(raw: &Value, operand: &Value, test: impl Fn(f64, f64) -> bool) -> bool {
    match (as_number(raw), as_number(operand)) {
        (Some(a), Some(b)) => test(a, b),
        _ => false,
    }
}
