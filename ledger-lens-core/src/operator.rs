use crate::field::{FieldType, FilterField};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every comparison the engine knows how to evaluate. Closed set: adding a
/// variant will not compile until the evaluator, the per-type lists, and
/// the label table below are all updated.
///
/// `Unrecognized` absorbs operator strings written by a newer build (or a
/// corrupted preset) during deserialization instead of rejecting the whole
/// group; the evaluator reports it as an unmatched outcome and the match
/// policy decides what that means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Between,
    In,
    NotIn,
    IsEmpty,
    IsNotEmpty,
    #[serde(other)]
    Unrecognized,
}

use FilterOperator::*;

const TEXT_OPERATORS: &[FilterOperator] = &[
    Equals, NotEquals, Contains, NotContains, StartsWith, EndsWith, IsEmpty, IsNotEmpty,
];
const COMPARABLE_OPERATORS: &[FilterOperator] = &[
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Between,
    IsEmpty,
    IsNotEmpty,
];
const SELECT_OPERATORS: &[FilterOperator] = &[Equals, NotEquals, In, IsEmpty, IsNotEmpty];
const MULTISELECT_OPERATORS: &[FilterOperator] = &[In, NotIn, IsEmpty, IsNotEmpty];
const BOOLEAN_OPERATORS: &[FilterOperator] = &[Equals];

/// Legal operator set for a field type, in display order.
pub fn operators_for_type(field_type: FieldType) -> &'static [FilterOperator] {
    match field_type {
        FieldType::Text => TEXT_OPERATORS,
        FieldType::Number | FieldType::Date | FieldType::DateRange => COMPARABLE_OPERATORS,
        FieldType::Select => SELECT_OPERATORS,
        FieldType::MultiSelect => MULTISELECT_OPERATORS,
        FieldType::Boolean => BOOLEAN_OPERATORS,
    }
}

/// Legal operator set for a concrete field: an explicit field-level
/// override replaces the derived list verbatim, no merge.
pub fn operators_for_field(field: &FilterField) -> &[FilterOperator] {
    match &field.operators {
        Some(ops) => ops.as_slice(),
        None => operators_for_type(field.field_type),
    }
}

impl FilterOperator {
    /// Display label. Total over the enum; no wildcard arm on purpose.
    pub fn label(self) -> &'static str {
        match self {
            Equals => "equals",
            NotEquals => "does not equal",
            Contains => "contains",
            NotContains => "does not contain",
            StartsWith => "starts with",
            EndsWith => "ends with",
            GreaterThan => "greater than",
            LessThan => "less than",
            GreaterThanOrEqual => "greater than or equal",
            LessThanOrEqual => "less than or equal",
            Between => "between",
            In => "is any of",
            NotIn => "is none of",
            IsEmpty => "is empty",
            IsNotEmpty => "is not empty",
            Unrecognized => "unknown operator",
        }
    }

    /// Operators that read a second operand (`value2`).
    pub fn takes_second_operand(self) -> bool {
        self == Between
    }

    /// Operators that read no operand at all.
    pub fn takes_no_operand(self) -> bool {
        matches!(self, IsEmpty | IsNotEmpty)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_fields_get_the_text_operator_set() {
        let ops = operators_for_type(FieldType::Text);
        assert_eq!(ops.first(), Some(&Equals));
        assert!(ops.contains(&Contains));
        assert!(!ops.contains(&Between));
    }

    #[test]
    fn number_date_and_range_share_the_comparable_set() {
        assert_eq!(
            operators_for_type(FieldType::Number),
            operators_for_type(FieldType::Date)
        );
        assert_eq!(
            operators_for_type(FieldType::Number),
            operators_for_type(FieldType::DateRange)
        );
        assert!(operators_for_type(FieldType::Number).contains(&Between));
    }

    #[test]
    fn boolean_fields_only_get_equals() {
        assert_eq!(operators_for_type(FieldType::Boolean), &[Equals]);
    }

    #[test]
    fn field_override_replaces_the_derived_list_verbatim() {
        let field = FilterField::new("status", "Status", FieldType::Select)
            .with_operators(vec![Equals]);
        assert_eq!(operators_for_field(&field), &[Equals]);

        let plain = FilterField::new("status", "Status", FieldType::Select);
        assert_eq!(operators_for_field(&plain), SELECT_OPERATORS);
    }

    #[test]
    fn operator_names_round_trip_in_camel_case() {
        let json = serde_json::to_string(&GreaterThanOrEqual).unwrap();
        assert_eq!(json, "\"greaterThanOrEqual\"");
        let back: FilterOperator = serde_json::from_str("\"notIn\"").unwrap();
        assert_eq!(back, NotIn);
    }

    #[test]
    fn unknown_operator_strings_deserialize_to_unrecognized() {
        let op: FilterOperator = serde_json::from_str("\"fuzzyMatch\"").unwrap();
        assert_eq!(op, Unrecognized);
    }

    #[test]
    fn operand_arity_helpers() {
        assert!(Between.takes_second_operand());
        assert!(!GreaterThan.takes_second_operand());
        assert!(IsEmpty.takes_no_operand());
        assert!(IsNotEmpty.takes_no_operand());
        assert!(!Equals.takes_no_operand());
    }

    #[test]
    fn every_operator_has_a_nonempty_label() {
        for op in [
            Equals,
            NotEquals,
            Contains,
            NotContains,
            StartsWith,
            EndsWith,
            GreaterThan,
            LessThan,
            GreaterThanOrEqual,
            LessThanOrEqual,
            Between,
            In,
            NotIn,
            IsEmpty,
            IsNotEmpty,
            Unrecognized,
        ] {
            assert!(!op.label().is_empty());
        }
    }
}
