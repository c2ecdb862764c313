use crate::field::FieldCatalog;
use crate::group::FilterGroup;
use crate::operator::{operators_for_field, FilterOperator};
use std::fmt;

/// A legality problem found in a user-built group. Advisory only: the
/// evaluator runs whatever it is given and degrades per its own rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupIssue {
    UnknownField {
        condition_id: String,
        field: String,
    },
    OperatorNotAllowed {
        condition_id: String,
        field: String,
        operator: FilterOperator,
    },
}

impl fmt::Display for GroupIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupIssue::UnknownField { field, .. } => {
                write!(f, "unknown field '{field}'")
            }
            GroupIssue::OperatorNotAllowed { field, operator, .. } => {
                write!(f, "operator '{operator}' not allowed on field '{field}'")
            }
        }
    }
}

/// Check every condition of a group against the field catalog: the field
/// key must exist and the operator must be in the field's legal set.
/// Intended for editor hosts at the boundary, before a group is run or
/// saved.
pub fn validate_group(catalog: &FieldCatalog, group: &FilterGroup) -> Vec<GroupIssue> {
    let mut issues = Vec::new();
    for condition in &group.conditions {
        match catalog.field(&condition.field) {
            None => issues.push(GroupIssue::UnknownField {
                condition_id: condition.id.clone(),
                field: condition.field.clone(),
            }),
            Some(field) => {
                if !operators_for_field(field).contains(&condition.operator) {
                    issues.push(GroupIssue::OperatorNotAllowed {
                        condition_id: condition.id.clone(),
                        field: condition.field.clone(),
                        operator: condition.operator,
                    });
                }
            }
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::FilterCondition;
    use crate::field::{FieldType, FilterField};
    use crate::group::GroupLogic;
    use serde_json::json;

    fn catalog() -> FieldCatalog {
        FieldCatalog::new(vec![
            FilterField::new("status", "Status", FieldType::Select),
            FilterField::new("amount", "Amount", FieldType::Number),
        ])
    }

    #[test]
    fn clean_group_has_no_issues() {
        let group = FilterGroup::new(GroupLogic::And).with_conditions(vec![
            FilterCondition::new("status", FilterOperator::Equals, json!("Sent")),
            FilterCondition::between("amount", 100, 200),
        ]);
        assert!(validate_group(&catalog(), &group).is_empty());
    }

    #[test]
    fn unknown_field_is_reported() {
        let group = FilterGroup::new(GroupLogic::And).with_conditions(vec![
            FilterCondition::new("customer", FilterOperator::Equals, json!("Acme")),
        ]);
        let issues = validate_group(&catalog(), &group);
        assert_eq!(issues.len(), 1);
        assert!(matches!(&issues[0], GroupIssue::UnknownField { field, .. } if field == "customer"));
    }

    #[test]
    fn illegal_operator_for_field_type_is_reported() {
        // contains is a text operator; status is a select field
        let group = FilterGroup::new(GroupLogic::And).with_conditions(vec![
            FilterCondition::new("status", FilterOperator::Contains, json!("Se")),
        ]);
        let issues = validate_group(&catalog(), &group);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].to_string().contains("not allowed"));
    }

    #[test]
    fn field_override_widens_the_legal_set() {
        let catalog = FieldCatalog::new(vec![FilterField::new(
            "status",
            "Status",
            FieldType::Select,
        )
        .with_operators(vec![FilterOperator::Contains])]);
        let group = FilterGroup::new(GroupLogic::And).with_conditions(vec![
            FilterCondition::new("status", FilterOperator::Contains, json!("Se")),
        ]);
        assert!(validate_group(&catalog, &group).is_empty());
    }
}
