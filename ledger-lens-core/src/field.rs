use crate::operator::FilterOperator;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The comparison family a field belongs to. Drives which operators the
/// editor offers; the evaluator itself never consults it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Text,
    Number,
    Date,
    DateRange,
    Select,
    #[serde(rename = "multiselect")]
    MultiSelect,
    Boolean,
}

/// One choice for a select/multiselect field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: Value,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One queryable attribute of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterField {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Explicit operator list; replaces the type-derived set verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operators: Option<Vec<FilterOperator>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
}

impl FilterField {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        field_type: FieldType,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            field_type,
            operators: None,
            options: None,
        }
    }

    pub fn with_operators(mut self, operators: Vec<FilterOperator>) -> Self {
        self.operators = Some(operators);
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = Some(options);
        self
    }
}

/// The host-supplied description of everything filterable, immutable for
/// the duration of a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldCatalog {
    fields: Vec<FilterField>,
}

impl FieldCatalog {
    pub fn new(fields: Vec<FilterField>) -> Self {
        Self { fields }
    }

    pub fn field(&self, key: &str) -> Option<&FilterField> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}
