pub mod condition;
pub mod field;
pub mod group;
pub mod operator;
pub mod preset;
pub mod validate;
pub mod value;

pub use ledger_lens_common::{Config, LedgerLensError, Result};

pub use condition::{
    condition_matches, evaluate_condition, ConditionOutcome, FilterCondition, MatchPolicy,
};
pub use field::{FieldCatalog, FieldType, FilterField, SelectOption};
pub use group::{
    filter_data, filter_data_with_policy, matches_group, matches_group_with_policy, FilterGroup,
    GroupLogic,
};
pub use operator::{operators_for_field, operators_for_type, FilterOperator};
pub use preset::{FilePresetStore, FilterPreset, MemoryPresetStore, PresetManager, PresetStore};
pub use validate::{validate_group, GroupIssue};
pub use value::Record;
