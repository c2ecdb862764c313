use crate::condition::{condition_matches, FilterCondition, MatchPolicy};
use crate::value::Record;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a group combines its conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupLogic {
    And,
    Or,
}

/// The working query: one flat, ordered set of conditions under a single
/// logic operator. Condition order affects display only; evaluation is
/// order-independent. No nesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    pub id: String,
    pub logic: GroupLogic,
    #[serde(default)]
    pub conditions: Vec<FilterCondition>,
}

impl FilterGroup {
    pub fn new(logic: GroupLogic) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            logic,
            conditions: Vec::new(),
        }
    }

    pub fn with_conditions(mut self, conditions: Vec<FilterCondition>) -> Self {
        self.conditions = conditions;
        self
    }

    /// An empty group matches everything, regardless of logic.
    pub fn is_match_all(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Evaluate a whole group against one record under the default fail-open
/// policy.
pub fn matches_group(record: &Record, group: &FilterGroup) -> bool {
    matches_group_with_policy(record, group, MatchPolicy::default())
}

pub fn matches_group_with_policy(
    record: &Record,
    group: &FilterGroup,
    policy: MatchPolicy,
) -> bool {
    if group.conditions.is_empty() {
        return true;
    }
    match group.logic {
        GroupLogic::And => group
            .conditions
            .iter()
            .all(|c| condition_matches(record, c, policy)),
        GroupLogic::Or => group
            .conditions
            .iter()
            .any(|c| condition_matches(record, c, policy)),
    }
}

/// Apply a group to a record collection under the default policy.
pub fn filter_data<'a>(records: &'a [Record], group: Option<&FilterGroup>) -> Vec<&'a Record> {
    filter_data_with_policy(records, group, MatchPolicy::default())
}

/// Single forward pass; surviving records keep their original relative
/// order and the input is never touched. A missing or empty group keeps
/// every record.
pub fn filter_data_with_policy<'a>(
    records: &'a [Record],
    group: Option<&FilterGroup>,
    policy: MatchPolicy,
) -> Vec<&'a Record> {
    let matched: Vec<&Record> = match group {
        None => records.iter().collect(),
        Some(g) if g.is_match_all() => records.iter().collect(),
        Some(g) => records
            .iter()
            .filter(|r| matches_group_with_policy(r, g, policy))
            .collect(),
    };
    tracing::debug!(matched = matched.len(), total = records.len(), "filtered dataset");
    matched
}
