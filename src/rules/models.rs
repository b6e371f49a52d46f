//! Wire format of qualification rules.
use serde::{Deserialize, Serialize};

use super::Frequency;

/// A qualification rule as served in the local qualification bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResponse {
    /// Root of the condition tree. Missing conditions never qualify.
    #[serde(default)]
    pub conditions: Option<ConditionResponse>,
    #[allow(missing_docs)]
    pub frequency: Frequency,
    /// Last update, epoch milliseconds.
    #[serde(default)]
    pub updated_at: Option<i64>,
}

/// Polymorphic condition node. Exactly one field is expected to be set; if several are, the
/// first one in declaration order wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ConditionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub and: Option<Vec<ConditionResponse>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub or: Option<Vec<ConditionResponse>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nor: Option<Vec<ConditionResponse>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<ConditionResponse>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<ScreenConditionResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<TriggerConditionResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AttributesConditionResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertiesConditionResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ScreenConditionResponse {
    pub operator: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TriggerConditionResponse {
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Box<ConditionResponse>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct AttributesConditionResponse {
    pub attribute: String,
    pub operator: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PropertiesConditionResponse {
    pub property: String,
    pub operator: String,
    #[serde(default)]
    pub value: Option<String>,
}
