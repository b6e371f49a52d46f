//! Wire format of experiences as served by the Appcues API.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::primitive::PrimitiveResponse;
use crate::experience::ConfigMap;

/// A response entry that either decoded or is kept as [`Undecodable`], so one bad experience
/// does not fail the whole response.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum TryParse<T> {
    #[allow(missing_docs)]
    Parsed(T),
    #[allow(missing_docs)]
    ParseFailed(Undecodable),
}

impl<T> TryParse<T> {
    #[allow(missing_docs)]
    pub fn parsed(&self) -> Option<&T> {
        match self {
            TryParse::Parsed(value) => Some(value),
            TryParse::ParseFailed(_) => None,
        }
    }

    #[allow(missing_docs)]
    pub fn into_parsed(self) -> Option<T> {
        match self {
            TryParse::Parsed(value) => Some(value),
            TryParse::ParseFailed(_) => None,
        }
    }
}

impl TryParse<ExperienceResponse> {
    /// Id of the experience, decoded or not.
    pub fn id(&self) -> Option<&str> {
        match self {
            TryParse::Parsed(experience) => Some(&experience.id),
            TryParse::ParseFailed(undecodable) => undecodable.id.as_deref(),
        }
    }
}

/// What is left of an entry that failed to decode: the identity of the experience it carries,
/// so the failure can be reported against it.
///
/// The experience is looked up at the top level and, for on-device bundle entries, under
/// `experience`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct Undecodable {
    #[allow(missing_docs)]
    pub id: Option<String>,
    #[allow(missing_docs)]
    pub name: Option<String>,
}

impl From<serde_json::Value> for Undecodable {
    fn from(value: serde_json::Value) -> Self {
        let experience = match value.get("experience") {
            Some(nested) if nested.is_object() => nested,
            _ => &value,
        };
        let field = |key: &str| {
            experience
                .get(key)
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        };

        Undecodable {
            id: field("id"),
            name: field("name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ExperienceResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub experience_type: String,
    #[serde(default)]
    pub published_at: Option<i64>,
    /// Experience-level traits, inherited by every container.
    #[serde(default)]
    pub traits: Vec<TraitResponse>,
    pub steps: Vec<StepContainerResponse>,
    /// `"low"` or `"normal"`.
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub next_content_id: Option<String>,
    #[serde(default)]
    pub context: Option<ExperienceContextResponse>,
    #[serde(default)]
    pub experiment: Option<ExperimentResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ExperienceContextResponse {
    #[serde(default)]
    pub locale_id: Option<String>,
    #[serde(default)]
    pub locale_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ExperimentResponse {
    pub experiment_id: String,
    pub group: String,
    pub goal_id: String,
    pub content_type: String,
}

/// An entry of the experience `steps` list: either a group of steps sharing container traits or
/// a single step forming its own container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum StepContainerResponse {
    Group(StepGroupResponse),
    Child(StepResponse),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct StepGroupResponse {
    pub id: String,
    pub children: Vec<StepResponse>,
    #[serde(default)]
    pub traits: Vec<TraitResponse>,
    /// Actions inherited by all children, keyed by primitive id.
    #[serde(default)]
    pub actions: HashMap<String, Vec<ActionResponse>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct StepResponse {
    pub id: String,
    pub content: PrimitiveResponse,
    #[serde(default)]
    pub traits: Vec<TraitResponse>,
    /// Actions keyed by primitive id.
    #[serde(default)]
    pub actions: HashMap<String, Vec<ActionResponse>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TraitResponse {
    #[serde(rename = "type")]
    pub trait_type: String,
    #[serde(default)]
    pub config: Option<ConfigMap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ActionResponse {
    /// `"tap"` or `"longPress"`.
    pub on: String,
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub config: Option<ConfigMap>,
}
