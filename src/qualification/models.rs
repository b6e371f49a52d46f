//! Wire format of qualification responses.
use serde::{Deserialize, Serialize};

use crate::{
    data::{ExperienceResponse, TryParse},
    rules::models::RuleResponse,
};

/// Response of the remote qualification endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualifyResponse {
    /// Qualified experiences in priority order.
    #[serde(default)]
    pub experiences: Vec<TryParse<ExperienceResponse>>,
    /// `false` if the server skipped qualification, e.g. because an experience is already
    /// showing.
    #[serde(default)]
    pub performed_qualification: bool,
    /// Reason reported by the server, e.g. `screen_view`.
    #[serde(default)]
    pub qualification_reason: Option<String>,
}

/// Bundle of experiences that can be qualified on device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalQualificationResponse {
    #[allow(missing_docs)]
    pub qualifications: Vec<TryParse<QualifiableExperienceResponse>>,
}

/// An experience with the rule deciding when it qualifies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualifiableExperienceResponse {
    /// Absent rules never qualify on device.
    #[serde(default)]
    pub rule: Option<RuleResponse>,
    #[allow(missing_docs)]
    pub experience: TryParse<ExperienceResponse>,
    /// Higher priorities are presented first.
    #[serde(default)]
    pub sort_priority: i64,
}
