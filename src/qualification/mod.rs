//! Deciding which experiences qualify for a batch of activity.
use std::sync::Arc;

use crate::{
    data::{ExperienceResponse, TryParse},
    experience::{Experience, ExperienceTrigger},
    rules::{map_rule, QualificationRule},
};

mod models;
mod qualifier;

pub use models::{LocalQualificationResponse, QualifiableExperienceResponse, QualifyResponse};
pub use qualifier::Qualifier;

/// Experiences qualified for an activity batch, in presentation priority order.
#[derive(Debug, Clone)]
pub struct QualificationResult {
    /// Trigger of the first (highest priority) experience.
    pub trigger: ExperienceTrigger,
    /// Qualified experiences. May include failed-experience markers.
    pub experiences: Vec<Arc<Experience>>,
    /// `false` if the server skipped qualification.
    pub performed_qualification: bool,
}

/// An entry of the on-device qualification bundle.
#[derive(Debug, Clone)]
pub struct QualifiableExperience {
    /// Experience content, mapped once it qualifies.
    pub experience: TryParse<ExperienceResponse>,
    #[allow(missing_docs)]
    pub rule: QualificationRule,
    /// Higher priorities are presented first.
    pub sort_priority: i64,
}

impl QualifiableExperience {
    /// Id of the experience, also available when its content failed to decode.
    pub fn experience_id(&self) -> Option<&str> {
        self.experience.id()
    }
}

/// The on-device qualification bundle with rules mapped into conditions.
#[derive(Debug, Clone, Default)]
pub struct LocalQualifications {
    #[allow(missing_docs)]
    pub experiences: Vec<QualifiableExperience>,
}

impl From<LocalQualificationResponse> for LocalQualifications {
    fn from(response: LocalQualificationResponse) -> Self {
        let experiences = response
            .qualifications
            .into_iter()
            .filter_map(|entry| {
                let entry = match entry {
                    TryParse::Parsed(entry) => entry,
                    TryParse::ParseFailed(undecodable) => {
                        log::warn!(target: "appcues",
                                   experience_id:? = undecodable.id;
                                   "skipping undecodable local qualification");
                        return None;
                    }
                };
                let Some(rule) = map_rule(entry.rule.as_ref()) else {
                    log::debug!(target: "appcues", "skipping local qualification without a rule");
                    return None;
                };
                Some(QualifiableExperience {
                    experience: entry.experience,
                    rule,
                    sort_priority: entry.sort_priority,
                })
            })
            .collect();

        LocalQualifications { experiences }
    }
}
