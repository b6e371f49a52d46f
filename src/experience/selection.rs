use std::sync::Arc;

use crate::qualification::QualificationResult;

use super::Experience;

/// Outcome of picking an experience to present from a qualification result.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// The first presentable experience, if any.
    pub experience: Option<Arc<Experience>>,
    /// Experiences passed over before `experience` was found, in order.
    pub skipped: Vec<SkippedExperience>,
}

/// An experience that was not presented.
#[derive(Debug, Clone)]
pub struct SkippedExperience {
    #[allow(missing_docs)]
    pub experience: Arc<Experience>,
    #[allow(missing_docs)]
    pub reason: SkipReason,
}

/// Why an experience was not presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The experience could not be decoded or mapped.
    Failed(String),
    /// The user is in the control group of the experience's experiment.
    ExperimentControl,
}

/// Pick the first presentable experience in `result`, in order. Failed experiences and
/// experiment control groups are skipped and reported so lower-priority candidates can still be
/// attempted.
pub fn select_experience(result: &QualificationResult) -> Selection {
    let mut selection = Selection::default();

    for experience in &result.experiences {
        if let Some(error) = &experience.error {
            log::warn!(target: "appcues",
                       experience_id:display = experience.id;
                       "skipping experience that failed to map: {}", error);
            selection.skipped.push(SkippedExperience {
                experience: experience.clone(),
                reason: SkipReason::Failed(error.clone()),
            });
            continue;
        }

        if experience
            .experiment
            .as_ref()
            .is_some_and(|experiment| !experiment.should_execute())
        {
            log::debug!(target: "appcues",
                        experience_id:display = experience.id;
                        "user is in experiment control group");
            selection.skipped.push(SkippedExperience {
                experience: experience.clone(),
                reason: SkipReason::ExperimentControl,
            });
            continue;
        }

        selection.experience = Some(experience.clone());
        break;
    }

    selection
}
