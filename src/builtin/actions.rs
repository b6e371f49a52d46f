use std::sync::Arc;

use super::{action_types, config_value};
use crate::{
    activity::{EventRequest, Properties},
    error::HostError,
    experience::{ActionHost, ConfigMap, ExperienceAction, QueueTransforming, StepReference},
};

/// `@appcues/close`: dismisses the experience. Actions queued after it are cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CloseAction {
    /// Dismiss as completed rather than skipped.
    pub mark_complete: bool,
}

impl CloseAction {
    #[allow(missing_docs)]
    pub fn from_config(config: &ConfigMap) -> CloseAction {
        CloseAction {
            mark_complete: config_value(config, "markComplete").unwrap_or(false),
        }
    }
}

impl ExperienceAction for CloseAction {
    fn action_type(&self) -> &str {
        action_types::CLOSE
    }

    fn execute(&self, host: &dyn ActionHost) -> Result<(), HostError> {
        host.dismiss(self.mark_complete)
    }

    fn as_queue_transforming(&self) -> Option<&dyn QueueTransforming> {
        Some(self)
    }
}

impl QueueTransforming for CloseAction {
    fn transform_queue(
        &self,
        mut queue: Vec<Arc<dyn ExperienceAction>>,
        index: usize,
        _host: &dyn ActionHost,
    ) -> Vec<Arc<dyn ExperienceAction>> {
        let cancelled = queue.len().saturating_sub(index + 1);
        if cancelled > 0 {
            log::debug!(target: "appcues", cancelled; "close cancels queued actions");
        }
        queue.truncate(index + 1);
        queue
    }
}

/// `@appcues/continue`: navigates to another step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinueAction {
    #[allow(missing_docs)]
    pub step: StepReference,
}

impl ContinueAction {
    /// `index` takes precedence over `offset`, which takes precedence over `stepID`. Without
    /// any, continues to the next step.
    pub fn from_config(config: &ConfigMap) -> ContinueAction {
        let step = config_value::<usize>(config, "index")
            .map(StepReference::from)
            .or_else(|| config_value::<i64>(config, "offset").map(StepReference::from))
            .or_else(|| config_value::<String>(config, "stepID").map(StepReference::from))
            .unwrap_or(StepReference::Offset(1));

        ContinueAction { step }
    }
}

impl ExperienceAction for ContinueAction {
    fn action_type(&self) -> &str {
        action_types::CONTINUE
    }

    fn execute(&self, host: &dyn ActionHost) -> Result<(), HostError> {
        host.show_step(self.step.clone())
    }
}

/// `@appcues/link`: opens a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAction {
    #[allow(missing_docs)]
    pub url: Option<String>,
    /// Open with the system handler instead of in-app.
    pub open_externally: bool,
}

impl LinkAction {
    #[allow(missing_docs)]
    pub fn from_config(config: &ConfigMap) -> LinkAction {
        LinkAction {
            url: config_value(config, "url"),
            open_externally: config_value(config, "openExternally").unwrap_or(false),
        }
    }
}

impl ExperienceAction for LinkAction {
    fn action_type(&self) -> &str {
        action_types::LINK
    }

    fn execute(&self, host: &dyn ActionHost) -> Result<(), HostError> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| HostError("link action has no url".to_owned()))?;
        host.open_url(url, self.open_externally)
    }
}

/// `@appcues/track`: records an analytics event.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackAction {
    #[allow(missing_docs)]
    pub event_name: Option<String>,
    #[allow(missing_docs)]
    pub attributes: Properties,
}

impl TrackAction {
    #[allow(missing_docs)]
    pub fn from_config(config: &ConfigMap) -> TrackAction {
        TrackAction {
            event_name: config_value(config, "eventName"),
            attributes: config_value(config, "attributes").unwrap_or_default(),
        }
    }
}

impl ExperienceAction for TrackAction {
    fn action_type(&self) -> &str {
        action_types::TRACK
    }

    fn execute(&self, host: &dyn ActionHost) -> Result<(), HostError> {
        let name = self
            .event_name
            .as_deref()
            .ok_or_else(|| HostError("track action has no event name".to_owned()))?;

        let mut event = EventRequest::new(name);
        event.attributes = self.attributes.clone();
        host.track(event)
    }
}

/// `@appcues/update-profile`: merges every configured entry into the user profile.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProfileAction {
    #[allow(missing_docs)]
    pub properties: Properties,
}

impl UpdateProfileAction {
    #[allow(missing_docs)]
    pub fn from_config(config: &ConfigMap) -> UpdateProfileAction {
        UpdateProfileAction {
            properties: config.clone(),
        }
    }
}

impl ExperienceAction for UpdateProfileAction {
    fn action_type(&self) -> &str {
        action_types::UPDATE_PROFILE
    }

    fn execute(&self, host: &dyn ActionHost) -> Result<(), HostError> {
        host.update_profile(self.properties.clone())
    }
}

/// `@appcues/launch-experience`: shows another experience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchExperienceAction {
    #[allow(missing_docs)]
    pub experience_id: Option<String>,
}

impl LaunchExperienceAction {
    #[allow(missing_docs)]
    pub fn from_config(config: &ConfigMap) -> LaunchExperienceAction {
        LaunchExperienceAction {
            experience_id: config_value(config, "experienceID"),
        }
    }
}

impl ExperienceAction for LaunchExperienceAction {
    fn action_type(&self) -> &str {
        action_types::LAUNCH_EXPERIENCE
    }

    fn execute(&self, host: &dyn ActionHost) -> Result<(), HostError> {
        let experience_id = self
            .experience_id
            .as_deref()
            .ok_or_else(|| HostError("launch action has no experience id".to_owned()))?;
        host.launch_experience(experience_id)
    }
}
