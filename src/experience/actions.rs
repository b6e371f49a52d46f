use std::{fmt::Debug, sync::Arc};

use derive_more::From;

use crate::{
    activity::{EventRequest, Properties},
    error::HostError,
};

/// User interaction an action is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionTrigger {
    #[allow(missing_docs)]
    Tap,
    #[allow(missing_docs)]
    LongPress,
}

/// An action bound to an interaction on a primitive.
#[derive(Debug, Clone)]
pub struct Action {
    #[allow(missing_docs)]
    pub on: InteractionTrigger,
    #[allow(missing_docs)]
    pub experience_action: Arc<dyn ExperienceAction>,
}

/// Reference to a step to navigate to.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum StepReference {
    /// Absolute flat step index.
    Index(usize),
    /// Relative to the current step.
    Offset(i64),
    /// Step id.
    Id(String),
}

/// The presentation layer actions operate on. Implemented outside of this crate by the renderer.
pub trait ActionHost: Send + Sync {
    /// Dismiss the current experience.
    fn dismiss(&self, mark_complete: bool) -> Result<(), HostError>;

    /// Navigate to another step of the current experience.
    fn show_step(&self, step: StepReference) -> Result<(), HostError>;

    /// Open a URL, either in-app or with the system handler.
    fn open_url(&self, url: &str, open_externally: bool) -> Result<(), HostError>;

    /// Record an analytics event.
    fn track(&self, event: EventRequest) -> Result<(), HostError>;

    /// Merge properties into the user profile.
    fn update_profile(&self, properties: Properties) -> Result<(), HostError>;

    /// Launch another experience by id.
    fn launch_experience(&self, experience_id: &str) -> Result<(), HostError>;
}

/// An action instance resolved from the action registry.
pub trait ExperienceAction: Debug + Send + Sync {
    /// Registry key this action was created from, e.g. `@appcues/close`.
    fn action_type(&self) -> &str;

    /// Execute the action.
    fn execute(&self, host: &dyn ActionHost) -> Result<(), HostError>;

    /// Actions that rewrite the queue they are part of return `Some`.
    fn as_queue_transforming(&self) -> Option<&dyn QueueTransforming> {
        None
    }
}

/// Capability of an action to rewrite the remaining action queue before it executes.
pub trait QueueTransforming {
    /// Return the new queue. `index` is the position of `self` in `queue`.
    fn transform_queue(
        &self,
        queue: Vec<Arc<dyn ExperienceAction>>,
        index: usize,
        host: &dyn ActionHost,
    ) -> Vec<Arc<dyn ExperienceAction>>;
}
