//! Internal rendering model of an experience, produced by [`ExperienceMapper`](crate::data::ExperienceMapper).
//!
//! The model is immutable once mapped and shared through `Arc` between the qualifier, the
//! renderer and action processing.
use std::{collections::HashMap, sync::Arc};

mod actions;
mod primitive;
mod selection;
mod traits;

pub use actions::{
    Action, ActionHost, ExperienceAction, InteractionTrigger, QueueTransforming, StepReference,
};
pub use primitive::*;
pub use selection::{select_experience, Selection, SkippedExperience, SkipReason};
pub use traits::{
    BackdropDecoratingTrait, ContainerDecoratingTrait, ContainerDecoratingType,
    ContentWrappingTrait, ExperienceTrait, PresentationStyle, PresentingTrait, TraitLevel,
};

/// Opaque configuration of a trait or an action.
pub type ConfigMap = HashMap<String, serde_json::Value>;

/// Experiment group that is never shown to the user.
pub const CONTROL_GROUP: &str = "control";

/// An experience ready to be handed to the renderer.
#[derive(Debug, Clone)]
pub struct Experience {
    #[allow(missing_docs)]
    pub id: String,
    #[allow(missing_docs)]
    pub name: String,
    /// Experience type, e.g. `mobile`.
    pub experience_type: String,
    /// Ordered step groups.
    pub containers: Vec<StepContainer>,
    #[allow(missing_docs)]
    pub priority: ExperiencePriority,
    /// What caused the experience to be shown.
    pub trigger: ExperienceTrigger,
    /// Publish time, epoch milliseconds.
    pub published_at: Option<i64>,
    #[allow(missing_docs)]
    pub locale_id: Option<String>,
    #[allow(missing_docs)]
    pub locale_name: Option<String>,
    #[allow(missing_docs)]
    pub experiment: Option<Experiment>,
    /// Actions to run once the last step completes.
    pub completion_actions: Vec<Arc<dyn ExperienceAction>>,
    /// Set when the experience could not be decoded or mapped. A failed experience has no
    /// containers and is never presented.
    pub error: Option<String>,
}

impl Experience {
    /// Return `true` if this is a failed-experience marker.
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Total number of steps across all containers.
    pub fn step_count(&self) -> usize {
        self.containers.iter().map(|it| it.steps.len()).sum()
    }

    /// Iterate over all steps in presentation order.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.containers.iter().flat_map(|it| it.steps.iter())
    }
}

/// Relative priority of an experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExperiencePriority {
    #[allow(missing_docs)]
    Low,
    #[allow(missing_docs)]
    #[default]
    Normal,
}

/// What caused an experience to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperienceTrigger {
    /// Qualified by the Appcues API.
    Qualification {
        /// Reason reported by the server, e.g. `screen_view`.
        reason: Option<String>,
    },
    /// Explicit `show()` call.
    ShowCall,
    /// Preview of unpublished content.
    Preview,
    /// Opened via a deep link.
    DeepLink,
    /// Launched when another experience completed.
    ExperienceCompletionAction {
        #[allow(missing_docs)]
        from_experience_id: Option<String>,
    },
    /// Launched by a `@appcues/launch-experience` action.
    LaunchExperienceAction {
        #[allow(missing_docs)]
        from_experience_id: Option<String>,
    },
    /// Qualified locally by a screen view.
    ScreenViewed,
    /// Qualified locally by a custom event.
    Event {
        /// Name of the event that qualified the experience.
        name: String,
    },
}

/// Experiment an experience belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Experiment {
    pub id: String,
    pub group: String,
    pub goal_id: String,
    pub content_type: String,
}

impl Experiment {
    /// Return `false` for the control group, whose members must not see the experience.
    pub fn should_execute(&self) -> bool {
        !self.group.eq_ignore_ascii_case(CONTROL_GROUP)
    }
}

/// A group of steps presented together by a single presenting trait.
#[derive(Debug, Clone)]
pub struct StepContainer {
    #[allow(missing_docs)]
    pub id: String,
    #[allow(missing_docs)]
    pub steps: Vec<Step>,
    /// The trait presenting this container. Exactly one per container.
    pub presenting_trait: Arc<dyn ExperienceTrait>,
    /// The trait wrapping the content of this container. Exactly one per container.
    pub content_wrapping_trait: Arc<dyn ExperienceTrait>,
    #[allow(missing_docs)]
    pub backdrop_traits: Vec<Arc<dyn ExperienceTrait>>,
    #[allow(missing_docs)]
    pub container_traits: Vec<Arc<dyn ExperienceTrait>>,
    /// Group-level actions keyed by primitive id. Already merged into the actions of each step.
    pub actions: HashMap<String, Vec<Action>>,
}

/// A single step of an experience.
#[derive(Debug, Clone)]
pub struct Step {
    #[allow(missing_docs)]
    pub id: String,
    /// Root of the primitive tree.
    pub content: Primitive,
    /// All resolved traits applying to the step, including inherited ones.
    pub traits: Vec<Arc<dyn ExperienceTrait>>,
    /// Actions keyed by primitive id.
    pub actions: HashMap<String, Vec<Action>>,
}

impl Step {
    /// Actions attached to the primitive `primitive_id` for the given interaction.
    pub fn actions_for(
        &self,
        primitive_id: &str,
        trigger: InteractionTrigger,
    ) -> Vec<Arc<dyn ExperienceAction>> {
        self.actions
            .get(primitive_id)
            .into_iter()
            .flatten()
            .filter(|action| action.on == trigger)
            .map(|action| action.experience_action.clone())
            .collect()
    }
}
