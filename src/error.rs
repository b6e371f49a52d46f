use std::sync::Arc;

use thiserror::Error;

/// Represents a result type for operations in the Appcues core.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum representing possible errors that can occur in the Appcues core.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// An experience could not be mapped into the rendering model.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// A request to the Appcues API failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// An action in a queue failed to execute.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// The experience could not be handed over to the renderer.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// An operation that needs a user was called before `identify()`.
    #[error("no user identified")]
    NoUser,
}

/// Structural violations in an experience response. Fatal for the experience being mapped only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MappingError {
    /// Action `on` value is neither `tap` nor `longPress`.
    #[error("unknown action trigger {0:?}")]
    UnknownActionTrigger(String),

    /// No registered trait in the container is able to present it.
    #[error("step container {container_id} has no presenting trait")]
    MissingPresentingTrait {
        /// Id of the offending step container.
        container_id: String,
    },

    /// No registered trait in the container is able to wrap its content.
    #[error("step container {container_id} has no content wrapping trait")]
    MissingContentWrappingTrait {
        /// Id of the offending step container.
        container_id: String,
    },

    /// The experience JSON could not be decoded at all.
    #[error("experience could not be decoded: {0}")]
    Undecodable(String),
}

/// Errors returned by the remote experience source and activity sink.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum RemoteError {
    /// Invalid base URL configuration.
    #[error("invalid api_base_path configuration")]
    InvalidBaseUrl(#[source] url::ParseError),

    /// The requested resource does not exist (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Server replied with a non-success status other than 404.
    #[error("unexpected HTTP status {status}")]
    Http {
        /// HTTP status code.
        status: u16,
    },

    /// Network or decoding error.
    #[error(transparent)]
    // reqwest::Error is not clonable, so we're wrapping it in an Arc.
    Network(Arc<reqwest::Error>),
}

impl From<reqwest::Error> for RemoteError {
    fn from(value: reqwest::Error) -> Self {
        RemoteError::Network(Arc::new(value.without_url()))
    }
}

/// Error that stopped an action queue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Action at `index` failed. Remaining actions were not executed.
    #[error("action {action_type} at index {index} failed: {reason}")]
    Failed {
        /// Position of the failed action in the (possibly transformed) queue.
        index: usize,
        /// Type of the failed action.
        action_type: String,
        /// Human-readable failure reason.
        reason: String,
    },
}

/// Error reported by an [`ExperienceRenderer`](crate::ExperienceRenderer).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unable to render experience {experience_id}: {reason}")]
pub struct RenderError {
    /// Id of the experience that failed to render.
    pub experience_id: String,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Error reported by an [`ActionHost`](crate::experience::ActionHost) while executing an action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct HostError(pub String);
