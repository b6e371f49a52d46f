//! Analytics activity sent to Appcues. An [`ActivityRequest`] is a batch of events and profile
//! updates for a single user and session; it is the unit of qualification.
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form properties attached to events and user profiles.
pub type Properties = HashMap<String, serde_json::Value>;

/// Well-known event names emitted by the SDK itself.
pub mod event_names {
    /// A new session has started. Triggers a refresh of the local qualification bundle.
    pub const SESSION_STARTED: &str = "appcues:session_started";
    /// A screen was viewed. `screen_title` is passed in the event context.
    pub const SCREEN_VIEW: &str = "appcues:screen_view";
    /// An experience started rendering. `experienceId` is passed as an attribute.
    pub const EXPERIENCE_STARTED: &str = "appcues:v2:experience_started";
}

/// Context key holding the title of the screen for screen view events.
pub const SCREEN_TITLE_KEY: &str = "screen_title";

/// Attribute key holding the experience id for experience lifecycle events.
pub const EXPERIENCE_ID_KEY: &str = "experienceId";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ActivityRequest {
    pub request_id: String,
    pub account_id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_update: Option<Properties>,
    pub timestamp: DateTime<Utc>,
}

impl ActivityRequest {
    /// Create an empty batch for the given account and user with a random request id.
    pub fn new(account_id: impl Into<String>, user_id: impl Into<String>) -> ActivityRequest {
        ActivityRequest {
            request_id: format!("{:032x}", rand::random::<u128>()),
            account_id: account_id.into(),
            user_id: user_id.into(),
            session_id: None,
            events: Vec::new(),
            profile_update: None,
            timestamp: Utc::now(),
        }
    }

    /// Add an event to the batch.
    pub fn with_event(mut self, event: EventRequest) -> ActivityRequest {
        self.events.push(event);
        self
    }

    /// Attach a profile update to the batch.
    pub fn with_profile_update(mut self, properties: Properties) -> ActivityRequest {
        self.profile_update = Some(properties);
        self
    }

    /// Set the session this batch belongs to.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> ActivityRequest {
        self.session_id = Some(session_id.into());
        self
    }

    pub(crate) fn contains_event(&self, name: &str) -> bool {
        self.events.iter().any(|event| event.name == name)
    }
}

/// A single analytics event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct EventRequest {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub attributes: Properties,
    #[serde(default)]
    pub context: Properties,
}

impl EventRequest {
    /// Create an event named `name`, timestamped now.
    pub fn new(name: impl Into<String>) -> EventRequest {
        EventRequest {
            name: name.into(),
            timestamp: Utc::now(),
            attributes: Properties::new(),
            context: Properties::new(),
        }
    }

    /// Create a screen view event for the screen titled `title`.
    pub fn screen_view(title: impl Into<String>) -> EventRequest {
        EventRequest::new(event_names::SCREEN_VIEW)
            .with_context(SCREEN_TITLE_KEY, title.into())
    }

    /// Create an experience started event for `experience_id`.
    pub fn experience_started(experience_id: impl Into<String>) -> EventRequest {
        EventRequest::new(event_names::EXPERIENCE_STARTED)
            .with_attribute(EXPERIENCE_ID_KEY, experience_id.into())
    }

    #[allow(missing_docs)]
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> EventRequest {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[allow(missing_docs)]
    pub fn with_context(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> EventRequest {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Return a string attribute. Non-string values are treated as absent.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(serde_json::Value::as_str)
    }

    /// Return a string context value. Non-string values are treated as absent.
    pub fn context_str(&self, key: &str) -> Option<&str> {
        self.context.get(key).and_then(serde_json::Value::as_str)
    }
}
