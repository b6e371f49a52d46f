//! Qualification rules: wire models, the evaluable condition tree and the mapper between them.
mod condition;
mod mapper;
mod operator;

pub mod models;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::{EventRequest, Properties};

pub use condition::{
    AttributesCondition, Condition, ConditionContext, PropertiesCondition, ScreenCondition,
    TriggerCondition,
};
pub use mapper::{map_condition, map_rule};
pub use operator::Operator;

/// How often an experience may qualify for the same user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Only if the user has never seen the experience.
    Once,
    /// Every time the rule matches.
    EveryTime,
}

/// A rule deciding whether an experience qualifies for an event.
#[derive(Debug, Clone, PartialEq)]
pub struct QualificationRule {
    #[allow(missing_docs)]
    pub conditions: Condition,
    #[allow(missing_docs)]
    pub frequency: Frequency,
    #[allow(missing_docs)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl QualificationRule {
    /// Return the first event in `events` satisfying the rule conditions.
    pub fn first_match<'a>(
        &self,
        events: impl IntoIterator<Item = &'a EventRequest>,
        properties: &Properties,
    ) -> Option<&'a EventRequest> {
        events.into_iter().find(|event| {
            self.conditions
                .evaluate(&ConditionContext { event, properties })
        })
    }
}
