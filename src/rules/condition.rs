use crate::{
    activity::{EventRequest, Properties, SCREEN_TITLE_KEY},
    rules::Operator,
};

/// Data a condition tree is evaluated against: a single event plus the current profile
/// properties.
#[derive(Debug, Clone, Copy)]
pub struct ConditionContext<'a> {
    #[allow(missing_docs)]
    pub event: &'a EventRequest,
    #[allow(missing_docs)]
    pub properties: &'a Properties,
}

/// Evaluable condition tree. Immutable once mapped from the wire format.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// All children are true. Vacuously true when empty.
    And(Vec<Condition>),
    /// Any child is true. Also true when empty.
    Or(Vec<Condition>),
    /// No child is true.
    Nor(Vec<Condition>),
    /// Negation of the child.
    Not(Box<Condition>),
    #[allow(missing_docs)]
    Screen(ScreenCondition),
    #[allow(missing_docs)]
    Trigger(TriggerCondition),
    #[allow(missing_docs)]
    Attributes(AttributesCondition),
    #[allow(missing_docs)]
    Properties(PropertiesCondition),
    /// Condition that could not be mapped. Always false.
    Invalid,
}

/// Compares the `screen_title` of the event context.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenCondition {
    pub(crate) operator: Operator,
    pub(crate) value: Option<String>,
}

/// Matches an event by name, optionally narrowed down by nested conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerCondition {
    pub(crate) event: String,
    pub(crate) conditions: Option<Box<Condition>>,
}

/// Compares an attribute of the event.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributesCondition {
    pub(crate) attribute: String,
    pub(crate) operator: Operator,
    pub(crate) value: Option<String>,
}

/// Compares a profile property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertiesCondition {
    pub(crate) property: String,
    pub(crate) operator: Operator,
    pub(crate) value: Option<String>,
}

impl Condition {
    /// Evaluate the tree for the given event.
    pub fn evaluate(&self, context: &ConditionContext) -> bool {
        match self {
            Condition::And(conditions) => conditions.iter().all(|it| it.evaluate(context)),
            Condition::Or(conditions) => {
                conditions.is_empty() || conditions.iter().any(|it| it.evaluate(context))
            }
            Condition::Nor(conditions) => !conditions.iter().any(|it| it.evaluate(context)),
            Condition::Not(condition) => !condition.evaluate(context),
            Condition::Screen(condition) => condition.evaluate(context),
            Condition::Trigger(condition) => condition.evaluate(context),
            Condition::Attributes(condition) => condition.evaluate(context),
            Condition::Properties(condition) => condition.evaluate(context),
            Condition::Invalid => false,
        }
    }
}

impl ScreenCondition {
    fn evaluate(&self, context: &ConditionContext) -> bool {
        let Some(screen_title) = context.event.context_str(SCREEN_TITLE_KEY) else {
            return false;
        };
        self.operator
            .evaluate(Some(screen_title), self.value.as_deref())
    }
}

impl TriggerCondition {
    fn evaluate(&self, context: &ConditionContext) -> bool {
        context.event.name == self.event
            && self
                .conditions
                .as_ref()
                .map_or(true, |conditions| conditions.evaluate(context))
    }
}

impl AttributesCondition {
    fn evaluate(&self, context: &ConditionContext) -> bool {
        self.operator.evaluate(
            context.event.attribute_str(&self.attribute),
            self.value.as_deref(),
        )
    }
}

impl PropertiesCondition {
    fn evaluate(&self, context: &ConditionContext) -> bool {
        let candidate = context
            .properties
            .get(&self.property)
            .and_then(serde_json::Value::as_str);
        self.operator.evaluate(candidate, self.value.as_deref())
    }
}
