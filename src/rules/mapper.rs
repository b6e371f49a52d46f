use chrono::{DateTime, Utc};

use super::{
    condition::{
        AttributesCondition, Condition, PropertiesCondition, ScreenCondition, TriggerCondition,
    },
    models::{ConditionResponse, RuleResponse},
    Operator, QualificationRule,
};

/// Map a wire rule into an evaluable [`QualificationRule`]. `None` in, `None` out.
pub fn map_rule(response: Option<&RuleResponse>) -> Option<QualificationRule> {
    let response = response?;

    Some(QualificationRule {
        conditions: response
            .conditions
            .as_ref()
            .map_or(Condition::Invalid, map_condition),
        frequency: response.frequency,
        updated_at: response
            .updated_at
            .and_then(DateTime::<Utc>::from_timestamp_millis),
    })
}

/// Map a condition node. The first non-null field decides the variant, in the order `and`, `or`,
/// `nor`, `not`, `screen`, `trigger`, `attributes`, `properties`. A node with none of them set maps
/// to [`Condition::Invalid`].
pub fn map_condition(response: &ConditionResponse) -> Condition {
    if let Some(and) = &response.and {
        return Condition::And(and.iter().map(map_condition).collect());
    }
    if let Some(or) = &response.or {
        return Condition::Or(or.iter().map(map_condition).collect());
    }
    if let Some(nor) = &response.nor {
        return Condition::Nor(nor.iter().map(map_condition).collect());
    }
    if let Some(not) = &response.not {
        return Condition::Not(Box::new(map_condition(not)));
    }
    if let Some(screen) = &response.screen {
        return Condition::Screen(ScreenCondition {
            operator: Operator::from_symbol(&screen.operator),
            value: screen.value.clone(),
        });
    }
    if let Some(trigger) = &response.trigger {
        return Condition::Trigger(TriggerCondition {
            event: trigger.event.clone(),
            conditions: trigger
                .conditions
                .as_deref()
                .map(|it| Box::new(map_condition(it))),
        });
    }
    if let Some(attributes) = &response.attributes {
        return Condition::Attributes(AttributesCondition {
            attribute: attributes.attribute.clone(),
            operator: Operator::from_symbol(&attributes.operator),
            value: attributes.value.clone(),
        });
    }
    if let Some(properties) = &response.properties {
        return Condition::Properties(PropertiesCondition {
            property: properties.property.clone(),
            operator: Operator::from_symbol(&properties.operator),
            value: properties.value.clone(),
        });
    }

    log::debug!(target: "appcues", "condition without a known variant, treating as invalid");
    Condition::Invalid
}
