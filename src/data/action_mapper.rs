use std::collections::HashMap;

use super::models::ActionResponse;
use crate::{
    error::MappingError,
    experience::{Action, InteractionTrigger},
    registry::ActionRegistry,
};

fn map_trigger(on: &str) -> Result<InteractionTrigger, MappingError> {
    match on {
        "tap" => Ok(InteractionTrigger::Tap),
        "longPress" => Ok(InteractionTrigger::LongPress),
        other => Err(MappingError::UnknownActionTrigger(other.to_owned())),
    }
}

/// Resolve a single action. Unregistered action types resolve to `Ok(None)`.
pub fn map_action(
    registry: &ActionRegistry,
    response: &ActionResponse,
) -> Result<Option<Action>, MappingError> {
    let on = map_trigger(&response.on)?;

    let config = response.config.clone().unwrap_or_default();
    let Some(experience_action) = registry.resolve(&response.action_type, &config) else {
        log::debug!(target: "appcues",
                    action_type:display = response.action_type;
                    "dropping unregistered action");
        return Ok(None);
    };

    Ok(Some(Action {
        on,
        experience_action,
    }))
}

/// Resolve an action map keyed by primitive id, preserving the order of each list.
pub fn map_actions(
    registry: &ActionRegistry,
    responses: &HashMap<String, Vec<ActionResponse>>,
) -> Result<HashMap<String, Vec<Action>>, MappingError> {
    responses
        .iter()
        .map(|(primitive_id, actions)| {
            let actions = actions
                .iter()
                .filter_map(|it| map_action(registry, it).transpose())
                .collect::<Result<Vec<_>, _>>()?;
            Ok((primitive_id.clone(), actions))
        })
        .collect()
}

/// Merge group actions into step actions. Step entries replace group entries for the same
/// primitive id.
pub fn merge_actions(
    step_actions: HashMap<String, Vec<Action>>,
    group_actions: &HashMap<String, Vec<Action>>,
) -> HashMap<String, Vec<Action>> {
    let mut merged = group_actions.clone();
    merged.extend(step_actions);
    merged
}
