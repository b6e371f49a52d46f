//! Sequential execution of action queues.
use std::sync::Arc;

use crate::{
    error::ActionError,
    experience::{ActionHost, ExperienceAction, InteractionTrigger, Step},
};

/// Execution state of a single queued action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    #[allow(missing_docs)]
    Pending,
    #[allow(missing_docs)]
    Executing,
    #[allow(missing_docs)]
    Completed,
}

/// Summary of a processed queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionReport {
    /// Types of the executed actions, in execution order.
    pub executed: Vec<String>,
}

/// Processes queues of actions one at a time, in order.
///
/// The queue is owned by the processor and may be rewritten while it runs: before an action
/// executes, if it is [`QueueTransforming`](crate::experience::QueueTransforming), it receives the
/// current queue and its own index and returns the queue to continue with. This is how, e.g., a
/// close action cancels everything queued after it.
///
/// Execution is fail-fast: the first failing action stops the queue.
#[derive(Debug, Default)]
pub struct ActionProcessor {}

impl ActionProcessor {
    #[allow(missing_docs)]
    pub fn new() -> ActionProcessor {
        ActionProcessor {}
    }

    /// Process `actions` against `host`.
    pub fn process(
        &self,
        actions: Vec<Arc<dyn ExperienceAction>>,
        host: &dyn ActionHost,
    ) -> Result<ActionReport, ActionError> {
        let mut queue = actions;
        let mut states = vec![ActionState::Pending; queue.len()];
        let mut report = ActionReport::default();
        let mut index = 0;

        while index < queue.len() {
            let current = queue[index].clone();
            if let Some(transforming) = current.as_queue_transforming() {
                queue = transforming.transform_queue(queue, index, host);
                states.resize(queue.len(), ActionState::Pending);
                log::trace!(target: "appcues", index, queue_length = queue.len(); "queue transformed");
                if index >= queue.len() {
                    break;
                }
            }

            let action = queue[index].clone();
            states[index] = ActionState::Executing;
            log::debug!(target: "appcues",
                        index,
                        action_type = action.action_type();
                        "executing action");

            action.execute(host).map_err(|err| {
                log::warn!(target: "appcues",
                           index,
                           action_type = action.action_type();
                           "action failed, dropping the rest of the queue: {}", err);
                ActionError::Failed {
                    index,
                    action_type: action.action_type().to_owned(),
                    reason: err.to_string(),
                }
            })?;

            states[index] = ActionState::Completed;
            report.executed.push(action.action_type().to_owned());
            index += 1;
        }

        debug_assert!(states
            .iter()
            .take(index)
            .all(|state| *state == ActionState::Completed));

        Ok(report)
    }

    /// Process the actions a step binds to `primitive_id` for the given interaction.
    pub fn process_interaction(
        &self,
        step: &Step,
        primitive_id: &str,
        trigger: InteractionTrigger,
        host: &dyn ActionHost,
    ) -> Result<ActionReport, ActionError> {
        self.process(step.actions_for(primitive_id, trigger), host)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use super::ActionProcessor;
    use crate::{
        error::ActionError,
        experience::{
            Action, ExperienceAction, InteractionTrigger, Primitive, SpacerPrimitive, Step,
        },
        test_support::{ExecutionLog, FakeAction, RecordingHost},
    };

    fn queue(actions: Vec<FakeAction>) -> Vec<Arc<dyn ExperienceAction>> {
        actions
            .into_iter()
            .map(|it| Arc::new(it) as Arc<dyn ExperienceAction>)
            .collect()
    }

    #[test]
    fn executes_in_order() {
        let log = ExecutionLog::default();
        let report = ActionProcessor::new()
            .process(
                queue(vec![
                    FakeAction::logging("A", &log),
                    FakeAction::logging("B", &log),
                ]),
                &RecordingHost::default(),
            )
            .unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["A", "B"]);
        assert_eq!(report.executed, vec!["A", "B"]);
    }

    #[test]
    fn truncating_action_cancels_the_rest() {
        let log = ExecutionLog::default();
        let truncating = FakeAction {
            truncate_after_self: true,
            ..FakeAction::logging("C", &log)
        };

        let report = ActionProcessor::new()
            .process(
                queue(vec![
                    FakeAction::logging("A", &log),
                    FakeAction::logging("B", &log),
                    truncating,
                    FakeAction::logging("D", &log),
                    FakeAction::logging("E", &log),
                ]),
                &RecordingHost::default(),
            )
            .unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["A", "B", "C"]);
        assert_eq!(report.executed.len(), 3);
    }

    #[test]
    fn failure_stops_the_queue() {
        let log = ExecutionLog::default();
        let failing = FakeAction {
            fail: true,
            ..FakeAction::logging("B", &log)
        };

        let result = ActionProcessor::new().process(
            queue(vec![
                FakeAction::logging("A", &log),
                failing,
                FakeAction::logging("C", &log),
            ]),
            &RecordingHost::default(),
        );

        assert_eq!(
            result,
            Err(ActionError::Failed {
                index: 1,
                action_type: "B".to_owned(),
                reason: "B failed".to_owned(),
            })
        );
        assert_eq!(*log.lock().unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn empty_queue() {
        let report = ActionProcessor::new()
            .process(vec![], &RecordingHost::default())
            .unwrap();
        assert!(report.executed.is_empty());
    }

    #[test]
    fn interaction_selects_by_primitive_and_trigger() {
        let log: ExecutionLog = Arc::new(Mutex::new(vec![]));
        let action = |name: &str, on| Action {
            on,
            experience_action: Arc::new(FakeAction::logging(name, &log)),
        };
        let step = Step {
            id: "step".to_owned(),
            content: Primitive::Spacer(SpacerPrimitive {
                id: "button".to_owned(),
                style: Default::default(),
                spacing: 0.0,
            }),
            traits: vec![],
            actions: HashMap::from([(
                "button".to_owned(),
                vec![
                    action("tap-1", InteractionTrigger::Tap),
                    action("long", InteractionTrigger::LongPress),
                    action("tap-2", InteractionTrigger::Tap),
                ],
            )]),
        };

        ActionProcessor::new()
            .process_interaction(
                &step,
                "button",
                InteractionTrigger::Tap,
                &RecordingHost::default(),
            )
            .unwrap();
        ActionProcessor::new()
            .process_interaction(
                &step,
                "other",
                InteractionTrigger::Tap,
                &RecordingHost::default(),
            )
            .unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["tap-1", "tap-2"]);
    }
}
