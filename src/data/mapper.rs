use std::{collections::HashMap, sync::Arc};

use serde_json::json;

use super::{
    action_mapper::{map_actions, merge_actions},
    models::{
        ActionResponse, ExperienceResponse, StepContainerResponse, StepResponse, TraitResponse,
        TryParse,
    },
    primitive_mapper::map_primitive,
};
use crate::{
    error::MappingError,
    experience::{
        Action, ConfigMap, Experience, ExperienceAction, ExperiencePriority, ExperienceTrait,
        ExperienceTrigger, Experiment, Step, StepContainer, TraitLevel,
    },
    registry::{ActionRegistry, TraitRegistry},
};

/// Action type run on completion when the experience has a `redirectUrl`.
const LINK_ACTION: &str = "@appcues/link";
/// Action type run on completion when the experience has a `nextContentId`.
const LAUNCH_EXPERIENCE_ACTION: &str = "@appcues/launch-experience";

/// A trait declaration together with the level it was declared at.
type LeveledTrait<'a> = (&'a TraitResponse, TraitLevel);

/// Maps experience responses into the rendering model, resolving traits and actions through the
/// registries.
#[derive(Clone)]
pub struct ExperienceMapper {
    traits: Arc<TraitRegistry>,
    actions: Arc<ActionRegistry>,
}

impl ExperienceMapper {
    #[allow(missing_docs)]
    pub fn new(traits: Arc<TraitRegistry>, actions: Arc<ActionRegistry>) -> ExperienceMapper {
        ExperienceMapper { traits, actions }
    }

    /// Map an experience response.
    ///
    /// # Errors
    ///
    /// Fails if a container ends up without a presenting or a content-wrapping trait, or if an
    /// action is bound to an unknown interaction.
    pub fn map(
        &self,
        response: &ExperienceResponse,
        trigger: ExperienceTrigger,
    ) -> Result<Experience, MappingError> {
        let experience_traits = response
            .traits
            .iter()
            .map(|it| (it, TraitLevel::Experience))
            .collect::<Vec<_>>();

        let containers = response
            .steps
            .iter()
            .map(|container| match container {
                StepContainerResponse::Group(group) => self.map_container(
                    &group.id,
                    &group.children,
                    &group.traits,
                    &group.actions,
                    &experience_traits,
                ),
                // A lone step is a container of one and carries the container traits itself.
                StepContainerResponse::Child(step) => self.map_container(
                    &step.id,
                    std::slice::from_ref(step),
                    &step.traits,
                    &Default::default(),
                    &experience_traits,
                ),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let experience = Experience {
            id: response.id.clone(),
            name: response.name.clone(),
            experience_type: response.experience_type.clone(),
            containers,
            priority: match response.priority.as_deref() {
                Some("low") => ExperiencePriority::Low,
                _ => ExperiencePriority::Normal,
            },
            trigger,
            published_at: response.published_at,
            locale_id: response.context.as_ref().and_then(|it| it.locale_id.clone()),
            locale_name: response
                .context
                .as_ref()
                .and_then(|it| it.locale_name.clone()),
            experiment: response.experiment.as_ref().map(|it| Experiment {
                id: it.experiment_id.clone(),
                group: it.group.clone(),
                goal_id: it.goal_id.clone(),
                content_type: it.content_type.clone(),
            }),
            completion_actions: self.completion_actions(response),
            error: None,
        };

        log::debug!(target: "appcues",
                    experience_id:display = experience.id,
                    steps = experience.step_count();
                    "mapped experience");

        Ok(experience)
    }

    /// Build a marker for an experience that could not be decoded or mapped.
    pub fn map_failed(
        id: impl Into<String>,
        name: impl Into<String>,
        trigger: ExperienceTrigger,
        error: impl ToString,
    ) -> Experience {
        Experience {
            id: id.into(),
            name: name.into(),
            experience_type: String::new(),
            containers: Vec::new(),
            priority: ExperiencePriority::Normal,
            trigger,
            published_at: None,
            locale_id: None,
            locale_name: None,
            experiment: None,
            completion_actions: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    /// Map a possibly undecodable experience, producing a failed marker when decoding or mapping
    /// failed. Undecodable entries without an `id` are dropped.
    pub fn map_or_failed(
        &self,
        response: &TryParse<ExperienceResponse>,
        trigger: ExperienceTrigger,
    ) -> Option<Experience> {
        match response {
            TryParse::Parsed(response) => match self.map(response, trigger.clone()) {
                Ok(experience) => Some(experience),
                Err(err) => {
                    log::warn!(target: "appcues",
                               experience_id:display = response.id;
                               "failed to map experience: {}", err);
                    Some(ExperienceMapper::map_failed(
                        &response.id,
                        &response.name,
                        trigger,
                        err,
                    ))
                }
            },
            TryParse::ParseFailed(undecodable) => {
                let id = undecodable.id.as_deref()?;
                let error = MappingError::Undecodable(id.to_owned());
                log::warn!(target: "appcues", experience_id = id; "{}", error);
                Some(ExperienceMapper::map_failed(
                    id,
                    undecodable.name.as_deref().unwrap_or(""),
                    trigger,
                    error,
                ))
            }
        }
    }

    fn map_container(
        &self,
        id: &str,
        steps: &[StepResponse],
        group_traits: &[TraitResponse],
        group_actions: &HashMap<String, Vec<ActionResponse>>,
        experience_traits: &[LeveledTrait<'_>],
    ) -> Result<StepContainer, MappingError> {
        let container_traits = merge_traits(
            group_traits.iter().map(|it| (it, TraitLevel::Group)).collect(),
            experience_traits,
        );
        let resolved = self.resolve_traits(&container_traits);

        let presenting_trait = resolved
            .iter()
            .find(|it| it.as_presenting().is_some())
            .cloned()
            .ok_or_else(|| MappingError::MissingPresentingTrait {
                container_id: id.to_owned(),
            })?;
        let content_wrapping_trait = resolved
            .iter()
            .find(|it| it.as_content_wrapping().is_some())
            .cloned()
            .ok_or_else(|| MappingError::MissingContentWrappingTrait {
                container_id: id.to_owned(),
            })?;
        let backdrop_traits = resolved
            .iter()
            .filter(|it| it.as_backdrop_decorating().is_some())
            .cloned()
            .collect();
        let decorating_traits = resolved
            .iter()
            .filter(|it| it.as_container_decorating().is_some())
            .cloned()
            .collect();

        let actions = map_actions(&self.actions, group_actions)?;

        let steps = steps
            .iter()
            .map(|step| self.map_step(step, &container_traits, &actions))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StepContainer {
            id: id.to_owned(),
            steps,
            presenting_trait,
            content_wrapping_trait,
            backdrop_traits,
            container_traits: decorating_traits,
            actions,
        })
    }

    fn map_step(
        &self,
        step: &StepResponse,
        container_traits: &[LeveledTrait<'_>],
        container_actions: &HashMap<String, Vec<Action>>,
    ) -> Result<Step, MappingError> {
        let traits = merge_traits(
            step.traits.iter().map(|it| (it, TraitLevel::Step)).collect(),
            container_traits,
        );
        let actions = map_actions(&self.actions, &step.actions)?;

        Ok(Step {
            id: step.id.clone(),
            content: map_primitive(&step.content),
            traits: self.resolve_traits(&traits),
            actions: merge_actions(actions, container_actions),
        })
    }

    fn resolve_traits(&self, traits: &[LeveledTrait<'_>]) -> Vec<Arc<dyn ExperienceTrait>> {
        traits
            .iter()
            .filter_map(|(response, level)| {
                let config = response.config.clone().unwrap_or_default();
                let resolved = self.traits.resolve(&response.trait_type, &config, *level);
                if resolved.is_none() {
                    log::debug!(target: "appcues",
                                trait_type:display = response.trait_type;
                                "dropping unregistered trait");
                }
                resolved
            })
            .collect()
    }

    fn completion_actions(&self, response: &ExperienceResponse) -> Vec<Arc<dyn ExperienceAction>> {
        let mut actions = Vec::new();

        if let Some(url) = &response.redirect_url {
            let config = ConfigMap::from([("url".to_owned(), json!(url))]);
            actions.extend(self.actions.resolve(LINK_ACTION, &config));
        }
        if let Some(next_content_id) = &response.next_content_id {
            let config = ConfigMap::from([("experienceID".to_owned(), json!(next_content_id))]);
            actions.extend(self.actions.resolve(LAUNCH_EXPERIENCE_ACTION, &config));
        }

        actions
    }
}

/// Merge `inherited` traits into `primary`: entries of `primary` win, inherited traits whose type
/// is not yet present are appended in order.
fn merge_traits<'a>(
    mut primary: Vec<LeveledTrait<'a>>,
    inherited: &[LeveledTrait<'a>],
) -> Vec<LeveledTrait<'a>> {
    for candidate in inherited {
        if !primary
            .iter()
            .any(|(existing, _)| existing.trait_type == candidate.0.trait_type)
        {
            primary.push(*candidate);
        }
    }
    primary
}
