//! Traits and actions shipped with the SDK, registered under the `@appcues/` namespace.
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::{
    experience::{ConfigMap, ExperienceAction, ExperienceTrait},
    registry::{ActionRegistry, TraitRegistry},
};

mod actions;
mod traits;

pub use actions::{
    CloseAction, ContinueAction, LaunchExperienceAction, LinkAction, TrackAction,
    UpdateProfileAction,
};
pub use traits::{
    BackdropTrait, CarouselTrait, ModalTrait, PagingDotsTrait, SkippableTrait, TooltipTrait,
};

#[allow(missing_docs)]
pub mod trait_types {
    pub const MODAL: &str = "@appcues/modal";
    pub const TOOLTIP: &str = "@appcues/tooltip";
    pub const BACKDROP: &str = "@appcues/backdrop";
    pub const SKIPPABLE: &str = "@appcues/skippable";
    pub const PAGING_DOTS: &str = "@appcues/paging-dots";
    pub const CAROUSEL: &str = "@appcues/carousel";
}

#[allow(missing_docs)]
pub mod action_types {
    pub const CLOSE: &str = "@appcues/close";
    pub const CONTINUE: &str = "@appcues/continue";
    pub const LINK: &str = "@appcues/link";
    pub const TRACK: &str = "@appcues/track";
    pub const UPDATE_PROFILE: &str = "@appcues/update-profile";
    pub const LAUNCH_EXPERIENCE: &str = "@appcues/launch-experience";
}

/// Register all built-in traits and actions. Types registered before keep their registration.
pub fn register_builtins(traits: &TraitRegistry, actions: &ActionRegistry) {
    traits.register(trait_types::MODAL, |config, _| {
        Arc::new(ModalTrait::from_config(config)) as Arc<dyn ExperienceTrait>
    });
    traits.register(trait_types::TOOLTIP, |config, _| {
        Arc::new(TooltipTrait::from_config(config)) as Arc<dyn ExperienceTrait>
    });
    traits.register(trait_types::BACKDROP, |config, _| {
        Arc::new(BackdropTrait::from_config(config)) as Arc<dyn ExperienceTrait>
    });
    traits.register(trait_types::SKIPPABLE, |config, _| {
        Arc::new(SkippableTrait::from_config(config)) as Arc<dyn ExperienceTrait>
    });
    traits.register(trait_types::PAGING_DOTS, |config, _| {
        Arc::new(PagingDotsTrait::from_config(config)) as Arc<dyn ExperienceTrait>
    });
    traits.register(trait_types::CAROUSEL, |_, _| {
        Arc::new(CarouselTrait) as Arc<dyn ExperienceTrait>
    });

    actions.register(action_types::CLOSE, |config: &ConfigMap| {
        Arc::new(CloseAction::from_config(config)) as Arc<dyn ExperienceAction>
    });
    actions.register(action_types::CONTINUE, |config: &ConfigMap| {
        Arc::new(ContinueAction::from_config(config)) as Arc<dyn ExperienceAction>
    });
    actions.register(action_types::LINK, |config: &ConfigMap| {
        Arc::new(LinkAction::from_config(config)) as Arc<dyn ExperienceAction>
    });
    actions.register(action_types::TRACK, |config: &ConfigMap| {
        Arc::new(TrackAction::from_config(config)) as Arc<dyn ExperienceAction>
    });
    actions.register(action_types::UPDATE_PROFILE, |config: &ConfigMap| {
        Arc::new(UpdateProfileAction::from_config(config)) as Arc<dyn ExperienceAction>
    });
    actions.register(action_types::LAUNCH_EXPERIENCE, |config: &ConfigMap| {
        Arc::new(LaunchExperienceAction::from_config(config)) as Arc<dyn ExperienceAction>
    });
}

/// Decode `config[key]`. Missing keys and values of unexpected shape decode to `None`.
fn config_value<T: DeserializeOwned>(config: &ConfigMap, key: &str) -> Option<T> {
    let value = config.get(key)?;
    serde_json::from_value(value.clone())
        .inspect_err(|err| {
            log::warn!(target: "appcues", key; "ignoring malformed config value: {}", err);
        })
        .ok()
}
