use super::{config_value, trait_types};
use crate::{
    data::{
        map_color, map_style,
        primitive::{ColorResponse, StyleResponse},
    },
    experience::{
        BackdropDecoratingTrait, ComponentColor, ComponentStyle, ConfigMap,
        ContainerDecoratingTrait, ContainerDecoratingType, ContentWrappingTrait, ExperienceTrait,
        PresentationStyle, PresentingTrait,
    },
};

fn config_style(config: &ConfigMap) -> Option<ComponentStyle> {
    config_value::<StyleResponse>(config, "style").map(|style| map_style(Some(&style)))
}

/// `@appcues/modal`: presents the container as a modal and wraps its content in a card.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalTrait {
    #[allow(missing_docs)]
    pub presentation_style: PresentationStyle,
    #[allow(missing_docs)]
    pub style: Option<ComponentStyle>,
}

impl ModalTrait {
    /// Unknown presentation styles fall back to a dialog.
    pub fn from_config(config: &ConfigMap) -> ModalTrait {
        let presentation_style = match config_value::<String>(config, "presentationStyle")
            .as_deref()
        {
            Some("full") => PresentationStyle::Full,
            Some("sheet") => PresentationStyle::Sheet,
            Some("halfSheet") => PresentationStyle::HalfSheet,
            _ => PresentationStyle::Dialog,
        };

        ModalTrait {
            presentation_style,
            style: config_style(config),
        }
    }
}

impl ExperienceTrait for ModalTrait {
    fn trait_type(&self) -> &str {
        trait_types::MODAL
    }

    fn as_presenting(&self) -> Option<&dyn PresentingTrait> {
        Some(self)
    }

    fn as_content_wrapping(&self) -> Option<&dyn ContentWrappingTrait> {
        Some(self)
    }
}

impl PresentingTrait for ModalTrait {
    fn presentation_style(&self) -> PresentationStyle {
        self.presentation_style
    }
}

impl ContentWrappingTrait for ModalTrait {
    fn wrapper_style(&self) -> Option<&ComponentStyle> {
        self.style.as_ref()
    }
}

/// `@appcues/tooltip`: presents the container as a tooltip pointing at a target.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipTrait {
    /// Width of the pointer base.
    pub pointer_base: f64,
    /// Length of the pointer.
    pub pointer_length: f64,
    #[allow(missing_docs)]
    pub style: Option<ComponentStyle>,
}

impl TooltipTrait {
    #[allow(missing_docs)]
    pub const DEFAULT_POINTER_BASE: f64 = 16.0;
    #[allow(missing_docs)]
    pub const DEFAULT_POINTER_LENGTH: f64 = 8.0;

    #[allow(missing_docs)]
    pub fn from_config(config: &ConfigMap) -> TooltipTrait {
        TooltipTrait {
            pointer_base: config_value(config, "pointerBase")
                .unwrap_or(TooltipTrait::DEFAULT_POINTER_BASE),
            pointer_length: config_value(config, "pointerLength")
                .unwrap_or(TooltipTrait::DEFAULT_POINTER_LENGTH),
            style: config_style(config),
        }
    }
}

impl ExperienceTrait for TooltipTrait {
    fn trait_type(&self) -> &str {
        trait_types::TOOLTIP
    }

    fn as_presenting(&self) -> Option<&dyn PresentingTrait> {
        Some(self)
    }

    fn as_content_wrapping(&self) -> Option<&dyn ContentWrappingTrait> {
        Some(self)
    }
}

impl PresentingTrait for TooltipTrait {
    fn presentation_style(&self) -> PresentationStyle {
        PresentationStyle::Tooltip
    }
}

impl ContentWrappingTrait for TooltipTrait {
    fn wrapper_style(&self) -> Option<&ComponentStyle> {
        self.style.as_ref()
    }
}

/// `@appcues/backdrop`: dims the host application behind the container.
#[derive(Debug, Clone, PartialEq)]
pub struct BackdropTrait {
    #[allow(missing_docs)]
    pub background_color: Option<ComponentColor>,
}

impl BackdropTrait {
    #[allow(missing_docs)]
    pub fn from_config(config: &ConfigMap) -> BackdropTrait {
        BackdropTrait {
            background_color: config_value::<ColorResponse>(config, "backgroundColor")
                .map(|color| map_color(&color)),
        }
    }
}

impl ExperienceTrait for BackdropTrait {
    fn trait_type(&self) -> &str {
        trait_types::BACKDROP
    }

    fn as_backdrop_decorating(&self) -> Option<&dyn BackdropDecoratingTrait> {
        Some(self)
    }
}

impl BackdropDecoratingTrait for BackdropTrait {
    fn backdrop_color(&self) -> Option<&ComponentColor> {
        self.background_color.as_ref()
    }
}

/// `@appcues/skippable`: overlays a button dismissing the experience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippableTrait {
    /// `default`, `minimal` or `hidden`.
    pub button_appearance: String,
}

impl SkippableTrait {
    #[allow(missing_docs)]
    pub fn from_config(config: &ConfigMap) -> SkippableTrait {
        SkippableTrait {
            button_appearance: config_value(config, "buttonAppearance")
                .unwrap_or_else(|| "default".to_owned()),
        }
    }
}

impl ExperienceTrait for SkippableTrait {
    fn trait_type(&self) -> &str {
        trait_types::SKIPPABLE
    }

    fn as_container_decorating(&self) -> Option<&dyn ContainerDecoratingTrait> {
        Some(self)
    }
}

impl ContainerDecoratingTrait for SkippableTrait {
    fn decorating_type(&self) -> ContainerDecoratingType {
        ContainerDecoratingType::Overlay
    }
}

/// `@appcues/paging-dots`: overlays the step position within the container.
#[derive(Debug, Clone, PartialEq)]
pub struct PagingDotsTrait {
    #[allow(missing_docs)]
    pub style: Option<ComponentStyle>,
}

impl PagingDotsTrait {
    #[allow(missing_docs)]
    pub fn from_config(config: &ConfigMap) -> PagingDotsTrait {
        PagingDotsTrait {
            style: config_style(config),
        }
    }
}

impl ExperienceTrait for PagingDotsTrait {
    fn trait_type(&self) -> &str {
        trait_types::PAGING_DOTS
    }

    fn as_container_decorating(&self) -> Option<&dyn ContainerDecoratingTrait> {
        Some(self)
    }
}

impl ContainerDecoratingTrait for PagingDotsTrait {
    fn decorating_type(&self) -> ContainerDecoratingType {
        ContainerDecoratingType::Overlay
    }
}

/// `@appcues/carousel`: lays the steps of the container out side by side for swiping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselTrait;

impl ExperienceTrait for CarouselTrait {
    fn trait_type(&self) -> &str {
        trait_types::CAROUSEL
    }

    fn as_container_decorating(&self) -> Option<&dyn ContainerDecoratingTrait> {
        Some(self)
    }
}

impl ContainerDecoratingTrait for CarouselTrait {
    fn decorating_type(&self) -> ContainerDecoratingType {
        ContainerDecoratingType::Underlay
    }
}
