use std::fmt::Debug;

use super::{ComponentColor, ComponentStyle};

/// Level of the experience tree a trait was declared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraitLevel {
    #[allow(missing_docs)]
    Experience,
    #[allow(missing_docs)]
    Group,
    #[allow(missing_docs)]
    Step,
}

/// A trait instance resolved from the trait registry.
///
/// Capabilities are exposed through the `as_*` accessors. A trait may have several capabilities
/// (e.g., a modal both presents and wraps content); the mapper partitions container traits by
/// them.
pub trait ExperienceTrait: Debug + Send + Sync {
    /// Registry key this trait was created from, e.g. `@appcues/modal`.
    fn trait_type(&self) -> &str;

    #[allow(missing_docs)]
    fn as_presenting(&self) -> Option<&dyn PresentingTrait> {
        None
    }

    #[allow(missing_docs)]
    fn as_content_wrapping(&self) -> Option<&dyn ContentWrappingTrait> {
        None
    }

    #[allow(missing_docs)]
    fn as_backdrop_decorating(&self) -> Option<&dyn BackdropDecoratingTrait> {
        None
    }

    #[allow(missing_docs)]
    fn as_container_decorating(&self) -> Option<&dyn ContainerDecoratingTrait> {
        None
    }
}

/// How a presenting trait puts a container on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum PresentationStyle {
    Full,
    Dialog,
    Sheet,
    HalfSheet,
    Tooltip,
}

/// Presents a step container on top of the host application.
pub trait PresentingTrait {
    #[allow(missing_docs)]
    fn presentation_style(&self) -> PresentationStyle;
}

/// Wraps the content of a step container (the "card" the steps are drawn on).
pub trait ContentWrappingTrait {
    /// Style of the wrapper, if configured.
    fn wrapper_style(&self) -> Option<&ComponentStyle>;
}

/// Draws behind the step container.
pub trait BackdropDecoratingTrait {
    /// Backdrop fill color, if configured.
    fn backdrop_color(&self) -> Option<&ComponentColor>;
}

/// Where a container decoration is drawn relative to the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ContainerDecoratingType {
    Underlay,
    Overlay,
}

/// Decorates a step container (skip buttons, paging dots, ...).
pub trait ContainerDecoratingTrait {
    #[allow(missing_docs)]
    fn decorating_type(&self) -> ContainerDecoratingType;
}
