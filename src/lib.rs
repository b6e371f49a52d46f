//! The platform-independent core of the Appcues mobile SDK.
//!
//! # Overview
//!
//! Appcues experiences (flows, modals, tooltips) are authored on the server and delivered as
//! JSON. This crate decides which experience to show and when, maps the experience JSON into a
//! rendering model, and runs the actions users trigger while interacting with it.
//!
//! The SDK revolves around [`Appcues`]. Every piece of activity (`identify`, `track`, `screen`)
//! is qualified, on device against a cached bundle of [`rules`] first and remotely otherwise. The
//! first presentable qualified [`Experience`](experience::Experience) is handed to your
//! [`ExperienceRenderer`]. While the user interacts with it, the renderer reports interactions
//! back and the bound actions run through the [`ActionProcessor`](action_processor::ActionProcessor)
//! against your [`ActionHost`](experience::ActionHost).
//!
//! Traits and actions are plugins resolved by type from registries. The `@appcues/` built-ins are
//! registered automatically; custom ones can be added with [`Appcues::register_trait`] and
//! [`Appcues::register_action`].
//!
//! # Error Handling
//!
//! Operations on [`Appcues`] return [`Result`]; every failure is folded into [`Error`].
//!
//! Qualification has no error path of its own. A failed remote request is logged and nothing is
//! shown. Experiences that cannot be decoded or mapped become failed markers, which selection
//! skips.
//!
//! # Logging
//!
//! Diagnostics go through the [`log`](https://docs.rs/log/latest/log/) facade under the
//! `appcues` target, with structured fields such as `experience_id` and `request_id`. Nothing
//! is printed unless the host application installs a logger.
//!
//! # Examples
//!
//! `demos/simple` identifies a user against the live API and reports what qualifies for a
//! screen view.

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(missing_docs)]

pub mod action_processor;
pub mod activity;
pub mod api;
pub mod builtin;
mod bundle_store;
mod client;
mod config;
pub mod data;
mod error;
pub mod experience;
pub mod qualification;
pub mod registry;
pub mod rules;
pub mod rules_store;

#[cfg(test)]
mod test_support;

pub use bundle_store::{BundleStore, CachedBundle};
pub use client::{Appcues, Collaborators, ExperienceRenderer};
pub use config::AppcuesConfig;
pub use error::{ActionError, Error, HostError, MappingError, RemoteError, RenderError, Result};
