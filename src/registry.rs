//! String-keyed plugin registries resolving trait and action factories.
//!
//! Registries are shared between the mapper and the SDK facade. They are expected to be filled
//! during initialization and read afterwards, but both registration and lookup are safe from any
//! thread at any time. The first registration of a type wins; later ones are rejected and logged.
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::experience::{ConfigMap, ExperienceAction, ExperienceTrait, TraitLevel};

/// Factory creating a trait instance from its configuration.
pub type TraitFactory = dyn Fn(&ConfigMap, TraitLevel) -> Arc<dyn ExperienceTrait> + Send + Sync;

/// Factory creating an action instance from its configuration.
pub type ActionFactory = dyn Fn(&ConfigMap) -> Arc<dyn ExperienceAction> + Send + Sync;

/// Registry of trait factories keyed by trait type.
pub type TraitRegistry = Registry<TraitFactory>;

/// Registry of action factories keyed by action type.
pub type ActionRegistry = Registry<ActionFactory>;

/// A thread-safe (`Sync`) mapping from a type key to a factory.
pub struct Registry<F: ?Sized> {
    kind: &'static str,
    factories: RwLock<HashMap<String, Arc<F>>>,
}

impl<F: ?Sized> Registry<F> {
    fn with_kind(kind: &'static str) -> Self {
        Registry {
            kind,
            factories: RwLock::new(HashMap::new()),
        }
    }

    /// Register `factory` for `type_key`. Returns `false` and keeps the existing factory if the
    /// type is already registered.
    pub fn register_factory(&self, type_key: impl Into<String>, factory: Arc<F>) -> bool {
        let type_key = type_key.into();

        // A poisoned lock only means another registration panicked; the map itself is still
        // consistent as insertion is a single operation.
        let mut factories = self
            .factories
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if factories.contains_key(&type_key) {
            log::error!(target: "appcues",
                        kind = self.kind,
                        type_key:display = type_key;
                        "type already registered, keeping the existing registration");
            return false;
        }

        log::debug!(target: "appcues", kind = self.kind, type_key:display = type_key; "registered");
        factories.insert(type_key, factory);
        true
    }

    /// Get the factory registered for `type_key`.
    pub fn get(&self, type_key: &str) -> Option<Arc<F>> {
        let factories = self
            .factories
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        factories.get(type_key).cloned()
    }

    /// Return `true` if `type_key` is registered.
    pub fn contains(&self, type_key: &str) -> bool {
        self.get(type_key).is_some()
    }
}

impl Registry<TraitFactory> {
    /// Create an empty trait registry.
    pub fn new() -> Self {
        Registry::with_kind("trait")
    }

    /// Register a trait factory. See [`Registry::register_factory`].
    pub fn register(
        &self,
        type_key: impl Into<String>,
        factory: impl Fn(&ConfigMap, TraitLevel) -> Arc<dyn ExperienceTrait> + Send + Sync + 'static,
    ) -> bool {
        self.register_factory(type_key, Arc::new(factory))
    }

    /// Resolve a trait instance, returning `None` for unregistered types.
    pub fn resolve(
        &self,
        type_key: &str,
        config: &ConfigMap,
        level: TraitLevel,
    ) -> Option<Arc<dyn ExperienceTrait>> {
        self.get(type_key).map(|factory| factory(config, level))
    }
}

impl Default for Registry<TraitFactory> {
    fn default() -> Self {
        Registry::<TraitFactory>::new()
    }
}

impl Registry<ActionFactory> {
    /// Create an empty action registry.
    pub fn new() -> Self {
        Registry::with_kind("action")
    }

    /// Register an action factory. See [`Registry::register_factory`].
    pub fn register(
        &self,
        type_key: impl Into<String>,
        factory: impl Fn(&ConfigMap) -> Arc<dyn ExperienceAction> + Send + Sync + 'static,
    ) -> bool {
        self.register_factory(type_key, Arc::new(factory))
    }

    /// Resolve an action instance, returning `None` for unregistered types.
    pub fn resolve(&self, type_key: &str, config: &ConfigMap) -> Option<Arc<dyn ExperienceAction>> {
        self.get(type_key).map(|factory| factory(config))
    }
}

impl Default for Registry<ActionFactory> {
    fn default() -> Self {
        Registry::<ActionFactory>::new()
    }
}
