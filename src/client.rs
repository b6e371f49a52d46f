use std::{
    sync::{Arc, Mutex},
    time::Instant,
};

use crate::{
    action_processor::{ActionProcessor, ActionReport},
    activity::{event_names, ActivityRequest, EventRequest, Properties},
    api::{ActivitySink, AppcuesApi, ExperienceSource},
    builtin::register_builtins,
    bundle_store::BundleStore,
    data::ExperienceMapper,
    error::RenderError,
    experience::{
        select_experience, ActionHost, ConfigMap, Experience, ExperienceAction, ExperienceTrait,
        ExperienceTrigger, InteractionTrigger, Step, TraitLevel,
    },
    qualification::Qualifier,
    registry::{ActionRegistry, TraitRegistry},
    rules_store::{InMemoryRulesStore, RulesStore},
    AppcuesConfig, Error, Result,
};

/// The presentation layer. Implemented outside of this crate.
pub trait ExperienceRenderer: Send + Sync {
    /// Present `experience`. Fails if the experience cannot be shown, e.g. because another
    /// experience is already showing.
    fn show(&self, experience: Arc<Experience>) -> std::result::Result<(), RenderError>;
}

/// External collaborators an [`Appcues`] instance is wired with.
pub struct Collaborators {
    #[allow(missing_docs)]
    pub source: Arc<dyn ExperienceSource>,
    #[allow(missing_docs)]
    pub sink: Arc<dyn ActivitySink>,
    #[allow(missing_docs)]
    pub rules_store: Arc<dyn RulesStore>,
    #[allow(missing_docs)]
    pub renderer: Arc<dyn ExperienceRenderer>,
}

impl Collaborators {
    /// Use the Appcues API as source and sink, with view records kept in memory.
    pub fn with_api(
        config: &AppcuesConfig,
        renderer: Arc<dyn ExperienceRenderer>,
    ) -> Result<Collaborators> {
        let api = Arc::new(AppcuesApi::new(config)?);
        Ok(Collaborators {
            source: api.clone(),
            sink: api,
            rules_store: Arc::new(InMemoryRulesStore::new()),
            renderer,
        })
    }
}

struct Session {
    user_id: String,
    session_id: String,
    last_activity: Instant,
}

impl Session {
    fn start(user_id: impl Into<String>) -> Session {
        Session {
            user_id: user_id.into(),
            session_id: format!("{:032x}", rand::random::<u128>()),
            last_activity: Instant::now(),
        }
    }
}

/// An Appcues SDK instance.
///
/// In order to create an instance, first create [`AppcuesConfig`].
///
/// All activity (`identify`, `track`, `screen`, ...) goes through qualification; the first
/// presentable qualified experience is handed to the [`ExperienceRenderer`].
pub struct Appcues {
    config: AppcuesConfig,
    traits: Arc<TraitRegistry>,
    actions: Arc<ActionRegistry>,
    mapper: ExperienceMapper,
    qualifier: Qualifier,
    source: Arc<dyn ExperienceSource>,
    renderer: Arc<dyn ExperienceRenderer>,
    action_processor: ActionProcessor,
    session: Mutex<Option<Session>>,
}

impl Appcues {
    /// Create a new `Appcues` instance with built-in traits and actions registered.
    pub fn new(config: AppcuesConfig, collaborators: Collaborators) -> Self {
        let traits = Arc::new(TraitRegistry::new());
        let actions = Arc::new(ActionRegistry::new());
        register_builtins(&traits, &actions);

        let mapper = ExperienceMapper::new(traits.clone(), actions.clone());
        let qualifier = Qualifier::new(
            collaborators.source.clone(),
            collaborators.sink,
            collaborators.rules_store,
            Arc::new(BundleStore::new()),
            mapper.clone(),
        );

        Appcues {
            config,
            traits,
            actions,
            mapper,
            qualifier,
            source: collaborators.source,
            renderer: collaborators.renderer,
            action_processor: ActionProcessor::new(),
            session: Mutex::new(None),
        }
    }

    /// Register a custom trait. Returns `false` if the type is already registered.
    pub fn register_trait(
        &self,
        trait_type: impl Into<String>,
        factory: impl Fn(&ConfigMap, TraitLevel) -> Arc<dyn ExperienceTrait> + Send + Sync + 'static,
    ) -> bool {
        self.traits.register(trait_type, factory)
    }

    /// Register a custom action. Returns `false` if the type is already registered.
    pub fn register_action(
        &self,
        action_type: impl Into<String>,
        factory: impl Fn(&ConfigMap) -> Arc<dyn ExperienceAction> + Send + Sync + 'static,
    ) -> bool {
        self.actions.register(action_type, factory)
    }

    /// Identify the user and start a new session.
    pub async fn identify(
        &self,
        user_id: impl Into<String>,
        properties: Properties,
    ) -> Result<Option<Arc<Experience>>> {
        let session = Session::start(user_id);
        log::debug!(target: "appcues",
                    user_id:display = session.user_id,
                    session_id:display = session.session_id;
                    "starting session");

        let activity = ActivityRequest::new(&self.config.account_id, &session.user_id)
            .with_session_id(&session.session_id)
            .with_event(EventRequest::new(event_names::SESSION_STARTED))
            .with_profile_update(properties);

        *self.lock_session() = Some(session);

        self.process_activity(activity).await
    }

    /// Forget the current user. Activity is rejected until the next `identify`.
    pub fn reset(&self) {
        *self.lock_session() = None;
    }

    /// Track a custom event.
    pub async fn track(
        &self,
        name: impl Into<String>,
        attributes: Properties,
    ) -> Result<Option<Arc<Experience>>> {
        let mut event = EventRequest::new(name);
        event.attributes = attributes;
        self.process_activity(self.activity(event)?).await
    }

    /// Track a screen view.
    pub async fn screen(&self, title: impl Into<String>) -> Result<Option<Arc<Experience>>> {
        self.process_activity(self.activity(EventRequest::screen_view(title))?)
            .await
    }

    /// Record that the renderer started showing `experience_id`. The event is tracked without
    /// qualification.
    pub async fn experience_started(&self, experience_id: &str) -> Result<()> {
        let activity = self.activity(EventRequest::experience_started(experience_id))?;
        Ok(self.qualifier.track(&activity).await?)
    }

    /// Fetch and show a published experience, bypassing qualification.
    pub async fn show(&self, experience_id: &str) -> Result<Arc<Experience>> {
        let user_id = self.current_user_id()?;
        let response = self
            .source
            .get_experience_content(
                experience_id,
                &user_id,
                self.config.user_signature.as_deref(),
            )
            .await?;

        let experience = Arc::new(self.mapper.map(&response, ExperienceTrigger::ShowCall)?);
        self.renderer.show(experience.clone())?;
        Ok(experience)
    }

    /// Fetch and show an unpublished experience.
    pub async fn preview(
        &self,
        experience_id: &str,
        user_signature: Option<&str>,
    ) -> Result<Arc<Experience>> {
        let user_id = self.current_user_id()?;
        let response = self
            .source
            .get_experience_preview(experience_id, &user_id, user_signature)
            .await?;

        let experience = Arc::new(self.mapper.map(&response, ExperienceTrigger::Preview)?);
        self.renderer.show(experience.clone())?;
        Ok(experience)
    }

    /// Run the actions `step` binds to `primitive_id` for an interaction.
    pub fn handle_interaction(
        &self,
        step: &Step,
        primitive_id: &str,
        trigger: InteractionTrigger,
        host: &dyn ActionHost,
    ) -> Result<ActionReport> {
        Ok(self
            .action_processor
            .process_interaction(step, primitive_id, trigger, host)?)
    }

    /// Run the completion actions of `experience`.
    pub fn complete_experience(
        &self,
        experience: &Experience,
        host: &dyn ActionHost,
    ) -> Result<ActionReport> {
        Ok(self
            .action_processor
            .process(experience.completion_actions.clone(), host)?)
    }

    fn lock_session(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        // A poisoned lock only means a panic while swapping the session; the value is intact.
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn current_user_id(&self) -> Result<String> {
        self.lock_session()
            .as_ref()
            .map(|session| session.user_id.clone())
            .ok_or(Error::NoUser)
    }

    /// Build a batch for `event` in the current session, starting a new session first if the
    /// current one timed out.
    fn activity(&self, event: EventRequest) -> Result<ActivityRequest> {
        let mut guard = self.lock_session();
        let session = guard.as_mut().ok_or(Error::NoUser)?;

        let mut activity = ActivityRequest::new(&self.config.account_id, &session.user_id);
        if session.last_activity.elapsed() >= self.config.session_timeout {
            *session = Session::start(session.user_id.clone());
            log::debug!(target: "appcues",
                        session_id:display = session.session_id;
                        "session timed out, starting a new one");
            activity = activity.with_event(EventRequest::new(event_names::SESSION_STARTED));
        }
        session.last_activity = Instant::now();

        Ok(activity
            .with_session_id(&session.session_id)
            .with_event(event))
    }

    async fn process_activity(&self, activity: ActivityRequest) -> Result<Option<Arc<Experience>>> {
        let Some(result) = self.qualifier.qualify(&activity).await else {
            return Ok(None);
        };

        let selection = select_experience(&result);
        let Some(experience) = selection.experience else {
            log::debug!(target: "appcues",
                        request_id:display = activity.request_id,
                        skipped = selection.skipped.len();
                        "no presentable experience qualified");
            return Ok(None);
        };

        log::debug!(target: "appcues",
                    experience_id:display = experience.id;
                    "showing qualified experience");
        self.renderer.show(experience.clone())?;
        Ok(Some(experience))
    }
}
