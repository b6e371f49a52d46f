//! Fakes shared by unit tests.
use std::{
    collections::HashMap,
    fs::File,
    io::BufReader,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::{
    activity::{ActivityRequest, EventRequest, Properties},
    api::{ActivitySink, ExperienceSource},
    data::{ExperienceMapper, ExperienceResponse},
    client::ExperienceRenderer,
    error::{HostError, RemoteError, RenderError},
    experience::{
        ActionHost, BackdropDecoratingTrait, ComponentColor, ComponentStyle, ConfigMap, Experience,
        ContainerDecoratingTrait, ContainerDecoratingType, ContentWrappingTrait, ExperienceAction,
        ExperienceTrait, PresentationStyle, PresentingTrait, QueueTransforming, StepReference,
    },
    qualification::{LocalQualificationResponse, QualifyResponse},
    registry::{ActionRegistry, TraitRegistry},
};

#[derive(Debug, Default, Clone)]
pub struct FakeTrait {
    pub name: String,
    pub presenting: bool,
    pub wrapping: bool,
    pub backdrop: bool,
    pub container: bool,
}

impl FakeTrait {
    pub fn named(name: &str) -> FakeTrait {
        FakeTrait {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    /// A trait that can both present and wrap content, like a modal.
    pub fn presenter(name: &str) -> FakeTrait {
        FakeTrait {
            presenting: true,
            wrapping: true,
            ..FakeTrait::named(name)
        }
    }
}

impl ExperienceTrait for FakeTrait {
    fn trait_type(&self) -> &str {
        &self.name
    }

    fn as_presenting(&self) -> Option<&dyn PresentingTrait> {
        self.presenting.then_some(self as &dyn PresentingTrait)
    }

    fn as_content_wrapping(&self) -> Option<&dyn ContentWrappingTrait> {
        self.wrapping.then_some(self as &dyn ContentWrappingTrait)
    }

    fn as_backdrop_decorating(&self) -> Option<&dyn BackdropDecoratingTrait> {
        self.backdrop.then_some(self as &dyn BackdropDecoratingTrait)
    }

    fn as_container_decorating(&self) -> Option<&dyn ContainerDecoratingTrait> {
        self.container.then_some(self as &dyn ContainerDecoratingTrait)
    }
}

impl PresentingTrait for FakeTrait {
    fn presentation_style(&self) -> PresentationStyle {
        PresentationStyle::Dialog
    }
}

impl ContentWrappingTrait for FakeTrait {
    fn wrapper_style(&self) -> Option<&ComponentStyle> {
        None
    }
}

impl BackdropDecoratingTrait for FakeTrait {
    fn backdrop_color(&self) -> Option<&ComponentColor> {
        None
    }
}

impl ContainerDecoratingTrait for FakeTrait {
    fn decorating_type(&self) -> ContainerDecoratingType {
        ContainerDecoratingType::Overlay
    }
}

/// Shared log of executed action names.
pub type ExecutionLog = Arc<Mutex<Vec<String>>>;

#[derive(Debug, Default, Clone)]
pub struct FakeAction {
    pub name: String,
    pub log: ExecutionLog,
    pub truncate_after_self: bool,
    pub fail: bool,
}

impl FakeAction {
    pub fn named(name: &str) -> FakeAction {
        FakeAction {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    pub fn logging(name: &str, log: &ExecutionLog) -> FakeAction {
        FakeAction {
            log: log.clone(),
            ..FakeAction::named(name)
        }
    }
}

impl ExperienceAction for FakeAction {
    fn action_type(&self) -> &str {
        &self.name
    }

    fn execute(&self, _host: &dyn ActionHost) -> Result<(), HostError> {
        self.log.lock().unwrap().push(self.name.clone());
        if self.fail {
            return Err(HostError(format!("{} failed", self.name)));
        }
        Ok(())
    }

    fn as_queue_transforming(&self) -> Option<&dyn QueueTransforming> {
        self.truncate_after_self
            .then_some(self as &dyn QueueTransforming)
    }
}

impl QueueTransforming for FakeAction {
    fn transform_queue(
        &self,
        mut queue: Vec<Arc<dyn ExperienceAction>>,
        index: usize,
        _host: &dyn ActionHost,
    ) -> Vec<Arc<dyn ExperienceAction>> {
        queue.truncate(index + 1);
        queue
    }
}

/// Action host recording every call as a string.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Mutex<Vec<String>>,
}

impl RecordingHost {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), HostError> {
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl ActionHost for RecordingHost {
    fn dismiss(&self, mark_complete: bool) -> Result<(), HostError> {
        self.record(format!("dismiss({mark_complete})"))
    }

    fn show_step(&self, step: StepReference) -> Result<(), HostError> {
        self.record(format!("show_step({step:?})"))
    }

    fn open_url(&self, url: &str, open_externally: bool) -> Result<(), HostError> {
        self.record(format!("open_url({url}, {open_externally})"))
    }

    fn track(&self, event: EventRequest) -> Result<(), HostError> {
        self.record(format!("track({})", event.name))
    }

    fn update_profile(&self, properties: Properties) -> Result<(), HostError> {
        let mut keys = properties.keys().cloned().collect::<Vec<_>>();
        keys.sort();
        self.record(format!("update_profile({})", keys.join(",")))
    }

    fn launch_experience(&self, experience_id: &str) -> Result<(), HostError> {
        self.record(format!("launch_experience({experience_id})"))
    }
}

/// Mapper knowing `@appcues/modal` as a presenting trait and `@appcues/close` as an action.
pub fn fake_mapper() -> ExperienceMapper {
    let traits = TraitRegistry::new();
    traits.register("@appcues/modal", |_, _| {
        Arc::new(FakeTrait::presenter("@appcues/modal"))
    });
    let actions = ActionRegistry::new();
    actions.register("@appcues/close", |_: &ConfigMap| {
        Arc::new(FakeAction::named("@appcues/close"))
    });
    ExperienceMapper::new(Arc::new(traits), Arc::new(actions))
}

/// Experience source serving the local qualifications fixture and registered content.
#[derive(Debug, Default)]
pub struct FakeSource {
    bundle: Option<LocalQualificationResponse>,
    content: Mutex<HashMap<String, serde_json::Value>>,
    fail_bundle: AtomicBool,
    bundle_requests: AtomicUsize,
}

impl FakeSource {
    pub fn with_bundle_fixture() -> FakeSource {
        let f = File::open("tests/data/local-qualifications.json")
            .expect("Failed to open tests/data/local-qualifications.json");
        FakeSource {
            bundle: Some(serde_json::from_reader(BufReader::new(f)).unwrap()),
            ..Default::default()
        }
    }

    pub fn with_content(self, experience_id: &str, content: serde_json::Value) -> FakeSource {
        self.content
            .lock()
            .unwrap()
            .insert(experience_id.to_owned(), content);
        self
    }

    pub fn fail_bundle_requests(&self) {
        self.fail_bundle.store(true, Ordering::SeqCst);
    }

    pub fn bundle_requests(&self) -> usize {
        self.bundle_requests.load(Ordering::SeqCst)
    }

    fn content(&self, experience_id: &str) -> Result<ExperienceResponse, RemoteError> {
        let content = self
            .content
            .lock()
            .unwrap()
            .get(experience_id)
            .cloned()
            .ok_or(RemoteError::NotFound)?;
        Ok(serde_json::from_value(content).unwrap())
    }
}

#[async_trait]
impl ExperienceSource for FakeSource {
    async fn get_local_qualification(
        &self,
        _account_id: &str,
    ) -> Result<LocalQualificationResponse, RemoteError> {
        self.bundle_requests.fetch_add(1, Ordering::SeqCst);
        if self.fail_bundle.load(Ordering::SeqCst) {
            return Err(RemoteError::Http { status: 500 });
        }
        self.bundle.clone().ok_or(RemoteError::NotFound)
    }

    async fn get_experience_content(
        &self,
        experience_id: &str,
        _user_id: &str,
        _user_signature: Option<&str>,
    ) -> Result<ExperienceResponse, RemoteError> {
        self.content(experience_id)
    }

    async fn get_experience_preview(
        &self,
        experience_id: &str,
        _user_id: &str,
        user_signature: Option<&str>,
    ) -> Result<ExperienceResponse, RemoteError> {
        if user_signature.is_none() {
            return Err(RemoteError::Http { status: 401 });
        }
        self.content(experience_id)
    }
}

/// Activity sink recording tracked batches and replying with a canned qualification response.
#[derive(Debug, Default)]
pub struct FakeSink {
    response: Option<serde_json::Value>,
    fail: bool,
    requested_qualification: AtomicBool,
    activities: Mutex<Vec<ActivityRequest>>,
    reporter: Option<mpsc::UnboundedSender<bool>>,
}

impl FakeSink {
    pub fn qualifying(response: serde_json::Value) -> FakeSink {
        FakeSink {
            response: Some(response),
            ..Default::default()
        }
    }

    pub fn failing() -> FakeSink {
        FakeSink {
            fail: true,
            ..Default::default()
        }
    }

    /// A sink reporting the `qualify` flag of every tracked batch on the returned channel.
    pub fn reporting() -> (FakeSink, mpsc::UnboundedReceiver<bool>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let sink = FakeSink {
            reporter: Some(sender),
            ..Default::default()
        };
        (sink, receiver)
    }

    pub fn requested_qualification(&self) -> bool {
        self.requested_qualification.load(Ordering::SeqCst)
    }

    /// Names of all tracked events, in order.
    pub fn tracked_events(&self) -> Vec<String> {
        self.activities
            .lock()
            .unwrap()
            .iter()
            .flat_map(|activity| activity.events.iter().map(|event| event.name.clone()))
            .collect()
    }
}

#[async_trait]
impl ActivitySink for FakeSink {
    async fn track_activity(
        &self,
        activity: &ActivityRequest,
        qualify: bool,
    ) -> Result<Option<QualifyResponse>, RemoteError> {
        self.activities.lock().unwrap().push(activity.clone());
        if let Some(reporter) = &self.reporter {
            let _ = reporter.send(qualify);
        }
        if qualify {
            self.requested_qualification.store(true, Ordering::SeqCst);
        }
        if self.fail {
            return Err(RemoteError::Http { status: 503 });
        }
        if !qualify {
            return Ok(None);
        }
        Ok(self
            .response
            .clone()
            .map(|response| serde_json::from_value(response).unwrap()))
    }
}

/// Renderer recording the ids of shown experiences.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    shown: Mutex<Vec<String>>,
}

impl RecordingRenderer {
    pub fn shown(&self) -> Vec<String> {
        self.shown.lock().unwrap().clone()
    }
}

impl ExperienceRenderer for RecordingRenderer {
    fn show(&self, experience: Arc<Experience>) -> Result<(), RenderError> {
        self.shown.lock().unwrap().push(experience.id.clone());
        Ok(())
    }
}
