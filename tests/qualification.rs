use std::{
    fs::File,
    io::BufReader,
    sync::{Arc, Mutex},
};

use appcues::{
    activity::{event_names, ActivityRequest, Properties},
    api::{ActivitySink, ExperienceSource},
    data::ExperienceResponse,
    experience::{Experience, ExperienceTrigger},
    qualification::{LocalQualificationResponse, QualifyResponse},
    rules_store::InMemoryRulesStore,
    Appcues, AppcuesConfig, Collaborators, Error, ExperienceRenderer, RemoteError, RenderError,
};
use async_trait::async_trait;
use serde_json::json;

struct BundleSource;

#[async_trait]
impl ExperienceSource for BundleSource {
    async fn get_local_qualification(
        &self,
        _account_id: &str,
    ) -> Result<LocalQualificationResponse, RemoteError> {
        let f = File::open("tests/data/local-qualifications.json")
            .expect("Failed to open tests/data/local-qualifications.json");
        Ok(serde_json::from_reader(BufReader::new(f)).unwrap())
    }

    async fn get_experience_content(
        &self,
        _experience_id: &str,
        _user_id: &str,
        _user_signature: Option<&str>,
    ) -> Result<ExperienceResponse, RemoteError> {
        Err(RemoteError::NotFound)
    }

    async fn get_experience_preview(
        &self,
        _experience_id: &str,
        _user_id: &str,
        _user_signature: Option<&str>,
    ) -> Result<ExperienceResponse, RemoteError> {
        Err(RemoteError::NotFound)
    }
}

#[derive(Default)]
struct ServerSink {
    qualify_response: Option<serde_json::Value>,
    batches: Mutex<Vec<(ActivityRequest, bool)>>,
}

#[async_trait]
impl ActivitySink for ServerSink {
    async fn track_activity(
        &self,
        activity: &ActivityRequest,
        qualify: bool,
    ) -> Result<Option<QualifyResponse>, RemoteError> {
        self.batches
            .lock()
            .unwrap()
            .push((activity.clone(), qualify));

        match (&self.qualify_response, qualify) {
            (Some(response), true) => Ok(Some(serde_json::from_value(response.clone()).unwrap())),
            _ => Ok(None),
        }
    }
}

#[derive(Default)]
struct Renderer {
    busy: bool,
    shown: Mutex<Vec<String>>,
}

impl ExperienceRenderer for Renderer {
    fn show(&self, experience: Arc<Experience>) -> Result<(), RenderError> {
        if self.busy {
            return Err(RenderError {
                experience_id: experience.id.clone(),
                reason: "another experience is showing".to_owned(),
            });
        }
        self.shown.lock().unwrap().push(experience.id.clone());
        Ok(())
    }
}

fn appcues(sink: Arc<ServerSink>, renderer: Arc<Renderer>) -> Appcues {
    let _ = env_logger::builder().is_test(true).try_init();

    Appcues::new(
        AppcuesConfig::new("1234", "app"),
        Collaborators {
            source: Arc::new(BundleSource),
            sink,
            rules_store: Arc::new(InMemoryRulesStore::new()),
            renderer,
        },
    )
}

#[tokio::test]
async fn once_experience_is_shown_only_once() {
    let renderer = Arc::new(Renderer::default());
    let appcues = appcues(Arc::new(ServerSink::default()), renderer.clone());

    appcues.identify("user-1", Properties::new()).await.unwrap();

    let shown = appcues.screen("Home").await.unwrap().unwrap();
    assert_eq!(shown.id, "welcome");
    appcues.experience_started("welcome").await.unwrap();

    assert!(appcues.screen("Home").await.unwrap().is_none());
    assert_eq!(*renderer.shown.lock().unwrap(), vec!["welcome"]);
}

#[tokio::test]
async fn profile_properties_are_scoped_to_their_batch() {
    let sink = Arc::new(ServerSink::default());
    let renderer = Arc::new(Renderer::default());
    let appcues = appcues(sink.clone(), renderer.clone());

    appcues
        .identify("user-1", [("plan".to_owned(), json!("free"))].into())
        .await
        .unwrap();

    // Without the profile update only the undecodable entry qualifies, which is never shown.
    let shown = appcues
        .track("clicked_upgrade", Properties::new())
        .await
        .unwrap();
    assert!(shown.is_none());
    assert!(renderer.shown.lock().unwrap().is_empty());
}

#[tokio::test]
async fn falls_back_to_remote_qualification() {
    let sink = Arc::new(ServerSink {
        qualify_response: Some(json!({
            "performedQualification": true,
            "qualificationReason": "screen_view",
            "experiences": [{
                "id": "remote",
                "name": "Remote",
                "traits": [{"type": "@appcues/modal"}],
                "steps": [{"id": "s", "content": {"type": "text", "id": "t", "text": "Hi"}}]
            }]
        })),
        ..Default::default()
    });
    let renderer = Arc::new(Renderer::default());
    let appcues = appcues(sink.clone(), renderer.clone());

    appcues.identify("user-1", Properties::new()).await.unwrap();
    let shown = appcues.screen("Settings").await.unwrap().unwrap();

    assert_eq!(shown.id, "remote");
    assert_eq!(
        shown.trigger,
        ExperienceTrigger::Qualification {
            reason: Some("screen_view".to_owned())
        }
    );

    let batches = sink.batches.lock().unwrap();
    let (last, qualify) = batches.last().unwrap();
    assert!(*qualify);
    assert_eq!(last.user_id, "user-1");
}

#[tokio::test]
async fn renderer_refusal_is_reported() {
    let renderer = Arc::new(Renderer {
        busy: true,
        ..Default::default()
    });
    let appcues = appcues(Arc::new(ServerSink::default()), renderer);

    appcues.identify("user-1", Properties::new()).await.unwrap();
    assert!(matches!(
        appcues.screen("Home").await,
        Err(Error::Render(RenderError { experience_id, .. })) if experience_id == "welcome"
    ));
}

#[tokio::test]
async fn experience_started_is_tracked_without_qualification() {
    let sink = Arc::new(ServerSink::default());
    let appcues = appcues(sink.clone(), Arc::new(Renderer::default()));

    appcues.identify("user-1", Properties::new()).await.unwrap();
    appcues.experience_started("welcome").await.unwrap();

    let batches = sink.batches.lock().unwrap();
    let (last, qualify) = batches.last().unwrap();
    assert!(!*qualify);
    assert_eq!(
        last.events
            .iter()
            .map(|event| event.name.as_str())
            .collect::<Vec<_>>(),
        vec![event_names::EXPERIENCE_STARTED]
    );
}
