use std::{cmp::Reverse, sync::Arc};

use crate::{
    activity::{event_names, ActivityRequest, EventRequest, Properties, EXPERIENCE_ID_KEY},
    api::{ActivitySink, ExperienceSource},
    bundle_store::BundleStore,
    data::ExperienceMapper,
    error::RemoteError,
    experience::ExperienceTrigger,
    rules::Frequency,
    rules_store::{RulesStore, ViewRecord},
};

use super::{QualifiableExperience, QualificationResult};

/// Orchestrates qualification of activity batches: on device against the cached bundle first,
/// remotely otherwise.
#[derive(Clone)]
pub struct Qualifier {
    source: Arc<dyn ExperienceSource>,
    sink: Arc<dyn ActivitySink>,
    rules_store: Arc<dyn RulesStore>,
    bundle_store: Arc<BundleStore>,
    mapper: ExperienceMapper,
}

impl Qualifier {
    #[allow(missing_docs)]
    pub fn new(
        source: Arc<dyn ExperienceSource>,
        sink: Arc<dyn ActivitySink>,
        rules_store: Arc<dyn RulesStore>,
        bundle_store: Arc<BundleStore>,
        mapper: ExperienceMapper,
    ) -> Qualifier {
        Qualifier {
            source,
            sink,
            rules_store,
            bundle_store,
            mapper,
        }
    }

    /// Qualify experiences for `activity`.
    ///
    /// A session start refreshes the on-device bundle first. Experience-start events are recorded
    /// as views of the batch user. If any bundle experience qualifies on device, the activity is
    /// sent for tracking only, in the background, and the local result is returned. Otherwise the
    /// activity is sent for remote qualification.
    ///
    /// Returns `None` when nothing qualified or the remote request failed.
    pub async fn qualify(&self, activity: &ActivityRequest) -> Option<QualificationResult> {
        if activity.contains_event(event_names::SESSION_STARTED) {
            // Qualification proceeds with the previous bundle, if any.
            let _ = self.refresh_bundle(&activity.account_id).await;
        }

        self.record_views(activity).await;

        if let Some(result) = self.qualify_offline(activity).await {
            let sink = self.sink.clone();
            let activity = activity.clone();
            tokio::spawn(async move {
                if let Err(err) = sink.track_activity(&activity, false).await {
                    log::warn!(target: "appcues",
                               request_id:display = activity.request_id;
                               "failed to track activity: {}", err);
                }
            });
            return Some(result);
        }

        self.qualify_remote(activity).await
    }

    /// Fetch a new on-device bundle and replace the cached one.
    pub async fn refresh_bundle(&self, account_id: &str) -> Result<(), RemoteError> {
        let response = self
            .source
            .get_local_qualification(account_id)
            .await
            .inspect_err(|err| {
                log::warn!(target: "appcues", "failed to refresh local qualifications: {}", err);
            })?;

        self.bundle_store.replace(response.into());
        Ok(())
    }

    /// Send `activity` for tracking only, after recording experience-start events as views.
    ///
    /// Used for experience lifecycle activity, which must not trigger another qualification while
    /// an experience is showing.
    pub async fn track(&self, activity: &ActivityRequest) -> Result<(), RemoteError> {
        self.record_views(activity).await;

        self.sink
            .track_activity(activity, false)
            .await
            .inspect_err(|err| {
                log::warn!(target: "appcues",
                           request_id:display = activity.request_id;
                           "failed to track activity: {}", err);
            })?;
        Ok(())
    }

    async fn record_views(&self, activity: &ActivityRequest) {
        let started = activity
            .events
            .iter()
            .filter(|event| event.name == event_names::EXPERIENCE_STARTED)
            .filter_map(|event| event.attribute_str(EXPERIENCE_ID_KEY));

        for experience_id in started {
            self.rules_store
                .insert(ViewRecord::now(experience_id, &activity.user_id))
                .await;
        }
    }

    async fn qualify_offline(&self, activity: &ActivityRequest) -> Option<QualificationResult> {
        let bundle = self.bundle_store.get()?;

        let no_properties = Properties::new();
        let properties = activity.profile_update.as_ref().unwrap_or(&no_properties);

        let mut qualified: Vec<(&QualifiableExperience, &EventRequest)> = Vec::new();
        for candidate in &bundle.qualifications.experiences {
            let Some(experience_id) = candidate.experience_id() else {
                continue;
            };

            if candidate.rule.frequency == Frequency::Once
                && self
                    .rules_store
                    .get_view_count(&activity.user_id, experience_id)
                    .await
                    > 0
            {
                log::trace!(target: "appcues",
                            experience_id;
                            "skipping experience already seen by the user");
                continue;
            }

            if let Some(event) = candidate.rule.first_match(&activity.events, properties) {
                qualified.push((candidate, event));
            }
        }

        // Stable, so bundle order breaks ties.
        qualified.sort_by_key(|(candidate, _)| Reverse(candidate.sort_priority));

        let experiences = qualified
            .iter()
            .filter_map(|(candidate, event)| {
                self.mapper
                    .map_or_failed(&candidate.experience, offline_trigger(event))
            })
            .map(Arc::new)
            .collect::<Vec<_>>();

        let trigger = experiences.first()?.trigger.clone();

        log::debug!(target: "appcues",
                    request_id:display = activity.request_id,
                    count = experiences.len(),
                    bundle_age_secs = bundle.age().num_seconds();
                    "qualified experiences on device");

        Some(QualificationResult {
            trigger,
            experiences,
            performed_qualification: true,
        })
    }

    async fn qualify_remote(&self, activity: &ActivityRequest) -> Option<QualificationResult> {
        let response = match self.sink.track_activity(activity, true).await {
            Ok(response) => response?,
            Err(err) => {
                log::warn!(target: "appcues",
                           request_id:display = activity.request_id;
                           "remote qualification failed: {}", err);
                return None;
            }
        };

        let trigger = ExperienceTrigger::Qualification {
            reason: response.qualification_reason.clone(),
        };
        let experiences = response
            .experiences
            .iter()
            .filter_map(|it| self.mapper.map_or_failed(it, trigger.clone()))
            .map(Arc::new)
            .collect::<Vec<_>>();

        log::debug!(target: "appcues",
                    request_id:display = activity.request_id,
                    count = experiences.len(),
                    performed_qualification = response.performed_qualification;
                    "qualified experiences remotely");

        Some(QualificationResult {
            trigger,
            experiences,
            performed_qualification: response.performed_qualification,
        })
    }
}

fn offline_trigger(event: &EventRequest) -> ExperienceTrigger {
    if event.name == event_names::SCREEN_VIEW {
        ExperienceTrigger::ScreenViewed
    } else {
        ExperienceTrigger::Event {
            name: event.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use serde_json::json;

    use super::Qualifier;
    use crate::{
        activity::{event_names, ActivityRequest, EventRequest},
        bundle_store::BundleStore,
        experience::ExperienceTrigger,
        rules_store::{InMemoryRulesStore, RulesStore},
        test_support::{fake_mapper, FakeSink, FakeSource},
    };

    struct Fixture {
        qualifier: Qualifier,
        source: Arc<FakeSource>,
        sink: Arc<FakeSink>,
        rules_store: Arc<InMemoryRulesStore>,
        bundle_store: Arc<BundleStore>,
    }

    fn fixture(sink: FakeSink) -> Fixture {
        let _ = env_logger::builder().is_test(true).try_init();

        let source = Arc::new(FakeSource::with_bundle_fixture());
        let sink = Arc::new(sink);
        let rules_store = Arc::new(InMemoryRulesStore::new());
        let bundle_store = Arc::new(BundleStore::new());

        Fixture {
            qualifier: Qualifier::new(
                source.clone(),
                sink.clone(),
                rules_store.clone(),
                bundle_store.clone(),
                fake_mapper(),
            ),
            source,
            sink,
            rules_store,
            bundle_store,
        }
    }

    fn session_start() -> ActivityRequest {
        ActivityRequest::new("1234", "user")
            .with_event(EventRequest::new(event_names::SESSION_STARTED))
    }

    #[tokio::test]
    async fn session_start_refreshes_bundle() {
        let fixture = fixture(FakeSink::default());
        assert!(fixture.bundle_store.get().is_none());

        fixture.qualifier.qualify(&session_start()).await;

        assert_eq!(fixture.source.bundle_requests(), 1);
        assert_eq!(
            fixture
                .bundle_store
                .get()
                .unwrap()
                .qualifications
                .experiences
                .len(),
            3
        );
    }

    #[tokio::test]
    async fn screen_view_qualifies_on_device_and_tracks_in_background() {
        let (sink, mut tracked) = FakeSink::reporting();
        let fixture = fixture(sink);

        let activity = session_start().with_event(EventRequest::screen_view("Home"));
        let result = fixture.qualifier.qualify(&activity).await.unwrap();

        assert_eq!(result.trigger, ExperienceTrigger::ScreenViewed);
        assert_eq!(result.experiences.len(), 1);
        assert_eq!(result.experiences[0].id, "welcome");
        assert!(!result.experiences[0].is_failed());

        let qualify = tokio::time::timeout(Duration::from_secs(5), tracked.recv())
            .await
            .expect("activity was not tracked")
            .unwrap();
        assert!(!qualify, "offline qualification must not request remote qualification");
        assert!(!fixture.sink.requested_qualification());
    }

    #[tokio::test]
    async fn once_rule_is_skipped_after_experience_started() {
        let fixture = fixture(FakeSink::qualifying(json!({
            "experiences": [],
            "performedQualification": true
        })));
        fixture.qualifier.qualify(&session_start()).await;

        let started = ActivityRequest::new("1234", "user")
            .with_event(EventRequest::experience_started("welcome"));
        fixture.qualifier.qualify(&started).await;
        assert_eq!(fixture.rules_store.get_view_count("user", "welcome").await, 1);

        let activity =
            ActivityRequest::new("1234", "user").with_event(EventRequest::screen_view("Home"));
        let result = fixture.qualifier.qualify(&activity).await.unwrap();

        // Nothing qualified on device, so the remote result is returned.
        assert!(result.experiences.is_empty());
        assert!(fixture.sink.requested_qualification());

        // Other users still qualify.
        let other = ActivityRequest::new("1234", "other-user")
            .with_event(EventRequest::screen_view("Home"));
        let result = fixture.qualifier.qualify(&other).await.unwrap();
        assert_eq!(result.experiences[0].id, "welcome");
    }

    #[tokio::test]
    async fn tracking_records_views_without_qualifying() {
        let (sink, mut tracked) = FakeSink::reporting();
        let fixture = fixture(sink);

        let started = ActivityRequest::new("1234", "user")
            .with_event(EventRequest::experience_started("welcome"));
        fixture.qualifier.track(&started).await.unwrap();

        assert_eq!(fixture.rules_store.get_view_count("user", "welcome").await, 1);
        assert_eq!(tracked.try_recv(), Ok(false));
        assert!(!fixture.sink.requested_qualification());
    }

    #[tokio::test]
    async fn tracking_failure_is_returned() {
        let fixture = fixture(FakeSink::failing());

        let started = ActivityRequest::new("1234", "user")
            .with_event(EventRequest::experience_started("welcome"));
        assert!(fixture.qualifier.track(&started).await.is_err());
        // The view is recorded even if the server could not be reached.
        assert_eq!(fixture.rules_store.get_view_count("user", "welcome").await, 1);
    }

    #[tokio::test]
    async fn sorted_by_descending_priority_with_failed_markers() {
        let fixture = fixture(FakeSink::default());
        fixture.qualifier.qualify(&session_start()).await;

        let activity = ActivityRequest::new("1234", "user")
            .with_event(EventRequest::new("clicked_upgrade"))
            .with_profile_update([("plan".to_owned(), json!("free"))].into());
        let result = fixture.qualifier.qualify(&activity).await.unwrap();

        let ids = result
            .experiences
            .iter()
            .map(|it| it.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["pricing-tour", "undecodable-tour"]);
        assert!(result.experiences[1].is_failed());
        assert_eq!(
            result.trigger,
            ExperienceTrigger::Event {
                name: "clicked_upgrade".to_owned()
            }
        );
    }

    #[tokio::test]
    async fn properties_come_from_profile_update() {
        let fixture = fixture(FakeSink::default());
        fixture.qualifier.qualify(&session_start()).await;

        let activity = ActivityRequest::new("1234", "user")
            .with_event(EventRequest::new("clicked_upgrade"))
            .with_profile_update([("plan".to_owned(), json!("enterprise"))].into());
        let result = fixture.qualifier.qualify(&activity).await.unwrap();

        let ids = result
            .experiences
            .iter()
            .map(|it| it.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["undecodable-tour"]);
    }

    #[tokio::test]
    async fn remote_qualification_maps_experiences() {
        let fixture = fixture(FakeSink::qualifying(json!({
            "experiences": [
                {
                    "id": "remote",
                    "name": "Remote",
                    "traits": [{"type": "@appcues/modal"}],
                    "steps": [{"id": "s", "content": {"type": "spacer", "id": "x"}}]
                },
                {"id": "remote-broken", "steps": 1}
            ],
            "performedQualification": true,
            "qualificationReason": "screen_view"
        })));

        let activity =
            ActivityRequest::new("1234", "user").with_event(EventRequest::screen_view("Nowhere"));
        let result = fixture.qualifier.qualify(&activity).await.unwrap();

        assert_eq!(
            result.trigger,
            ExperienceTrigger::Qualification {
                reason: Some("screen_view".to_owned())
            }
        );
        assert_eq!(result.experiences.len(), 2);
        assert!(!result.experiences[0].is_failed());
        assert!(result.experiences[1].is_failed());
    }

    #[tokio::test]
    async fn failures_degrade_to_none() {
        let fixture = fixture(FakeSink::failing());
        fixture.source.fail_bundle_requests();

        let activity = session_start().with_event(EventRequest::screen_view("Home"));
        assert!(fixture.qualifier.qualify(&activity).await.is_none());
        assert!(fixture.bundle_store.get().is_none());
    }
}
