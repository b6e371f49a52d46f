//! Remote collaborators and their HTTP implementation against the Appcues API.
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    activity::ActivityRequest,
    config::AppcuesConfig,
    data::ExperienceResponse,
    error::RemoteError,
    qualification::{LocalQualificationResponse, QualifyResponse},
};

/// Source of experience content and of the on-device qualification bundle.
#[async_trait]
pub trait ExperienceSource: Send + Sync {
    /// Fetch the bundle of experiences that can be qualified on device.
    async fn get_local_qualification(
        &self,
        account_id: &str,
    ) -> Result<LocalQualificationResponse, RemoteError>;

    /// Fetch the published content of an experience.
    async fn get_experience_content(
        &self,
        experience_id: &str,
        user_id: &str,
        user_signature: Option<&str>,
    ) -> Result<ExperienceResponse, RemoteError>;

    /// Fetch the unpublished content of an experience.
    async fn get_experience_preview(
        &self,
        experience_id: &str,
        user_id: &str,
        user_signature: Option<&str>,
    ) -> Result<ExperienceResponse, RemoteError>;
}

/// Destination of activity batches.
#[async_trait]
pub trait ActivitySink: Send + Sync {
    /// Send `activity`. With `qualify`, the server also qualifies experiences for it and the
    /// response is returned; otherwise the activity is only recorded and `None` is returned.
    async fn track_activity(
        &self,
        activity: &ActivityRequest,
        qualify: bool,
    ) -> Result<Option<QualifyResponse>, RemoteError>;
}

/// A client for the Appcues API.
///
/// `AppcuesApi` holds a connection pool internally and should be reused between requests.
#[derive(Debug, Clone)]
pub struct AppcuesApi {
    client: reqwest::Client,
    base_url: Url,
    account_id: String,
    user_signature: Option<String>,
}

impl AppcuesApi {
    /// Create an API client for the configured account.
    ///
    /// # Errors
    ///
    /// Fails with [`RemoteError::InvalidBaseUrl`] if `api_base_path` is not a valid base URL.
    pub fn new(config: &AppcuesConfig) -> Result<AppcuesApi, RemoteError> {
        let base_url = Url::parse(&config.api_base_path).map_err(RemoteError::InvalidBaseUrl)?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteError::InvalidBaseUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }

        Ok(AppcuesApi {
            client: reqwest::Client::new(),
            base_url,
            account_id: config.account_id.clone(),
            user_signature: config.user_signature.clone(),
        })
    }

    /// Build a URL by appending percent-encoded `segments` to the base path.
    fn route(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        user_signature: Option<&str>,
    ) -> Result<T, RemoteError> {
        let request = match user_signature {
            Some(signature) => request.bearer_auth(signature),
            None => request,
        };

        let response = request.send().await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => {
            log::debug!(target: "appcues", url:display = response.url().path(); "resource not found");
            Err(RemoteError::NotFound)
        }
        status => {
            log::warn!(target: "appcues",
                       url:display = response.url().path();
                       "received non-success response: {:?}", status);
            Err(RemoteError::Http {
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl ExperienceSource for AppcuesApi {
    async fn get_local_qualification(
        &self,
        account_id: &str,
    ) -> Result<LocalQualificationResponse, RemoteError> {
        let url = self.route(&["v1", "accounts", account_id, "qualifications", "local"]);

        log::debug!(target: "appcues", "fetching local qualifications");
        let bundle: LocalQualificationResponse = self.send(self.client.get(url), None).await?;
        log::debug!(target: "appcues",
                    count = bundle.qualifications.len();
                    "successfully fetched local qualifications");

        Ok(bundle)
    }

    async fn get_experience_content(
        &self,
        experience_id: &str,
        user_id: &str,
        user_signature: Option<&str>,
    ) -> Result<ExperienceResponse, RemoteError> {
        let url = self.route(&[
            "v1",
            "accounts",
            &self.account_id,
            "users",
            user_id,
            "experience_content",
            experience_id,
        ]);

        log::debug!(target: "appcues", experience_id; "fetching experience content");
        self.send(self.client.get(url), user_signature).await
    }

    async fn get_experience_preview(
        &self,
        experience_id: &str,
        user_id: &str,
        user_signature: Option<&str>,
    ) -> Result<ExperienceResponse, RemoteError> {
        let url = self.route(&[
            "v1",
            "accounts",
            &self.account_id,
            "users",
            user_id,
            "experience_preview",
            experience_id,
        ]);

        log::debug!(target: "appcues", experience_id; "fetching experience preview");
        self.send(self.client.get(url), user_signature).await
    }
}

#[async_trait]
impl ActivitySink for AppcuesApi {
    async fn track_activity(
        &self,
        activity: &ActivityRequest,
        qualify: bool,
    ) -> Result<Option<QualifyResponse>, RemoteError> {
        let endpoint = if qualify { "qualify" } else { "activity" };
        let url = self.route(&[
            "v1",
            "accounts",
            &activity.account_id,
            "users",
            &activity.user_id,
            endpoint,
        ]);

        log::debug!(target: "appcues",
                    request_id:display = activity.request_id,
                    events = activity.events.len(),
                    qualify;
                    "sending activity");

        let request = self.client.post(url).json(activity);
        let request = match &self.user_signature {
            Some(signature) => request.bearer_auth(signature),
            None => request,
        };

        if !qualify {
            check_status(request.send().await?)?;
            return Ok(None);
        }

        let response = check_status(request.send().await?)?;
        Ok(Some(response.json().await?))
    }
}
