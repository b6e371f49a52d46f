use std::time::Duration;

/// Configuration for [`Appcues`](crate::Appcues).
#[derive(Debug, Clone)]
pub struct AppcuesConfig {
    pub(crate) account_id: String,
    pub(crate) application_id: String,
    pub(crate) api_base_path: String,
    pub(crate) session_timeout: Duration,
    pub(crate) user_signature: Option<String>,
}

impl AppcuesConfig {
    /// Create a default Appcues configuration for the given account and application.
    ///
    /// ```
    /// # use appcues::AppcuesConfig;
    /// AppcuesConfig::new("account-id", "application-id");
    /// ```
    pub fn new(account_id: impl Into<String>, application_id: impl Into<String>) -> Self {
        AppcuesConfig {
            account_id: account_id.into(),
            application_id: application_id.into(),
            api_base_path: AppcuesConfig::DEFAULT_API_BASE_PATH.to_owned(),
            session_timeout: AppcuesConfig::DEFAULT_SESSION_TIMEOUT,
            user_signature: None,
        }
    }

    /// Default base URL for API calls.
    pub const DEFAULT_API_BASE_PATH: &'static str = "https://api.appcues.net";

    /// Default inactivity period after which the next activity starts a new session.
    pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

    /// Override base URL for API calls. Clients should use the default setting in most cases.
    pub fn api_base_path(&mut self, api_base_path: impl Into<String>) -> &mut Self {
        self.api_base_path = api_base_path.into();
        self
    }

    /// Override the session timeout.
    ///
    /// ```
    /// # use std::time::Duration;
    /// # use appcues::AppcuesConfig;
    /// let mut config = AppcuesConfig::new("account-id", "application-id");
    /// config.session_timeout(Duration::from_secs(5 * 60));
    /// ```
    pub fn session_timeout(&mut self, session_timeout: Duration) -> &mut Self {
        self.session_timeout = session_timeout;
        self
    }

    /// Signature of the user, sent as a bearer token when identity verification is enabled for
    /// the account.
    pub fn user_signature(&mut self, user_signature: impl Into<String>) -> &mut Self {
        self.user_signature = Some(user_signature.into());
        self
    }

    #[allow(missing_docs)]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    #[allow(missing_docs)]
    pub fn application_id(&self) -> &str {
        &self.application_id
    }
}
