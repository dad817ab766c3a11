//! Client layer: HTTP transport, authentication, and the [`TelqClient`] facade.

mod config;
mod resources;
mod session;

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::domain::{
    ApiVersion, AppId, AppKey, BatchResultsQuery, NewBatchTests, NewTests, TestId,
    ValidationError,
};

pub use config::{ENV_API_ID, ENV_API_KEY, ENV_API_VERSION, ENV_BASE_URL, ENV_TIMEOUT_SECS};
pub use session::Session;

use resources::{BatchTests, Networks, Results, Scope, Tests};
use session::AuthHolder;

const DEFAULT_BASE_URL: &str = "https://api.telqtele.com";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
        })
    }
}

#[derive(Debug, Clone)]
struct HttpRequest {
    method: HttpMethod,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

impl HttpResponse {
    fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self.client.post(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// TelQ application credentials (`appId` + `appKey`).
///
/// They are only used for the token exchange and are not kept by the client.
pub struct Credentials {
    app_id: AppId,
    app_key: AppKey,
}

impl Credentials {
    /// Validate that both parts are non-empty.
    pub fn new(
        app_id: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            app_id: AppId::new(app_id)?,
            app_key: AppKey::new(app_key)?,
        })
    }

    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    pub fn app_key(&self) -> &AppKey {
        &self.app_key
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`TelqClient`].
///
/// Nothing is retried: every failure surfaces as one of these variants.
pub enum TelqError {
    /// The configured API version is not in the client's allow-list.
    #[error("unsupported API version: {version}")]
    InvalidVersion { version: String },

    /// A resource method was called before a successful [`TelqClient::authenticate`].
    #[error("not authenticated: call `authenticate` with your app id and key first")]
    NotAuthenticated,

    /// The token endpoint rejected the credentials or failed.
    #[error("authentication failed (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    /// TelQ returned a JSON body with a non-null `error` field.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Non-successful HTTP status code without an API error body.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// Request body could not be serialized.
    #[error("request encoding error: {0}")]
    Encode(#[source] serde_json::Error),

    /// A required environment variable is not set.
    #[error("missing environment variable {name}")]
    MissingEnv { name: &'static str },

    /// An environment variable holds a value that cannot be used.
    #[error("invalid environment variable {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`TelqClient`].
///
/// Use this when you need to customize the base URL, API version, timeout, or user-agent.
pub struct TelqClientBuilder {
    base_url: String,
    api_version: ApiVersion,
    supported_versions: Vec<ApiVersion>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl Default for TelqClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TelqClientBuilder {
    /// Create a builder for the production API host and the default API version.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_version: ApiVersion::default(),
            supported_versions: ApiVersion::supported(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API host, e.g. for a staging environment.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Select the API version path segment.
    pub fn api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = api_version;
        self
    }

    /// Replace the allow-list checked by [`TelqClient::authenticate`].
    pub fn supported_versions(mut self, versions: impl IntoIterator<Item = ApiVersion>) -> Self {
        self.supported_versions = versions.into_iter().collect();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`TelqClient`].
    pub fn build(self) -> Result<TelqClient, TelqError> {
        let base_url = self.base_url.trim().trim_end_matches('/').to_owned();
        if url::Url::parse(&base_url).is_err() {
            return Err(ValidationError::InvalidUrl {
                field: "baseUrl",
                input: self.base_url,
            }
            .into());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| TelqError::Transport(Box::new(err)))?;

        Ok(TelqClient {
            auth: AuthHolder::new(base_url, self.api_version, self.supported_versions),
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level TelQ client.
///
/// Call [`TelqClient::authenticate`] once, then use the resource methods. Each
/// resource method performs exactly one HTTP round trip and returns the decoded
/// JSON body as TelQ sent it; see [`crate::domain`] for typed views.
pub struct TelqClient {
    auth: AuthHolder,
    http: Arc<dyn HttpTransport>,
}

impl TelqClient {
    /// Create a client for the production API with the default version.
    ///
    /// For more customization, use [`TelqClient::builder`].
    pub fn new() -> Self {
        Self {
            auth: AuthHolder::new(
                DEFAULT_BASE_URL.to_owned(),
                ApiVersion::default(),
                ApiVersion::supported(),
            ),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder() -> TelqClientBuilder {
        TelqClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        self.auth.base_url()
    }

    pub fn api_version(&self) -> &ApiVersion {
        self.auth.api_version()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.session().is_some()
    }

    /// The current session, if [`TelqClient::authenticate`] succeeded.
    pub fn session(&self) -> Option<&Session> {
        self.auth.session()
    }

    /// Exchange the app id/key for a bearer token.
    ///
    /// A session younger than 24 hours is reused without a network call.
    ///
    /// Errors:
    /// - [`TelqError::InvalidVersion`] before any request if the version is not allowed,
    /// - [`TelqError::Authentication`] when TelQ rejects the credentials.
    pub async fn authenticate(&mut self, credentials: &Credentials) -> Result<(), TelqError> {
        self.auth.authenticate(self.http.as_ref(), credentials).await
    }

    /// List the networks currently available for testing.
    ///
    /// The list changes frequently; the `mcc`/`mnc`/`portedFromMnc` values feed
    /// [`NewTests`] destinations.
    pub async fn get_networks(&self) -> Result<Value, TelqError> {
        Networks::new(self.scope()?).get_networks().await
    }

    /// Create one test per destination. The response lists each test with its
    /// id and generated `testIdText`.
    pub async fn initiate_new_tests(&self, request: &NewTests) -> Result<Value, TelqError> {
        Tests::new(self.scope()?).initiate_new_tests(request).await
    }

    /// Start an LNT batch.
    pub async fn initiate_new_batch_tests(
        &self,
        request: &NewBatchTests,
    ) -> Result<Value, TelqError> {
        BatchTests::new(self.scope()?)
            .initiate_new_tests(request)
            .await
    }

    /// Fetch the result of one test.
    pub async fn get_test_results(&self, test_id: TestId) -> Result<Value, TelqError> {
        Results::new(self.scope()?).get_test_results(test_id).await
    }

    /// Fetch one page of LNT results.
    pub async fn get_batch_test_results(
        &self,
        query: &BatchResultsQuery,
    ) -> Result<Value, TelqError> {
        Results::new(self.scope()?)
            .get_batch_test_results(query)
            .await
    }

    fn scope(&self) -> Result<Scope<'_>, TelqError> {
        let session = self.auth.session().ok_or(TelqError::NotAuthenticated)?;
        Ok(Scope::new(session, self.http.as_ref()))
    }
}

impl Default for TelqClient {
    fn default() -> Self {
        Self::new()
    }
}
