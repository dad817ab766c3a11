use std::fmt;
use std::time::{Duration, SystemTime};

use tracing::{debug, info};

use crate::domain::ApiVersion;
use crate::transport::{
    Endpoint, decode_json_body, decode_token_response, embedded_error, encode_token_body,
};

use super::{Credentials, HttpMethod, HttpRequest, HttpResponse, HttpTransport, TelqError};

pub(super) const ACCEPT: (&str, &str) = ("accept", "*/*");

#[derive(Clone)]
/// Bearer session obtained from the token endpoint.
///
/// Bound to the API version and base URL that were configured when it was issued.
pub struct Session {
    pub(super) token: String,
    pub(super) api_version: ApiVersion,
    pub(super) base_url: String,
    pub(super) issued_at: SystemTime,
    pub(super) ttl: Option<Duration>,
}

impl Session {
    /// How long a session is reused before [`crate::TelqClient::authenticate`] asks for a new token.
    pub const REUSE_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

    pub fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn issued_at(&self) -> SystemTime {
        self.issued_at
    }

    /// Lifetime announced by TelQ, if any.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Whether the session is younger than [`Session::REUSE_WINDOW`] at `now`.
    ///
    /// A clock that moved backwards makes the session stale.
    pub fn is_fresh_at(&self, now: SystemTime) -> bool {
        now.duration_since(self.issued_at)
            .map(|age| age < Self::REUSE_WINDOW)
            .unwrap_or(false)
    }

    pub(super) fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .field("issued_at", &self.issued_at)
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub(super) struct AuthHolder {
    pub(super) base_url: String,
    pub(super) api_version: ApiVersion,
    pub(super) supported_versions: Vec<ApiVersion>,
    pub(super) session: Option<Session>,
}

impl AuthHolder {
    pub(super) fn new(
        base_url: String,
        api_version: ApiVersion,
        supported_versions: Vec<ApiVersion>,
    ) -> Self {
        Self {
            base_url,
            api_version,
            supported_versions,
            session: None,
        }
    }

    pub(super) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(super) fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    pub(super) fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub(super) async fn authenticate(
        &mut self,
        http: &dyn HttpTransport,
        credentials: &Credentials,
    ) -> Result<(), TelqError> {
        if !self.supported_versions.contains(&self.api_version) {
            return Err(TelqError::InvalidVersion {
                version: self.api_version.as_str().to_owned(),
            });
        }

        let now = SystemTime::now();
        if self
            .session
            .as_ref()
            .is_some_and(|session| session.is_fresh_at(now))
        {
            debug!(api_version = %self.api_version, "reusing TelQ session");
            return Ok(());
        }

        let session = self.request_token(http, credentials, now).await?;
        info!(
            api_version = %session.api_version,
            ttl_secs = session.ttl.map(|ttl| ttl.as_secs()),
            "TelQ token acquired"
        );
        self.session = Some(session);
        Ok(())
    }

    async fn request_token(
        &self,
        http: &dyn HttpTransport,
        credentials: &Credentials,
        now: SystemTime,
    ) -> Result<Session, TelqError> {
        let url = Endpoint::Token.url(&self.base_url, &self.api_version);
        let body = encode_token_body(credentials.app_id(), credentials.app_key())
            .map_err(TelqError::Encode)?;

        debug!(method = %HttpMethod::Post, url = %url, "requesting TelQ token");
        let response = http
            .send(HttpRequest {
                method: HttpMethod::Post,
                url,
                headers: vec![(ACCEPT.0.to_owned(), ACCEPT.1.to_owned())],
                body: Some(body),
            })
            .await
            .map_err(TelqError::Transport)?;

        let value = match decode_json_body(&response.body) {
            Ok(value) => value,
            Err(_) if !response.is_success() => return Err(rejected(response)),
            Err(err) => return Err(TelqError::Parse(Box::new(err))),
        };
        if let Some(message) = embedded_error(&value) {
            return Err(TelqError::Authentication {
                status: response.status,
                message,
            });
        }
        if !response.is_success() {
            return Err(rejected(response));
        }

        let grant = decode_token_response(value).map_err(|err| TelqError::Parse(Box::new(err)))?;
        Ok(Session {
            token: grant.value,
            api_version: self.api_version.clone(),
            base_url: self.base_url.clone(),
            issued_at: now,
            ttl: grant.ttl,
        })
    }
}

fn rejected(response: HttpResponse) -> TelqError {
    let body = response.body.trim();
    let message = if body.is_empty() {
        format!("HTTP {}", response.status)
    } else {
        body.to_owned()
    };
    TelqError::Authentication {
        status: response.status,
        message,
    }
}
