use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{AppId, AppKey};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid token response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("token response does not contain a token value")]
    MissingToken,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenRequest<'a> {
    app_id: &'a str,
    app_key: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenJsonResponse {
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    ttl: Option<u64>,
}

/// Bearer token handed out by the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub value: String,
    pub ttl: Option<Duration>,
}

pub fn encode_token_body(app_id: &AppId, app_key: &AppKey) -> Result<Value, serde_json::Error> {
    serde_json::to_value(TokenRequest {
        app_id: app_id.as_str(),
        app_key: app_key.as_str(),
    })
}

pub fn decode_token_response(body: Value) -> Result<TokenGrant, TransportError> {
    let parsed: TokenJsonResponse = serde_json::from_value(body)?;
    let value = parsed
        .value
        .filter(|value| !value.trim().is_empty())
        .ok_or(TransportError::MissingToken)?;
    Ok(TokenGrant {
        value,
        ttl: parsed.ttl.map(Duration::from_secs),
    })
}
