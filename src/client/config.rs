//! Environment-based configuration.
//!
//! Every `from_env` has a `from_env_with` twin taking a lookup function, so callers
//! (and tests) can supply values without touching the process environment.

use std::time::Duration;

use crate::domain::ApiVersion;

use super::{Credentials, TelqClientBuilder, TelqError};

pub const ENV_API_ID: &str = "TELQ_API_ID";
pub const ENV_API_KEY: &str = "TELQ_API_KEY";
pub const ENV_BASE_URL: &str = "TELQ_BASE_URL";
pub const ENV_API_VERSION: &str = "TELQ_API_VERSION";
pub const ENV_TIMEOUT_SECS: &str = "TELQ_TIMEOUT_SECS";

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn non_blank(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.trim().is_empty())
}

impl Credentials {
    /// Read `TELQ_API_ID` and `TELQ_API_KEY`.
    pub fn from_env() -> Result<Self, TelqError> {
        Self::from_env_with(process_env)
    }

    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TelqError> {
        let app_id =
            non_blank(&lookup, ENV_API_ID).ok_or(TelqError::MissingEnv { name: ENV_API_ID })?;
        let app_key =
            non_blank(&lookup, ENV_API_KEY).ok_or(TelqError::MissingEnv { name: ENV_API_KEY })?;
        Ok(Self::new(app_id, app_key)?)
    }
}

impl TelqClientBuilder {
    /// Start from defaults and apply `TELQ_BASE_URL`, `TELQ_API_VERSION` and
    /// `TELQ_TIMEOUT_SECS` when they are set.
    pub fn from_env() -> Result<Self, TelqError> {
        Self::from_env_with(process_env)
    }

    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TelqError> {
        let mut builder = Self::new();
        if let Some(base_url) = non_blank(&lookup, ENV_BASE_URL) {
            builder = builder.base_url(base_url);
        }
        if let Some(version) = non_blank(&lookup, ENV_API_VERSION) {
            builder = builder.api_version(ApiVersion::new(version)?);
        }
        if let Some(raw) = non_blank(&lookup, ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| TelqError::InvalidEnv {
                name: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn credentials_come_from_env() {
        let credentials =
            Credentials::from_env_with(env(&[(ENV_API_ID, "id1"), (ENV_API_KEY, "key1")])).unwrap();
        assert_eq!(credentials.app_id().as_str(), "id1");
        assert_eq!(credentials.app_key().as_str(), "key1");
    }

    #[test]
    fn missing_or_blank_credentials_name_the_variable() {
        let err = Credentials::from_env_with(env(&[(ENV_API_KEY, "key1")])).unwrap_err();
        assert!(matches!(err, TelqError::MissingEnv { name: ENV_API_ID }));

        let err =
            Credentials::from_env_with(env(&[(ENV_API_ID, "id1"), (ENV_API_KEY, "  ")])).unwrap_err();
        assert!(matches!(err, TelqError::MissingEnv { name: ENV_API_KEY }));
    }

    #[test]
    fn builder_reads_overrides() {
        let client = TelqClientBuilder::from_env_with(env(&[
            (ENV_BASE_URL, "https://staging.example.invalid"),
            (ENV_API_VERSION, "v3"),
            (ENV_TIMEOUT_SECS, "30"),
        ]))
        .unwrap()
        .build()
        .unwrap();
        assert_eq!(client.base_url(), "https://staging.example.invalid");
        assert_eq!(client.api_version().as_str(), "v3");
    }

    #[test]
    fn builder_defaults_without_env() {
        let client = TelqClientBuilder::from_env_with(env(&[]))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://api.telqtele.com");
        assert_eq!(client.api_version().as_str(), ApiVersion::DEFAULT);
    }

    #[test]
    fn invalid_timeout_is_reported() {
        let err = TelqClientBuilder::from_env_with(env(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(
            err,
            TelqError::InvalidEnv { name: ENV_TIMEOUT_SECS, ref value } if value == "soon"
        ));
    }

    #[test]
    fn malformed_version_is_a_validation_error() {
        let err = TelqClientBuilder::from_env_with(env(&[(ENV_API_VERSION, "v 2")])).unwrap_err();
        assert!(matches!(err, TelqError::Validation(_)));
    }
}
