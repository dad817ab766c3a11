use url::form_urlencoded;

use crate::domain::{ApiVersion, BatchResultsQuery, TestId};

/// TelQ client endpoints, relative to `{base}/{version}/client`.
#[derive(Debug, Clone, Copy)]
pub enum Endpoint<'a> {
    Token,
    Networks,
    Tests,
    BatchTests,
    Results(TestId),
    BatchResults(&'a BatchResultsQuery),
}

impl Endpoint<'_> {
    pub fn path(&self) -> String {
        match self {
            Self::Token => "/token".to_owned(),
            Self::Networks => "/networks".to_owned(),
            Self::Tests => "/tests".to_owned(),
            Self::BatchTests | Self::BatchResults(_) => "/lnt/tests".to_owned(),
            Self::Results(test_id) => format!("/results/{test_id}"),
        }
    }

    pub fn query(&self) -> Vec<(&'static str, Option<String>)> {
        match self {
            Self::BatchResults(query) => vec![
                ("page", Some(query.page.value().to_string())),
                ("size", Some(query.size.value().to_string())),
                ("order", Some(query.order.as_str().to_owned())),
                ("from", query.from.as_ref().map(|from| from.as_str().to_owned())),
                ("to", query.to.as_ref().map(|to| to.as_str().to_owned())),
            ],
            _ => Vec::new(),
        }
    }

    pub fn url(&self, base_url: &str, api_version: &ApiVersion) -> String {
        build_url(base_url, api_version, &self.path(), &self.query())
    }
}

/// `{base}/{version}/client{path}` plus the form-encoded query, skipping `None` values.
pub fn build_url(
    base_url: &str,
    api_version: &ApiVersion,
    path: &str,
    query: &[(&str, Option<String>)],
) -> String {
    let mut url = format!(
        "{}/{}/client/{}",
        base_url.trim_end_matches('/'),
        api_version.as_str(),
        path.trim_start_matches('/')
    );

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut has_query = false;
    for (key, value) in query {
        if let Some(value) = value {
            serializer.append_pair(key, value);
            has_query = true;
        }
    }
    if has_query {
        url.push('?');
        url.push_str(&serializer.finish());
    }
    url
}
