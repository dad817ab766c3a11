use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{BatchResultsQuery, NewBatchTests, NewTests, TestId};
use crate::transport::{
    Endpoint, decode_json_body, embedded_error, encode_new_batch_tests_body,
    encode_new_batch_tests_headers, encode_new_tests_body,
};

use super::session::{ACCEPT, Session};
use super::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TelqError};

/// Authenticated context shared by the resource clients.
#[derive(Clone, Copy)]
pub(super) struct Scope<'a> {
    session: &'a Session,
    http: &'a dyn HttpTransport,
}

impl<'a> Scope<'a> {
    pub(super) fn new(session: &'a Session, http: &'a dyn HttpTransport) -> Self {
        Self { session, http }
    }

    async fn execute(
        &self,
        method: HttpMethod,
        endpoint: Endpoint<'_>,
        extra_headers: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<Value, TelqError> {
        let url = endpoint.url(self.session.base_url(), self.session.api_version());
        let mut headers = vec![
            (ACCEPT.0.to_owned(), ACCEPT.1.to_owned()),
            ("authorization".to_owned(), self.session.authorization()),
        ];
        headers.extend(extra_headers);

        debug!(method = %method, url = %url, "sending TelQ request");
        let response = self
            .http
            .send(HttpRequest {
                method,
                url,
                headers,
                body,
            })
            .await
            .map_err(TelqError::Transport)?;
        debug!(status = response.status, "TelQ response received");

        decode_response(response)
    }
}

fn decode_response(response: HttpResponse) -> Result<Value, TelqError> {
    let value = match decode_json_body(&response.body) {
        Ok(value) => value,
        Err(_) if !response.is_success() => return Err(http_status(response)),
        Err(err) => return Err(TelqError::Parse(Box::new(err))),
    };

    if let Some(message) = embedded_error(&value) {
        warn!(status = response.status, message = %message, "TelQ API error");
        return Err(TelqError::Api {
            status: response.status,
            message,
        });
    }
    if !response.is_success() {
        return Err(http_status(response));
    }
    Ok(value)
}

fn http_status(response: HttpResponse) -> TelqError {
    let body = Some(response.body).filter(|body| !body.trim().is_empty());
    TelqError::HttpStatus {
        status: response.status,
        body,
    }
}

pub(super) struct Networks<'a> {
    scope: Scope<'a>,
}

impl<'a> Networks<'a> {
    pub(super) fn new(scope: Scope<'a>) -> Self {
        Self { scope }
    }

    pub(super) async fn get_networks(&self) -> Result<Value, TelqError> {
        self.scope
            .execute(HttpMethod::Get, Endpoint::Networks, Vec::new(), None)
            .await
    }
}

pub(super) struct Tests<'a> {
    scope: Scope<'a>,
}

impl<'a> Tests<'a> {
    pub(super) fn new(scope: Scope<'a>) -> Self {
        Self { scope }
    }

    pub(super) async fn initiate_new_tests(&self, request: &NewTests) -> Result<Value, TelqError> {
        let body = encode_new_tests_body(request).map_err(TelqError::Encode)?;
        self.scope
            .execute(HttpMethod::Post, Endpoint::Tests, Vec::new(), Some(body))
            .await
    }
}

pub(super) struct BatchTests<'a> {
    scope: Scope<'a>,
}

impl<'a> BatchTests<'a> {
    pub(super) fn new(scope: Scope<'a>) -> Self {
        Self { scope }
    }

    pub(super) async fn initiate_new_tests(
        &self,
        request: &NewBatchTests,
    ) -> Result<Value, TelqError> {
        let body = encode_new_batch_tests_body(request).map_err(TelqError::Encode)?;
        let headers = encode_new_batch_tests_headers(request);
        self.scope
            .execute(HttpMethod::Post, Endpoint::BatchTests, headers, Some(body))
            .await
    }
}

pub(super) struct Results<'a> {
    scope: Scope<'a>,
}

impl<'a> Results<'a> {
    pub(super) fn new(scope: Scope<'a>) -> Self {
        Self { scope }
    }

    pub(super) async fn get_test_results(&self, test_id: TestId) -> Result<Value, TelqError> {
        self.scope
            .execute(HttpMethod::Get, Endpoint::Results(test_id), Vec::new(), None)
            .await
    }

    pub(super) async fn get_batch_test_results(
        &self,
        query: &BatchResultsQuery,
    ) -> Result<Value, TelqError> {
        self.scope
            .execute(
                HttpMethod::Get,
                Endpoint::BatchResults(query),
                Vec::new(),
                None,
            )
            .await
    }
}
