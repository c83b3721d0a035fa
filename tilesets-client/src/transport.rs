//! The HTTP transport seam between the session and the wire.
//!
//! The session never touches [`reqwest`] directly; it goes through the
//! [`Transport`] trait so tests can run against canned responses.
//!
//! - [`ReqwestTransport`]: Production implementation
//! - [`FauxTransport`]: Test implementation

use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{Method, StatusCode, header};
use serde_json::Value;

use crate::TilesetsResult;

/// One outbound API request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Fully substituted URL, `access_token` query parameter included.
    pub url: String,
    /// JSON body, present for create and validate calls.
    pub body: Option<Value>,
}

/// One remote response, reduced to what the session inspects.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Raw body text.
    pub body: String,
    /// Raw `Link` header value, if the service sent one.
    pub link: Option<String>,
}

/// A blocking HTTP transport.
///
/// Implementations must not retry or reinterpret non-200 statuses; that
/// policy belongs to the session.
pub trait Transport: fmt::Debug + Send + Sync {
    /// Execute one request and return the raw response.
    fn execute(&self, request: &ApiRequest) -> TilesetsResult<ApiResponse>;
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Production transport backed by a blocking [`reqwest`] client.
///
/// Connection reuse and pooling stay inside the client.
#[derive(Debug)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Build the transport and its connection pool.
    pub fn new() -> TilesetsResult<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http })
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: &ApiRequest) -> TilesetsResult<ApiResponse> {
        let mut builder = self.http.request(request.method.clone(), &request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send()?;
        let status = response.status();
        let link = response
            .headers()
            .get(header::LINK)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text()?;
        Ok(ApiResponse { status, body, link })
    }
}

/// Test transport that replays canned responses and records every request.
#[derive(Debug, Default)]
pub struct FauxTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FauxTransport {
    /// Queue a canned response, served in FIFO order.
    pub fn push(&self, status: u16, body: &str, link: Option<&str>) {
        let response = ApiResponse {
            status: StatusCode::from_u16(status).expect("valid status code"),
            body: body.to_string(),
            link: link.map(str::to_string),
        };
        self.responses
            .lock()
            .expect("response queue poisoned")
            .push_back(response);
    }

    /// Every request executed so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }
}

impl Transport for FauxTransport {
    fn execute(&self, request: &ApiRequest) -> TilesetsResult<ApiResponse> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(request.clone());
        Ok(self
            .responses
            .lock()
            .expect("response queue poisoned")
            .pop_front()
            .expect("no canned response queued"))
    }
}
