//! Mock transport for testing.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::errors::{EncosionError, EncosionResult};
use crate::transport::{HttpResponse, PostPayload, Transport};

/// HTTP method of a recorded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET request.
    Get,
    /// POST request.
    Post,
}

/// A recorded request for verification.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// Request URL, without the query string.
    pub url: String,
    /// Query string of a GET.
    pub query: Option<String>,
    /// `json` field of a POST.
    pub json: Option<String>,
    /// File name of an attached file.
    pub file_name: Option<String>,
    /// Timeout the caller asked for.
    pub timeout: Duration,
}

impl RecordedRequest {
    /// Returns the value of a query parameter, decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Returns the parsed JSON-RPC payload of a POST.
    pub fn json_payload(&self) -> Option<serde_json::Value> {
        self.json.as_deref().and_then(|json| serde_json::from_str(json).ok())
    }
}

/// A canned response, or a transport failure, to hand back.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// A response with a status code and raw body.
    Response {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: Bytes,
    },
    /// The host could not be reached.
    ConnectionFailure(String),
}

impl MockResponse {
    /// Creates a 200 response with a JSON body.
    pub fn json(body: serde_json::Value) -> Self {
        MockResponse::Response {
            status: 200,
            body: Bytes::from(body.to_string()),
        }
    }

    /// Creates a response with a raw text body.
    pub fn text(status: u16, body: &str) -> Self {
        MockResponse::Response {
            status,
            body: Bytes::from(body.to_string()),
        }
    }

    /// Creates a 200 response carrying a read-service fault.
    pub fn fault(code: i64, message: &str) -> Self {
        Self::json(serde_json::json!({"error": message, "code": code}))
    }

    /// Creates a 200 response carrying a write-service fault envelope.
    pub fn rpc_fault(code: i64, message: &str) -> Self {
        Self::json(serde_json::json!({
            "result": null,
            "error": {"name": "Error", "message": message, "code": code},
            "id": null
        }))
    }

    /// Creates a 200 response carrying a successful write result.
    pub fn rpc_result(result: serde_json::Value) -> Self {
        Self::json(serde_json::json!({"result": result, "error": null, "id": null}))
    }

    /// Creates an empty-result (`null`) response.
    pub fn null() -> Self {
        Self::text(200, "null")
    }
}

/// Mock transport for testing.
///
/// Responses are served in the order they were enqueued; once the queue
/// is empty the default response (or a 500) is returned.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    default_response: Option<MockResponse>,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a response to the queue.
    pub fn enqueue_response(&self, response: MockResponse) {
        lock(&self.responses).push_back(response);
    }

    /// Sets a default response for when the queue is empty.
    pub fn set_default_response(mut self, response: MockResponse) -> Self {
        self.default_response = Some(response);
        self
    }

    /// Gets all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn respond(&self, request: RecordedRequest) -> EncosionResult<HttpResponse> {
        lock(&self.requests).push(request);

        let response = lock(&self.responses)
            .pop_front()
            .or_else(|| self.default_response.clone())
            .unwrap_or_else(|| MockResponse::text(500, "No mock response configured"));

        match response {
            MockResponse::Response { status, body } => Ok(HttpResponse { status, body }),
            MockResponse::ConnectionFailure(message) => Err(EncosionError::Connection { message }),
        }
    }
}

// A poisoned lock only means another test thread panicked; keep serving.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str, query: &str, timeout: Duration) -> EncosionResult<HttpResponse> {
        self.respond(RecordedRequest {
            method: Method::Get,
            url: url.to_string(),
            query: Some(query.to_string()),
            json: None,
            file_name: None,
            timeout,
        })
    }

    async fn post(
        &self,
        url: &str,
        payload: PostPayload,
        timeout: Duration,
    ) -> EncosionResult<HttpResponse> {
        self.respond(RecordedRequest {
            method: Method::Post,
            url: url.to_string(),
            query: None,
            json: Some(payload.json),
            file_name: payload.file.map(|file| file.file_name),
            timeout,
        })
    }
}
