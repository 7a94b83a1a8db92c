//! HTTP transport module for the Encosion client.
//!
//! [`Transport`] performs exactly one request and hands back the raw status
//! and body. [`RequestExecutor`] layers body decoding and response
//! classification on top, producing either a decoded value or a typed
//! error for a single attempt.

mod classifier;
mod executor;
mod http_transport;

pub use classifier::{check_body, check_status, classify, decode_get_body, decode_post_body, DecodedBody};
pub use executor::RequestExecutor;
pub use http_transport::ReqwestTransport;

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

use crate::errors::EncosionResult;

/// Raw HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, undecoded.
    pub body: Bytes,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A file attached to a write call.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// File name reported to the API.
    pub file_name: String,
    /// File contents.
    pub content: Bytes,
    /// MIME type of the contents.
    pub mime_type: mime::Mime,
}

impl FileUpload {
    /// Creates an upload with the `application/octet-stream` MIME type.
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
            mime_type: mime::APPLICATION_OCTET_STREAM,
        }
    }

    /// Sets the MIME type.
    pub fn with_mime_type(mut self, mime_type: mime::Mime) -> Self {
        self.mime_type = mime_type;
        self
    }

    /// Returns true if there is nothing to upload.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Body of a write call: the JSON-RPC string sent as the `json` field, plus
/// an optional `file` field.
#[derive(Debug, Clone)]
pub struct PostPayload {
    /// Serialized `{"method": ..., "params": ...}` object.
    pub json: String,
    /// Optional file part.
    pub file: Option<FileUpload>,
}

/// Trait for HTTP transport implementations.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET of `url?query`, bounded by `timeout`.
    async fn get(&self, url: &str, query: &str, timeout: Duration) -> EncosionResult<HttpResponse>;

    /// Issues a POST of `payload` to `url`, bounded by `timeout`.
    async fn post(
        &self,
        url: &str,
        payload: PostPayload,
        timeout: Duration,
    ) -> EncosionResult<HttpResponse>;
}
