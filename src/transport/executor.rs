//! Single-attempt request execution.

use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use super::classifier::{check_body, check_status, decode_get_body, decode_post_body};
use super::{FileUpload, PostPayload, Transport};
use crate::errors::EncosionResult;

/// Issues one request and classifies the response.
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
}

impl RequestExecutor {
    /// Creates an executor over a transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Performs one read attempt: GET `url?query`, then decode and
    /// classify.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn get(&self, url: &str, query: &str, timeout: Duration) -> EncosionResult<Value> {
        let started = Instant::now();
        let response = self.transport.get(url, query, timeout).await?;
        debug!(
            status = response.status,
            bytes = response.body.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Read response received"
        );

        check_status(response.status)?;
        check_body(decode_get_body(&response.body)?)
    }

    /// Performs one write attempt: POST the JSON-RPC payload (and file, if
    /// any), then decode and classify.
    #[instrument(skip_all, fields(url = %url, has_file = file.is_some()))]
    pub async fn post(
        &self,
        url: &str,
        json: &str,
        file: Option<&FileUpload>,
        timeout: Duration,
    ) -> EncosionResult<Value> {
        let payload = PostPayload {
            json: json.to_string(),
            file: file.cloned(),
        };

        let started = Instant::now();
        let response = self.transport.post(url, payload, timeout).await?;
        debug!(
            status = response.status,
            bytes = response.body.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Write response received"
        );

        check_status(response.status)?;
        check_body(decode_post_body(&response.body)?)
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor").finish_non_exhaustive()
    }
}
