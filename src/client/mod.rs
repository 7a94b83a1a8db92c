//! Encosion API client.

use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::config::{EncosionConfig, WRITE_MAX_RETRIES};
use crate::errors::EncosionResult;
use crate::observability::metrics::{DefaultMetricsCollector, MetricsCollector};
use crate::query::{build_read_query, build_write_payload, Options};
use crate::resilience::{RetryConfig, RetryExecutor};
use crate::services::{PlaylistService, VideoService};
use crate::transport::{FileUpload, ReqwestTransport, RequestExecutor, Transport};

/// The main Encosion client.
///
/// Every call is sequential: one attempt at a time, re-issued immediately
/// when the API reports a timeout.
pub struct EncosionClient {
    config: EncosionConfig,
    executor: RequestExecutor,
    metrics: Arc<dyn MetricsCollector>,
}

impl EncosionClient {
    /// Creates a client over HTTP with the given configuration.
    pub fn new(config: EncosionConfig) -> EncosionResult<Self> {
        Self::builder().config(config).build()
    }

    /// Creates a new client builder.
    pub fn builder() -> EncosionClientBuilder {
        EncosionClientBuilder::new()
    }

    /// Creates a client from the environment.
    pub fn from_env() -> EncosionResult<Self> {
        Self::new(EncosionConfig::from_env()?)
    }

    /// Returns the playlist service.
    pub fn playlists(&self) -> PlaylistService<'_> {
        PlaylistService::new(self)
    }

    /// Returns the video service.
    pub fn videos(&self) -> VideoService<'_> {
        VideoService::new(self)
    }

    /// Returns the metrics collector.
    pub fn metrics(&self) -> &dyn MetricsCollector {
        self.metrics.as_ref()
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &EncosionConfig {
        &self.config
    }

    /// Issues a read command against the read service.
    ///
    /// The read token and `command` are added to a copy of `options`. A
    /// call that fails with an API timeout is re-issued up to
    /// `max_retries` more times.
    pub async fn read(&self, command: &str, options: &Options) -> EncosionResult<Value> {
        let started = Instant::now();
        let result = self.read_attempts(command, options).await;
        self.record(command, started, &result);
        result
    }

    async fn read_attempts(&self, command: &str, options: &Options) -> EncosionResult<Value> {
        let query = build_read_query(command, options, self.config.credentials())?;
        let url = self.config.read_url();
        let timeout = self.config.read_timeout;
        debug!(command, url = %url, "Issuing read command");

        let (url, query) = (url.as_str(), query.as_str());
        let retry = RetryExecutor::new(RetryConfig::new(self.config.max_retries));
        retry
            .execute(
                command,
                move || self.executor.get(url, query, timeout),
                |attempt| self.metrics.record_retry(command, attempt),
            )
            .await
    }

    /// Issues a write command against the write service.
    ///
    /// Sends `{"method": command, "params": options + token}` as the `json`
    /// form field, with `file` as a multipart part when given. Returns the
    /// `result` member of the response, or the whole body if it has none.
    /// API timeouts are re-issued up to a fixed bound of five retries.
    pub async fn write(
        &self,
        command: &str,
        options: &Options,
        file: Option<FileUpload>,
    ) -> EncosionResult<Value> {
        let started = Instant::now();
        let result = self.write_attempts(command, options, file.as_ref()).await;
        self.record(command, started, &result);
        result
    }

    async fn write_attempts(
        &self,
        command: &str,
        options: &Options,
        file: Option<&FileUpload>,
    ) -> EncosionResult<Value> {
        let json = build_write_payload(command, options, self.config.credentials())?;
        let url = self.config.write_url();
        let timeout = self.config.write_timeout;
        debug!(command, url = %url, has_file = file.is_some(), "Issuing write command");

        let (url, json) = (url.as_str(), json.as_str());
        let retry = RetryExecutor::new(RetryConfig::new(WRITE_MAX_RETRIES));
        let body = retry
            .execute(
                command,
                move || self.executor.post(url, json, file, timeout),
                |attempt| self.metrics.record_retry(command, attempt),
            )
            .await?;

        Ok(rpc_result(body))
    }

    fn record(&self, command: &str, started: Instant, result: &EncosionResult<Value>) {
        self.metrics
            .record_request(command, started.elapsed(), result.is_ok());
        if let Err(error) = result {
            self.metrics.record_error(command, error.kind());
        }
    }
}

impl std::fmt::Debug for EncosionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncosionClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn rpc_result(body: Value) -> Value {
    match body {
        Value::Object(mut envelope) if envelope.contains_key("result") => {
            envelope.remove("result").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Builder for the Encosion client.
#[derive(Default)]
pub struct EncosionClientBuilder {
    config: Option<EncosionConfig>,
    transport: Option<Arc<dyn Transport>>,
    metrics: Option<Arc<dyn MetricsCollector>>,
}

impl EncosionClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration. Without one, the environment is read.
    pub fn config(mut self, config: EncosionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the metrics collector.
    pub fn metrics(mut self, metrics: Arc<dyn MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Builds the client.
    pub fn build(self) -> EncosionResult<EncosionClient> {
        let config = match self.config {
            Some(config) => config,
            None => EncosionConfig::from_env()?,
        };

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        let metrics = self
            .metrics
            .unwrap_or_else(|| Arc::new(DefaultMetricsCollector::new()));

        Ok(EncosionClient {
            config,
            executor: RequestExecutor::new(transport),
            metrics,
        })
    }
}
