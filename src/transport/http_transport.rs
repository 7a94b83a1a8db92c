//! HTTP transport implementation using reqwest.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;

use super::{HttpResponse, PostPayload, Transport};
use crate::errors::{EncosionError, EncosionResult};

/// Reqwest-based HTTP transport.
///
/// Status codes are passed through untouched; classification happens in
/// the executor.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a new transport.
    pub fn new() -> EncosionResult<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .user_agent(concat!("encosion-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EncosionError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// Creates a transport over a custom client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn read_response(response: reqwest::Response) -> EncosionResult<HttpResponse> {
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(HttpResponse { status, body })
    }

    fn build_form(payload: PostPayload) -> EncosionResult<Form> {
        let mut form = Form::new().text("json", payload.json);
        if let Some(file) = payload.file {
            let part = Part::bytes(file.content.to_vec())
                .file_name(file.file_name)
                .mime_str(file.mime_type.as_ref())
                .map_err(|e| EncosionError::Configuration {
                    message: format!("Invalid MIME type: {}", e),
                })?;
            form = form.part("file", part);
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, query: &str, timeout: Duration) -> EncosionResult<HttpResponse> {
        let full_url = if query.is_empty() {
            url.to_string()
        } else {
            format!("{}?{}", url, query)
        };

        debug!(url = %url, "GET");

        let response = self
            .client
            .get(full_url)
            .timeout(timeout)
            .send()
            .await?;

        Self::read_response(response).await
    }

    async fn post(
        &self,
        url: &str,
        payload: PostPayload,
        timeout: Duration,
    ) -> EncosionResult<HttpResponse> {
        debug!(url = %url, has_file = payload.file.is_some(), "POST");

        let request = self.client.post(url).timeout(timeout);
        let request = if payload.file.is_some() {
            request.multipart(Self::build_form(payload)?)
        } else {
            request.form(&[("json", payload.json.as_str())])
        };

        let response = request.send().await?;
        Self::read_response(response).await
    }
}
