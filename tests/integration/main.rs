//! Integration tests against a WireMock server.
//!
//! These exercise the full request/response cycle: query and form
//! encoding, token injection, response classification and retries.

mod reads;
mod writes;

use encosion_client::{EncosionClient, EncosionConfig};
use std::time::Duration;
use wiremock::MockServer;

pub const READ_PATH: &str = "/services/library";
pub const WRITE_PATH: &str = "/services/post";

/// Starts a mock server.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Builds a client pointed at the mock server, with both tokens set.
pub fn client_for(server: &MockServer, max_retries: u32) -> EncosionClient {
    let config = config_for(server)
        .read_token("read-token")
        .write_token("write-token")
        .max_retries(max_retries)
        .build()
        .expect("valid config");
    EncosionClient::new(config).expect("client builds")
}

/// Configuration builder pointed at the mock server, with no tokens.
pub fn config_for(server: &MockServer) -> encosion_client::config::EncosionConfigBuilder {
    let address = server.address();
    EncosionConfig::builder()
        .server(address.ip().to_string())
        .port(address.port())
        .read_timeout(Duration::from_secs(5))
        .write_timeout(Duration::from_secs(5))
}

/// Decodes a form-urlencoded body into key/value pairs.
pub fn form_fields(body: &[u8]) -> Vec<(String, String)> {
    url::form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
