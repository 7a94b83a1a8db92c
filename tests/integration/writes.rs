//! Write-service integration tests.

use super::*;
use encosion_client::{ErrorKind, FileUpload, Options, Playlist, Video};
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

fn rpc_result(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"result": result, "error": null, "id": null}))
}

#[tokio::test]
async fn test_write_sends_form_encoded_json_rpc() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path(WRITE_PATH))
        .and(body_string_contains("json="))
        .respond_with(rpc_result(json!(4242)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let id = assert_ok!(client.playlists().create(&Playlist::new("Summer")).await);
    assert_eq!(id, 4242);

    let requests = server.received_requests().await.expect("recording enabled");
    let request = &requests[0];
    let content_type = request
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(content_type, "application/x-www-form-urlencoded");

    let fields = form_fields(&request.body);
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].0, "json");
    let payload: Value = serde_json::from_str(&fields[0].1).expect("json payload");
    assert_eq!(payload["method"], json!("create_playlist"));
    assert_eq!(payload["params"]["token"], json!("write-token"));
    assert_eq!(payload["params"]["playlist"]["name"], json!("Summer"));
}

#[tokio::test]
async fn test_create_video_sends_multipart() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path(WRITE_PATH))
        .respond_with(rpc_result(json!(9001)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let file = FileUpload::new("turtles.mp4", b"not really a video".to_vec())
        .with_mime_type("video/mp4".parse().expect("valid mime"));
    let id = assert_ok!(client.videos().create(&Video::new("Turtles"), file).await);
    assert_eq!(id, 9001);

    let requests = server.received_requests().await.expect("recording enabled");
    let request = &requests[0];
    let content_type = request
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"));

    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains(r#"name="json""#));
    assert!(body.contains(r#"name="file"; filename="turtles.mp4""#));
    assert!(body.contains("not really a video"));
    assert!(body.contains(r#""method":"create_video""#));
}

#[tokio::test]
async fn test_write_fault_is_classified() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path(WRITE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": null,
            "error": {"name": "IllegalValueError", "message": "bad video id", "code": 304},
            "id": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let error = assert_err!(client.videos().delete(1, false).await);

    assert_eq!(error.kind(), ErrorKind::HighLevelApi);
    assert!(error.to_string().contains("bad video id"));
}

#[tokio::test]
async fn test_write_timeout_uses_fixed_bound() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path(WRITE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": null,
            "error": {"name": "TimeoutError", "message": "timed out", "code": 103},
            "id": null
        })))
        .expect(6)
        .mount(&server)
        .await;

    let client = client_for(&server, 1);
    let error = assert_err!(client.write("update_video", &Options::new(), None).await);

    assert_eq!(error.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn test_missing_write_token_sends_nothing() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .respond_with(rpc_result(json!(null)))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for(&server).read_token("read-token").build().expect("valid config");
    let client = EncosionClient::new(config).expect("client builds");

    let error = assert_err!(client.playlists().delete(1, false).await);
    assert_eq!(error.kind(), ErrorKind::MissingToken);
}
