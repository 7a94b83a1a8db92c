//! Read-service integration tests.

use super::*;
use encosion_client::services::VideoSearch;
use encosion_client::{EncosionError, ErrorKind, Options, Resource, Selector};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_find_video_sends_command_and_token() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path(READ_PATH))
        .and(query_param("command", "find_video_by_id"))
        .and(query_param("video_id", "496518762"))
        .and(query_param("token", "read-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 496518762,
            "name": "Sea Turtles",
            "creationDate": "1227300000000"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let found = assert_ok!(client.videos().find(Selector::one(496518762), Options::new()).await);

    let video = found.into_one().expect("single video");
    assert_eq!(video.name.as_deref(), Some("Sea Turtles"));
    assert!(video.creation_date.is_some());
}

#[tokio::test]
async fn test_search_videos_by_topic() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path(READ_PATH))
        .and(query_param("command", "search_videos"))
        .and(query_param("all", "topic:learned"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 1, "name": "Lesson one"}, {"id": 2, "name": "Lesson two"}],
            "page_number": 0,
            "page_size": 100,
            "total_count": -1
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let videos = assert_ok!(
        client
            .videos()
            .search(VideoSearch::new().all("topic:learned"), Options::new())
            .await
    );

    let ids: Vec<_> = videos.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![Some(1), Some(2)]);
}

#[tokio::test]
async fn test_null_body_is_asset_not_found() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path(READ_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("null\n"))
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let error = assert_err!(client.playlists().find(Selector::one(7), Options::new()).await);

    assert_eq!(error.kind(), ErrorKind::AssetNotFound);
}

#[tokio::test]
async fn test_non_200_status_is_http_error() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path(READ_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let error = assert_err!(client.read("find_all_videos", &Options::new()).await);

    assert!(matches!(error, EncosionError::Http { status: 500 }));
    assert_eq!(error.to_string(), "HTTP header status code: 500");
}

#[tokio::test]
async fn test_timeout_fault_is_retried_until_success() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path(READ_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "timeout", "code": 103})))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(READ_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [{"id": 3}]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let videos = assert_ok!(client.videos().all(Options::new()).await);

    assert_eq!(videos.len(), 1);
    assert_eq!(client.metrics().get_metrics().total_retries, 2);
}

#[tokio::test]
async fn test_timeout_fault_exhausts_retries() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path(READ_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "timeout", "code": "103"})))
        .expect(4)
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let error = assert_err!(client.read("find_all_videos", &Options::new()).await);

    assert!(error.is_retryable());
    assert_eq!(error.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn test_high_level_fault_is_not_retried() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path(READ_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "bad filter", "code": 301})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let error = assert_err!(client.read("search_videos", &Options::new()).await);

    assert_eq!(error.kind(), ErrorKind::HighLevelApi);
    assert_eq!(error.fault_code(), Some(301));
}

#[tokio::test]
async fn test_transport_timeout_is_not_retried() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path(READ_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1}))
                .set_delay(Duration::from_secs(2)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server)
        .read_token("read-token")
        .read_timeout(Duration::from_millis(200))
        .build()
        .expect("valid config");
    let client = EncosionClient::new(config).expect("client builds");

    let error = assert_err!(client.read("find_video_by_id", &Options::new()).await);
    assert_eq!(error.kind(), ErrorKind::TransportTimeout);
}

#[tokio::test]
async fn test_missing_read_token_sends_nothing() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for(&server).write_token("write-token").build().expect("valid config");
    let client = EncosionClient::new(config).expect("client builds");

    let error = assert_err!(client.videos().all(Options::new()).await);
    assert_eq!(error.kind(), ErrorKind::MissingToken);
}
