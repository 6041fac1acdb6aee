use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use grab_client::{
    ClientError, ClientSettings, HttpSessionClient, JobPayload, JobStatus, SessionApi,
    StatusSnapshot,
};

fn client_for(server: &MockServer) -> HttpSessionClient {
    let base = server.uri().parse().expect("mock server url");
    HttpSessionClient::new(ClientSettings::new(base)).expect("build client")
}

fn payload() -> JobPayload {
    JobPayload {
        query: "cats".to_string(),
        count: 20,
        min_size: "medium".to_string(),
    }
}

#[tokio::test]
async fn start_job_posts_exact_payload_and_returns_session_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/download"))
        .and(body_json(json!({
            "query": "cats",
            "count": 20,
            "min_size": "medium",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "session_id": "abc",
            "message": "Download started",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let session_id = client.start_job(&payload()).await.expect("start ok");
    assert_eq!(session_id, "abc");
}

#[tokio::test]
async fn start_job_surfaces_service_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/download"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "API quota exhausted",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.start_job(&payload()).await.unwrap_err();
    match err {
        ClientError::Service(message) => assert_eq!(message, "API quota exhausted"),
        other => panic!("expected service error, got {other:?}"),
    }
}

#[tokio::test]
async fn start_job_surfaces_rejection_body_on_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/download"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Count must be between 1 and 50",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.start_job(&payload()).await.unwrap_err();
    match err {
        ClientError::Service(message) => {
            assert_eq!(message, "Count must be between 1 and 50");
        }
        other => panic!("expected service error, got {other:?}"),
    }
}

#[tokio::test]
async fn start_job_reports_transport_failures() {
    // Nothing listens here; the connection itself fails.
    let base = "http://127.0.0.1:9".parse().unwrap();
    let client = HttpSessionClient::new(ClientSettings::new(base)).unwrap();

    let err = client.start_job(&payload()).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn poll_status_parses_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "running",
            "progress": 5,
            "total": 20,
            "downloaded": 4,
            "failed": 1,
            "message": "Downloading 20 images...",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let snapshot = client.poll_status("abc").await.expect("poll ok");
    assert_eq!(
        snapshot,
        StatusSnapshot {
            status: JobStatus::Running,
            progress: 5,
            total: 20,
            downloaded: 4,
            failed: 1,
            message: "Downloading 20 images...".to_string(),
        }
    );
}

#[tokio::test]
async fn poll_status_accepts_transitional_status_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "searching",
            "message": "Searching for images...",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let snapshot = client.poll_status("abc").await.expect("poll ok");
    assert_eq!(snapshot.status, JobStatus::Running);
    // Counters the server has not produced yet default to zero.
    assert_eq!(snapshot.total, 0);
}

#[tokio::test]
async fn poll_status_maps_unknown_session_to_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/gone"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Session not found"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.poll_status("gone").await.unwrap_err();
    match err {
        ClientError::Service(message) => assert_eq!(message, "Session not found"),
        other => panic!("expected service error, got {other:?}"),
    }
}

#[tokio::test]
async fn artifact_url_is_constructed_without_fetching() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let url = client.artifact_url("abc");
    assert_eq!(url.as_str(), format!("{}/download/abc", server.uri()));
    // No request was made; the mock server saw nothing.
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn download_artifact_saves_with_disposition_filename() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download/abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Content-Disposition",
                    "attachment; filename=\"cats_images.zip\"",
                )
                .set_body_bytes(b"PK\x03\x04zipdata".to_vec()),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server);
    let saved = client
        .download_artifact("abc", dir.path())
        .await
        .expect("download ok");

    assert_eq!(saved.file_name().unwrap(), "cats_images.zip");
    assert_eq!(std::fs::read(&saved).unwrap(), b"PK\x03\x04zipdata");
}

#[tokio::test]
async fn download_artifact_falls_back_to_session_filename() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"zip".to_vec()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server);
    let saved = client.download_artifact("abc", dir.path()).await.unwrap();
    assert_eq!(saved.file_name().unwrap(), "abc.zip");
}

#[tokio::test]
async fn download_artifact_rejects_incomplete_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download/abc"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "Download not completed yet"})),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server);
    let err = client.download_artifact("abc", dir.path()).await.unwrap_err();
    match err {
        ClientError::Service(message) => assert_eq!(message, "Download not completed yet"),
        other => panic!("expected service error, got {other:?}"),
    }
}

#[tokio::test]
async fn open_folder_reports_failure_as_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-folder/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.open_folder("abc").await.unwrap_err();
    assert!(matches!(err, ClientError::Service(_)));
}

#[tokio::test]
async fn open_folder_succeeds_on_success_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/open-folder/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Folder opening not supported in web version",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.open_folder("abc").await.expect("open folder ok");
}
