//! Media endpoint tests, including the record-and-download flow.

mod common;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::{envelope, request_count, setup, API_KEY};
use ts_core::constants::tags;

#[tokio::test]
async fn test_create_media() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/rest/media"))
        .and(body_string_contains("appkey=test-app-key"))
        .respond_with(envelope(
            tags::MEDIA,
            json!({ "status": 201, "mediaId": "m-1", "uri": "/api/rest/media/m-1" }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let media = client.create_media("alice").await.unwrap().unwrap();
    assert_eq!(media.media_id.as_deref(), Some("m-1"));

    assert_eq!(client.create_media("").await.unwrap_err().code(), 102);
}

#[tokio::test]
async fn test_create_media_bad_request_is_negative() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/rest/media"))
        .respond_with(envelope(tags::MEDIA, json!({ "status": 400 })))
        .mount(&server)
        .await;

    assert!(client.create_media("alice").await.unwrap().is_none());
}

#[tokio::test]
async fn test_record_and_download() {
    let (server, client) = setup().await;
    let audio = b"ID3fake-mp3".to_vec();
    let download_url = format!("{}/files/m-1.mp3", server.uri());

    Mock::given(method("POST"))
        .and(path("/api/rest/media"))
        .respond_with(envelope(tags::MEDIA, json!({ "status": 201, "mediaId": "m-1" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/rest/media/m-1"))
        .and(body_string_contains("action=record"))
        .and(body_string_contains("networkid=alice"))
        .respond_with(envelope(
            tags::MEDIA,
            json!({ "status": 201, "mediaId": "m-1", "message": "Record request accepted" }),
        ))
        .expect(1)
        .mount(&server)
        .await;
    // First poll: still recording.
    Mock::given(method("GET"))
        .and(path("/api/rest/media/m-1"))
        .and(query_param("appkey", API_KEY))
        .respond_with(envelope(
            tags::MEDIA,
            json!({ "status": 200, "mediaId": "m-1", "fileSize": 0 }),
        ))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/rest/media/m-1"))
        .respond_with(envelope(
            tags::MEDIA,
            json!({
                "status": 200,
                "mediaId": "m-1",
                "fileSize": audio.len(),
                "downloadUrl": download_url,
            }),
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/m-1.mp3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(audio.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let media = client.create_media("alice").await.unwrap().unwrap();
    let media_id = media.media_id.unwrap();

    let recording = client.record_call("alice", &media_id).await.unwrap();
    assert_eq!(recording.unwrap().status, 201);

    let status = client
        .await_recording(&media_id, Duration::from_millis(10), 5)
        .await
        .unwrap()
        .expect("recording never got content");
    let file_size = status.file_size.unwrap();
    assert!(file_size > 0);

    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("m-1.mp3");
    let seen = Arc::new(AtomicU64::new(0));
    let seen_cb = seen.clone();
    let written = client
        .download_file_with_progress(status.download_url.as_deref().unwrap(), &local, move |done, _| {
            seen_cb.store(done, Ordering::SeqCst);
        })
        .await
        .unwrap();

    assert_eq!(written, file_size);
    assert_eq!(seen.load(Ordering::SeqCst), file_size);
    assert_eq!(std::fs::read(&local).unwrap(), audio);
}

#[tokio::test]
async fn test_await_recording_gives_up() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/rest/media/m-2"))
        .respond_with(envelope(tags::MEDIA, json!({ "status": 204 })))
        .expect(3)
        .mount(&server)
        .await;

    let status = client
        .await_recording("m-2", Duration::from_millis(1), 3)
        .await
        .unwrap();
    assert!(status.is_none());
}

#[tokio::test]
async fn test_record_call_gateway_message() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/rest/media/m-1"))
        .respond_with(envelope(
            tags::MEDIA,
            json!({ "status": 502, "message": "Unable to place call" }),
        ))
        .mount(&server)
        .await;

    let err = client.record_call("alice", "m-1").await.unwrap_err();
    assert_eq!(err.code(), 102);
    assert_eq!(err.message(), "Unable to place call");
}

#[tokio::test]
async fn test_blast_call() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/rest/media/m-1"))
        .and(body_string_contains("action=blast"))
        .respond_with(envelope(tags::MEDIA, json!({ "status": 201, "mediaId": "m-1" })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.blast_call("alice", "m-1").await.unwrap().is_some());
    // Blank arguments never reach the server.
    assert!(client.blast_call("", "m-1").await.unwrap().is_none());
    assert!(client.blast_call("alice", "").await.unwrap().is_none());
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_media_status_blank() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/rest/media/m-3"))
        .respond_with(envelope(tags::MEDIA, json!({ "status": 204 })))
        .mount(&server)
        .await;

    assert!(client.get_media_status("m-3").await.unwrap().is_none());
    assert_eq!(client.get_media_status("").await.unwrap_err().code(), 102);
}

#[tokio::test]
async fn test_upload_grant_request() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/rest/media/m-1"))
        .and(body_string_contains("action=upload_grant"))
        .respond_with(envelope(
            tags::UPLOAD,
            json!({ "status": 201, "grantId": "g-77" }),
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/rest/media/foreign"))
        .respond_with(envelope(tags::UPLOAD, json!({ "status": 401 })))
        .mount(&server)
        .await;

    let grant = client.upload_grant_request("m-1").await.unwrap().unwrap();
    assert_eq!(grant.field("grantId").and_then(|v| v.as_str()), Some("g-77"));
    assert!(client.upload_grant_request("foreign").await.unwrap().is_none());
}

#[tokio::test]
async fn test_remove_media() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/rest/media/m-1"))
        .and(body_string_contains("action=remove"))
        .respond_with(envelope(tags::MEDIA, json!({ "status": 200, "mediaId": "m-1" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/rest/media/gone"))
        .respond_with(envelope(tags::MEDIA, json!({ "status": 404 })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/rest/media/locked"))
        .respond_with(envelope(tags::MEDIA, json!({ "status": 401 })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/rest/media/bad"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ErrorResponse": { "status": 400, "message": "Unknown media ID format" }
        })))
        .mount(&server)
        .await;

    let removed = client.remove_media("m-1").await.unwrap().unwrap();
    assert_eq!(removed.media_id.as_deref(), Some("m-1"));

    assert!(client.remove_media("gone").await.unwrap().is_none());

    let err = client.remove_media("locked").await.unwrap_err();
    assert_eq!(err.code(), 103);

    let err = client.remove_media("bad").await.unwrap_err();
    assert_eq!(err.code(), 102);
    assert_eq!(err.message(), "Unknown media ID format");

    let err = client.remove_media("").await.unwrap_err();
    assert_eq!(err.code(), 102);
}

#[tokio::test]
async fn test_download_missing_file() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/files/missing.mp3"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let err = client
        .download_file("files/missing.mp3", &dir.path().join("x.mp3"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), 200);
}

#[tokio::test]
async fn test_truncated_download_leaves_no_file() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\n\r\nID3partial")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let client = common::create_client(&format!("http://{addr}"));
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("m-1.mp3");

    let err = client
        .download_file(&format!("http://{addr}/files/m-1.mp3"), &local)
        .await
        .unwrap_err();
    assert_eq!(err.code(), 200);
    assert!(!local.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_download_replaces_existing_file_only_on_success() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/files/new.mp3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fresh".to_vec()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("take.mp3");
    std::fs::write(&local, b"old").unwrap();

    assert!(client.download_file("files/gone.mp3", &local).await.is_err());
    assert_eq!(std::fs::read(&local).unwrap(), b"old");

    assert_eq!(client.download_file("files/new.mp3", &local).await.unwrap(), 5);
    assert_eq!(std::fs::read(&local).unwrap(), b"fresh");
}
