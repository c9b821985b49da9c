use initializr_core::{ArchiveDownloader, WizardError};
use std::time::{Duration, Instant};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn downloader(server: &MockServer, base_path: &str, dir: &std::path::Path) -> ArchiveDownloader {
    let base = Url::parse(&format!("{}{}", server.uri(), base_path)).unwrap();
    ArchiveDownloader::with_timeout(
        base,
        dir.to_path_buf(),
        "initializr-test",
        Duration::from_millis(200),
    )
}

#[tokio::test]
async fn test_stalled_archive_times_out_as_download_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/starter.zip"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"PK".to_vec())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let started = Instant::now();
    let err = downloader(&server, "/starter.zip", dir.path())
        .download("artifactId=shop", "shop")
        .await
        .unwrap_err();

    match &err {
        WizardError::Download { url, .. } => assert!(url.ends_with("/starter.zip?artifactId=shop")),
        other => panic!("expected download error, got {other:?}"),
    }
    assert!(started.elapsed() < Duration::from_secs(4));
    assert!(!dir.path().join("shop.zip").exists());
}

#[tokio::test]
async fn test_base_query_survives_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/starter.zip"))
        .and(query_param("ref", "cli"))
        .and(query_param("artifactId", "shop"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let written = downloader(&server, "/starter.zip?ref=cli", dir.path())
        .download("type=maven-project&artifactId=shop", "shop")
        .await
        .unwrap();

    assert_eq!(written, dir.path().join("shop.zip"));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("ref=cli&type=maven-project&artifactId=shop")
    );
}
