mod common;

use axum::http::StatusCode;
use axum::Router;
use sha1::{Digest, Sha1};

use common::{chunked, counted, failing, serve, Hits};
use mcserver_lib::core::downloader::{ArtifactFetcher, FetchOutcome};
use mcserver_lib::{ErrorCategory, LauncherError};

const TEST_SIZE: usize = 1024 * 1024; // 1 MB

fn jar_bytes() -> Vec<u8> {
    (0..TEST_SIZE).map(|i| (i % 251) as u8).collect()
}

fn sha1_hex(bytes: &[u8]) -> String {
    hex::encode(Sha1::digest(bytes))
}

#[tokio::test]
async fn test_second_ensure_makes_no_request() {
    let hits = Hits::default();
    let addr = serve(|_| Router::new().route("/server.jar", counted(jar_bytes(), &hits))).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("server.jar");
    let url = format!("http://{addr}/server.jar");

    let fetcher = ArtifactFetcher::new(reqwest::Client::new(), &dest);
    let first = fetcher.ensure(&url, None).await.unwrap();
    let second = fetcher.ensure(&url, None).await.unwrap();

    assert_eq!(first, FetchOutcome::Downloaded { bytes: TEST_SIZE as u64 });
    assert_eq!(second, FetchOutcome::AlreadyPresent);
    assert_eq!(hits.count(), 1);
    assert_eq!(std::fs::read(&dest).unwrap(), jar_bytes());
}

#[tokio::test]
async fn test_matching_sha1_is_accepted() {
    let addr = serve(|_| Router::new().route("/server.jar", counted(jar_bytes(), &Hits::default()))).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("server.jar");

    let fetcher = ArtifactFetcher::new(reqwest::Client::new(), &dest);
    let expected = sha1_hex(&jar_bytes()).to_uppercase();
    fetcher
        .ensure(&format!("http://{addr}/server.jar"), Some(&expected))
        .await
        .unwrap();

    assert!(dest.exists());
    assert!(!dir.path().join("server.jar.part").exists());
}

#[tokio::test]
async fn test_sha1_mismatch_leaves_nothing_behind() {
    let addr = serve(|_| Router::new().route("/server.jar", counted(jar_bytes(), &Hits::default()))).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("server.jar");

    let fetcher = ArtifactFetcher::new(reqwest::Client::new(), &dest);
    let err = fetcher
        .ensure(
            &format!("http://{addr}/server.jar"),
            Some("0000000000000000000000000000000000000000"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, LauncherError::Sha1Mismatch { .. }));
    assert!(!dest.exists());
    assert!(!dir.path().join("server.jar.part").exists());
}

#[tokio::test]
async fn test_error_status_is_network_error() {
    let hits = Hits::default();
    let addr = serve(|_| Router::new().route("/server.jar", failing(StatusCode::NOT_FOUND, &hits))).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("server.jar");

    let fetcher = ArtifactFetcher::new(reqwest::Client::new(), &dest);
    let err = fetcher
        .ensure(&format!("http://{addr}/server.jar"), None)
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Network);
    assert!(!dest.exists());
    assert!(!dir.path().join("server.jar.part").exists());

    // Nothing was written, so the next run tries again.
    fetcher
        .ensure(&format!("http://{addr}/server.jar"), None)
        .await
        .unwrap_err();
    assert_eq!(hits.count(), 2);
}

#[tokio::test]
async fn test_creates_missing_server_directory() {
    let addr = serve(|_| Router::new().route("/server.jar", counted("jar", &Hits::default()))).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("servers").join("survival").join("server.jar");

    let fetcher = ArtifactFetcher::new(reqwest::Client::new(), &dest);
    fetcher
        .ensure(&format!("http://{addr}/server.jar"), None)
        .await
        .unwrap();

    assert_eq!(std::fs::read(&dest).unwrap(), b"jar");
}

#[tokio::test]
async fn test_download_without_content_length() {
    let hits = Hits::default();
    let addr = serve(|_| Router::new().route("/server.jar", chunked(jar_bytes(), &hits))).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("server.jar");
    let url = format!("http://{addr}/server.jar");

    let head = reqwest::get(&url).await.unwrap();
    assert!(head.content_length().is_none());

    let fetcher = ArtifactFetcher::new(reqwest::Client::new(), &dest)
        .with_expected_size(Some(TEST_SIZE as u64));
    let outcome = fetcher
        .ensure(&url, Some(&sha1_hex(&jar_bytes())))
        .await
        .unwrap();

    assert_eq!(outcome, FetchOutcome::Downloaded { bytes: TEST_SIZE as u64 });
    assert_eq!(std::fs::read(&dest).unwrap(), jar_bytes());
    assert_eq!(hits.count(), 2);
}

#[tokio::test]
async fn test_advertised_size_mismatch_is_not_fatal() {
    let addr = serve(|_| Router::new().route("/server.jar", counted("jar", &Hits::default()))).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("server.jar");

    let fetcher = ArtifactFetcher::new(reqwest::Client::new(), &dest).with_expected_size(Some(999));
    let outcome = fetcher
        .ensure(&format!("http://{addr}/server.jar"), None)
        .await
        .unwrap();

    assert_eq!(outcome, FetchOutcome::Downloaded { bytes: 3 });
    assert_eq!(std::fs::read(&dest).unwrap(), b"jar");
}
