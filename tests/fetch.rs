mod common;

use std::time::Duration;

use deckdrop::config::Config;
use deckdrop::fetch::ImageFetcher;
use mockito::Matcher;

fn config_for(base_url: &str, image_dir: &std::path::Path) -> Config {
    Config::default()
        .with_image_base_url(base_url)
        .with_image_dir(image_dir)
        .with_image_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn test_fetch_all_writes_images() {
    let mut server = mockito::Server::new_async().await;
    let body = common::png_bytes(16, 9);
    let mock = server
        .mock("GET", Matcher::Regex(r"^/featured/1600x900/".to_string()))
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(body.clone())
        .expect(2)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image_dir = dir.path().join("ppt_images");
    let fetcher = ImageFetcher::new(&config_for(&server.url(), &image_dir)).unwrap();

    let set = fetcher
        .fetch_all(&[("title", "smartphone,technology"), ("agenda", "icons,agenda")])
        .await;

    mock.assert_async().await;
    assert_eq!(set.available(), 2);
    let path = set.path_for("agenda").unwrap();
    assert_eq!(path, image_dir.join("agenda.jpg"));
    assert_eq!(std::fs::read(path).unwrap(), body);
}

#[tokio::test]
async fn test_query_is_passed_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/featured/1600x900/")
        .match_query(Matcher::Exact("chip,npu".to_string()))
        .with_status(200)
        .with_body(common::png_bytes(2, 2))
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let fetcher = ImageFetcher::new(&config_for(&server.url(), dir.path())).unwrap();
    let asset = fetcher.fetch_one("hardware", "chip,npu").await;

    mock.assert_async().await;
    assert!(asset.local_path.is_some());
}

#[tokio::test]
async fn test_http_error_marks_image_missing() {
    let mut server = mockito::Server::new_async().await;
    let _agenda = server
        .mock("GET", "/featured/1600x900/")
        .match_query(Matcher::Exact("icons,agenda".to_string()))
        .with_status(503)
        .create_async()
        .await;
    let _title = server
        .mock("GET", "/featured/1600x900/")
        .match_query(Matcher::Exact("smartphone,technology".to_string()))
        .with_status(200)
        .with_body(common::png_bytes(4, 4))
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let fetcher = ImageFetcher::new(&config_for(&server.url(), dir.path())).unwrap();
    let set = fetcher
        .fetch_all(&[("title", "smartphone,technology"), ("agenda", "icons,agenda")])
        .await;

    assert_eq!(set.len(), 2);
    assert_eq!(set.available(), 1);
    assert!(set.path_for("title").is_some());
    assert!(set.path_for("agenda").is_none());
    assert!(!dir.path().join("agenda.jpg").exists());
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ImageFetcher::new(&config_for(common::UNREACHABLE, dir.path())).unwrap();

    let set = fetcher.fetch_all(&[("title", "smartphone,technology")]).await;
    assert_eq!(set.len(), 1);
    assert_eq!(set.available(), 0);
}

#[tokio::test]
async fn test_uncreatable_image_dir() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let fetcher = ImageFetcher::new(&config_for(common::UNREACHABLE, &blocker.join("images"))).unwrap();
    let set = fetcher
        .fetch_all(&[("title", "a"), ("agenda", "b")])
        .await;

    assert_eq!(set.len(), 2);
    assert_eq!(set.available(), 0);
}
