mod common;

use std::path::{Path, PathBuf};
use std::time::Duration;

use deckdrop::config::Config;
use deckdrop::pipeline;
use deckdrop::upload::DropboxClient;
use mockito::{Matcher, ServerGuard};
use serde_json::json;

const REMOTE: &str = "/AI_in_Mobile_Phones_Droplet.pptx";
const PREVIEW_LINK: &str = "https://www.dropbox.com/s/abc123/AI_in_Mobile_Phones_Droplet.pptx?dl=0";
const DIRECT_LINK: &str = "https://www.dropbox.com/s/abc123/AI_in_Mobile_Phones_Droplet.pptx?dl=1";

fn config_for(server: &ServerGuard) -> Config {
    Config::default()
        .with_dropbox_urls(&server.url(), &server.url())
        .with_upload_timeout(Some(Duration::from_secs(5)))
}

fn local_deck(dir: &Path) -> PathBuf {
    let path = dir.join("deck.pptx");
    std::fs::write(&path, b"PK fake deck").unwrap();
    path
}

fn upload_arg() -> String {
    format!(
        r#"{{"path":"{}","mode":"overwrite","autorename":false,"mute":false}}"#,
        REMOTE
    )
}

#[tokio::test]
async fn test_publish_returns_direct_link() {
    let mut server = mockito::Server::new_async().await;
    let upload = server
        .mock("POST", "/2/files/upload")
        .match_header("authorization", "Bearer sl.test")
        .match_header("dropbox-api-arg", upload_arg().as_str())
        .match_header("content-type", "application/octet-stream")
        .match_body("PK fake deck")
        .with_status(200)
        .with_body(r#"{"name": "AI_in_Mobile_Phones_Droplet.pptx"}"#)
        .create_async()
        .await;
    let share = server
        .mock("POST", "/2/sharing/create_shared_link_with_settings")
        .match_header("authorization", "Bearer sl.test")
        .match_body(Matcher::Json(json!({
            "path": REMOTE,
            "settings": {"requested_visibility": "public"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "url": PREVIEW_LINK }).to_string())
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = DropboxClient::new(&config_for(&server), "sl.test").unwrap();
    let result = client.publish(&local_deck(dir.path()), REMOTE).await;

    upload.assert_async().await;
    share.assert_async().await;
    assert_eq!(result.remote_path, REMOTE);
    assert_eq!(result.share_link.as_deref(), Some(DIRECT_LINK));
    assert!(result.share_link.unwrap().ends_with("dl=1"));
}

#[tokio::test]
async fn test_invalid_token_yields_no_link() {
    let mut server = mockito::Server::new_async().await;
    let upload = server
        .mock("POST", "/2/files/upload")
        .with_status(401)
        .with_body(r#"{"error_summary": "invalid_access_token/"}"#)
        .create_async()
        .await;
    let share = server
        .mock("POST", "/2/sharing/create_shared_link_with_settings")
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = DropboxClient::new(&config_for(&server), "bogus").unwrap();
    let result = client.publish(&local_deck(dir.path()), REMOTE).await;

    upload.assert_async().await;
    share.assert_async().await;
    assert_eq!(result.share_link, None);
}

#[tokio::test]
async fn test_unreachable_endpoint_yields_no_link() {
    let config = Config::default()
        .with_dropbox_urls(common::UNREACHABLE, common::UNREACHABLE)
        .with_upload_timeout(Some(Duration::from_secs(5)));

    let dir = tempfile::tempdir().unwrap();
    let client = DropboxClient::new(&config, "sl.test").unwrap();
    let result = client.publish(&local_deck(dir.path()), REMOTE).await;

    assert_eq!(result.share_link, None);
}

#[tokio::test]
async fn test_share_failure_yields_no_link() {
    let mut server = mockito::Server::new_async().await;
    let _upload = server
        .mock("POST", "/2/files/upload")
        .with_status(200)
        .create_async()
        .await;
    let _share = server
        .mock("POST", "/2/sharing/create_shared_link_with_settings")
        .with_status(400)
        .with_body("missing scope sharing.write")
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = DropboxClient::new(&config_for(&server), "sl.test").unwrap();
    let result = client.publish(&local_deck(dir.path()), REMOTE).await;

    assert_eq!(result.share_link, None);
}

#[tokio::test]
async fn test_existing_link_is_reused() {
    let mut server = mockito::Server::new_async().await;
    let _upload = server
        .mock("POST", "/2/files/upload")
        .with_status(200)
        .create_async()
        .await;
    let _share = server
        .mock("POST", "/2/sharing/create_shared_link_with_settings")
        .with_status(409)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "error_summary": "shared_link_already_exists/..",
                "error": {".tag": "shared_link_already_exists"}
            })
            .to_string(),
        )
        .create_async()
        .await;
    let list = server
        .mock("POST", "/2/sharing/list_shared_links")
        .match_body(Matcher::Json(json!({"path": REMOTE, "direct_only": true})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"links": [{"url": PREVIEW_LINK}], "has_more": false}).to_string())
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = DropboxClient::new(&config_for(&server), "sl.test").unwrap();
    let result = client.publish(&local_deck(dir.path()), REMOTE).await;

    list.assert_async().await;
    assert_eq!(result.share_link.as_deref(), Some(DIRECT_LINK));
}

#[tokio::test]
async fn test_reupload_uses_overwrite_mode() {
    let mut server = mockito::Server::new_async().await;
    let upload = server
        .mock("POST", "/2/files/upload")
        .match_header("dropbox-api-arg", upload_arg().as_str())
        .with_status(200)
        .expect(2)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = local_deck(dir.path());
    let client = DropboxClient::new(&config_for(&server), "sl.test").unwrap();

    client.upload(&path, REMOTE).await.unwrap();
    client.upload(&path, REMOTE).await.unwrap();

    upload.assert_async().await;
}

#[tokio::test]
async fn test_missing_local_file() {
    let server = mockito::Server::new_async().await;
    let client = DropboxClient::new(&config_for(&server), "sl.test").unwrap();

    let result = client
        .publish(Path::new("/nonexistent/deck.pptx"), REMOTE)
        .await;
    assert_eq!(result.share_link, None);
}

#[tokio::test]
async fn test_pipeline_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let images = server
        .mock("GET", Matcher::Regex(r"^/featured/".to_string()))
        .with_status(200)
        .with_body(common::png_bytes(160, 90))
        .expect(12)
        .create_async()
        .await;
    let _upload = server
        .mock("POST", "/2/files/upload")
        .with_status(200)
        .create_async()
        .await;
    let _share = server
        .mock("POST", "/2/sharing/create_shared_link_with_settings")
        .with_status(200)
        .with_body(json!({ "url": PREVIEW_LINK }).to_string())
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server)
        .with_image_base_url(&server.url())
        .with_image_dir(dir.path().join("ppt_images"))
        .with_out_file(dir.path().join("deck.pptx"));

    let report = pipeline::run(&config, Some("sl.test".to_string())).await.unwrap();

    images.assert_async().await;
    assert_eq!(report.slide_count, 12);
    assert_eq!(report.images_available, 12);
    assert_eq!(report.share_link(), Some(DIRECT_LINK));
    assert!(report.completed());

    let slides = deckdrop::deck::read_slides(&std::fs::read(&report.output).unwrap()).unwrap();
    assert!(slides.iter().all(|s| s.has_picture));
}

#[tokio::test]
async fn test_pipeline_without_token_reports_issue() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default()
        .with_skip_images(true)
        .with_out_file(dir.path().join("deck.pptx"));

    let report = pipeline::run(&config, None).await.unwrap();

    assert!(report.output.exists());
    assert_eq!(report.share_link(), None);
    assert!(!report.completed());
}

#[tokio::test]
async fn test_pipeline_save_failure_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default()
        .with_skip_images(true)
        .with_skip_upload(true)
        .with_out_file(dir.path().join("missing").join("deck.pptx"));

    assert!(pipeline::run(&config, None).await.is_err());
}
