//! Dropbox uploader.
//!
//! Uploads the deck with `files/upload` in overwrite mode and turns the
//! resulting file into a public share link that downloads directly.

use std::path::Path;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Result, UploadError};

type ApiResult<T> = std::result::Result<T, UploadError>;

/// Outcome of publishing the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub remote_path: String,
    /// Direct-download link; `None` when any step failed
    pub share_link: Option<String>,
}

#[derive(Serialize)]
struct UploadArg<'a> {
    path: &'a str,
    mode: &'a str,
    autorename: bool,
    mute: bool,
}

#[derive(Serialize)]
struct ShareRequest<'a> {
    path: &'a str,
    settings: ShareSettings<'a>,
}

#[derive(Serialize)]
struct ShareSettings<'a> {
    requested_visibility: &'a str,
}

#[derive(Serialize)]
struct ListLinksRequest<'a> {
    path: &'a str,
    direct_only: bool,
}

#[derive(Deserialize)]
struct SharedLink {
    url: Option<String>,
}

#[derive(Deserialize)]
struct ListLinksResponse {
    #[serde(default)]
    links: Vec<SharedLink>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error_summary: String,
}

/// Minimal Dropbox v2 client authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct DropboxClient {
    client: Client,
    token: String,
    content_url: String,
    api_url: String,
}

impl DropboxClient {
    pub fn new(config: &Config, token: impl Into<String>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.upload_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(UploadError::from)?;

        Ok(Self {
            client,
            token: token.into(),
            content_url: config.content_base_url.trim_end_matches('/').to_string(),
            api_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Upload a local file to `remote_path`, replacing any existing file.
    pub async fn upload(&self, local_path: &Path, remote_path: &str) -> ApiResult<()> {
        let data = tokio::fs::read(local_path).await?;
        let arg = api_arg_header(&UploadArg {
            path: remote_path,
            mode: "overwrite",
            autorename: false,
            mute: false,
        })?;

        log::debug!("uploading {} bytes to {}", data.len(), remote_path);
        let resp = self
            .client
            .post(format!("{}/2/files/upload", self.content_url))
            .bearer_auth(&self.token)
            .header("Dropbox-API-Arg", arg)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(data)
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            let body = resp.text().await.unwrap_or_default();
            return Err(UploadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    /// Create a public share link for `remote_path`.
    ///
    /// When a link already exists, the existing one is looked up instead.
    pub async fn create_shared_link(&self, remote_path: &str) -> ApiResult<String> {
        let resp = self
            .client
            .post(format!(
                "{}/2/sharing/create_shared_link_with_settings",
                self.api_url
            ))
            .bearer_auth(&self.token)
            .json(&ShareRequest {
                path: remote_path,
                settings: ShareSettings {
                    requested_visibility: "public",
                },
            })
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            let link: SharedLink = resp.json().await?;
            return link.url.ok_or(UploadError::MissingLink);
        }

        let body = resp.text().await.unwrap_or_default();
        if status == StatusCode::CONFLICT && is_link_already_exists(&body) {
            log::info!("shared link already exists for {}, reusing it", remote_path);
            return self.existing_shared_link(remote_path).await;
        }

        Err(UploadError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// First existing direct link for `remote_path`.
    pub async fn existing_shared_link(&self, remote_path: &str) -> ApiResult<String> {
        let resp = self
            .client
            .post(format!("{}/2/sharing/list_shared_links", self.api_url))
            .bearer_auth(&self.token)
            .json(&ListLinksRequest {
                path: remote_path,
                direct_only: true,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(UploadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let list: ListLinksResponse = resp.json().await?;
        list.links
            .into_iter()
            .find_map(|link| link.url)
            .ok_or(UploadError::MissingLink)
    }

    /// Upload and share; failures are logged and leave the link empty.
    pub async fn publish(&self, local_path: &Path, remote_path: &str) -> UploadResult {
        let mut result = UploadResult {
            remote_path: remote_path.to_string(),
            share_link: None,
        };

        if let Err(e) = self.upload(local_path, remote_path).await {
            log::error!("Dropbox upload failed: {}", e);
            return result;
        }
        log::info!("uploaded to Dropbox: {}", remote_path);

        match self.create_shared_link(remote_path).await {
            Ok(link) => {
                let link = direct_download_link(&link);
                log::info!("shareable link: {}", link);
                result.share_link = Some(link);
            },
            Err(e) => log::error!("create_shared_link failed: {}", e),
        }

        result
    }
}

/// Rewrite a share link so that it downloads the file instead of previewing it.
///
/// `dl=0` becomes `dl=1`; a link without the flag gets `dl=1` appended.
pub fn direct_download_link(url: &str) -> String {
    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };

    let mut link = match base.split_once('?') {
        Some((path, query)) => {
            let mut found = false;
            let mut params: Vec<&str> = Vec::new();
            for param in query.split('&').filter(|p| !p.is_empty()) {
                if param.starts_with("dl=") {
                    // Keep the first flag only
                    if !found {
                        params.push("dl=1");
                        found = true;
                    }
                } else {
                    params.push(param);
                }
            }
            let mut query = params.join("&");
            if !found {
                if !query.is_empty() {
                    query.push('&');
                }
                query.push_str("dl=1");
            }
            format!("{}?{}", path, query)
        },
        None => format!("{}?dl=1", base),
    };

    if let Some(fragment) = fragment {
        link.push('#');
        link.push_str(fragment);
    }
    link
}

/// JSON for the `Dropbox-API-Arg` header, with non-ASCII escaped as `\uXXXX`.
fn api_arg_header<T: Serialize>(arg: &T) -> ApiResult<String> {
    let json = serde_json::to_string(arg)?;
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    Ok(out)
}

fn is_link_already_exists(body: &str) -> bool {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|e| e.error_summary.starts_with("shared_link_already_exists"))
        .unwrap_or(false)
}
