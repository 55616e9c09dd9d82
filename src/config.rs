//! Run configuration.
//!
//! Defaults come from [`crate::content`]; environment variables (optionally
//! from a `.env` file) override them, and the CLI overrides both through the
//! `with_*` methods.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::content::{DEFAULT_IMAGE_DIR, DEFAULT_OUT_FILE, DEFAULT_REMOTE_PATH};

/// Default keyword image endpoint.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://source.unsplash.com";
/// Default Dropbox content endpoint (file transfer).
pub const DEFAULT_CONTENT_URL: &str = "https://content.dropboxapi.com";
/// Default Dropbox RPC endpoint (sharing).
pub const DEFAULT_API_URL: &str = "https://api.dropboxapi.com";
/// Default environment variable holding the access token.
pub const DEFAULT_TOKEN_ENV: &str = "DROPBOX_TOKEN";

/// Settings for one run of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Local deck path
    pub out_file: PathBuf,
    /// Directory receiving downloaded images
    pub image_dir: PathBuf,
    /// Destination path in the Dropbox account
    pub remote_path: String,
    pub image_base_url: String,
    pub content_base_url: String,
    pub api_base_url: String,
    /// Requested image size in pixels
    pub image_width: u32,
    pub image_height: u32,
    pub image_timeout: Duration,
    /// Timeout for each Dropbox request; `None` waits indefinitely
    pub upload_timeout: Option<Duration>,
    /// Skip the download stage; slides are built without pictures
    pub skip_images: bool,
    /// Stop after writing the deck
    pub skip_upload: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_file: PathBuf::from(DEFAULT_OUT_FILE),
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            remote_path: DEFAULT_REMOTE_PATH.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            content_base_url: DEFAULT_CONTENT_URL.to_string(),
            api_base_url: DEFAULT_API_URL.to_string(),
            image_width: 1600,
            image_height: 900,
            image_timeout: Duration::from_secs(15),
            upload_timeout: None,
            skip_images: false,
            skip_upload: false,
        }
    }
}

impl Config {
    /// Defaults overridden by environment variables.
    ///
    /// Unparseable numeric values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = var("DECKDROP_OUT_FILE") {
            config.out_file = PathBuf::from(v);
        }
        if let Some(v) = var("DECKDROP_IMAGE_DIR") {
            config.image_dir = PathBuf::from(v);
        }
        if let Some(v) = var("DECKDROP_REMOTE_PATH") {
            config.remote_path = v;
        }
        if let Some(v) = var("DECKDROP_IMAGE_BASE_URL") {
            config.image_base_url = trim_base(&v);
        }
        if let Some(v) = var("DROPBOX_CONTENT_URL") {
            config.content_base_url = trim_base(&v);
        }
        if let Some(v) = var("DROPBOX_API_URL") {
            config.api_base_url = trim_base(&v);
        }
        if let Some(secs) = var("DECKDROP_IMAGE_TIMEOUT_SECS").and_then(|v| parse_secs("DECKDROP_IMAGE_TIMEOUT_SECS", &v)) {
            config.image_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = var("DECKDROP_UPLOAD_TIMEOUT_SECS").and_then(|v| parse_secs("DECKDROP_UPLOAD_TIMEOUT_SECS", &v)) {
            config.upload_timeout = Some(Duration::from_secs(secs));
        }

        config
    }

    pub fn with_out_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.out_file = path.as_ref().to_path_buf();
        self
    }

    pub fn with_image_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.image_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn with_remote_path(mut self, path: impl Into<String>) -> Self {
        self.remote_path = path.into();
        self
    }

    pub fn with_image_base_url(mut self, url: &str) -> Self {
        self.image_base_url = trim_base(url);
        self
    }

    /// Point both Dropbox endpoints elsewhere.
    pub fn with_dropbox_urls(mut self, content_url: &str, api_url: &str) -> Self {
        self.content_base_url = trim_base(content_url);
        self.api_base_url = trim_base(api_url);
        self
    }

    pub fn with_image_size(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    pub fn with_image_timeout(mut self, timeout: Duration) -> Self {
        self.image_timeout = timeout;
        self
    }

    pub fn with_upload_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.upload_timeout = timeout;
        self
    }

    pub fn with_skip_images(mut self, skip: bool) -> Self {
        self.skip_images = skip;
        self
    }

    pub fn with_skip_upload(mut self, skip: bool) -> Self {
        self.skip_upload = skip;
        self
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_secs(key: &str, value: &str) -> Option<u64> {
    match value.trim().parse::<u64>() {
        Ok(secs) => Some(secs),
        Err(e) => {
            log::warn!("ignoring {}={:?}: {}", key, value, e);
            None
        },
    }
}
