//! Image fetcher.
//!
//! Downloads one illustration per topic from a keyword image endpoint into
//! the image directory. Failures never abort the run: the topic is simply
//! recorded as unavailable.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use reqwest::Client;

use crate::config::Config;
use crate::error::{FetchError, Result};

/// A downloaded illustration, or the absence of one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub key: String,
    /// `None` when the download failed
    pub local_path: Option<PathBuf>,
}

impl ImageAsset {
    pub fn available(key: &str, path: PathBuf) -> Self {
        Self {
            key: key.to_string(),
            local_path: Some(path),
        }
    }

    pub fn missing(key: &str) -> Self {
        Self {
            key: key.to_string(),
            local_path: None,
        }
    }
}

/// Image assets keyed by topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    assets: BTreeMap<String, ImageAsset>,
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset: ImageAsset) {
        self.assets.insert(asset.key.clone(), asset);
    }

    /// Local path for a key, if its download succeeded.
    pub fn path_for(&self, key: &str) -> Option<&Path> {
        self.assets.get(key)?.local_path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&ImageAsset> {
        self.assets.get(key)
    }

    /// Number of assets with a local file.
    pub fn available(&self) -> usize {
        self.assets
            .values()
            .filter(|a| a.local_path.is_some())
            .count()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// HTTP client for the keyword image endpoint.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: Client,
    base_url: String,
    image_dir: PathBuf,
    width: u32,
    height: u32,
}

impl ImageFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.image_timeout)
            .build()
            .map_err(FetchError::from)?;

        Ok(Self {
            client,
            base_url: config.image_base_url.trim_end_matches('/').to_string(),
            image_dir: config.image_dir.clone(),
            width: config.image_width,
            height: config.image_height,
        })
    }

    /// `{base}/featured/{w}x{h}/?{query}`
    pub fn image_url(&self, query: &str) -> String {
        format!(
            "{}/featured/{}x{}/?{}",
            self.base_url, self.width, self.height, query
        )
    }

    /// Where the image for `key` is stored.
    pub fn local_path(&self, key: &str) -> PathBuf {
        self.image_dir.join(format!("{}.jpg", key))
    }

    /// Download one image, propagating the failure.
    pub async fn try_fetch(&self, key: &str, query: &str) -> std::result::Result<PathBuf, FetchError> {
        let url = self.image_url(query);
        log::debug!("GET {}", url);

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status()));
        }
        let bytes = resp.bytes().await?;

        let path = self.local_path(key);
        tokio::fs::write(&path, &bytes).await?;
        log::debug!("saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    /// Download one image; any failure yields a missing asset.
    pub async fn fetch_one(&self, key: &str, query: &str) -> ImageAsset {
        match self.try_fetch(key, query).await {
            Ok(path) => ImageAsset::available(key, path),
            Err(e) => {
                log::warn!("image download failed for {}: {}", key, e);
                ImageAsset::missing(key)
            },
        }
    }

    /// Download every `(key, query)` pair in order, one request at a time.
    pub async fn fetch_all(&self, queries: &[(&str, &str)]) -> ImageSet {
        let mut set = ImageSet::new();

        if let Err(e) = tokio::fs::create_dir_all(&self.image_dir).await {
            log::error!(
                "cannot create image directory {}: {}",
                self.image_dir.display(),
                e
            );
            for (key, _) in queries {
                set.insert(ImageAsset::missing(key));
            }
            return set;
        }

        for (key, query) in queries {
            set.insert(self.fetch_one(key, query).await);
        }

        log::info!("{} of {} images available", set.available(), set.len());
        set
    }
}
