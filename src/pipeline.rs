//! End-to-end run: fetch images, build and save the deck, upload it.

use std::fmt;
use std::path::PathBuf;

use crate::builder::DeckBuilder;
use crate::config::Config;
use crate::content::{DECK_TITLE, IMAGE_QUERIES, SLIDES, THEME};
use crate::deck::inspect;
use crate::error::Result;
use crate::fetch::{ImageFetcher, ImageSet};
use crate::upload::{DropboxClient, UploadResult};

/// Pipeline stages, reported as they start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Download,
    Build,
    Upload,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Download => write!(f, "Downloading images..."),
            Stage::Build => write!(f, "Building presentation..."),
            Stage::Upload => write!(f, "Uploading to Dropbox..."),
        }
    }
}

/// Summary of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub slide_count: usize,
    pub images_available: usize,
    pub images_requested: usize,
    pub output: PathBuf,
    /// `None` when the upload was skipped on purpose
    pub upload: Option<UploadResult>,
}

impl RunReport {
    /// The share link, if one was produced.
    pub fn share_link(&self) -> Option<&str> {
        self.upload.as_ref()?.share_link.as_deref()
    }

    /// True when a link was produced or the upload was skipped on purpose.
    pub fn completed(&self) -> bool {
        match &self.upload {
            Some(result) => result.share_link.is_some(),
            None => true,
        }
    }

    /// Process exit status: 1 only when `strict` and no link was produced.
    pub fn exit_code(&self, strict: bool) -> u8 {
        if strict && !self.completed() { 1 } else { 0 }
    }

    /// Final line printed after the run.
    pub fn closing_message(&self) -> &'static str {
        match &self.upload {
            None => "Done. Presentation saved locally; upload skipped.",
            Some(result) if result.share_link.is_some() => {
                "Done. Use the link above to download the PPTX."
            },
            Some(_) => "Upload completed with issues. Check errors above.",
        }
    }
}

/// Process exit status for a finished run. A run that could not save the
/// deck always fails.
pub fn exit_code(outcome: &Result<RunReport>, strict: bool) -> u8 {
    match outcome {
        Ok(report) => report.exit_code(strict),
        Err(_) => 1,
    }
}

/// Run every stage without progress output.
pub async fn run(config: &Config, token: Option<String>) -> Result<RunReport> {
    run_with_progress(config, token, |_| {}).await
}

/// Run every stage, calling `progress` as each one starts.
///
/// Only a failure to write the deck is returned as an error; download and
/// upload problems are logged and reflected in the report.
pub async fn run_with_progress<F>(
    config: &Config,
    token: Option<String>,
    mut progress: F,
) -> Result<RunReport>
where
    F: FnMut(Stage),
{
    progress(Stage::Download);
    let images = if config.skip_images {
        log::info!("image download disabled");
        ImageSet::new()
    } else {
        collect_images(ImageFetcher::new(config)).await
    };

    progress(Stage::Build);
    let builder = DeckBuilder::new(THEME).with_title(DECK_TITLE);
    let pres = builder.build(SLIDES, &images);
    DeckBuilder::save(&pres, &config.out_file)?;
    verify_saved(&config.out_file, pres.slide_count()).await;

    if !config.skip_upload {
        progress(Stage::Upload);
    }
    let upload = match token {
        _ if config.skip_upload => {
            log::info!("upload skipped");
            None
        },
        None => {
            log::error!("no Dropbox token, cannot upload");
            Some(unpublished(config))
        },
        Some(token) => Some(publish_with(DropboxClient::new(config, token), config).await),
    };

    Ok(RunReport {
        slide_count: pres.slide_count(),
        images_available: images.available(),
        images_requested: if config.skip_images { 0 } else { IMAGE_QUERIES.len() },
        output: config.out_file.clone(),
        upload,
    })
}

/// Download every topic image, or none when the fetcher could not be built.
async fn collect_images(fetcher: Result<ImageFetcher>) -> ImageSet {
    match fetcher {
        Ok(fetcher) => fetcher.fetch_all(IMAGE_QUERIES).await,
        Err(e) => {
            log::error!("image download unavailable: {}", e);
            ImageSet::new()
        },
    }
}

/// Upload the saved deck, or report a missing link when the client could
/// not be built.
async fn publish_with(client: Result<DropboxClient>, config: &Config) -> UploadResult {
    match client {
        Ok(client) => client.publish(&config.out_file, &config.remote_path).await,
        Err(e) => {
            log::error!("upload unavailable: {}", e);
            unpublished(config)
        },
    }
}

fn unpublished(config: &Config) -> UploadResult {
    UploadResult {
        remote_path: config.remote_path.clone(),
        share_link: None,
    }
}

/// Read the written deck back and compare its slide count.
async fn verify_saved(path: &std::path::Path, expected: usize) {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("cannot reread {}: {}", path.display(), e);
            return;
        },
    };
    match inspect::read_slides(&bytes) {
        Ok(slides) if slides.len() == expected => {
            log::info!("verified {} slides in {}", slides.len(), path.display());
        },
        Ok(slides) => log::warn!(
            "{} holds {} slides, expected {}",
            path.display(),
            slides.len(),
            expected
        ),
        Err(e) => log::warn!("cannot inspect {}: {}", path.display(), e),
    }
}
