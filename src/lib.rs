//! Deckdrop - generate a themed slide deck and publish it to Dropbox
//!
//! The crate runs a three stage pipeline:
//!
//! 1. **Fetch**: download one illustration per topic from a keyword image
//!    endpoint ([`fetch`]).
//! 2. **Build**: lay out one slide per entry of the static table in
//!    [`content`] and write it as a `.pptx` package ([`builder`], [`deck`]).
//! 3. **Upload**: push the file to Dropbox in overwrite mode and print a
//!    public direct-download link ([`upload`]).
//!
//! No stage is fatal except writing the deck: a failed image download leaves
//! the slide without a picture, a failed upload leaves the run without a link.
//!
//! # Example - Building the deck offline
//!
//! ```no_run
//! use deckdrop::config::Config;
//!
//! # async fn demo() -> deckdrop::Result<()> {
//! let config = Config::default().with_skip_upload(true);
//! let report = deckdrop::pipeline::run(&config, None).await?;
//! println!("{} slides written to {}", report.slide_count, report.output.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Writing a presentation directly
//!
//! ```no_run
//! use deckdrop::common::inches;
//! use deckdrop::deck::{Package, Presentation};
//!
//! let mut pres = Presentation::new();
//! let slide = pres.add_slide();
//! slide
//!     .add_paragraphs(["first", "second"], inches(1.0), inches(1.0), inches(8.0), inches(4.0))
//!     .font_size(18.0)
//!     .bulleted(true);
//! Package::save(&pres, "list.pptx")?;
//! # Ok::<(), deckdrop::deck::DeckError>(())
//! ```

pub mod builder;
pub mod common;
pub mod config;
pub mod content;
pub mod credential;
pub mod deck;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod upload;

pub use builder::DeckBuilder;
pub use config::Config;
pub use error::{Error, Result};
pub use fetch::{ImageAsset, ImageFetcher, ImageSet};
pub use pipeline::{RunReport, run};
pub use upload::{DropboxClient, UploadResult, direct_download_link};
