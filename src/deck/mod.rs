//! PowerPoint (.pptx) presentation writer.
//!
//! Builds a [`Presentation`] in memory out of slides carrying text boxes,
//! filled rectangles, pictures and speaker notes, then serializes it as an
//! Open Packaging Conventions ZIP with [`Package`].
//!
//! # Example
//!
//! ```no_run
//! use deckdrop::common::inches;
//! use deckdrop::deck::{Package, Presentation};
//!
//! let mut pres = Presentation::new();
//! let slide = pres.add_slide();
//! slide.add_rectangle(0, 0, inches(10.0), inches(7.5), Some("008A92"));
//! slide
//!     .add_text_box("Hello", inches(0.5), inches(0.4), inches(9.0), inches(1.2))
//!     .font_size(34.0)
//!     .bold(true);
//! slide.set_notes("Say hello.");
//!
//! Package::save(&pres, "hello.pptx")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod constants;
pub mod error;
pub mod format;
pub mod inspect;
pub mod package;
pub mod pres;
pub(crate) mod relmap;
pub mod shape;
pub mod slide;
pub mod template;

pub use error::{DeckError, Result};
pub use format::{ImageFormat, TextFormat};
pub use inspect::{SlideSummary, read_slides};
pub use package::Package;
pub use pres::Presentation;
pub use shape::{Frame, Shape};
pub use slide::Slide;
