//! Deck builder.
//!
//! Turns the slide table plus whatever images were fetched into a themed
//! [`Presentation`]. Per-slide problems (an unreadable picture) are logged
//! and skipped; only writing the file can fail.

use std::path::Path;

use crate::common::inches;
use crate::content::{SlideSpec, Theme};
use crate::deck::{Package, Presentation, Slide};
use crate::error::Result;
use crate::fetch::ImageSet;

/// Lays out slides with a fixed [`Theme`].
#[derive(Debug, Clone, Copy)]
pub struct DeckBuilder {
    theme: Theme,
    title: Option<&'static str>,
}

impl DeckBuilder {
    pub fn new(theme: Theme) -> Self {
        Self { theme, title: None }
    }

    /// Document title written into the package properties.
    pub fn with_title(mut self, title: &'static str) -> Self {
        self.title = Some(title);
        self
    }

    /// Build one slide per descriptor, in order.
    pub fn build(&self, slides: &[SlideSpec], images: &ImageSet) -> Presentation {
        let mut pres = Presentation::new();
        pres.set_slide_width(inches(self.theme.slide_size.0));
        pres.set_slide_height(inches(self.theme.slide_size.1));
        if let Some(title) = self.title {
            pres.set_title(title);
        }

        for spec in slides {
            let (width, height) = (pres.slide_width(), pres.slide_height());
            let slide = pres.add_slide();
            self.draw_slide(slide, spec, images.path_for(spec.image_key), width, height);
        }

        log::info!("built {} slides", pres.slide_count());
        pres
    }

    /// Serialize the deck to `path`.
    pub fn save<P: AsRef<Path>>(pres: &Presentation, path: P) -> Result<()> {
        let path = path.as_ref();
        Package::save(pres, path)?;
        log::info!("saved presentation to {}", path.display());
        Ok(())
    }

    fn draw_slide(
        &self,
        slide: &mut Slide,
        spec: &SlideSpec,
        image: Option<&Path>,
        width: i64,
        height: i64,
    ) {
        let theme = &self.theme;

        slide
            .add_rectangle(0, 0, width, height, Some(theme.background))
            .no_line();

        let b = theme.title_box;
        slide
            .add_text_box(spec.title, inches(b.x), inches(b.y), inches(b.width), inches(b.height))
            .font_size(theme.title_size)
            .bold(theme.title_bold)
            .color(theme.title_color);

        let b = theme.body_box;
        slide
            .add_paragraphs(
                spec.bullets.iter().copied(),
                inches(b.x),
                inches(b.y),
                inches(b.width),
                inches(b.height),
            )
            .font_size(theme.body_size)
            .color(theme.body_color)
            .bulleted(true);

        if let Some(path) = image.filter(|p| p.exists()) {
            let (x, y) = theme.picture_origin;
            if let Err(e) = slide.add_picture(path, inches(x), inches(y), inches(theme.picture_width), None) {
                log::warn!("insert image failed: {} ({})", e, path.display());
            }
        }

        let b = theme.footer_box;
        slide.add_text_box(
            theme.footer_text,
            inches(b.x),
            inches(b.y),
            inches(b.width),
            inches(b.height),
        );

        slide.set_notes(spec.notes);
    }
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}
