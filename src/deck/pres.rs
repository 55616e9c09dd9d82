/// In-memory presentation and `ppt/presentation.xml` generation.
use std::fmt::Write as FmtWrite;

use super::error::Result;
use super::format::ImageFormat;
use super::slide::Slide;

/// First slide ID; lower values are reserved by PresentationML.
const FIRST_SLIDE_ID: u32 = 256;

/// A presentation being assembled slide by slide.
#[derive(Debug)]
pub struct Presentation {
    /// Slides in presentation order
    pub(crate) slides: Vec<Slide>,
    /// Slide width in EMUs (914400 EMU = 1 inch)
    slide_width: i64,
    /// Slide height in EMUs
    slide_height: i64,
    /// Document title for the core properties
    title: Option<String>,
}

/// Relationship IDs of `presentation.xml`, allocated by the package writer.
#[derive(Debug, Clone)]
pub(crate) struct PresentationRels<'a> {
    pub master: &'a str,
    pub notes_master: Option<&'a str>,
    pub slides: &'a [String],
}

impl Presentation {
    /// Create an empty presentation, 10" x 7.5" (4:3).
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            slide_width: 9_144_000,
            slide_height: 6_858_000,
            title: None,
        }
    }

    /// Append a new blank slide and return it.
    pub fn add_slide(&mut self) -> &mut Slide {
        let slide_id = FIRST_SLIDE_ID + self.slides.len() as u32;
        self.slides.push(Slide::new(slide_id));
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Slide width in EMUs.
    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    pub fn set_slide_width(&mut self, width: i64) {
        self.slide_width = width;
    }

    /// Slide height in EMUs.
    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    pub fn set_slide_height(&mut self, height: i64) {
        self.slide_height = height;
    }

    /// Set the document title stored in `docProps/core.xml`.
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn has_notes(&self) -> bool {
        self.slides.iter().any(Slide::has_notes)
    }

    /// All images of all slides as `(slide_index, bytes, format)`.
    pub(crate) fn collect_all_images(&self) -> Vec<(usize, &[u8], ImageFormat)> {
        self.slides
            .iter()
            .enumerate()
            .flat_map(|(index, slide)| {
                slide
                    .collect_images()
                    .into_iter()
                    .map(move |(data, format)| (index, data, format))
            })
            .collect()
    }

    /// Generate `presentation.xml` with the given relationship IDs.
    pub(crate) fn to_xml(&self, rels: &PresentationRels<'_>) -> Result<String> {
        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#);
        xml.push_str(r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">"#);

        xml.push_str("<p:sldMasterIdLst>");
        write!(xml, r#"<p:sldMasterId id="2147483648" r:id="{}"/>"#, rels.master)?;
        xml.push_str("</p:sldMasterIdLst>");

        if let Some(notes_master) = rels.notes_master {
            xml.push_str("<p:notesMasterIdLst>");
            write!(xml, r#"<p:notesMasterId r:id="{}"/>"#, notes_master)?;
            xml.push_str("</p:notesMasterIdLst>");
        }

        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, rel_id) in self.slides.iter().zip(rels.slides) {
                write!(xml, r#"<p:sldId id="{}" r:id="{}"/>"#, slide.slide_id(), rel_id)?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}" type="screen4x3"/>"#,
            self.slide_width, self.slide_height
        )?;
        xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        xml.push_str("</p:presentation>");

        Ok(xml)
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}
