/// Slide type and slide/notes part generation.
use crate::common::escape_xml;
use crate::common::unit::scaled_height;
use std::fmt::Write as FmtWrite;
use std::path::Path;

use super::error::{DeckError, Result};
use super::format::ImageFormat;
use super::relmap::RelationshipMapper;
use super::shape::{Frame, Shape};

/// A slide under construction.
///
/// Shapes are drawn in insertion order, so the first shape added sits at the
/// back of the z-order.
#[derive(Debug, Clone)]
pub struct Slide {
    /// Slide ID as written to `p:sldId/@id`
    pub(crate) slide_id: u32,
    /// Shapes on the slide
    pub(crate) shapes: Vec<Shape>,
    /// Speaker notes for the slide
    pub(crate) notes: Option<String>,
}

impl Slide {
    pub(crate) fn new(slide_id: u32) -> Self {
        Self {
            slide_id,
            shapes: Vec::new(),
            notes: None,
        }
    }

    /// Get the slide ID.
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    // IDs: 1=group, 2+=shapes
    fn next_shape_id(&self) -> u32 {
        (self.shapes.len() + 2) as u32
    }

    fn push(&mut self, shape: Shape) -> &mut Shape {
        self.shapes.push(shape);
        let last = self.shapes.len() - 1;
        &mut self.shapes[last]
    }

    /// Add a single-paragraph text box.
    pub fn add_text_box(&mut self, text: &str, x: i64, y: i64, width: i64, height: i64) -> &mut Shape {
        self.add_paragraphs([text], x, y, width, height)
    }

    /// Add a text box with one paragraph per item.
    pub fn add_paragraphs<I, S>(&mut self, paragraphs: I, x: i64, y: i64, width: i64, height: i64) -> &mut Shape
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paragraphs = paragraphs.into_iter().map(Into::into).collect();
        let shape = Shape::new_text_box(self.next_shape_id(), paragraphs, Frame::new(x, y, width, height));
        self.push(shape)
    }

    /// Add a rectangle, optionally filled with a solid hex RGB color.
    pub fn add_rectangle(&mut self, x: i64, y: i64, width: i64, height: i64, fill_color: Option<&str>) -> &mut Shape {
        let shape = Shape::new_rectangle(
            self.next_shape_id(),
            Frame::new(x, y, width, height),
            fill_color.map(str::to_string),
        );
        self.push(shape)
    }

    /// Add a picture from a file.
    ///
    /// When `height` is `None` it is derived from the picture's pixel
    /// dimensions so that the aspect ratio is kept.
    pub fn add_picture<P: AsRef<Path>>(
        &mut self,
        image_path: P,
        x: i64,
        y: i64,
        width: i64,
        height: Option<i64>,
    ) -> Result<&mut Shape> {
        let image_path = image_path.as_ref();
        let data = std::fs::read(image_path)?;
        let description = image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Picture".to_string());
        self.add_picture_from_bytes(data, x, y, width, height, Some(description))
    }

    /// Add a picture from encoded image bytes.
    pub fn add_picture_from_bytes(
        &mut self,
        data: Vec<u8>,
        x: i64,
        y: i64,
        width: i64,
        height: Option<i64>,
        description: Option<String>,
    ) -> Result<&mut Shape> {
        let format = ImageFormat::detect_from_bytes(&data)
            .ok_or_else(|| DeckError::InvalidFormat("Unknown image format".to_string()))?;

        let height = match height {
            Some(h) => h,
            None => {
                let (px_w, px_h) = ImageFormat::pixel_dimensions(&data).ok_or_else(|| {
                    DeckError::InvalidFormat("Cannot read image dimensions".to_string())
                })?;
                scaled_height(width, px_w, px_h)
                    .ok_or_else(|| DeckError::InvalidFormat("Image has zero width".to_string()))?
            },
        };

        let desc = description.unwrap_or_else(|| "Picture".to_string());
        let shape = Shape::new_picture(
            self.next_shape_id(),
            data,
            format,
            Frame::new(x, y, width, height),
            desc,
        );
        Ok(self.push(shape))
    }

    /// Set speaker notes for the slide.
    pub fn set_notes(&mut self, notes: &str) {
        self.notes = Some(notes.to_string());
    }

    /// Get the speaker notes for the slide.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn has_notes(&self) -> bool {
        self.notes.is_some()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn has_picture(&self) -> bool {
        self.shapes.iter().any(Shape::is_picture)
    }

    /// Text of the first text box on the slide, which by convention holds the title.
    pub fn title_text(&self) -> Option<&str> {
        self.shapes
            .iter()
            .find_map(Shape::paragraphs)
            .and_then(|p| p.first())
            .map(String::as_str)
    }

    /// Collect all images from this slide, in shape order.
    pub(crate) fn collect_images(&self) -> Vec<(&[u8], ImageFormat)> {
        self.shapes.iter().filter_map(Shape::image_data).collect()
    }

    /// Generate slide XML with the relationship IDs allocated for this slide.
    pub(crate) fn to_xml(&self, slide_index: usize, rel_mapper: &RelationshipMapper) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#);
        xml.push_str(r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#);

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");
        write_group_properties(&mut xml);

        let mut image_counter = 0;
        for shape in &self.shapes {
            let rel_id = if shape.is_picture() {
                let rid = rel_mapper.image_id(slide_index, image_counter);
                image_counter += 1;
                rid
            } else {
                None
            };
            shape.to_xml(&mut xml, rel_id)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.push_str("</p:sld>");

        Ok(xml)
    }

    /// Generate notes slide XML, or `None` when the slide has no notes.
    ///
    /// Each line of the notes becomes its own paragraph.
    pub(crate) fn notes_xml(&self) -> Option<Result<String>> {
        let notes_text = self.notes.as_ref()?;
        Some(build_notes_xml(notes_text))
    }
}

fn write_group_properties(xml: &mut String) {
    xml.push_str("<p:nvGrpSpPr>");
    xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
    xml.push_str("<p:cNvGrpSpPr/>");
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvGrpSpPr>");
    xml.push_str("<p:grpSpPr>");
    xml.push_str(r#"<a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#);
    xml.push_str(r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm>"#);
    xml.push_str("</p:grpSpPr>");
}

fn build_notes_xml(notes_text: &str) -> Result<String> {
    let mut xml = String::with_capacity(2048);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<p:notes xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
    xml.push_str(r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#);
    xml.push_str(r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#);

    xml.push_str("<p:cSld>");
    xml.push_str("<p:spTree>");
    write_group_properties(&mut xml);

    // Slide thumbnail placeholder
    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    xml.push_str(r#"<p:cNvPr id="2" name="Slide Image Placeholder 1"/>"#);
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1" noRot="1" noChangeAspect="1"/></p:cNvSpPr>"#);
    xml.push_str(r#"<p:nvPr><p:ph type="sldImg"/></p:nvPr>"#);
    xml.push_str("</p:nvSpPr>");
    xml.push_str("<p:spPr/>");
    xml.push_str("</p:sp>");

    // Notes text
    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    xml.push_str(r#"<p:cNvPr id="3" name="Notes Placeholder 2"/>"#);
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    xml.push_str(r#"<p:nvPr><p:ph type="body" idx="1"/></p:nvPr>"#);
    xml.push_str("</p:nvSpPr>");
    xml.push_str("<p:spPr/>");
    xml.push_str("<p:txBody>");
    xml.push_str("<a:bodyPr/>");
    xml.push_str("<a:lstStyle/>");
    for line in notes_text.lines() {
        xml.push_str("<a:p><a:r>");
        xml.push_str(r#"<a:rPr lang="en-US" dirty="0"/>"#);
        write!(xml, "<a:t>{}</a:t>", escape_xml(line))?;
        xml.push_str("</a:r></a:p>");
    }
    if notes_text.is_empty() {
        xml.push_str(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
    }
    xml.push_str("</p:txBody>");
    xml.push_str("</p:sp>");

    xml.push_str("</p:spTree>");
    xml.push_str("</p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:notes>");

    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut out = std::io::Cursor::new(Vec::new());
        image::RgbImage::new(width, height)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_shape_ids_follow_insertion_order() {
        let mut slide = Slide::new(256);
        slide.add_rectangle(0, 0, 10, 10, Some("008A92"));
        slide.add_text_box("Agenda", 0, 0, 10, 10);
        slide.add_paragraphs(["A", "B"], 0, 0, 10, 10);

        let ids: Vec<u32> = slide.shapes().iter().map(Shape::shape_id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
        assert_eq!(slide.title_text(), Some("Agenda"));
    }

    #[test]
    fn test_picture_height_keeps_aspect_ratio() {
        let mut slide = Slide::new(256);
        let shape = slide
            .add_picture_from_bytes(png_bytes(40, 30), 0, 0, 400, None, None)
            .unwrap();
        assert_eq!(shape.frame().height, 300);
        assert!(slide.has_picture());
    }

    #[test]
    fn test_picture_rejects_non_image() {
        let mut slide = Slide::new(256);
        let err = slide
            .add_picture_from_bytes(b"<html>rate limited</html>".to_vec(), 0, 0, 400, None, None)
            .unwrap_err();
        assert!(matches!(err, DeckError::InvalidFormat(_)));
        assert_eq!(slide.shape_count(), 0);
    }

    #[test]
    fn test_picture_missing_file() {
        let mut slide = Slide::new(256);
        let err = slide
            .add_picture("/definitely/not/here.jpg", 0, 0, 10, Some(10))
            .unwrap_err();
        assert!(matches!(err, DeckError::Io(_)));
        assert!(!slide.has_picture());
    }

    #[test]
    fn test_slide_xml_references_images() {
        let mut slide = Slide::new(256);
        slide.add_text_box("Title", 0, 0, 10, 10);
        slide
            .add_picture_from_bytes(png_bytes(2, 2), 0, 0, 10, Some(10), Some("chip".into()))
            .unwrap();

        let mut map = RelationshipMapper::new();
        map.add_image(0, 0, "rId3".to_string());
        let xml = slide.to_xml(0, &map).unwrap();

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<a:t>Title</a:t>"));
        assert!(xml.contains(r#"r:embed="rId3""#));
    }

    #[test]
    fn test_notes_xml() {
        let mut slide = Slide::new(256);
        assert!(slide.notes_xml().is_none());

        slide.set_notes("Walk through the agenda.\nKeep it short & sweet.");
        let xml = slide.notes_xml().unwrap().unwrap();
        assert!(xml.contains("<a:t>Walk through the agenda.</a:t>"));
        assert!(xml.contains("<a:t>Keep it short &amp; sweet.</a:t>"));
        assert!(xml.contains(r#"<p:ph type="body" idx="1"/>"#));
    }
}
