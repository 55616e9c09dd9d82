/// Shapes placed on a slide: text boxes, filled rectangles and pictures.
use crate::common::escape_xml;
use crate::common::unit::font_size_hundredths;
use std::fmt::Write as FmtWrite;

use super::error::Result;
pub use super::format::{ImageFormat, TextFormat};

/// Position and size of a shape in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Frame {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn write_xfrm(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<a:xfrm>");
        write!(xml, r#"<a:off x="{}" y="{}"/>"#, self.x, self.y)?;
        write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, self.width, self.height)?;
        xml.push_str("</a:xfrm>");
        Ok(())
    }
}

/// A shape on a slide.
#[derive(Debug, Clone)]
pub struct Shape {
    /// Shape ID, unique within its slide
    pub(crate) shape_id: u32,
    pub(crate) kind: ShapeKind,
}

#[derive(Debug, Clone)]
pub(crate) enum ShapeKind {
    TextBox {
        paragraphs: Vec<String>,
        frame: Frame,
        format: TextFormat,
        bulleted: bool,
    },
    Rectangle {
        frame: Frame,
        fill_color: Option<String>,
        outline: bool,
    },
    Picture {
        data: Vec<u8>,
        format: ImageFormat,
        frame: Frame,
        description: String,
    },
}

impl Shape {
    pub(crate) fn new_text_box(shape_id: u32, paragraphs: Vec<String>, frame: Frame) -> Self {
        Self {
            shape_id,
            kind: ShapeKind::TextBox {
                paragraphs,
                frame,
                format: TextFormat::default(),
                bulleted: false,
            },
        }
    }

    pub(crate) fn new_rectangle(shape_id: u32, frame: Frame, fill_color: Option<String>) -> Self {
        Self {
            shape_id,
            kind: ShapeKind::Rectangle {
                frame,
                fill_color,
                outline: true,
            },
        }
    }

    pub(crate) fn new_picture(
        shape_id: u32,
        data: Vec<u8>,
        format: ImageFormat,
        frame: Frame,
        description: String,
    ) -> Self {
        Self {
            shape_id,
            kind: ShapeKind::Picture {
                data,
                format,
                frame,
                description,
            },
        }
    }

    /// Shape ID within the slide.
    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    /// Position and size of the shape.
    pub fn frame(&self) -> Frame {
        match &self.kind {
            ShapeKind::TextBox { frame, .. }
            | ShapeKind::Rectangle { frame, .. }
            | ShapeKind::Picture { frame, .. } => *frame,
        }
    }

    /// Paragraph texts if this shape is a text box.
    pub fn paragraphs(&self) -> Option<&[String]> {
        match &self.kind {
            ShapeKind::TextBox { paragraphs, .. } => Some(paragraphs),
            _ => None,
        }
    }

    /// Text formatting if this shape is a text box.
    pub fn text_format(&self) -> Option<&TextFormat> {
        match &self.kind {
            ShapeKind::TextBox { format, .. } => Some(format),
            _ => None,
        }
    }

    pub fn is_picture(&self) -> bool {
        matches!(self.kind, ShapeKind::Picture { .. })
    }

    fn format_mut(&mut self) -> Option<&mut TextFormat> {
        match &mut self.kind {
            ShapeKind::TextBox { format, .. } => Some(format),
            _ => None,
        }
    }

    /// Builder method: set font size in points.
    pub fn font_size(&mut self, size: f64) -> &mut Self {
        if let Some(f) = self.format_mut() {
            f.size = Some(size);
        }
        self
    }

    /// Builder method: set bold.
    pub fn bold(&mut self, bold: bool) -> &mut Self {
        if let Some(f) = self.format_mut() {
            f.bold = Some(bold);
        }
        self
    }

    /// Builder method: set text color (hex RGB).
    pub fn color(&mut self, color: &str) -> &mut Self {
        if let Some(f) = self.format_mut() {
            f.color = Some(color.to_string());
        }
        self
    }

    /// Builder method: render each paragraph with a bullet character.
    pub fn bulleted(&mut self, on: bool) -> &mut Self {
        if let ShapeKind::TextBox { bulleted, .. } = &mut self.kind {
            *bulleted = on;
        }
        self
    }

    /// Builder method: drop the outline of a rectangle.
    pub fn no_line(&mut self) -> &mut Self {
        if let ShapeKind::Rectangle { outline, .. } = &mut self.kind {
            *outline = false;
        }
        self
    }

    /// Get image data if this shape is a picture.
    pub(crate) fn image_data(&self) -> Option<(&[u8], ImageFormat)> {
        match &self.kind {
            ShapeKind::Picture { data, format, .. } => Some((data.as_slice(), *format)),
            _ => None,
        }
    }

    /// Generate XML for this shape.
    ///
    /// Pictures need the relationship ID of their media part.
    pub(crate) fn to_xml(&self, xml: &mut String, rel_id: Option<&str>) -> Result<()> {
        match &self.kind {
            ShapeKind::TextBox {
                paragraphs,
                frame,
                format,
                bulleted,
            } => {
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="TextBox {}"/>"#,
                    self.shape_id,
                    self.shape_id - 1
                )?;
                xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                frame.write_xfrm(xml)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("<a:noFill/>");
                xml.push_str("</p:spPr>");

                xml.push_str("<p:txBody>");
                xml.push_str(r#"<a:bodyPr wrap="square" rtlCol="0"><a:spAutoFit/></a:bodyPr>"#);
                xml.push_str("<a:lstStyle/>");
                if paragraphs.is_empty() {
                    xml.push_str("<a:p><a:endParaRPr lang=\"en-US\" dirty=\"0\"/></a:p>");
                }
                for text in paragraphs {
                    xml.push_str("<a:p>");
                    if *bulleted {
                        xml.push_str(r#"<a:pPr marL="285750" indent="-285750">"#);
                        xml.push_str(r#"<a:buFont typeface="Arial"/><a:buChar char="•"/>"#);
                        xml.push_str("</a:pPr>");
                    }
                    xml.push_str("<a:r>");
                    write_run_properties(xml, format)?;
                    write!(xml, "<a:t>{}</a:t>", escape_xml(text))?;
                    xml.push_str("</a:r>");
                    xml.push_str("</a:p>");
                }
                xml.push_str("</p:txBody>");

                xml.push_str("</p:sp>");
            },
            ShapeKind::Rectangle {
                frame,
                fill_color,
                outline,
            } => {
                xml.push_str("<p:sp>");
                xml.push_str("<p:nvSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Rectangle {}"/>"#,
                    self.shape_id,
                    self.shape_id - 1
                )?;
                xml.push_str("<p:cNvSpPr/>");
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvSpPr>");

                xml.push_str("<p:spPr>");
                frame.write_xfrm(xml)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                if let Some(color) = fill_color {
                    write!(xml, r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, color)?;
                }
                if !outline {
                    xml.push_str("<a:ln><a:noFill/></a:ln>");
                }
                xml.push_str("</p:spPr>");
                xml.push_str("</p:sp>");
            },
            ShapeKind::Picture {
                frame, description, ..
            } => {
                xml.push_str("<p:pic>");
                xml.push_str("<p:nvPicPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="Picture {}" descr="{}"/>"#,
                    self.shape_id,
                    self.shape_id - 1,
                    escape_xml(description)
                )?;
                xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>"#);
                xml.push_str("<p:nvPr/>");
                xml.push_str("</p:nvPicPr>");

                xml.push_str("<p:blipFill>");
                let rid = rel_id.unwrap_or("rIdImagePlaceholder");
                write!(xml, r#"<a:blip r:embed="{}"/>"#, rid)?;
                xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
                xml.push_str("</p:blipFill>");

                xml.push_str("<p:spPr>");
                frame.write_xfrm(xml)?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("</p:spPr>");
                xml.push_str("</p:pic>");
            },
        }

        Ok(())
    }
}

fn write_run_properties(xml: &mut String, format: &TextFormat) -> Result<()> {
    xml.push_str(r#"<a:rPr lang="en-US" dirty="0""#);

    if let Some(size) = format.size {
        write!(xml, r#" sz="{}""#, font_size_hundredths(size))?;
    }
    if let Some(true) = format.bold {
        xml.push_str(r#" b="1""#);
    }

    match format.color {
        Some(ref color) => write!(
            xml,
            r#"><a:solidFill><a:srgbClr val="{}"/></a:solidFill></a:rPr>"#,
            color
        )?,
        None => xml.push_str("/>"),
    }
    Ok(())
}
