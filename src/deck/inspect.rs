//! Read-back of written decks.
//!
//! Walks a `.pptx` package in presentation order and extracts, per slide,
//! the paragraphs of each text shape, whether it holds a picture, and its
//! speaker notes. Used to verify generated output without an office suite.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;

use crate::common::unescape_xml;

use super::constants::relationship_type as rt;
use super::error::{DeckError, Result};

/// Content of one slide as found in a package.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideSummary {
    /// Paragraph texts, one entry per text-bearing shape in document order
    pub shapes: Vec<Vec<String>>,
    /// Whether the slide contains a picture shape
    pub has_picture: bool,
    /// Speaker notes, paragraphs joined with `\n`
    pub notes: Option<String>,
}

impl SlideSummary {
    /// Paragraphs of the first text shape, which is the title on generated slides.
    pub fn title(&self) -> Option<&str> {
        self.shapes.first()?.first().map(String::as_str)
    }

    /// All paragraphs of every shape, flattened.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().flatten().map(String::as_str)
    }
}

/// Read the slides of a package, in the order given by `ppt/presentation.xml`.
///
/// # Example
///
/// ```no_run
/// let bytes = std::fs::read("deck.pptx")?;
/// for slide in deckdrop::deck::inspect::read_slides(&bytes)? {
///     println!("{:?}", slide.title());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn read_slides(bytes: &[u8]) -> Result<Vec<SlideSummary>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let pres_part = "ppt/presentation.xml";
    let pres_xml = read_part(&mut archive, pres_part)?;
    let pres_rels = read_rels(&mut archive, pres_part)?;

    let mut slides = Vec::new();
    for r_id in slide_rel_ids(&pres_xml)? {
        let (_, target) = pres_rels
            .get(&r_id)
            .ok_or_else(|| DeckError::PartNotFound(format!("relationship {}", r_id)))?;
        let slide_part = resolve_target(pres_part, target);
        let slide_xml = read_part(&mut archive, &slide_part)?;

        let (shapes, has_picture) = parse_shapes(&slide_xml)?;

        let slide_rels = read_rels(&mut archive, &slide_part)?;
        let notes = match slide_rels.values().find(|(kind, _)| kind == rt::NOTES_SLIDE) {
            Some((_, target)) => {
                let notes_xml = read_part(&mut archive, &resolve_target(&slide_part, target))?;
                Some(parse_notes(&notes_xml)?)
            },
            None => None,
        };

        slides.push(SlideSummary {
            shapes,
            has_picture,
            notes,
        });
    }

    Ok(slides)
}

fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Result<String> {
    let mut file = archive
        .by_name(name)
        .map_err(|_| DeckError::PartNotFound(name.to_string()))?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(content)
}

/// Relationship ID -> (type, target) for the given source part.
fn read_rels(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    source: &str,
) -> Result<HashMap<String, (String, String)>> {
    let (dir, file) = source.rsplit_once('/').unwrap_or(("", source));
    let rels_name = if dir.is_empty() {
        format!("_rels/{}.rels", file)
    } else {
        format!("{}/_rels/{}.rels", dir, file)
    };

    let xml = match read_part(archive, &rels_name) {
        Ok(xml) => xml,
        Err(DeckError::PartNotFound(_)) => return Ok(HashMap::new()),
        Err(e) => return Err(e),
    };

    let mut rels = HashMap::new();
    let mut reader = Reader::from_str(&xml);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let id = attribute(&e, b"Id")?;
                let kind = attribute(&e, b"Type")?;
                let target = attribute(&e, b"Target")?;
                if let (Some(id), Some(kind), Some(target)) = (id, kind, target) {
                    rels.insert(id, (kind, target));
                }
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(rels)
}

/// Resolve a relationship target against the directory of its source part.
fn resolve_target(source: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = source.split('/').collect();
    segments.pop();
    for segment in target.split('/') {
        match segment {
            ".." => {
                segments.pop();
            },
            "." | "" => {},
            other => segments.push(other),
        }
    }
    segments.join("/")
}

fn slide_rel_ids(pres_xml: &str) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut reader = Reader::from_str(pres_xml);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"p:sldId" => {
                if let Some(id) = attribute(&e, b"r:id")? {
                    ids.push(id);
                }
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }
    Ok(ids)
}

/// Paragraphs of every `p:sp` text body, and whether a `p:pic` is present.
fn parse_shapes(slide_xml: &str) -> Result<(Vec<Vec<String>>, bool)> {
    let mut shapes = Vec::new();
    let mut has_picture = false;

    let mut reader = Reader::from_str(slide_xml);
    let mut buf = Vec::new();
    let mut text = TextCollector::default();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"p:pic" => has_picture = true,
                b"p:txBody" => text.begin_body(),
                b"a:p" => text.begin_paragraph(),
                b"a:t" => text.in_run_text = true,
                _ => {},
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"p:pic" => has_picture = true,
                b"a:p" => {
                    text.begin_paragraph();
                    text.end_paragraph();
                },
                _ => {},
            },
            Event::Text(t) => text.push_raw(std::str::from_utf8(&t)?),
            Event::GeneralRef(r) => text.push_reference(std::str::from_utf8(&r)?),
            Event::End(e) => match e.name().as_ref() {
                b"a:t" => text.in_run_text = false,
                b"a:p" => text.end_paragraph(),
                b"p:txBody" => {
                    if let Some(paragraphs) = text.end_body() {
                        shapes.push(paragraphs);
                    }
                },
                _ => {},
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok((shapes, has_picture))
}

/// Text of the body placeholder of a notes slide.
fn parse_notes(notes_xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(notes_xml);
    let mut buf = Vec::new();
    let mut text = TextCollector::default();
    let mut in_body_placeholder = false;
    let mut notes = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"p:sp" => in_body_placeholder = false,
                b"p:txBody" => text.begin_body(),
                b"a:p" => text.begin_paragraph(),
                b"a:t" => text.in_run_text = true,
                _ => {},
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"p:ph" => {
                    in_body_placeholder = attribute(&e, b"type")?.as_deref() == Some("body");
                },
                b"a:p" => {
                    text.begin_paragraph();
                    text.end_paragraph();
                },
                _ => {},
            },
            Event::Text(t) => text.push_raw(std::str::from_utf8(&t)?),
            Event::GeneralRef(r) => text.push_reference(std::str::from_utf8(&r)?),
            Event::End(e) => match e.name().as_ref() {
                b"a:t" => text.in_run_text = false,
                b"a:p" => text.end_paragraph(),
                b"p:txBody" => {
                    let paragraphs = text.end_body().unwrap_or_default();
                    if in_body_placeholder {
                        notes.extend(paragraphs);
                    }
                },
                _ => {},
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(notes.join("\n"))
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| DeckError::Xml(e.to_string()))?;
        if attr.key.as_ref() == key {
            let raw = std::str::from_utf8(&attr.value)?;
            return Ok(Some(unescape_xml(raw)));
        }
    }
    Ok(None)
}

/// Accumulates `a:t` runs into paragraphs of the current text body.
///
/// Text and entity references arrive as separate events; the raw markup is
/// buffered per paragraph and unescaped once the paragraph closes.
#[derive(Default)]
struct TextCollector {
    body: Option<Vec<String>>,
    paragraph: Option<String>,
    in_run_text: bool,
}

impl TextCollector {
    fn begin_body(&mut self) {
        self.body = Some(Vec::new());
    }

    fn end_body(&mut self) -> Option<Vec<String>> {
        self.paragraph = None;
        self.body.take()
    }

    fn begin_paragraph(&mut self) {
        if self.body.is_some() {
            self.paragraph = Some(String::new());
        }
    }

    fn end_paragraph(&mut self) {
        if let (Some(body), Some(raw)) = (self.body.as_mut(), self.paragraph.take()) {
            body.push(unescape_xml(&raw));
        }
    }

    fn push_raw(&mut self, raw: &str) {
        if self.in_run_text
            && let Some(paragraph) = self.paragraph.as_mut()
        {
            paragraph.push_str(raw);
        }
    }

    fn push_reference(&mut self, name: &str) {
        if !self.in_run_text {
            return;
        }
        let Some(paragraph) = self.paragraph.as_mut() else {
            return;
        };
        match decode_char_ref(name) {
            Some(ch) => {
                // Re-escape so the final unescape pass leaves it intact
                let mut tmp = [0u8; 4];
                paragraph.push_str(&crate::common::escape_xml(ch.encode_utf8(&mut tmp)));
            },
            None => {
                paragraph.push('&');
                paragraph.push_str(name);
                paragraph.push(';');
            },
        }
    }
}

fn decode_char_ref(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Package, Presentation};

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("ppt/presentation.xml", "slides/slide1.xml"), "ppt/slides/slide1.xml");
        assert_eq!(
            resolve_target("ppt/slides/slide3.xml", "../notesSlides/notesSlide3.xml"),
            "ppt/notesSlides/notesSlide3.xml"
        );
        assert_eq!(resolve_target("ppt/slides/slide1.xml", "/ppt/media/image1.png"), "ppt/media/image1.png");
    }

    #[test]
    fn test_decode_char_ref() {
        assert_eq!(decode_char_ref("#8226"), Some('•'));
        assert_eq!(decode_char_ref("#x41"), Some('A'));
        assert_eq!(decode_char_ref("amp"), None);
    }

    #[test]
    fn test_parse_shapes_with_entities() {
        let xml = concat!(
            r#"<p:sld xmlns:a="a" xmlns:p="p"><p:cSld><p:spTree>"#,
            r#"<p:sp><p:txBody><a:bodyPr/><a:p><a:r><a:t>R&amp;D &#8226; &lt;go&gt;</a:t></a:r></a:p><a:p/></p:txBody></p:sp>"#,
            r#"<p:pic/>"#,
            r#"</p:spTree></p:cSld></p:sld>"#
        );
        let (shapes, has_picture) = parse_shapes(xml).unwrap();
        assert_eq!(shapes, vec![vec!["R&D • <go>".to_string(), String::new()]]);
        assert!(has_picture);
    }

    #[test]
    fn test_read_back_written_deck() {
        let mut pres = Presentation::new();
        let first = pres.add_slide();
        first.add_text_box("Welcome & hello", 0, 0, 10, 10);
        first.add_paragraphs(["one", "two's"], 0, 20, 10, 10);
        first.set_notes("line a\nline b");
        pres.add_slide().add_text_box("Second", 0, 0, 10, 10);

        let bytes = Package::to_bytes(&pres).unwrap();
        let slides = read_slides(&bytes).unwrap();

        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].title(), Some("Welcome & hello"));
        assert_eq!(slides[0].shapes[1], vec!["one".to_string(), "two's".to_string()]);
        assert_eq!(slides[0].notes.as_deref(), Some("line a\nline b"));
        assert!(!slides[0].has_picture);
        assert_eq!(slides[1].title(), Some("Second"));
        assert_eq!(slides[1].notes, None);
    }

    #[test]
    fn test_not_a_package() {
        assert!(read_slides(b"definitely not a zip").is_err());
    }
}
