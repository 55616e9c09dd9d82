//! Package writer that serializes a [`Presentation`] into a `.pptx` file.
//!
//! The writer lays the deck out as an Open Packaging Conventions ZIP:
//! `[Content_Types].xml`, package relationships, document properties, the
//! presentation part, one master/layout/theme, and per slide a slide part,
//! an optional notes slide and its pictures under `ppt/media/`.

use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use std::path::Path;

use chrono::Utc;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::common::escape_xml;

use super::constants::{content_type as ct, relationship_type as rt};
use super::error::Result;
use super::pres::{Presentation, PresentationRels};
use super::relmap::RelationshipMapper;
use super::template;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const MASTER_PART: &str = "ppt/slideMasters/slideMaster1.xml";
const LAYOUT_PART: &str = "ppt/slideLayouts/slideLayout1.xml";
const THEME_PART: &str = "ppt/theme/theme1.xml";
const NOTES_MASTER_PART: &str = "ppt/notesMasters/notesMaster1.xml";
const NOTES_THEME_PART: &str = "ppt/theme/theme2.xml";

/// Serializes presentations as PPTX packages.
///
/// # Example
///
/// ```no_run
/// use deckdrop::deck::{Package, Presentation};
///
/// let mut pres = Presentation::new();
/// pres.add_slide().add_text_box("Hello", 0, 0, 914400, 914400);
/// Package::save(&pres, "hello.pptx")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package;

impl Package {
    /// Write a presentation to a file.
    pub fn save<P: AsRef<Path>>(pres: &Presentation, path: P) -> Result<()> {
        let bytes = Self::to_bytes(pres)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialize a presentation to bytes.
    pub fn to_bytes(pres: &Presentation) -> Result<Vec<u8>> {
        let parts = Self::build_parts(pres)?;

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let content_types = ContentTypes::from_parts(&parts).to_xml();
        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(content_types.as_bytes())?;

        for part in &parts {
            zip.start_file(part.name.as_str(), options)?;
            zip.write_all(&part.blob)?;
        }

        Ok(zip.finish()?.into_inner())
    }

    /// Generate every part of the package, relationships included.
    fn build_parts(pres: &Presentation) -> Result<Vec<PackagePart>> {
        let mut parts = Vec::new();
        let has_notes = pres.has_notes();

        // Package relationships
        let mut pkg_rels = Relationships::new();
        pkg_rels.add(rt::OFFICE_DOCUMENT, PRESENTATION_PART);
        pkg_rels.add(rt::CORE_PROPERTIES, "docProps/core.xml");
        pkg_rels.add(rt::EXTENDED_PROPERTIES, "docProps/app.xml");
        parts.push(PackagePart::rels("_rels/.rels", &pkg_rels));

        let title = pres.title().unwrap_or("Presentation");
        parts.push(PackagePart::xml(
            "docProps/core.xml",
            ct::OPC_CORE_PROPERTIES,
            template::core_props_xml(title, Utc::now()),
        ));
        let notes_count = pres.slides().iter().filter(|s| s.has_notes()).count();
        parts.push(PackagePart::xml(
            "docProps/app.xml",
            ct::OFC_EXTENDED_PROPERTIES,
            template::app_props_xml(pres.slide_count(), notes_count),
        ));

        // Presentation relationships: master, theme, notes master, then slides
        let mut pres_rels = Relationships::new();
        let master_rid = pres_rels.add(rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
        pres_rels.add(rt::THEME, "theme/theme1.xml");
        let notes_master_rid =
            has_notes.then(|| pres_rels.add(rt::NOTES_MASTER, "notesMasters/notesMaster1.xml"));
        let slide_rids: Vec<String> = (1..=pres.slide_count())
            .map(|n| pres_rels.add(rt::SLIDE, &format!("slides/slide{}.xml", n)))
            .collect();

        let pres_xml = pres.to_xml(&PresentationRels {
            master: &master_rid,
            notes_master: notes_master_rid.as_deref(),
            slides: &slide_rids,
        })?;
        parts.push(PackagePart::xml(PRESENTATION_PART, ct::PML_PRESENTATION_MAIN, pres_xml));
        parts.push(PackagePart::rels("ppt/_rels/presentation.xml.rels", &pres_rels));

        // Master, layout and theme
        parts.push(PackagePart::xml(MASTER_PART, ct::PML_SLIDE_MASTER, template::slide_master_xml()));
        let mut master_rels = Relationships::new();
        master_rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
        master_rels.add(rt::THEME, "../theme/theme1.xml");
        parts.push(PackagePart::rels("ppt/slideMasters/_rels/slideMaster1.xml.rels", &master_rels));

        parts.push(PackagePart::xml(LAYOUT_PART, ct::PML_SLIDE_LAYOUT, template::blank_layout_xml()));
        let mut layout_rels = Relationships::new();
        layout_rels.add(rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
        parts.push(PackagePart::rels("ppt/slideLayouts/_rels/slideLayout1.xml.rels", &layout_rels));

        parts.push(PackagePart::xml(THEME_PART, ct::OFC_THEME, template::theme_xml()));

        if has_notes {
            parts.push(PackagePart::xml(
                NOTES_MASTER_PART,
                ct::PML_NOTES_MASTER,
                template::notes_master_xml(),
            ));
            let mut notes_master_rels = Relationships::new();
            notes_master_rels.add(rt::THEME, "../theme/theme2.xml");
            parts.push(PackagePart::rels(
                "ppt/notesMasters/_rels/notesMaster1.xml.rels",
                &notes_master_rels,
            ));
            parts.push(PackagePart::xml(NOTES_THEME_PART, ct::OFC_THEME, template::theme_xml()));
        }

        // Allocate slide relationships before generating slide XML
        let mut rel_mapper = RelationshipMapper::new();
        let mut slide_rels: Vec<Relationships> = Vec::with_capacity(pres.slide_count());
        for (index, slide) in pres.slides().iter().enumerate() {
            let mut rels = Relationships::new();
            rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
            if slide.has_notes() {
                rels.add(rt::NOTES_SLIDE, &format!("../notesSlides/notesSlide{}.xml", index + 1));
            }
            slide_rels.push(rels);
        }

        let mut images_per_slide: BTreeMap<usize, usize> = BTreeMap::new();
        for (media_index, (slide_index, data, format)) in pres.collect_all_images().into_iter().enumerate() {
            let media_name = format!("image{}.{}", media_index + 1, format.extension());
            let rid = slide_rels[slide_index].add(rt::IMAGE, &format!("../media/{}", media_name));

            let image_index = images_per_slide.entry(slide_index).or_insert(0);
            rel_mapper.add_image(slide_index, *image_index, rid);
            *image_index += 1;

            parts.push(PackagePart {
                name: format!("ppt/media/{}", media_name),
                content_type: format.mime_type().to_string(),
                blob: data.to_vec(),
            });
        }

        for (index, slide) in pres.slides().iter().enumerate() {
            let number = index + 1;
            parts.push(PackagePart::xml(
                format!("ppt/slides/slide{}.xml", number),
                ct::PML_SLIDE,
                slide.to_xml(index, &rel_mapper)?,
            ));
            parts.push(PackagePart::rels(
                format!("ppt/slides/_rels/slide{}.xml.rels", number),
                &slide_rels[index],
            ));

            if let Some(notes) = slide.notes_xml() {
                parts.push(PackagePart::xml(
                    format!("ppt/notesSlides/notesSlide{}.xml", number),
                    ct::PML_NOTES_SLIDE,
                    notes?,
                ));
                let mut notes_rels = Relationships::new();
                notes_rels.add(rt::NOTES_MASTER, "../notesMasters/notesMaster1.xml");
                notes_rels.add(rt::SLIDE, &format!("../slides/slide{}.xml", number));
                parts.push(PackagePart::rels(
                    format!("ppt/notesSlides/_rels/notesSlide{}.xml.rels", number),
                    &notes_rels,
                ));
            }
        }

        Ok(parts)
    }
}

/// One member of the ZIP container.
#[derive(Debug)]
struct PackagePart {
    /// Member name, without leading slash
    name: String,
    content_type: String,
    blob: Vec<u8>,
}

impl PackagePart {
    fn xml(name: impl Into<String>, content_type: &str, xml: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.to_string(),
            blob: xml.into().into_bytes(),
        }
    }

    fn rels(name: impl Into<String>, rels: &Relationships) -> Self {
        Self {
            name: name.into(),
            content_type: ct::OPC_RELATIONSHIPS.to_string(),
            blob: rels.to_xml().into_bytes(),
        }
    }

    fn extension(&self) -> &str {
        self.name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
    }
}

/// Relationships of a single source part, numbered `rId1`, `rId2`, ...
#[derive(Debug, Default)]
struct Relationships {
    rels: Vec<(String, &'static str, String)>,
}

impl Relationships {
    fn new() -> Self {
        Self::default()
    }

    /// Add an internal relationship and return its ID.
    fn add(&mut self, reltype: &'static str, target: &str) -> String {
        let r_id = format!("rId{}", self.rels.len() + 1);
        self.rels.push((r_id.clone(), reltype, target.to_string()));
        r_id
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for (r_id, reltype, target) in &self.rels {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                r_id,
                reltype,
                escape_xml(target)
            ));
        }
        xml.push_str("</Relationships>");

        xml
    }
}

/// Builder for `[Content_Types].xml`.
///
/// Relationship parts and media go through `Default` entries keyed by
/// extension; every XML part gets an `Override`.
struct ContentTypes {
    defaults: BTreeMap<String, String>,
    overrides: BTreeMap<String, String>,
}

impl ContentTypes {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());

        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn from_parts(parts: &[PackagePart]) -> Self {
        let mut cti = Self::new();
        for part in parts {
            let ext = part.extension();
            if cti.defaults.get(ext) == Some(&part.content_type) {
                continue;
            }
            if part.content_type.starts_with("image/") {
                cti.defaults
                    .insert(ext.to_string(), part.content_type.clone());
            } else {
                cti.overrides
                    .insert(format!("/{}", part.name), part.content_type.clone());
            }
        }
        cti
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );
        for (ext, content_type) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            ));
        }
        for (partname, content_type) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(content_type)
            ));
        }
        xml.push_str("</Types>");

        xml
    }
}
