//! Fixed package parts shared by every generated deck.
//!
//! A deck carries exactly one slide master with one blank layout, one theme
//! and, when any slide has speaker notes, a notes master with its own theme.

use crate::common::escape_xml;
use chrono::{DateTime, SecondsFormat, Utc};

/// Slide master with a plain background and default text styles.
pub fn slide_master_xml() -> &'static str {
    include_str!("resources/slideMaster1.xml")
}

/// Blank slide layout; every slide is built on it.
pub fn blank_layout_xml() -> &'static str {
    include_str!("resources/slideLayout1.xml")
}

/// Theme used by both the slide master and the notes master.
pub fn theme_xml() -> &'static str {
    include_str!("resources/theme1.xml")
}

/// Notes master with slide-image and body placeholders.
pub fn notes_master_xml() -> &'static str {
    include_str!("resources/notesMaster1.xml")
}

/// Core properties (`docProps/core.xml`).
pub fn core_props_xml(title: &str, created: DateTime<Utc>) -> String {
    let stamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            "<dc:title>{title}</dc:title>",
            "<dc:creator>deckdrop</dc:creator>",
            "<cp:revision>1</cp:revision>",
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{stamp}</dcterms:created>"#,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{stamp}</dcterms:modified>"#,
            "</cp:coreProperties>"
        ),
        title = escape_xml(title),
        stamp = stamp,
    )
}

/// Extended properties (`docProps/app.xml`).
pub fn app_props_xml(slide_count: usize, notes_count: usize) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
            r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
            "<Application>deckdrop</Application>",
            "<PresentationFormat>On-screen Show (4:3)</PresentationFormat>",
            "<Slides>{}</Slides>",
            "<Notes>{}</Notes>",
            "</Properties>"
        ),
        slide_count, notes_count,
    )
}
