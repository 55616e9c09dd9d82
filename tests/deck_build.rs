mod common;

use deckdrop::content::{FOOTER_TEXT, IMAGE_QUERIES, SLIDES, THEME};
use deckdrop::deck::{Package, read_slides};
use deckdrop::fetch::{ImageAsset, ImageSet};
use deckdrop::DeckBuilder;

fn all_images(dir: &std::path::Path) -> ImageSet {
    let mut set = ImageSet::new();
    for (key, _) in IMAGE_QUERIES {
        let path = common::write_png(dir, &format!("{}.jpg", key), 320, 180);
        set.insert(ImageAsset::available(key, path));
    }
    set
}

#[test]
fn test_one_slide_per_descriptor_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let images = all_images(dir.path());

    let pres = DeckBuilder::new(THEME).build(SLIDES, &images);
    let out = dir.path().join("deck.pptx");
    DeckBuilder::save(&pres, &out).unwrap();

    let slides = read_slides(&std::fs::read(&out).unwrap()).unwrap();
    assert_eq!(slides.len(), SLIDES.len());

    for (summary, spec) in slides.iter().zip(SLIDES) {
        assert_eq!(summary.title(), Some(spec.title));
        let bullets: Vec<&str> = summary.shapes[1].iter().map(String::as_str).collect();
        assert_eq!(bullets, spec.bullets);
        assert_eq!(summary.shapes[2], vec![FOOTER_TEXT.to_string()]);
        assert_eq!(summary.notes.as_deref(), Some(spec.notes));
        assert!(summary.has_picture, "{} lacks its picture", spec.title);
    }
}

#[test]
fn test_missing_image_only_drops_the_picture() {
    let dir = tempfile::tempdir().unwrap();
    let mut images = all_images(dir.path());
    images.insert(ImageAsset::missing("hardware"));

    let pres = DeckBuilder::new(THEME).build(SLIDES, &images);
    let bytes = Package::to_bytes(&pres).unwrap();
    let slides = read_slides(&bytes).unwrap();

    assert_eq!(slides.len(), SLIDES.len());
    for (summary, spec) in slides.iter().zip(SLIDES) {
        assert_eq!(summary.title(), Some(spec.title));
        assert_eq!(summary.has_picture, spec.image_key != "hardware");
    }

    let hardware = &slides[4];
    assert_eq!(hardware.title(), Some("Enabling Hardware"));
    assert_eq!(hardware.shapes.len(), 3);
    assert_eq!(hardware.notes.as_deref(), Some("Explain role of NPUs and sensors."));
}

#[test]
fn test_no_images_at_all() {
    let pres = DeckBuilder::default().build(SLIDES, &ImageSet::new());
    let slides = read_slides(&Package::to_bytes(&pres).unwrap()).unwrap();

    assert_eq!(slides.len(), 12);
    assert!(slides.iter().all(|s| !s.has_picture));
}

#[test]
fn test_agenda_slide() {
    let dir = tempfile::tempdir().unwrap();
    let mut images = ImageSet::new();
    images.insert(ImageAsset::available(
        "agenda",
        common::write_png(dir.path(), "agenda.jpg", 1600, 900),
    ));

    let pres = DeckBuilder::new(THEME).build(SLIDES, &images);
    let slides = read_slides(&Package::to_bytes(&pres).unwrap()).unwrap();
    let agenda = &slides[1];

    assert_eq!(agenda.title(), Some("Agenda"));
    assert_eq!(
        agenda.shapes[1],
        vec![
            "What is mobile AI?",
            "On-device vs cloud",
            "Hardware & software",
            "Use cases",
            "Developer workflow",
            "Challenges & ethics",
            "Future trends",
            "Appendix & references",
        ]
    );
    assert!(agenda.has_picture);
    assert_eq!(agenda.shapes[2], vec!["AI in Mobile Phones — Droplet theme"]);
    assert_eq!(agenda.notes.as_deref(), Some("Walk through the agenda."));

    // Only the agenda image was available
    assert!(!slides[0].has_picture);
}

#[test]
fn test_package_is_a_valid_zip_with_media() {
    let dir = tempfile::tempdir().unwrap();
    let images = all_images(dir.path());
    let pres = DeckBuilder::new(THEME).build(SLIDES, &images);
    let bytes = Package::to_bytes(&pres).unwrap();

    let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let media = archive
        .file_names()
        .filter(|name| name.starts_with("ppt/media/"))
        .count();
    assert_eq!(media, SLIDES.len());
    let notes = archive
        .file_names()
        .filter(|name| name.starts_with("ppt/notesSlides/notesSlide"))
        .count();
    assert_eq!(notes, SLIDES.len());
}
