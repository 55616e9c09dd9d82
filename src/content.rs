//! Static deck content: the slide table, image queries and theme.
//!
//! Everything here is compile-time data. Geometry is in inches and font sizes
//! in points; the builder converts to EMUs when it draws.

/// Default local output file for the generated deck.
pub const DEFAULT_OUT_FILE: &str = "AI_in_Mobile_Phones_Droplet.pptx";

/// Default directory for downloaded illustrations.
pub const DEFAULT_IMAGE_DIR: &str = "ppt_images";

/// Default destination path inside the Dropbox account.
pub const DEFAULT_REMOTE_PATH: &str = "/AI_in_Mobile_Phones_Droplet.pptx";

/// Caption drawn at the bottom of every slide.
pub const FOOTER_TEXT: &str = "AI in Mobile Phones — Droplet theme";

/// Document title written into the package properties.
pub const DECK_TITLE: &str = "AI in Mobile Phones";

/// One slide of the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSpec {
    pub title: &'static str,
    pub bullets: &'static [&'static str],
    pub notes: &'static str,
    /// Key into [`IMAGE_QUERIES`]
    pub image_key: &'static str,
}

/// Search keywords per image key, in download order.
pub const IMAGE_QUERIES: &[(&str, &str)] = &[
    ("title", "smartphone,technology"),
    ("agenda", "icons,agenda"),
    ("what_is", "mobile,ai"),
    ("on_vs_cloud", "cloud,phone,diagram"),
    ("hardware", "chip,npu"),
    ("software", "tensorflow,code"),
    ("photo_voice", "camera,voice,wave"),
    ("personal_security", "face,unlock,ar"),
    ("workflow", "pipeline,workflow"),
    ("challenges", "warning,ethics"),
    ("future", "futuristic,phone"),
    ("references", "books,links"),
];

/// The deck, one entry per slide in presentation order.
pub const SLIDES: &[SlideSpec] = &[
    SlideSpec {
        title: "AI in Mobile Phones",
        bullets: &["How on-device intelligence is changing mobile experiences"],
        notes: "Introduce yourself and objectives.",
        image_key: "title",
    },
    SlideSpec {
        title: "Agenda",
        bullets: &[
            "What is mobile AI?",
            "On-device vs cloud",
            "Hardware & software",
            "Use cases",
            "Developer workflow",
            "Challenges & ethics",
            "Future trends",
            "Appendix & references",
        ],
        notes: "Walk through the agenda.",
        image_key: "agenda",
    },
    SlideSpec {
        title: "What is Mobile AI?",
        bullets: &[
            "ML models running on/for mobile devices",
            "Goals: personalization, performance, privacy, context awareness",
            "Constraints: power, memory, latency",
        ],
        notes: "Define mobile AI and constraints.",
        image_key: "what_is",
    },
    SlideSpec {
        title: "On-device vs Cloud AI",
        bullets: &[
            "On-device: low latency, privacy, offline capable",
            "Cloud: heavy compute, aggregated analytics, higher latency",
            "Hybrid: split execution, federated learning",
        ],
        notes: "Examples: wake word on-device vs heavy NLP in cloud.",
        image_key: "on_vs_cloud",
    },
    SlideSpec {
        title: "Enabling Hardware",
        bullets: &[
            "NPUs, GPUs, DSPs",
            "Memory & storage; sensors (camera, mic, IMU)",
            "Sensor fusion & accelerators",
        ],
        notes: "Explain role of NPUs and sensors.",
        image_key: "hardware",
    },
    SlideSpec {
        title: "Enabling Software & Tooling",
        bullets: &[
            "Training: TensorFlow, PyTorch",
            "Edge runtimes: TFLite, Core ML, ONNX",
            "Optimizations: quantization, pruning",
        ],
        notes: "Mention converters and quantization.",
        image_key: "software",
    },
    SlideSpec {
        title: "Key Use Cases — Photography & Voice",
        bullets: &[
            "Computational photography: HDR, Night Mode",
            "Voice: wake words, on-device speech recognition",
        ],
        notes: "Vendor examples like Pixel and Apple.",
        image_key: "photo_voice",
    },
    SlideSpec {
        title: "Key Use Cases — Personalization, Security & AR",
        bullets: &[
            "Predictive text & recommendations",
            "Face unlock & anti-spoofing",
            "AR overlays and scene understanding",
        ],
        notes: "Highlight privacy benefits.",
        image_key: "personal_security",
    },
    SlideSpec {
        title: "Developer Workflow",
        bullets: &[
            "Train in cloud → optimize → convert to TFLite/CoreML/ONNX",
            "Integrate, test & profile on device, monitor & update",
        ],
        notes: "Profile for latency, memory and power.",
        image_key: "workflow",
    },
    SlideSpec {
        title: "Challenges & Ethics",
        bullets: &[
            "Battery & thermal limits",
            "Model updates & compatibility",
            "Privacy, bias & adversarial attacks",
        ],
        notes: "Mitigations: differential privacy, audits.",
        image_key: "challenges",
    },
    SlideSpec {
        title: "Future Trends",
        bullets: &[
            "Stronger on-device models as NPUs scale",
            "Continuous personalized on-device learning",
            "Multimodal AI and privacy-first architectures",
        ],
        notes: "Suggest student project ideas.",
        image_key: "future",
    },
    SlideSpec {
        title: "Appendix — References & Glossary",
        bullets: &[
            "TensorFlow Lite: https://www.tensorflow.org/lite",
            "Core ML: https://developer.apple.com/documentation/coreml",
            "ONNX Runtime: https://onnxruntime.ai",
            "Paper: Federated Learning (McMahan et al.)",
        ],
        notes: "References and glossary.",
        image_key: "references",
    },
];

/// Rectangle in inches: x, y, width, height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxIn {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoxIn {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Global styling of the deck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Full-slide background fill (hex RGB)
    pub background: &'static str,
    pub title_color: &'static str,
    pub title_size: f64,
    pub title_bold: bool,
    pub body_color: &'static str,
    pub body_size: f64,
    pub title_box: BoxIn,
    pub body_box: BoxIn,
    /// Picture origin in inches
    pub picture_origin: (f64, f64),
    /// Picture width in inches; height follows the image's aspect ratio
    pub picture_width: f64,
    pub footer_box: BoxIn,
    pub footer_text: &'static str,
    /// Slide size in inches
    pub slide_size: (f64, f64),
}

/// The teal "Droplet" look.
pub const THEME: Theme = Theme {
    background: "008A92",
    title_color: "006D75",
    title_size: 34.0,
    title_bold: true,
    body_color: "FFFFFF",
    body_size: 18.0,
    title_box: BoxIn::new(0.5, 0.4, 9.0, 1.2),
    body_box: BoxIn::new(0.5, 1.8, 5.3, 4.6),
    picture_origin: (6.2, 1.6),
    picture_width: 3.4,
    footer_box: BoxIn::new(0.5, 6.55, 9.0, 0.4),
    footer_text: FOOTER_TEXT,
    slide_size: (10.0, 7.5),
};

impl Default for Theme {
    fn default() -> Self {
        THEME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_slide_has_a_query() {
        for slide in SLIDES {
            assert!(
                IMAGE_QUERIES.iter().any(|(key, _)| *key == slide.image_key),
                "no query for {}",
                slide.image_key
            );
        }
    }

    #[test]
    fn test_table_shape() {
        assert_eq!(SLIDES.len(), 12);
        assert_eq!(IMAGE_QUERIES.len(), 12);

        let keys: HashSet<&str> = IMAGE_QUERIES.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.len(), IMAGE_QUERIES.len());

        let agenda = &SLIDES[1];
        assert_eq!(agenda.title, "Agenda");
        assert_eq!(agenda.bullets.len(), 8);
        assert_eq!(agenda.image_key, "agenda");
    }

    #[test]
    fn test_theme_slide_size_matches_emus() {
        use crate::common::inches;
        assert_eq!(inches(THEME.slide_size.0), 9_144_000);
        assert_eq!(inches(THEME.slide_size.1), 6_858_000);
    }
}
