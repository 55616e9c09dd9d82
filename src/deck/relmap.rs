/// Relationship ID mapper used while generating slide parts.
///
/// Relationships are allocated before any slide XML is written, so that
/// picture shapes can reference their media part by its actual ID.
use std::collections::HashMap;

/// Maps slide elements to their relationship IDs, per slide.
#[derive(Debug, Default)]
pub(crate) struct RelationshipMapper {
    /// (slide_index, image_index_in_slide) -> relationship ID
    image_ids: HashMap<(usize, usize), String>,
}

impl RelationshipMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_image(&mut self, slide_index: usize, image_index_in_slide: usize, rel_id: String) {
        self.image_ids
            .insert((slide_index, image_index_in_slide), rel_id);
    }

    pub fn image_id(&self, slide_index: usize, image_index_in_slide: usize) -> Option<&str> {
        self.image_ids
            .get(&(slide_index, image_index_in_slide))
            .map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_per_slide() {
        let mut map = RelationshipMapper::new();
        map.add_image(0, 0, "rId3".to_string());
        map.add_image(1, 0, "rId2".to_string());

        assert_eq!(map.image_id(0, 0), Some("rId3"));
        assert_eq!(map.image_id(1, 0), Some("rId2"));
        assert_eq!(map.image_id(1, 1), None);
    }
}
