use crate::types::{ImageAsset, SubjectImageSet};

/// Cyclic cursor over the displayed subject's images.
///
/// `current_index` stays below `images.len()` while there are images and is
/// pinned to zero otherwise.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    images: Vec<ImageAsset>,
    current_index: usize,
}

impl Carousel {
    pub fn new(images: SubjectImageSet) -> Self {
        Self {
            images: images.into_images(),
            current_index: 0,
        }
    }

    /// Swaps in a freshly loaded set and rewinds to the first image.
    pub fn replace(&mut self, images: SubjectImageSet) {
        self.images = images.into_images();
        self.current_index = 0;
    }

    pub fn next(&mut self) {
        let len = self.images.len();
        if len == 0 {
            return;
        }
        self.current_index = (self.current_index + 1) % len;
    }

    pub fn previous(&mut self) {
        let len = self.images.len();
        if len == 0 {
            return;
        }
        self.current_index = (self.current_index + len - 1) % len;
    }

    pub fn current(&self) -> Option<&ImageAsset> {
        self.images.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// One segment per image; the segment under the cursor is `true`.
    pub fn progress(&self) -> Vec<bool> {
        (0..self.images.len())
            .map(|index| index == self.current_index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::{ImageId, SubjectId};

    use super::*;

    fn image_set(len: usize) -> SubjectImageSet {
        let subject_id = SubjectId::new("s");
        let images = (0..len).map(|index| ImageAsset {
            id: ImageId::new(index.to_string()),
            subject_id: subject_id.clone(),
            image_name: format!("IMG_{index}"),
        });
        SubjectImageSet::from_catalog(subject_id.clone(), images)
    }

    fn carousel_of(len: usize) -> Carousel {
        Carousel::new(image_set(len))
    }

    #[test]
    fn next_cycles_back_after_len_steps() {
        for len in 1..=6 {
            let mut carousel = carousel_of(len);
            carousel.next();
            let start = carousel.current_index();
            for _ in 0..len {
                carousel.next();
            }
            assert_eq!(carousel.current_index(), start, "len {len}");
        }
    }

    #[test]
    fn previous_cycles_back_after_len_steps() {
        for len in 1..=6 {
            let mut carousel = carousel_of(len);
            let start = carousel.current_index();
            for _ in 0..len {
                carousel.previous();
            }
            assert_eq!(carousel.current_index(), start, "len {len}");
        }
    }

    #[test]
    fn previous_from_first_wraps_to_last() {
        let mut carousel = carousel_of(3);
        carousel.previous();
        assert_eq!(carousel.current_index(), 2);
        assert_eq!(
            carousel.current().map(|image| image.image_name.as_str()),
            Some("IMG_2")
        );
    }

    #[test]
    fn empty_carousel_ignores_navigation() {
        let mut carousel = carousel_of(0);
        carousel.next();
        carousel.previous();
        assert_eq!(carousel.current_index(), 0);
        assert!(carousel.current().is_none());
        assert!(carousel.progress().is_empty());
    }

    #[test]
    fn replace_rewinds_to_first_image() {
        let mut carousel = carousel_of(4);
        carousel.next();
        carousel.next();
        carousel.replace(image_set(3));
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.len(), 3);
    }

    #[test]
    fn progress_marks_exactly_the_current_segment() {
        let mut carousel = carousel_of(3);
        carousel.next();
        assert_eq!(carousel.progress(), vec![false, true, false]);
    }
}
