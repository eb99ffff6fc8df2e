use shared::{
    domain::{ImageId, SubjectId},
    protocol::{ImageRecord, PersonalInfoRecord},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: SubjectId,
    pub first_name: String,
    /// Free-form, nominally `DD-MM-YYYY` optionally followed by a time.
    pub birth_date: Option<String>,
}

impl From<PersonalInfoRecord> for Subject {
    fn from(record: PersonalInfoRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.firstname,
            birth_date: record.birthday,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub id: ImageId,
    pub subject_id: SubjectId,
    pub image_name: String,
}

impl From<ImageRecord> for ImageAsset {
    fn from(record: ImageRecord) -> Self {
        Self {
            id: record.id,
            subject_id: record.personalinfo,
            image_name: record.image.unwrap_or_default(),
        }
    }
}

/// Ordered images of a single subject. Every member carries `subject_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectImageSet {
    subject_id: SubjectId,
    images: Vec<ImageAsset>,
}

impl SubjectImageSet {
    pub fn empty(subject_id: SubjectId) -> Self {
        Self {
            subject_id,
            images: Vec::new(),
        }
    }

    /// Keeps catalog order and drops every asset owned by another subject.
    pub fn from_catalog(
        subject_id: SubjectId,
        catalog: impl IntoIterator<Item = ImageAsset>,
    ) -> Self {
        let images = catalog
            .into_iter()
            .filter(|asset| asset.subject_id == subject_id)
            .collect();
        Self { subject_id, images }
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    pub fn images(&self) -> &[ImageAsset] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn into_images(self) -> Vec<ImageAsset> {
        self.images
    }
}

pub fn find_subject<'a>(subjects: &'a [Subject], subject_id: &SubjectId) -> Option<&'a Subject> {
    subjects.iter().find(|subject| &subject.id == subject_id)
}
