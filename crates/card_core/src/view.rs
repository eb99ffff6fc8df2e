//! Render-facing snapshot of the card.

use chrono::NaiveDate;

use crate::{
    age::compute_age,
    coordinator::{AnimationPhase, SessionStatus},
    types::{ImageAsset, Subject},
};

pub const NOT_FOUND_IMAGE: &str = "NOTFOUND.PNG";
pub const IMAGE_EXTENSION: &str = "JPG";
pub const NO_PERSONAL_INFO: &str = "No personal info available.";
pub const NO_BIRTHDAY: &str = "No birthday available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub status: SessionStatus,
    pub phase: AnimationPhase,
    pub display_name: String,
    pub age_text: String,
    pub image_file: String,
    pub image_count: usize,
    /// Zero-based index of the displayed image.
    pub position: usize,
    pub progress: Vec<bool>,
    pub reaction_count: u64,
    pub can_randomize: bool,
    pub can_navigate: bool,
}

impl CardView {
    pub fn phase_class(&self) -> &'static str {
        self.phase.css_class()
    }
}

pub fn display_name(subject: Option<&Subject>) -> String {
    subject
        .map(|subject| subject.first_name.clone())
        .unwrap_or_else(|| NO_PERSONAL_INFO.to_string())
}

pub fn age_text(subject: Option<&Subject>, today: NaiveDate) -> String {
    match subject.and_then(|subject| subject.birth_date.as_deref()) {
        None | Some("") => NO_BIRTHDAY.to_string(),
        Some(birthday) => compute_age(birthday, today).to_string(),
    }
}

pub fn image_file_name(image: Option<&ImageAsset>) -> String {
    match image {
        Some(image) if !image.image_name.is_empty() => {
            format!("{}.{IMAGE_EXTENSION}", image.image_name)
        }
        _ => NOT_FOUND_IMAGE.to_string(),
    }
}
