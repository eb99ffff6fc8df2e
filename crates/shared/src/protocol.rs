use serde::{Deserialize, Serialize};

use crate::domain::{ImageId, SubjectId};

/// Path of the directory collection (`GET /personalinfo`).
pub const PERSONAL_INFO_PATH: &str = "personalinfo";
/// Path of the image catalog collection (`GET /image`).
pub const IMAGE_PATH: &str = "image";

/// One entry of the directory collection. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfoRecord {
    pub id: SubjectId,
    #[serde(default)]
    pub firstname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

/// One entry of the image catalog. `personalinfo` references a directory id.
/// A record without a file name still belongs to its subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: ImageId,
    pub personalinfo: SubjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
