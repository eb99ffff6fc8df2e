use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Ids arrive either as JSON numbers or strings depending on how the fixture
/// was authored; both collapse to the same textual id.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Integer(i64),
    Text(String),
}

impl RawId {
    fn into_text(self) -> String {
        match self {
            RawId::Integer(value) => value.to_string(),
            RawId::Text(value) => value,
        }
    }
}

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into_text()))
            }
        }
    };
}

id_newtype!(SubjectId);
id_newtype!(ImageId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_decode_to_the_same_value() {
        let numeric: SubjectId = serde_json::from_str("7").expect("numeric id");
        let text: SubjectId = serde_json::from_str("\"7\"").expect("text id");
        assert_eq!(numeric, text);
        assert_eq!(numeric.as_str(), "7");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = ImageId::new("a1b2");
        assert_eq!(serde_json::to_string(&id).expect("json"), "\"a1b2\"");
    }
}
