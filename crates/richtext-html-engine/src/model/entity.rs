use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};

/// An annotation richer than a style, such as a link or an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default)]
    pub mutability: Mutability,
    #[serde(default)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mutability {
    #[default]
    Mutable,
    Immutable,
    Segmented,
}

impl Entity {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            mutability: Mutability::default(),
            data: Map::new(),
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Key into a document's entity map.
///
/// Raw documents write these as integers in `entityRanges` but as strings in
/// `entityMap`; both spellings deserialize to the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityKey(String);

impl EntityKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for EntityKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<u64> for EntityKey {
    fn from(key: u64) -> Self {
        Self(key.to_string())
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl de::Visitor<'_> for KeyVisitor {
            type Value = EntityKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an entity key as a string or non-negative integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<EntityKey, E> {
                Ok(EntityKey::from(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<EntityKey, E> {
                Ok(EntityKey::from(v))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_string_keys_are_equal() {
        let from_int: EntityKey = serde_json::from_str("3").unwrap();
        let from_str: EntityKey = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(from_int, from_str);
    }

    #[test]
    fn negative_key_is_rejected() {
        assert!(serde_json::from_str::<EntityKey>("-1").is_err());
    }

    #[test]
    fn mutability_uses_screaming_case() {
        let entity: Entity =
            serde_json::from_str(r#"{"type":"IMAGE","mutability":"IMMUTABLE","data":{}}"#)
                .unwrap();
        assert_eq!(entity.mutability, Mutability::Immutable);
    }
}
