use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::EntityKey;

fn unstyled() -> String {
    crate::defaults::block_type::UNSTYLED.to_string()
}

/// One unit of document content (paragraph, heading, list item, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default)]
    pub key: String,
    #[serde(rename = "type", default = "unstyled")]
    pub block_type: String,
    #[serde(default)]
    pub depth: usize,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub inline_style_ranges: Vec<InlineStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<EntityRange>,
    /// Opaque per-block metadata, e.g. `{"alignment": "left"}`.
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// A formatting style applied over `[offset, offset + length)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineStyleRange {
    pub offset: i64,
    pub length: i64,
    pub style: String,
}

/// A reference from `[offset, offset + length)` to an entry of the entity map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRange {
    pub offset: i64,
    pub length: i64,
    pub key: EntityKey,
}

impl Block {
    pub fn new(block_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: String::new(),
            block_type: block_type.into(),
            depth: 0,
            text: text.into(),
            inline_style_ranges: Vec::new(),
            entity_ranges: Vec::new(),
            data: Map::new(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_style(mut self, offset: i64, length: i64, style: impl Into<String>) -> Self {
        self.inline_style_ranges.push(InlineStyleRange {
            offset,
            length,
            style: style.into(),
        });
        self
    }

    pub fn with_entity(mut self, offset: i64, length: i64, key: impl Into<EntityKey>) -> Self {
        self.entity_ranges.push(EntityRange {
            offset,
            length,
            key: key.into(),
        });
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}
