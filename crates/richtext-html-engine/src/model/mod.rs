//! # Document Model
//!
//! The raw content model produced by rich-text editor front-ends: an ordered
//! list of blocks plus an entity registry. Field names follow the editor's raw
//! JSON form (`entityMap`, `inlineStyleRanges`, ...) so a saved document can be
//! deserialized directly.
//!
//! The engine only reads these types; nothing here is mutated during a
//! conversion.

mod block;
mod entity;

pub use block::{Block, EntityRange, InlineStyleRange};
pub use entity::{Entity, EntityKey, Mutability};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// A whole document: blocks in display order and the entities they reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub entity_map: BTreeMap<String, Entity>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            entity_map: BTreeMap::new(),
        }
    }

    /// Parses a document from its raw JSON form.
    pub fn from_json(json: &str) -> Result<Self, ConvertError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Registers `entity` under `key`, replacing any previous entry.
    pub fn with_entity(mut self, key: impl Into<String>, entity: Entity) -> Self {
        self.entity_map.insert(key.into(), entity);
        self
    }

    /// Looks up an entity. A dangling key is not an error, it just has no entity.
    pub fn entity(&self, key: &EntityKey) -> Option<&Entity> {
        self.entity_map.get(key.as_str())
    }
}
