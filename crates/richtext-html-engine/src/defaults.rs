//! Built-in tag mappings.
//!
//! These are immutable lookups consulted after the caller's overrides in
//! [`Options`](crate::Options); nothing here is ever mutated.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::model::Entity;
use crate::options::{ElementSpec, StyleSpec};

pub mod block_type {
    pub const UNSTYLED: &str = "unstyled";
    pub const HEADER_ONE: &str = "header-one";
    pub const HEADER_TWO: &str = "header-two";
    pub const HEADER_THREE: &str = "header-three";
    pub const HEADER_FOUR: &str = "header-four";
    pub const HEADER_FIVE: &str = "header-five";
    pub const HEADER_SIX: &str = "header-six";
    pub const UNORDERED_LIST_ITEM: &str = "unordered-list-item";
    pub const ORDERED_LIST_ITEM: &str = "ordered-list-item";
    pub const BLOCKQUOTE: &str = "blockquote";
    pub const CODE_BLOCK: &str = "code-block";
    pub const ATOMIC: &str = "atomic";
}

pub mod inline_style {
    pub const BOLD: &str = "BOLD";
    pub const CODE: &str = "CODE";
    pub const ITALIC: &str = "ITALIC";
    pub const STRIKETHROUGH: &str = "STRIKETHROUGH";
    pub const UNDERLINE: &str = "UNDERLINE";
}

pub mod entity_type {
    pub const LINK: &str = "LINK";
    pub const IMAGE: &str = "IMAGE";
}

/// Outermost first: `CODE` wraps everything, `BOLD` sits closest to the text.
pub const STYLE_ORDER: [&str; 5] = [
    inline_style::CODE,
    inline_style::STRIKETHROUGH,
    inline_style::UNDERLINE,
    inline_style::ITALIC,
    inline_style::BOLD,
];

pub const MAX_DEPTH: usize = 4;
pub const BLOCK_TAG: &str = "p";
pub const LINE_BREAK: &str = "<br>";
pub const EMPTY_PLACEHOLDER: &str = "&nbsp;";

/// Wrapper tags for a block type, outermost first.
pub fn block_tags(block_type: &str) -> Option<&'static [&'static str]> {
    use block_type::*;

    let tags: &'static [&'static str] = match block_type {
        HEADER_ONE => &["h1"],
        HEADER_TWO => &["h2"],
        HEADER_THREE => &["h3"],
        HEADER_FOUR => &["h4"],
        HEADER_FIVE => &["h5"],
        HEADER_SIX => &["h6"],
        UNORDERED_LIST_ITEM | ORDERED_LIST_ITEM => &["li"],
        BLOCKQUOTE => &["blockquote"],
        CODE_BLOCK => &["pre", "code"],
        ATOMIC => &["figure"],
        _ => return None,
    };
    Some(tags)
}

/// The container element for a list-item block type.
pub fn list_wrapper(block_type: &str) -> Option<&'static str> {
    match block_type {
        block_type::UNORDERED_LIST_ITEM => Some("ul"),
        block_type::ORDERED_LIST_ITEM => Some("ol"),
        _ => None,
    }
}

pub fn inline_style(style: &str) -> Option<StyleSpec> {
    let element = match style {
        inline_style::BOLD => "strong",
        inline_style::CODE => "code",
        inline_style::ITALIC => "em",
        inline_style::STRIKETHROUGH => "del",
        inline_style::UNDERLINE => "u",
        _ => return None,
    };
    Some(StyleSpec::new(element))
}

static DATA_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data-[a-z0-9-]+$").expect("static regex"));

const LINK_ATTRIBUTES: &[(&str, &str)] = &[
    ("url", "href"),
    ("href", "href"),
    ("rel", "rel"),
    ("target", "target"),
    ("title", "title"),
    ("className", "class"),
];

const IMAGE_ATTRIBUTES: &[(&str, &str)] = &[
    ("src", "src"),
    ("height", "height"),
    ("width", "width"),
    ("alt", "alt"),
    ("className", "class"),
];

/// Default wrapper for links and images; other entity types render as text.
///
/// The type comparison is case-insensitive since some editors store `image`.
pub fn entity_element(entity: &Entity) -> Option<ElementSpec> {
    let entity_type = entity.entity_type.to_uppercase();
    let (element, mapping, self_closing) = match entity_type.as_str() {
        entity_type::LINK => ("a", LINK_ATTRIBUTES, false),
        entity_type::IMAGE => ("img", IMAGE_ATTRIBUTES, true),
        _ => return None,
    };

    let mut attributes = BTreeMap::new();
    for (data_key, value) in &entity.data {
        let Some(value) = attribute_value(value) else {
            continue;
        };
        if let Some((_, attribute)) = mapping.iter().find(|(key, _)| key == data_key) {
            attributes.insert(attribute.to_string(), value);
        } else if DATA_ATTRIBUTE.is_match(data_key) {
            attributes.insert(data_key.clone(), value);
        }
    }

    Some(ElementSpec {
        element: Some(element.to_string()),
        attributes,
        style: BTreeMap::new(),
        self_closing,
    })
}

fn attribute_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
