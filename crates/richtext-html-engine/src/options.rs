//! Conversion options.
//!
//! `Options` only stores the caller's overrides. Every lookup checks the
//! override first and falls back to [`defaults`](crate::defaults), so the
//! built-in mappings never need to be copied or mutated.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::model::{Block, Entity};
use crate::ranges::OffsetUnit;

/// Overrides rendering of a whole block. `Ok(None)` falls back to the default rendering.
pub type BlockRenderer = Box<dyn Fn(&Block) -> anyhow::Result<Option<String>> + Send + Sync>;

/// Extra attributes for a block's outermost wrapper tag.
pub type BlockStyleFn = Box<dyn Fn(&Block) -> Option<BlockStyle> + Send + Sync>;

/// Wrapper for an entity given the entity and the text it covers.
/// `None` renders the covered text without a wrapper.
pub type EntityStyler = Box<dyn Fn(&Entity, &str) -> Option<ElementSpec> + Send + Sync>;

/// How an entity is turned into an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementSpec {
    /// Tag name; `span` when unset.
    pub element: Option<String>,
    pub attributes: BTreeMap<String, String>,
    /// CSS declarations, property names in camelCase or kebab-case.
    pub style: BTreeMap<String, String>,
    /// Emit `<tag .../>` in place of the covered text.
    pub self_closing: bool,
}

impl ElementSpec {
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: Some(element.into()),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn element(&self) -> &str {
        self.element.as_deref().unwrap_or("span")
    }
}

/// How an inline style is turned into a wrapping element.
///
/// Styles always wrap the text they cover, so unlike [`ElementSpec`] there is
/// no self-closing form. Unknown fields are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleSpec {
    /// Tag name; `span` when unset.
    pub element: Option<String>,
    pub attributes: BTreeMap<String, String>,
    /// CSS declarations, property names in camelCase or kebab-case.
    pub style: BTreeMap<String, String>,
}

impl StyleSpec {
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: Some(element.into()),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn element(&self) -> &str {
        self.element.as_deref().unwrap_or("span")
    }
}

impl From<StyleSpec> for ElementSpec {
    fn from(spec: StyleSpec) -> Self {
        Self {
            element: spec.element,
            attributes: spec.attributes,
            style: spec.style,
            self_closing: false,
        }
    }
}

/// Attributes returned by a block style function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockStyle {
    pub attributes: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
}

impl BlockStyle {
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }
}

pub struct Options {
    pub pretty_print: bool,
    /// List depths beyond this are treated as this depth.
    pub max_depth: usize,
    pub offset_unit: OffsetUnit,
    /// Also escape `"` in text content.
    pub escape_quotes: bool,
    /// Markup emitted for a literal newline; the newline itself is kept after it.
    pub line_break: String,
    /// Content of a block whose text is empty.
    pub empty_placeholder: String,
    /// Emit leading, trailing and repeated spaces as `&nbsp;`.
    pub preserve_whitespace: bool,
    /// Wrapper for block types with no mapping; `None` emits bare content.
    /// Such blocks have no tag to carry attributes, so `block_style_fn` is
    /// not called for them.
    pub default_block_tag: Option<String>,
    /// Style nesting order, outermost first. `None` uses the built-in order.
    pub style_order: Option<Vec<String>>,
    pub block_tags: HashMap<String, Vec<String>>,
    pub list_wrappers: HashMap<String, String>,
    pub inline_styles: HashMap<String, StyleSpec>,
    pub block_renderers: HashMap<String, BlockRenderer>,
    pub block_style_fn: Option<BlockStyleFn>,
    pub entity_stylers: HashMap<String, EntityStyler>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pretty_print: false,
            max_depth: defaults::MAX_DEPTH,
            offset_unit: OffsetUnit::default(),
            escape_quotes: false,
            line_break: defaults::LINE_BREAK.to_string(),
            empty_placeholder: defaults::EMPTY_PLACEHOLDER.to_string(),
            preserve_whitespace: true,
            default_block_tag: Some(defaults::BLOCK_TAG.to_string()),
            style_order: None,
            block_tags: HashMap::new(),
            list_wrappers: HashMap::new(),
            inline_styles: HashMap::new(),
            block_renderers: HashMap::new(),
            block_style_fn: None,
            entity_stylers: HashMap::new(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(mut self, pretty_print: bool) -> Self {
        self.pretty_print = pretty_print;
        self
    }

    pub fn with_block_tags<I, S>(mut self, block_type: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.block_tags
            .insert(block_type.into(), tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_list_wrapper(
        mut self,
        block_type: impl Into<String>,
        wrapper: impl Into<String>,
    ) -> Self {
        self.list_wrappers.insert(block_type.into(), wrapper.into());
        self
    }

    pub fn with_inline_style(mut self, style: impl Into<String>, spec: StyleSpec) -> Self {
        self.inline_styles.insert(style.into(), spec);
        self
    }

    pub fn with_block_renderer<F>(mut self, block_type: impl Into<String>, renderer: F) -> Self
    where
        F: Fn(&Block) -> anyhow::Result<Option<String>> + Send + Sync + 'static,
    {
        self.block_renderers.insert(block_type.into(), Box::new(renderer));
        self
    }

    pub fn with_block_style_fn<F>(mut self, style_fn: F) -> Self
    where
        F: Fn(&Block) -> Option<BlockStyle> + Send + Sync + 'static,
    {
        self.block_style_fn = Some(Box::new(style_fn));
        self
    }

    pub fn with_entity_styler<F>(mut self, entity_type: impl Into<String>, styler: F) -> Self
    where
        F: Fn(&Entity, &str) -> Option<ElementSpec> + Send + Sync + 'static,
    {
        self.entity_stylers.insert(entity_type.into(), Box::new(styler));
        self
    }

    /// Wrapper tags for `block_type`, outermost first. Empty when the block
    /// type is unmapped and the default block tag is disabled.
    pub fn block_tags_for(&self, block_type: &str) -> Vec<&str> {
        if let Some(tags) = self.block_tags.get(block_type) {
            return tags.iter().map(String::as_str).collect();
        }
        if let Some(tags) = defaults::block_tags(block_type) {
            return tags.to_vec();
        }
        self.default_block_tag.as_deref().into_iter().collect()
    }

    /// The list container element for a list-item type; `None` for every other type.
    pub fn list_wrapper(&self, block_type: &str) -> Option<&str> {
        self.list_wrappers
            .get(block_type)
            .map(String::as_str)
            .or_else(|| defaults::list_wrapper(block_type))
    }

    pub fn inline_style(&self, style: &str) -> Option<StyleSpec> {
        self.inline_styles
            .get(style)
            .cloned()
            .or_else(|| defaults::inline_style(style))
    }

    /// Sort key placing styles in nesting order. Styles missing from the
    /// order come after every listed style, by name.
    pub fn style_rank<'s>(&self, style: &'s str) -> (usize, &'s str) {
        let position = match &self.style_order {
            Some(order) => order.iter().position(|s| s == style),
            None => defaults::STYLE_ORDER.iter().position(|s| *s == style),
        };
        match position {
            Some(position) => (position, ""),
            None => (usize::MAX, style),
        }
    }

    /// Resolves the wrapper for an entity covering `text`.
    ///
    /// A styler registered for the exact type wins, then one registered for
    /// the upper-cased type, then the built-in link and image elements.
    pub fn entity_element(&self, entity: &Entity, text: &str) -> Option<ElementSpec> {
        let styler = self
            .entity_stylers
            .get(&entity.entity_type)
            .or_else(|| self.entity_stylers.get(&entity.entity_type.to_uppercase()));
        match styler {
            Some(styler) => styler(entity, text),
            None => defaults::entity_element(entity),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut renderers: Vec<_> = self.block_renderers.keys().collect();
        renderers.sort();
        let mut stylers: Vec<_> = self.entity_stylers.keys().collect();
        stylers.sort();

        f.debug_struct("Options")
            .field("pretty_print", &self.pretty_print)
            .field("max_depth", &self.max_depth)
            .field("offset_unit", &self.offset_unit)
            .field("escape_quotes", &self.escape_quotes)
            .field("line_break", &self.line_break)
            .field("empty_placeholder", &self.empty_placeholder)
            .field("preserve_whitespace", &self.preserve_whitespace)
            .field("default_block_tag", &self.default_block_tag)
            .field("style_order", &self.style_order)
            .field("block_tags", &self.block_tags)
            .field("list_wrappers", &self.list_wrappers)
            .field("inline_styles", &self.inline_styles)
            .field("block_renderers", &renderers)
            .field("block_style_fn", &self.block_style_fn.is_some())
            .field("entity_stylers", &stylers)
            .finish()
    }
}
