//! # Inline Rendering
//!
//! Renders one block's text and its resolved [`StyledSegment`]s as an HTML
//! fragment.
//!
//! ## Tag Stack
//!
//! The renderer keeps the stack of currently open tags. For each segment it
//! keeps the longest prefix of the stack that is still active, closes the
//! rest innermost first, then opens whatever is missing in canonical order:
//! the entity wrapper first, then styles by [`Options::style_rank`]. Tags can
//! therefore never cross, whatever the overlap pattern of the input ranges.
//!
//! The entity wrapper always sits at the bottom of the stack, so moving from
//! one entity to another closes everything.
//!
//! ## Modules
//!
//! - **`escape`**: text and attribute escaping, whitespace preservation
//! - **`tags`**: tag and attribute string construction, CSS serialisation

pub mod escape;
pub mod tags;

use crate::defaults::{block_type, inline_style};
use crate::model::{Block, Document, EntityKey};
use crate::options::{ElementSpec, Options, StyleSpec};
use crate::ranges::{StyledSegment, TextIndex, resolve_block};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKey<'a> {
    Entity(&'a EntityKey),
    Style(&'a str),
}

#[derive(Debug)]
struct OpenTag<'a> {
    key: TagKey<'a>,
    element: String,
}

#[derive(Debug, Default)]
struct TagStack<'a> {
    open: Vec<OpenTag<'a>>,
}

impl<'a> TagStack<'a> {
    fn sync(&mut self, out: &mut String, desired: &[(TagKey<'a>, ElementSpec)]) {
        let mut keep = self
            .open
            .iter()
            .take_while(|tag| desired.iter().any(|(key, _)| *key == tag.key))
            .count();

        let entity = desired
            .first()
            .map(|(key, _)| *key)
            .filter(|key| matches!(key, TagKey::Entity(_)));
        if entity.is_some() && self.open.first().map(|tag| tag.key) != entity {
            keep = 0;
        }

        self.close_to(out, keep);

        for (key, spec) in desired {
            if self.open.iter().any(|tag| tag.key == *key) {
                continue;
            }
            let attributes = tags::attribute_string(&spec.attributes, &spec.style);
            out.push_str(&tags::open_tag(spec.element(), &attributes));
            self.open.push(OpenTag {
                key: *key,
                element: spec.element().to_string(),
            });
        }
    }

    fn close_to(&mut self, out: &mut String, len: usize) {
        while self.open.len() > len {
            if let Some(tag) = self.open.pop() {
                out.push_str(&tags::close_tag(&tag.element));
            }
        }
    }
}

/// Renders the inline content of `block`. Empty text gives an empty string.
pub fn render_inline(block: &Block, document: &Document, options: &Options) -> String {
    let index = TextIndex::new(&block.text, options.offset_unit);
    let segments = resolve_block(block, &index);
    let skip_code = block.block_type == block_type::CODE_BLOCK;

    let mut out = String::with_capacity(block.text.len());
    let mut stack = TagStack::default();

    let mut run_start = 0;
    while run_start < segments.len() {
        let entity_key = segments[run_start].entity;
        let run_end = segments[run_start..]
            .iter()
            .position(|s| s.entity != entity_key)
            .map_or(segments.len(), |n| run_start + n);
        let run = &segments[run_start..run_end];

        let wrapper = entity_key.and_then(|key| {
            let entity = document.entity(key)?;
            let text = index.slice(run[0].start, run[run.len() - 1].end);
            options
                .entity_element(entity, text)
                .map(|spec| (TagKey::Entity(key), spec))
        });

        match wrapper {
            Some((_, spec)) if spec.self_closing => {
                stack.close_to(&mut out, 0);
                let attributes = tags::attribute_string(&spec.attributes, &spec.style);
                out.push_str(&tags::self_closing_tag(spec.element(), &attributes));
            }
            wrapper => {
                for segment in run {
                    let mut desired: Vec<(TagKey<'_>, ElementSpec)> =
                        wrapper.iter().cloned().collect();
                    desired.extend(active_styles(segment, options, skip_code));
                    stack.sync(&mut out, &desired);

                    let range = index.byte_offset(segment.start)..index.byte_offset(segment.end);
                    escape::push_text(&mut out, &block.text, range, options);
                }
            }
        }

        run_start = run_end;
    }

    stack.close_to(&mut out, 0);
    out
}

/// Styles of `segment` that map to an element, in nesting order.
fn active_styles<'a>(
    segment: &StyledSegment<'a>,
    options: &Options,
    skip_code: bool,
) -> Vec<(TagKey<'a>, ElementSpec)> {
    let mut styles: Vec<(&'a str, StyleSpec)> = segment
        .styles
        .iter()
        .copied()
        .filter(|style| !(skip_code && *style == inline_style::CODE))
        .filter_map(|style| options.inline_style(style).map(|spec| (style, spec)))
        .collect();
    styles.sort_by_key(|(style, _)| options.style_rank(*style));
    styles
        .into_iter()
        .map(|(style, spec)| (TagKey::Style(style), ElementSpec::from(spec)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entity;
    use pretty_assertions::assert_eq;

    fn render(block: Block) -> String {
        render_inline(&block, &Document::default(), &Options::default())
    }

    #[test]
    fn plain_text() {
        assert_eq!(render(Block::new("unstyled", "Hello & bye")), "Hello &amp; bye");
    }

    #[test]
    fn empty_text_renders_nothing() {
        assert_eq!(render(Block::new("unstyled", "").with_style(0, 1, "BOLD")), "");
    }

    #[test]
    fn single_style() {
        let block = Block::new("header-one", "Hello world.").with_style(6, 5, "ITALIC");
        assert_eq!(render(block), "Hello <em>world</em>.");
    }

    #[test]
    fn styles_on_same_segment_nest_in_canonical_order() {
        let block = Block::new("unstyled", "both")
            .with_style(0, 4, "BOLD")
            .with_style(0, 4, "ITALIC");
        assert_eq!(render(block), "<em><strong>both</strong></em>");
    }

    #[test]
    fn crossing_ranges_are_split_without_crossing_tags() {
        let block = Block::new("unstyled", "abcdef")
            .with_style(0, 4, "BOLD")
            .with_style(2, 4, "ITALIC");
        assert_eq!(render(block), "<strong>ab<em>cd</em></strong><em>ef</em>");
    }

    #[test]
    fn outer_tag_stays_open_while_inner_style_changes() {
        let block = Block::new("unstyled", "abc")
            .with_style(0, 3, "ITALIC")
            .with_style(1, 1, "BOLD");
        assert_eq!(render(block), "<em>a<strong>b</strong>c</em>");
    }

    #[test]
    fn unknown_style_renders_plain_text() {
        let block = Block::new("unstyled", "abc").with_style(0, 3, "SPARKLY");
        assert_eq!(render(block), "abc");
    }

    #[test]
    fn custom_style_renders_span_with_css() {
        let block = Block::new("unstyled", "red").with_style(0, 3, "RED");
        let options = Options::new().with_inline_style(
            "RED",
            StyleSpec::default().with_style("color", "red"),
        );
        assert_eq!(
            render_inline(&block, &Document::default(), &options),
            r#"<span style="color: red">red</span>"#
        );
    }

    #[test]
    fn style_always_wraps_its_text() {
        let block = Block::new("unstyled", "ab").with_style(0, 1, "MARK");
        let options = Options::new().with_inline_style("MARK", StyleSpec::new("mark"));

        assert_eq!(
            render_inline(&block, &Document::default(), &options),
            "<mark>a</mark>b"
        );
    }

    #[test]
    fn style_spec_cannot_be_self_closing() {
        let result =
            serde_json::from_str::<StyleSpec>(r#"{"element":"hr","self_closing":true}"#);
        assert!(result.is_err());

        let spec: StyleSpec = serde_json::from_str(r#"{"element":"hr"}"#).unwrap();
        assert!(!ElementSpec::from(spec).self_closing);
    }

    #[test]
    fn code_style_is_skipped_inside_code_blocks() {
        let block = Block::new("code-block", "x = 1").with_style(0, 5, "CODE");
        assert_eq!(render(block), "x = 1");
    }

    #[test]
    fn link_wraps_styles() {
        let block = Block::new("unstyled", "go here now")
            .with_entity(3, 4, "0")
            .with_style(0, 7, "BOLD");
        let document = Document::new(vec![])
            .with_entity("0", Entity::new("LINK").with_data("url", "https://x.test/?a=1&b=2"));

        assert_eq!(
            render_inline(&block, &document, &Options::default()),
            r#"<strong>go </strong><a href="https://x.test/?a=1&amp;b=2"><strong>here</strong></a> now"#
        );
    }

    #[test]
    fn image_replaces_covered_text() {
        let block = Block::new("atomic", " ").with_entity(0, 1, "img");
        let document = Document::new(vec![]).with_entity(
            "img",
            Entity::new("IMAGE")
                .with_data("src", "cat.png")
                .with_data("alt", "A cat"),
        );

        assert_eq!(
            render_inline(&block, &document, &Options::default()),
            r#"<img alt="A cat" src="cat.png"/>"#
        );
    }

    #[test]
    fn missing_entity_renders_text_only() {
        let block = Block::new("unstyled", "text").with_entity(0, 4, "404");
        assert_eq!(render(block), "text");
    }

    #[test]
    fn entity_styler_receives_covered_text() {
        let block = Block::new("unstyled", "hi @tim!").with_entity(3, 4, "m");
        let document = Document::new(vec![]).with_entity("m", Entity::new("MENTION"));
        let options = Options::new().with_entity_styler("MENTION", |_, text| {
            Some(ElementSpec::new("span").with_attribute("data-mention", text))
        });

        assert_eq!(
            render_inline(&block, &document, &options),
            r#"hi <span data-mention="@tim">@tim</span>!"#
        );
    }

    #[test]
    fn entity_styler_returning_none_renders_text() {
        let block = Block::new("unstyled", "link").with_entity(0, 4, "0");
        let document = Document::new(vec![])
            .with_entity("0", Entity::new("LINK").with_data("url", "https://x.test"));
        let options = Options::new().with_entity_styler("LINK", |_, _| None);

        assert_eq!(render_inline(&block, &document, &options), "link");
    }

    #[test]
    fn adjacent_entities_close_and_reopen() {
        let block = Block::new("unstyled", "ab")
            .with_entity(0, 1, "a")
            .with_entity(1, 1, "b");
        let document = Document::new(vec![])
            .with_entity("a", Entity::new("LINK").with_data("url", "/a"))
            .with_entity("b", Entity::new("LINK").with_data("url", "/b"));

        assert_eq!(
            render_inline(&block, &document, &Options::default()),
            r#"<a href="/a">a</a><a href="/b">b</a>"#
        );
    }

    #[test]
    fn entity_opens_beneath_already_open_style() {
        let block = Block::new("unstyled", "abc")
            .with_style(0, 3, "BOLD")
            .with_entity(1, 2, "0");
        let document = Document::new(vec![])
            .with_entity("0", Entity::new("LINK").with_data("url", "/"));

        assert_eq!(
            render_inline(&block, &document, &Options::default()),
            r#"<strong>a</strong><a href="/"><strong>bc</strong></a>"#
        );
    }
}
