use crate::error::ConvertError;
use crate::inline::{render_inline, tags};
use crate::model::{Block, Document};
use crate::options::Options;

/// The markup for one leaf block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedBlock {
    /// Output of a custom block renderer, used as is.
    Custom(String),
    /// Wrapper tags around inline content. `open` and `close` are kept apart
    /// so nested lists can be placed inside a list item.
    Element {
        open: String,
        content: String,
        close: String,
    },
}

impl RenderedBlock {
    pub fn into_markup(self) -> String {
        match self {
            RenderedBlock::Custom(markup) => markup,
            RenderedBlock::Element {
                open,
                content,
                close,
            } => open + &content + &close,
        }
    }
}

pub fn render_block(
    block: &Block,
    document: &Document,
    options: &Options,
) -> Result<RenderedBlock, ConvertError> {
    if let Some(renderer) = options.block_renderers.get(&block.block_type) {
        log::debug!(
            "custom renderer for {} block {:?}",
            block.block_type,
            block.key
        );
        if let Some(markup) = renderer(block).map_err(ConvertError::Hook)? {
            return Ok(RenderedBlock::Custom(markup));
        }
    }

    let tag_names = options.block_tags_for(&block.block_type);
    let style = match &options.block_style_fn {
        Some(_) if tag_names.is_empty() => {
            log::debug!(
                "{} block {:?} has no wrapper tag, skipping block style",
                block.block_type,
                block.key
            );
            None
        }
        Some(style_fn) => style_fn(block),
        None => None,
    };
    let attributes = style
        .map(|style| tags::attribute_string(&style.attributes, &style.style))
        .unwrap_or_default();

    let mut open = String::new();
    for (i, tag) in tag_names.iter().enumerate() {
        let attributes = if i == 0 { attributes.as_str() } else { "" };
        open.push_str(&tags::open_tag(tag, attributes));
    }
    let close: String = tag_names.iter().rev().map(|tag| tags::close_tag(tag)).collect();

    let content = if block.text.is_empty() {
        options.empty_placeholder.clone()
    } else {
        render_inline(block, document, options)
    };

    Ok(RenderedBlock::Element {
        open,
        content,
        close,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::BlockStyle;
    use pretty_assertions::assert_eq;

    fn render(block: &Block, options: &Options) -> String {
        render_block(block, &Document::default(), options)
            .unwrap()
            .into_markup()
    }

    #[test]
    fn heading_with_style() {
        let block = Block::new("header-one", "Hello world.").with_style(6, 5, "ITALIC");
        assert_eq!(
            render(&block, &Options::default()),
            "<h1>Hello <em>world</em>.</h1>"
        );
    }

    #[test]
    fn unknown_type_falls_back_to_paragraph() {
        let block = Block::new("mystery", "x");
        assert_eq!(render(&block, &Options::default()), "<p>x</p>");
    }

    #[test]
    fn disabled_default_tag_emits_bare_content() {
        let options = Options {
            default_block_tag: None,
            ..Options::default()
        };
        assert_eq!(render(&Block::new("mystery", "x"), &options), "x");
    }

    #[test]
    fn block_style_not_requested_without_wrapper_tag() {
        let options = Options {
            default_block_tag: None,
            ..Options::new().with_block_style_fn(|_| panic!("style requested for bare block"))
        };
        assert_eq!(render(&Block::new("mystery", "t"), &options), "t");
    }

    #[test]
    fn code_block_uses_nested_tags() {
        let block = Block::new("code-block", "a < b");
        assert_eq!(
            render(&block, &Options::default()),
            "<pre><code>a &lt; b</code></pre>"
        );
    }

    #[test]
    fn empty_block_gets_placeholder() {
        let block = Block::new("unstyled", "");
        assert_eq!(render(&block, &Options::default()), "<p>&nbsp;</p>");

        let options = Options {
            empty_placeholder: "<br>".to_string(),
            ..Options::default()
        };
        assert_eq!(render(&block, &options), "<p><br></p>");
    }

    #[test]
    fn custom_renderer_bypasses_inline_rendering() {
        let options = Options::new().with_block_renderer("code-block", |block| {
            Ok(Some(format!("<div class=\"code\">{}</div>", block.text)))
        });
        let block = Block::new("code-block", "Hello world.").with_style(6, 5, "ITALIC");

        assert_eq!(
            render(&block, &options),
            r#"<div class="code">Hello world.</div>"#
        );
    }

    #[test]
    fn custom_renderer_returning_none_falls_through() {
        let options = Options::new().with_block_renderer("unstyled", |_| Ok(None));
        assert_eq!(render(&Block::new("unstyled", "a"), &options), "<p>a</p>");
    }

    #[test]
    fn custom_renderer_error_propagates() {
        let options = Options::new()
            .with_block_renderer("atomic", |_| Err(anyhow::anyhow!("no atomic support")));

        let err = render_block(&Block::new("atomic", "x"), &Document::default(), &options)
            .unwrap_err();

        assert_eq!(err.to_string(), "no atomic support");
    }

    #[test]
    fn block_style_goes_on_outermost_tag() {
        let options = Options::new().with_block_style_fn(|block| {
            block.data.get("alignment").and_then(|a| a.as_str()).map(|alignment| {
                BlockStyle::default()
                    .with_attribute("className", "aligned")
                    .with_style("textAlign", alignment)
            })
        });

        let block = Block::new("code-block", "x").with_data("alignment", "right");
        assert_eq!(
            render(&block, &options),
            r#"<pre class="aligned" style="text-align: right"><code>x</code></pre>"#
        );

        let plain = Block::new("code-block", "x");
        assert_eq!(render(&plain, &options), "<pre><code>x</code></pre>");
    }
}
