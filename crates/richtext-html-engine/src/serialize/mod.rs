//! # Document Serialization
//!
//! Walks the block tree depth-first and writes the final markup.
//!
//! Lists are emitted as their wrapper element (`<ul>`, `<ol>`) around the
//! items. A nested list belongs inside the item that precedes it, so it is
//! written between that item's content and its closing tag; a nested list
//! with no preceding item gets a bare `<li>` of its own.

pub mod writer;

pub use writer::MarkupWriter;

use crate::blocks::{BlockNode, ListContainer, RenderedBlock, group_blocks, render_block};
use crate::error::ConvertError;
use crate::inline::tags;
use crate::model::Document;
use crate::options::Options;

/// Renders the whole document.
pub fn serialize(document: &Document, options: &Options) -> Result<String, ConvertError> {
    let tree = group_blocks(&document.blocks, options);
    log::debug!(
        "grouped {} blocks into {} top-level nodes",
        document.blocks.len(),
        tree.len()
    );

    let mut serializer = Serializer {
        document,
        options,
        writer: MarkupWriter::new(options.pretty_print),
    };
    for node in &tree {
        match node {
            BlockNode::Leaf(block) => {
                let rendered = render_block(block, document, options)?;
                serializer.writer.line();
                serializer.writer.push(&rendered.into_markup());
            }
            BlockNode::List(list) => serializer.write_list(list)?,
        }
    }
    Ok(serializer.writer.finish())
}

struct Serializer<'a> {
    document: &'a Document,
    options: &'a Options,
    writer: MarkupWriter,
}

impl Serializer<'_> {
    fn write_list(&mut self, list: &ListContainer<'_>) -> Result<(), ConvertError> {
        let wrapper = self.options.list_wrapper(list.list_type).unwrap_or("ul");
        self.writer.line();
        self.writer.push(&tags::open_tag(wrapper, ""));
        self.writer.indent();

        let children = &list.children;
        let mut i = 0;
        while i < children.len() {
            let (item, nested_start) = match &children[i] {
                BlockNode::Leaf(block) => {
                    (render_block(block, self.document, self.options)?, i + 1)
                }
                BlockNode::List(_) => (bare_item(), i),
            };
            let nested_end = children[nested_start..]
                .iter()
                .position(|node| matches!(node, BlockNode::Leaf(_)))
                .map_or(children.len(), |n| nested_start + n);

            self.write_item(item, &children[nested_start..nested_end])?;
            i = nested_end;
        }

        self.writer.dedent();
        self.writer.line();
        self.writer.push(&tags::close_tag(wrapper));
        Ok(())
    }

    /// Writes a list item with the lists nested under it.
    fn write_item(
        &mut self,
        item: RenderedBlock,
        nested: &[BlockNode<'_>],
    ) -> Result<(), ConvertError> {
        self.writer.line();
        match item {
            RenderedBlock::Element {
                open,
                content,
                close,
            } => {
                self.writer.push(&open);
                self.writer.push(&content);
                if !nested.is_empty() {
                    self.writer.indent();
                    self.write_lists(nested)?;
                    self.writer.dedent();
                    self.writer.line();
                }
                self.writer.push(&close);
            }
            RenderedBlock::Custom(markup) => {
                self.writer.push(&markup);
                if !nested.is_empty() {
                    self.write_item(bare_item(), nested)?;
                }
            }
        }
        Ok(())
    }

    fn write_lists(&mut self, nodes: &[BlockNode<'_>]) -> Result<(), ConvertError> {
        for node in nodes {
            if let BlockNode::List(list) = node {
                self.write_list(list)?;
            }
        }
        Ok(())
    }
}

fn bare_item() -> RenderedBlock {
    RenderedBlock::Element {
        open: tags::open_tag("li", ""),
        content: String::new(),
        close: tags::close_tag("li"),
    }
}
