//! Converts rich-text editor documents into static HTML.
//!
//! A [`Document`] is an ordered list of blocks, each holding plain text plus
//! style and entity ranges that may overlap arbitrarily. [`convert`] groups
//! list items into nested lists, resolves the ranges into properly nested
//! inline tags and serializes the result, optionally pretty printed.
//!
//! ```
//! use richtext_html_engine::{Block, Document, Options, convert};
//!
//! let document = Document::new(vec![
//!     Block::new("header-one", "Hello world.").with_style(6, 5, "ITALIC"),
//! ]);
//! let html = convert(&document, &Options::default()).unwrap();
//! assert_eq!(html, "<h1>Hello <em>world</em>.</h1>");
//! ```
//!
//! Conversion is synchronous and keeps no state between calls; an `Options`
//! value can be shared by any number of threads.

pub mod blocks;
pub mod defaults;
pub mod error;
pub mod inline;
pub mod model;
pub mod options;
pub mod ranges;
pub mod serialize;

pub use error::ConvertError;
pub use model::{Block, Document, Entity, EntityKey, EntityRange, InlineStyleRange, Mutability};
pub use options::{BlockStyle, ElementSpec, Options, StyleSpec};
pub use ranges::OffsetUnit;

/// Renders `document` as HTML.
pub fn convert(document: &Document, options: &Options) -> Result<String, ConvertError> {
    serialize::serialize(document, options)
}

/// Parses a raw JSON document and renders it as HTML.
pub fn convert_json(json: &str, options: &Options) -> Result<String, ConvertError> {
    let document = Document::from_json(json)?;
    convert(&document, options)
}
