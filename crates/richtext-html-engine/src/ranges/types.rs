use std::collections::BTreeSet;

use crate::model::EntityKey;

/// What a range contributes to the text it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation<'a> {
    Style(&'a str),
    Entity(&'a EntityKey),
}

/// A validated half-open range `[start, end)` with `start < end <= len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotatedRange<'a> {
    pub start: usize,
    pub end: usize,
    pub annotation: Annotation<'a>,
}

/// An atomic run of text with a fixed set of active annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment<'a> {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
    pub styles: BTreeSet<&'a str>,
    pub entity: Option<&'a EntityKey>,
}

impl StyledSegment<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
