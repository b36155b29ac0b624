use serde::{Deserialize, Serialize};

/// The unit range offsets and lengths are measured in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetUnit {
    /// UTF-16 code units, as produced by browser-based editors.
    #[default]
    Utf16,
    /// Unicode scalar values.
    Char,
    /// UTF-8 bytes.
    Byte,
}

impl OffsetUnit {
    fn width(self, c: char) -> usize {
        match self {
            OffsetUnit::Utf16 => c.len_utf16(),
            OffsetUnit::Char => 1,
            OffsetUnit::Byte => c.len_utf8(),
        }
    }
}

/// Maps offsets in an [`OffsetUnit`] onto byte offsets of a `&str`.
///
/// An offset that lands inside a character (half of a surrogate pair, or the
/// middle of a multi-byte sequence) maps to the end of that character, so
/// slicing never splits a character and adjacent slices still tile the text.
#[derive(Debug, Clone)]
pub struct TextIndex<'a> {
    text: &'a str,
    byte_at: Vec<usize>,
}

impl<'a> TextIndex<'a> {
    pub fn new(text: &'a str, unit: OffsetUnit) -> Self {
        let mut byte_at = Vec::with_capacity(text.len() + 1);
        for (i, c) in text.char_indices() {
            byte_at.push(i);
            let end = i + c.len_utf8();
            for _ in 1..unit.width(c) {
                byte_at.push(end);
            }
        }
        byte_at.push(text.len());
        Self { text, byte_at }
    }

    /// Text length in offset units.
    pub fn len(&self) -> usize {
        self.byte_at.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte offset for `offset`, clamped to the end of the text.
    pub fn byte_offset(&self, offset: usize) -> usize {
        self.byte_at
            .get(offset)
            .copied()
            .unwrap_or(self.text.len())
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.byte_offset(start)..self.byte_offset(end)]
    }

    pub fn text(&self) -> &'a str {
        self.text
    }
}
