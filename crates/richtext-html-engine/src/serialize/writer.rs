const INDENT: &str = "  ";

/// Accumulates markup, starting each node on a new indented line when pretty
/// printing. Without pretty printing `line` is a no-op, so both modes emit
/// the same markup apart from the inserted whitespace.
#[derive(Debug)]
pub struct MarkupWriter {
    out: String,
    pretty: bool,
    level: usize,
}

impl MarkupWriter {
    pub fn new(pretty: bool) -> Self {
        Self {
            out: String::new(),
            pretty,
            level: 0,
        }
    }

    /// Starts a new line at the current indentation. Nothing is written
    /// before the first node, so output never starts with whitespace.
    pub fn line(&mut self) {
        if !self.pretty || self.out.is_empty() {
            return;
        }
        self.out.push('\n');
        for _ in 0..self.level {
            self.out.push_str(INDENT);
        }
    }

    pub fn push(&mut self, markup: &str) {
        self.out.push_str(markup);
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_writer_ignores_lines() {
        let mut w = MarkupWriter::new(false);
        w.line();
        w.push("<ul>");
        w.indent();
        w.line();
        w.push("<li>a</li>");
        w.dedent();
        w.line();
        w.push("</ul>");
        assert_eq!(w.finish(), "<ul><li>a</li></ul>");
    }

    #[test]
    fn pretty_writer_indents_two_spaces_per_level() {
        let mut w = MarkupWriter::new(true);
        w.line();
        w.push("<ul>");
        w.indent();
        w.line();
        w.push("<li>a</li>");
        w.dedent();
        w.line();
        w.push("</ul>");
        assert_eq!(w.finish(), "<ul>\n  <li>a</li>\n</ul>");
    }
}
