use std::ops::Range;

use crate::options::Options;

const NBSP: &str = "&nbsp;";

/// Appends `text[range]` to `out` as escaped HTML text.
///
/// `text` is the whole block text so whitespace preservation can look at the
/// characters around the range: a space that is first or last in the block,
/// or that follows another space, becomes `&nbsp;`.
pub fn push_text(out: &mut String, text: &str, range: Range<usize>, options: &Options) {
    let mut run_start = range.start;

    for (i, c) in text[range.clone()].char_indices() {
        let at = range.start + i;
        let replacement = match c {
            ' ' if options.preserve_whitespace
                && (at == 0 || at + 1 == text.len() || text[..at].ends_with(' ')) =>
            {
                Some(NBSP)
            }
            '\u{a0}' => Some(NBSP),
            '\n' => Some("\n"),
            _ => None,
        };
        let Some(replacement) = replacement else {
            continue;
        };

        push_escaped(out, &text[run_start..at], options);
        if c == '\n' {
            out.push_str(&options.line_break);
        }
        out.push_str(replacement);
        run_start = at + c.len_utf8();
    }

    push_escaped(out, &text[run_start..range.end], options);
}

fn push_escaped(out: &mut String, text: &str, options: &Options) {
    if options.escape_quotes {
        html_escape::encode_double_quoted_attribute_to_string(text, out);
    } else {
        html_escape::encode_text_to_string(text, out);
    }
}

/// Escapes an attribute value for use inside double quotes.
pub fn attribute_value(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}
