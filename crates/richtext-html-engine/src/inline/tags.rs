use std::collections::BTreeMap;

use super::escape::attribute_value;

/// Renders ` name="value"` pairs for an element.
///
/// React-style names (`className`, `htmlFor`) are normalised, and a non-empty
/// `style` map becomes a trailing `style` attribute that replaces any
/// `style` entry in `attributes`.
pub fn attribute_string(
    attributes: &BTreeMap<String, String>,
    style: &BTreeMap<String, String>,
) -> String {
    let mut out = String::new();
    for (name, value) in attributes {
        let name = normalize_attribute(name);
        if name == "style" && !style.is_empty() {
            continue;
        }
        push_attribute(&mut out, name, value);
    }
    if !style.is_empty() {
        push_attribute(&mut out, "style", &style_to_css(style));
    }
    out
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&attribute_value(value));
    out.push('"');
}

fn normalize_attribute(name: &str) -> &str {
    match name {
        "className" => "class",
        "htmlFor" => "for",
        other => other,
    }
}

/// `{textAlign: left, color: red}` → `color: red; text-align: left`
pub fn style_to_css(style: &BTreeMap<String, String>) -> String {
    style
        .iter()
        .map(|(property, value)| format!("{}: {}", hyphenate(property), value))
        .collect::<Vec<_>>()
        .join("; ")
}

fn hyphenate(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    // msTransform → -ms-transform
    if out.starts_with("ms-") {
        out.insert(0, '-');
    }
    out
}

pub fn open_tag(element: &str, attributes: &str) -> String {
    format!("<{element}{attributes}>")
}

pub fn self_closing_tag(element: &str, attributes: &str) -> String {
    format!("<{element}{attributes}/>")
}

pub fn close_tag(element: &str) -> String {
    format!("</{element}>")
}
