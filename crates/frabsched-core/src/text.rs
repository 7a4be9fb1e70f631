//! Text extraction helpers.

use std::sync::LazyLock;

use regex::Regex;

use crate::xml::Element;

/// Matches one angle-bracket tag, shortest first. Does not span newlines.
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("Invalid tag regex"));

/// Removes every `<...>` substring from `text`.
///
/// This is a plain pattern strip: entities such as `&amp;` are left as-is and
/// nested or unbalanced markup is not understood.
pub fn strip_tags(text: &str) -> String {
    TAG_REGEX.replace_all(text, "").into_owned()
}

/// Returns the text of the first `child` of `element`, or `default` when the
/// child is absent or has no text.
pub fn text_or_default(element: &Element, child: &str, default: &str) -> String {
    element
        .child(child)
        .and_then(Element::text)
        .unwrap_or(default)
        .to_string()
}
