//! Pure escaping utilities shared by the markdown and HTML renderers.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters that would terminate a markdown link destination early.
const LINK_DESTINATION: &AsciiSet = &CONTROLS.add(b'(').add(b')');

/// HTML-entity escape `s` and neutralize `{{`/`}}` so downstream templating
/// does not treat the text as a placeholder.
///
/// # Examples
///
/// ```
/// use labdown::markdown::escape_html;
///
/// assert_eq!(escape_html("a < b"), "a &lt; b");
/// assert_eq!(escape_html("{{ name }}"), "&#123;&#123; name &#125;&#125;");
/// ```
pub fn escape_html(s: &str) -> String {
    replace_double_curly_brackets(&quick_xml::escape::escape(s))
}

/// Replace template braces with their numeric entities.
pub fn replace_double_curly_brackets(s: &str) -> String {
    s.replace("{{", "&#123;&#123;").replace("}}", "&#125;&#125;")
}

/// Escape only `<` and `>`, leaving other markup characters alone.
pub fn escape_angle_brackets(s: &str) -> Cow<'_, str> {
    if memchr::memchr2(b'<', b'>', s.as_bytes()).is_none() {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.replace('<', "&lt;").replace('>', "&gt;"))
}

/// Percent-encode a link destination so it can sit inside `](...)`.
///
/// Parentheses and control characters are encoded; everything already
/// percent-encoded is left as is.
///
/// ```
/// use labdown::markdown::escape_link_destination;
///
/// assert_eq!(
///     escape_link_destination("https://en.wikipedia.org/wiki/Rust_(language)"),
///     "https://en.wikipedia.org/wiki/Rust_%28language%29"
/// );
/// ```
pub fn escape_link_destination(url: &str) -> Cow<'_, str> {
    utf8_percent_encode(url, LINK_DESTINATION).into()
}

/// Quote an attribute value: wrap in `"` and backslash-escape `"` and `\`.
pub fn quote_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Last element of a slash-separated path, ignoring trailing slashes.
///
/// An empty path yields `"."`, a path of only slashes yields `"/"`.
pub fn base_name(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(i) => &trimmed[i + 1..],
        None => trimmed,
    }
}

/// Calculate the minimum fence length needed for a code block.
///
/// Returns the smallest number of fence characters (at least 3) that
/// doesn't appear as a run in the content.
///
/// # Examples
///
/// ```
/// use labdown::markdown::calculate_fence_length;
///
/// // Normal content needs 3 backticks
/// assert_eq!(calculate_fence_length("let x = 1;", '`'), 3);
///
/// // Content with 3 backticks needs 4
/// assert_eq!(calculate_fence_length("```rust\ncode\n```", '`'), 4);
/// ```
pub fn calculate_fence_length(content: &str, fence_char: char) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;

    for c in content.chars() {
        if c == fence_char {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }

    max_run.max(2) + 1
}
