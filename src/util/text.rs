//! Text helpers for template values.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9A-Za-z_-]+").expect("word pattern is valid"));

/// Returns the first run of ASCII word characters or hyphens in `s`.
///
/// Everything around that run (units, arrows, punctuation) is ignored, and
/// an input with no such run yields `""`.
///
/// # Examples
///
/// ```
/// use templtree::util::text::simple_name;
///
/// assert_eq!(simple_name("cpu_busy => busy (percent)"), "cpu_busy");
/// assert_eq!(simple_name("^^node-name"), "node-name");
/// assert_eq!(simple_name("  =>  "), "");
/// ```
#[must_use]
pub fn simple_name(s: &str) -> &str {
    WORD.find(s).map_or("", |m| m.as_str())
}

/// Decodes the predefined markup entities and normalizes separators.
///
/// `&amp;`, `&lt;`, `&gt;`, `&apos;` and `&quot;` are replaced in that
/// order, then spaces and hyphens become underscores so the result can be
/// used as a label key.
#[must_use]
pub fn decode_html(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&apos;", "'")
        .replace("&quot;", "\"")
        .replace(' ', "_")
        .replace('-', "_")
}
