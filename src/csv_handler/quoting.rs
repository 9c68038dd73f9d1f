//! Quoting and escaping helpers shared by the parser and the serializer.

use once_cell::sync::Lazy;
use regex::Regex;

/// The double-quote character that wraps quoted values.
pub const QUOTE: char = '"';

/// A whole field consisting of optional whitespace, one quoted string, and
/// optional whitespace. The capture is everything between the outermost quotes.
static QUOTED_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)\A\s*"(.*)"\s*\z"#).expect("quoted value pattern is valid"));

/// Counts the double-quote characters in `part`.
#[inline]
pub fn count_quotes(part: &str) -> usize {
    part.matches(QUOTE).count()
}

/// Unwraps a completed field that contained quote characters.
///
/// Runs in two steps: the whole value must first match a single quoted
/// wrapper (surrounding whitespace allowed), then every `""` in the wrapped
/// content collapses to `"`. Returns `None` when quotes appear anywhere
/// outside that wrapper.
///
/// ```
/// use csv_store::csv_handler::quoting::unwrap_quoted;
///
/// assert_eq!(unwrap_quoted(r#"  "x""y" "#).as_deref(), Some(r#"x"y"#));
/// assert_eq!(unwrap_quoted(r#""""""#).as_deref(), Some(r#"""#));
/// assert_eq!(unwrap_quoted(r#"a"b""#), None);
/// ```
pub fn unwrap_quoted(value: &str) -> Option<String> {
    let captures = QUOTED_VALUE.captures(value)?;
    let inner = captures.get(1).map_or("", |m| m.as_str());
    Some(inner.replace("\"\"", "\""))
}

/// Returns true when `value` has to be wrapped in quotes on output.
///
/// A value containing the newline sequence is quoted too, otherwise it would
/// be read back as two rows.
#[inline]
pub fn needs_quotes(value: &str, delimiter: char, newline: &str, always_quote: bool) -> bool {
    always_quote
        || value.contains(QUOTE)
        || value.contains(delimiter)
        || (!newline.is_empty() && value.contains(newline))
}

/// Wraps `value` in double quotes, doubling any embedded quote.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push(QUOTE);
    for c in value.chars() {
        if c == QUOTE {
            quoted.push(QUOTE);
        }
        quoted.push(c);
    }
    quoted.push(QUOTE);
    quoted
}
