//! Sanitizing generated bundle names into URL-safe tokens.
//!
//! The base64url-encoded hash that names a bundle may contain uppercase
//! letters; downstream URLs and filenames want a lowercase slug restricted
//! to `[a-z0-9_-]`.

use deunicode::deunicode_char;

/// Produce a URL-safe name from arbitrary input.
///
/// Lowercases, optionally transliterates non-ASCII characters, and drops
/// anything outside `[a-z0-9_-]`. Non-ASCII characters survive when
/// `allow_unicode` is set (and transliteration is off).
pub fn se_name(input: &str, transliterate: bool, allow_unicode: bool) -> String {
    let source: String = if transliterate {
        input
            .chars()
            .map(|c| {
                if c.is_ascii() {
                    c.to_string()
                } else {
                    deunicode_char(c).unwrap_or_default().to_string()
                }
            })
            .collect()
    } else {
        input.to_owned()
    };

    let mut out = String::with_capacity(source.len());
    for c in source.chars().flat_map(char::to_lowercase) {
        let keep = c.is_ascii_lowercase()
            || c.is_ascii_digit()
            || c == '_'
            || c == '-'
            || (allow_unicode && !c.is_ascii());
        if keep {
            out.push(c);
        }
    }
    out
}
