//! Field sanitization helpers.
//!
//! The CSV sources this crate ingests are hand-edited and frequently
//! contain stray punctuation inside otherwise-valid fields. These
//! functions strip a raw field token down to the characters the field
//! type admits, rather than rejecting the whole record.

/// The non-ASCII letters admitted by [`sanitize_alphabetic`], in both
/// cases: the German umlauts and sharp s.
const EXTRA_LETTERS: [char; 7] = ['Ä', 'Ö', 'Ü', 'ä', 'ö', 'ü', 'ß'];

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || EXTRA_LETTERS.contains(&c)
}

/// True if `s` is non-empty and consists only of letters.
fn is_alphabetic(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_letter)
}

/// Sanitize a name-like field: keep letters (ASCII plus German umlauts
/// and ß), whitespace, and hyphens; drop everything else.
///
/// When the result contains hyphens it is treated as a hyphenated name:
/// each hyphen-separated segment is trimmed, segments that are not
/// purely alphabetic are dropped entirely, and the survivors are
/// rejoined with hyphens. A segment like `"3Name"` therefore disappears
/// rather than shrinking to `"Name"`.
pub fn sanitize_alphabetic(s: &str) -> String {
    let kept: String = s
        .chars()
        .filter(|&c| is_letter(c) || c.is_whitespace() || c == '-')
        .collect();
    if !kept.contains('-') {
        return kept.trim().to_string();
    }
    kept.split('-')
        .map(str::trim)
        .filter(|segment| is_alphabetic(segment))
        .collect::<Vec<_>>()
        .join("-")
}

/// Sanitize a numeric field: keep decimal digits, drop everything else.
pub fn sanitize_numeric(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .trim()
        .to_string()
}
