//! # Archive Filenames
//!
//! Brand names and affiliate codes are free text; the archive name built from
//! them has to survive every filesystem and `Content-Disposition` header.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Used when nothing usable is left of the input.
pub const FALLBACK_NAME: &str = "prelander";

pub const MAX_NAME_LEN: usize = 50;

/// Reduces a brand name or affiliate code to a lowercase `[a-z0-9_]` token
/// suitable for an archive filename.
///
/// The input is brought to composed form and any combining marks that remain
/// are dropped; every other character outside `[A-Za-z0-9]` becomes `_`.
/// Runs of `_` collapse to one and leading or trailing `_` are trimmed.
pub fn sanitize_filename(input: Option<&str>) -> String {
    let Some(input) = input else {
        return FALLBACK_NAME.to_string();
    };

    let mut collapsed = String::with_capacity(input.len());
    for c in input.nfc().filter(|c| !is_combining_mark(*c)) {
        let c = if c.is_ascii_alphanumeric() { c } else { '_' };
        if c == '_' && collapsed.ends_with('_') {
            continue;
        }
        collapsed.push(c);
    }

    let name: String = collapsed
        .trim_matches('_')
        .to_ascii_lowercase()
        .chars()
        .take(MAX_NAME_LEN)
        .collect();
    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}
