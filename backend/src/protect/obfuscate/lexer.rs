//! Minimal scanner for the script subset the passes accept.
//!
//! It finds string literals and tracks bracket depth per line. Comments,
//! template literals and line continuations are refused instead of being
//! guessed at.

use super::ObfuscateError;
use std::ops::Range;

pub(crate) struct Scan {
    /// Byte ranges of string literals, quotes included, in source order.
    pub literals: Vec<Range<usize>>,
    /// Combined `{([` depth after each `\n`-separated line.
    pub depth_after: Vec<i32>,
}

pub(crate) fn scan(source: &str) -> Result<Scan, ObfuscateError> {
    let bytes = source.as_bytes();
    let mut literals = Vec::new();
    let mut depth_after = Vec::new();
    let mut depth = 0i32;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'\'' | b'"' => {
                let start = i;
                i += 1;
                loop {
                    match bytes.get(i) {
                        None | Some(b'\n') => return Err(ObfuscateError::UnterminatedString(start)),
                        Some(b'\\') => {
                            if bytes.get(i + 1) == Some(&b'\n') {
                                return Err(ObfuscateError::Unsupported {
                                    offset: i,
                                    what: "line continuation",
                                });
                            }
                            i += 2;
                        }
                        Some(&c) if c == b => {
                            i += 1;
                            break;
                        }
                        Some(_) => i += 1,
                    }
                }
                literals.push(start..i);
                continue;
            }
            b'`' => {
                return Err(ObfuscateError::Unsupported {
                    offset: i,
                    what: "template literal",
                })
            }
            b'/' if matches!(bytes.get(i + 1), Some(b'/') | Some(b'*')) => {
                return Err(ObfuscateError::Unsupported {
                    offset: i,
                    what: "comment",
                })
            }
            b'{' | b'(' | b'[' => depth += 1,
            b'}' | b')' | b']' => {
                depth -= 1;
                if depth < 0 {
                    return Err(ObfuscateError::Unbalanced);
                }
            }
            b'\n' => depth_after.push(depth),
            _ => {}
        }
        i += 1;
    }
    depth_after.push(depth);

    if depth != 0 {
        return Err(ObfuscateError::Unbalanced);
    }
    Ok(Scan {
        literals,
        depth_after,
    })
}

/// Rebuilds `source`, passing every stretch of code between literals through
/// `code` and every literal through `literal`.
pub(crate) fn rewrite<C, L>(source: &str, literals: &[Range<usize>], mut code: C, mut literal: L) -> String
where
    C: FnMut(&str) -> String,
    L: FnMut(&str, &str) -> String,
{
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for range in literals {
        out.push_str(&code(&source[cursor..range.start]));
        // `literal` sees the code emitted so far to decide on spacing.
        let replacement = literal(&source[range.clone()], &out);
        out.push_str(&replacement);
        cursor = range.end;
    }
    out.push_str(&code(&source[cursor..]));
    out
}
