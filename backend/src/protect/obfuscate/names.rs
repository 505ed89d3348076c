//! Identifier generation for the renaming passes.

use super::{IdentifierStyle, ObfuscateError};
use rand::Rng;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Hands out identifiers that collide neither with each other nor with any
/// word already present in the source.
pub(crate) struct NameGenerator {
    style: IdentifierStyle,
    /// Original name -> generated name, for renaming.
    name_map: HashMap<String, String>,
    taken: HashSet<String>,
    counter: u64,
}

impl NameGenerator {
    pub fn new(style: IdentifierStyle) -> Self {
        Self {
            style,
            name_map: HashMap::new(),
            taken: HashSet::new(),
            counter: 0,
        }
    }

    /// Marks every identifier-like word of `source` as taken.
    pub fn reserve_existing(&mut self, source: &str) -> Result<(), ObfuscateError> {
        let word = Regex::new(r"[A-Za-z_$][A-Za-z0-9_$]*").map_err(|e| ObfuscateError::Internal(e.to_string()))?;
        for m in word.find_iter(source) {
            self.taken.insert(m.as_str().to_string());
        }
        Ok(())
    }

    /// A name nobody has used yet.
    pub fn fresh<R: Rng>(&mut self, rng: &mut R) -> String {
        loop {
            let candidate = match self.style {
                IdentifierStyle::Hexadecimal => format!("_0x{:x}", rng.gen_range(0x1000u32..0x100_0000)),
                IdentifierStyle::Mangled => {
                    let name = format!("_{}", mangled(self.counter));
                    self.counter += 1;
                    name
                }
            };
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Stable replacement for `original`: the same input always maps to the
    /// same output within one generator.
    pub fn rename<R: Rng>(&mut self, original: &str, rng: &mut R) -> String {
        if let Some(existing) = self.name_map.get(original) {
            return existing.clone();
        }
        let name = self.fresh(rng);
        self.name_map.insert(original.to_string(), name.clone());
        name
    }
}

/// Bijective base-52 over `a-zA-Z`: 0 -> a, 51 -> Z, 52 -> aa.
fn mangled(mut n: u64) -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let base = ALPHABET.len() as u64;
    let mut out = Vec::new();
    loop {
        out.push(ALPHABET[(n % base) as usize]);
        if n < base {
            break;
        }
        n = n / base - 1;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
