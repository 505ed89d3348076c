//! # Obfuscation Pass Configurator
//!
//! A named [`ObfuscationProfile`] selects which source transformations run
//! over the guard script. The transformation itself sits behind
//! [`ObfuscationBackend`], so a different engine can be plugged into the
//! packaging pipeline without touching it. Whatever the backend does, the
//! output must behave exactly like the input script.
//!
//! The shipped backend is [`PassObfuscator`]. It works on a restricted script
//! subset (no comments, no template or regex literals) and refuses anything
//! outside it with an [`ObfuscateError`] rather than risk changing behavior.

mod lexer;
mod names;
mod passes;

pub use passes::PassObfuscator;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ObfuscateError {
    #[error("unterminated string literal at byte {0}")]
    UnterminatedString(usize),
    #[error("unsupported syntax at byte {offset}: {what}")]
    Unsupported { offset: usize, what: &'static str },
    #[error("unbalanced brackets")]
    Unbalanced,
    #[error("unknown obfuscation profile: {0}")]
    UnknownProfile(String),
    #[error("internal obfuscator error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierStyle {
    /// `_0x1a2b3c`
    Hexadecimal,
    /// `_a`, `_b`, ... `_aa`
    Mangled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObfuscationProfile {
    pub name: &'static str,
    pub compact: bool,
    pub control_flow_flattening: bool,
    /// Probability that an eligible call sequence is flattened.
    pub control_flow_flattening_threshold: f64,
    pub dead_code_injection: bool,
    /// Probability that a dead function is injected after an eligible statement.
    pub dead_code_injection_threshold: f64,
    pub rename_identifiers: bool,
    pub identifier_names: IdentifierStyle,
    pub self_defending: bool,
    pub debug_protection: bool,
    /// Period of the debugger trap. Zero disables the timer.
    pub debug_protection_interval_ms: u32,
    pub disable_console_output: bool,
    pub string_array: bool,
    pub string_array_rotate: bool,
    /// Fraction of distinct string literals moved into the array.
    pub string_array_threshold: f64,
}

impl ObfuscationProfile {
    /// Every pass on at full strength. The secure package always uses this.
    pub fn maximum() -> Self {
        Self {
            name: "maximum",
            compact: true,
            control_flow_flattening: true,
            control_flow_flattening_threshold: 1.0,
            dead_code_injection: true,
            dead_code_injection_threshold: 0.4,
            rename_identifiers: true,
            identifier_names: IdentifierStyle::Hexadecimal,
            self_defending: true,
            debug_protection: true,
            debug_protection_interval_ms: 4000,
            disable_console_output: true,
            string_array: true,
            string_array_rotate: true,
            string_array_threshold: 1.0,
        }
    }

    /// No pass runs; the backend returns its input unchanged.
    pub fn disabled() -> Self {
        Self {
            name: "disabled",
            compact: false,
            control_flow_flattening: false,
            control_flow_flattening_threshold: 0.0,
            dead_code_injection: false,
            dead_code_injection_threshold: 0.0,
            rename_identifiers: false,
            identifier_names: IdentifierStyle::Mangled,
            self_defending: false,
            debug_protection: false,
            debug_protection_interval_ms: 0,
            disable_console_output: false,
            string_array: false,
            string_array_rotate: false,
            string_array_threshold: 0.0,
        }
    }

    pub fn by_name(name: &str) -> Result<Self, ObfuscateError> {
        match name {
            "maximum" => Ok(Self::maximum()),
            "disabled" => Ok(Self::disabled()),
            other => Err(ObfuscateError::UnknownProfile(other.to_string())),
        }
    }
}

/// Source-to-source transformation applied to the guard script.
pub trait ObfuscationBackend: Send + Sync {
    fn apply(&self, source: &str, profile: &ObfuscationProfile) -> Result<String, ObfuscateError>;
}
