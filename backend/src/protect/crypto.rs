//! Content cipher for protected packages.
//!
//! A repeating-key XOR over the UTF-8 encoding of the content, hex encoded
//! two digits per unit. Every unit is a single byte, which is exactly the
//! code-unit stream the browser sees after `unescape(encodeURIComponent(s))`,
//! so the guard script can reverse it with `decodeURIComponent(escape(..))`.
//!
//! The key travels in the same script as the ciphertext and the IV is not
//! used by the transform. This is obfuscation, not confidentiality, and there
//! is no authentication tag: a modified ciphertext decrypts to garbage rather
//! than failing.

use common::model::package::EncryptedPayload;
use rand::RngCore;
use thiserror::Error;

/// Key length in bytes (256 bits).
pub const KEY_SIZE: usize = 32;

/// IV length in bytes (128 bits).
pub const IV_SIZE: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("hex string must have even length")]
    OddLength,
    #[error("invalid hex digit at offset {0}")]
    InvalidHex(usize),
    #[error("key must not be empty")]
    EmptyKey,
    #[error("ciphertext does not decrypt to the original content")]
    RoundTripMismatch,
}

/// Encrypts `plaintext` under a fresh key and IV drawn from `rng`.
pub fn encrypt<R: RngCore + ?Sized>(plaintext: &str, rng: &mut R) -> EncryptedPayload {
    let mut key = [0u8; KEY_SIZE];
    let mut iv = [0u8; IV_SIZE];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut iv);

    let cipher: Vec<u8> = plaintext
        .as_bytes()
        .iter()
        .zip(key.iter().cycle())
        .map(|(byte, k)| byte ^ k)
        .collect();

    EncryptedPayload {
        cipher_hex: hex_encode(&cipher),
        key_hex: hex_encode(&key),
        iv_hex: hex_encode(&iv),
    }
}

/// Reverses [`encrypt`]. Only malformed hex is rejected; a tampered but
/// well-formed ciphertext yields replacement characters.
pub fn decrypt(cipher_hex: &str, key_hex: &str) -> Result<String, CryptoError> {
    let key = hex_decode(key_hex)?;
    if key.is_empty() {
        return Err(CryptoError::EmptyKey);
    }
    let cipher = hex_decode(cipher_hex)?;
    let plain: Vec<u8> = cipher
        .iter()
        .zip(key.iter().cycle())
        .map(|(byte, k)| byte ^ k)
        .collect();
    Ok(String::from_utf8_lossy(&plain).into_owned())
}

/// Decrypts `payload` and checks it against the content it was made from.
pub fn verify_round_trip(payload: &EncryptedPayload, plaintext: &str) -> Result<(), CryptoError> {
    if decrypt(&payload.cipher_hex, &payload.key_hex)? == plaintext {
        Ok(())
    } else {
        Err(CryptoError::RoundTripMismatch)
    }
}

/// Lowercase hex, two digits per byte.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Parses hex of either case.
///
/// # Returns
/// - The decoded bytes.
/// - `CryptoError::OddLength` or `CryptoError::InvalidHex` with the offset of the bad pair.
pub fn hex_decode(s: &str) -> Result<Vec<u8>, CryptoError> {
    if s.len() % 2 != 0 {
        return Err(CryptoError::OddLength);
    }
    s.as_bytes()
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| match (hex_value(pair[0]), hex_value(pair[1])) {
            (Some(high), Some(low)) => Ok(high << 4 | low),
            _ => Err(CryptoError::InvalidHex(i * 2)),
        })
        .collect()
}

fn hex_value(digit: u8) -> Option<u8> {
    (digit as char).to_digit(16).map(|v| v as u8)
}
