//! Package passwords.
//!
//! Secure packages print the password in the README for reference only.
//! Standard packages encrypt every archive entry with it.

use crate::protect::crypto::hex_encode;
use rand::RngCore;

/// Random bytes behind a package password.
pub const PASSWORD_BYTES: usize = 12;

/// 24 uppercase hex characters drawn from `rng`.
pub fn generate_password<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; PASSWORD_BYTES];
    rng.fill_bytes(&mut bytes);
    hex_encode(&bytes).to_ascii_uppercase()
}
