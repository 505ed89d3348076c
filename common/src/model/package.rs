use serde::{Deserialize, Serialize};

/// Output of the content cipher.
///
/// `iv_hex` is generated alongside the key but is not mixed into the
/// transform; it is carried so a stronger cipher can adopt it without a
/// format change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedPayload {
    pub cipher_hex: String,
    pub key_hex: String,
    pub iv_hex: String,
}

/// Packaging mode of a generated archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageProfile {
    /// Encrypted content behind an obfuscated guard script. The archive
    /// itself is not encrypted.
    Secure,
    /// Plain files inside a password-protected archive.
    Standard,
}

impl PackageProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageProfile::Secure => "secure",
            PackageProfile::Standard => "standard",
        }
    }
}
