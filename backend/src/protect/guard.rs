//! Guard script generation.
//!
//! The guard is the only script shipped in a secure package. In the browser
//! it runs, in order: a devtools size heuristic on a timer, a `file:`
//! protocol check, the optional hostname allow-list, decrypt-and-inject of
//! the page content into [`CONTAINER_ID`] together with the palette custom
//! properties, a hidden node carrying the base64 affiliate token, and
//! suppression of the context menu and common inspection shortcuts.
//!
//! The allow-list accepts the domain itself, any subdomain of it, and the
//! loopback hosts `localhost`, `127.0.0.1`, `::1` and `[::1]`.
//!
//! The script source lives in `guard.js`. Its locals all start with `__g_`
//! so the identifier-renaming pass can find them, it has no comments, no
//! template or regex literals and no quoted object keys, which keeps it
//! inside what the pass obfuscator can rewrite safely.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use common::model::package::EncryptedPayload;
use regex::Regex;
use serde::Serialize;

/// Element the decrypted markup is written into.
pub const CONTAINER_ID: &str = "prelander-root";

const GUARD_TEMPLATE: &str = include_str!("guard.js");

/// What the guard decrypts: the page body and the palette to apply.
#[derive(Debug, Serialize)]
pub struct ProtectedContent<'a> {
    pub html: &'a str,
    pub colors: ProtectedColors<'a>,
}

#[derive(Debug, Serialize)]
pub struct ProtectedColors<'a> {
    pub primary: &'a str,
    pub secondary: &'a str,
    pub accent: &'a str,
}

/// Renders the guard script for one package.
///
/// Every interpolated value is emitted as a JSON string literal, so nothing
/// from the request or the site record can break out of its position.
pub fn build_guard_script(
    payload: &EncryptedPayload,
    affiliate_token: &str,
    allowed_domain: Option<&str>,
    site_slug: &str,
) -> String {
    let allowed = allowed_domain.map_or_else(|| "null".to_string(), js_string);

    // Placeholders sit between `%%` pairs, so odd segments are names. Filling
    // in a single pass keeps substituted values from being rescanned.
    let mut script = String::with_capacity(GUARD_TEMPLATE.len() + payload.cipher_hex.len() + 512);
    for (index, segment) in GUARD_TEMPLATE.split("%%").enumerate() {
        if index % 2 == 0 {
            script.push_str(segment);
            continue;
        }
        let value = match segment {
            "CIPHER" => js_string(&payload.cipher_hex),
            "KEY" => js_string(&payload.key_hex),
            "IV" => js_string(&payload.iv_hex),
            "ALLOWED" => allowed.clone(),
            "TOKEN" => js_string(&BASE64.encode(affiliate_token)),
            "SITE" => js_string(site_slug),
            "CONTAINER" => js_string(CONTAINER_ID),
            other => format!("%%{}%%", other),
        };
        script.push_str(&value);
    }
    script
}

fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Reduces user input such as `https://www.Example.com:8080/path` to the bare
/// registrable host `example.com`. Returns a message describing the problem
/// when the result is not a plausible ASCII hostname.
pub fn normalize_allowed_domain(raw: &str) -> Result<String, String> {
    let label_re =
        Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").map_err(|e| format!("Regex error: {}", e))?;

    let mut host = raw.trim().to_ascii_lowercase();
    if let Some(pos) = host.find("://") {
        host = host[pos + 3..].to_string();
    }
    if let Some(pos) = host.find(&['/', '?', '#'][..]) {
        host.truncate(pos);
    }
    if let Some(pos) = host.rfind('@') {
        host = host[pos + 1..].to_string();
    }
    if let Some((name, port)) = host.rsplit_once(':') {
        if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) {
            host = name.to_string();
        }
    }
    let host = host.trim_end_matches('.');
    let host = host.strip_prefix("www.").unwrap_or(host);

    if host.is_empty() {
        return Err("allowedDomain is empty".to_string());
    }
    if host.len() > 253 || !host.split('.').all(|label| label_re.is_match(label)) {
        return Err(format!("allowedDomain '{}' is not a valid hostname", raw.trim()));
    }
    Ok(host.to_string())
}
