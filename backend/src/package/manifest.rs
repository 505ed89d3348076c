//! README written into every package.
//!
//! The manifest is the only place the password and affiliate credentials are
//! recorded inside the archive. It also lists an MD5 checksum for each other
//! file so an operator can confirm an upload arrived intact.

use chrono::{DateTime, SecondsFormat, Utc};
use common::model::package::PackageProfile;
use md5::Context;

use crate::package::archive::PackageFile;

pub const README_NAME: &str = "README.md";

/// Everything the README documents about one package.
#[derive(Debug, Clone)]
pub struct CredentialManifest<'a> {
    pub profile: PackageProfile,
    pub brand_name: &'a str,
    pub site_slug: &'a str,
    pub affiliate_code: &'a str,
    pub affiliate_token: &'a str,
    pub password: &'a str,
    pub allowed_domain: Option<&'a str>,
    pub page_version: &'a str,
    pub generated_at: DateTime<Utc>,
}

impl CredentialManifest<'_> {
    /// Renders the README for an archive holding `files`.
    pub fn to_readme(&self, files: &[PackageFile]) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {} landing page package\n\n", self.brand_name.trim()));
        out.push_str(&format!(
            "- Generated: {}\n",
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        out.push_str(&format!("- Profile: {}\n", self.profile.as_str()));
        out.push_str(&format!("- Site: {}\n", self.site_slug));
        out.push_str(&format!("- Page version: {}\n\n", self.page_version));

        out.push_str("## Credentials\n\n");
        out.push_str("| Item | Value |\n|---|---|\n");
        out.push_str(&format!("| Package password | `{}` |\n", self.password));
        out.push_str(&format!("| Affiliate code | `{}` |\n", self.affiliate_code));
        out.push_str(&format!("| Affiliate token | `{}` |\n\n", self.affiliate_token));
        match self.profile {
            PackageProfile::Secure => out.push_str(
                "The password identifies this package. Quote it when contacting support; \
                 the files themselves are not locked with it.\n\n",
            ),
            PackageProfile::Standard => out.push_str(
                "Every file in the archive is AES-256 encrypted with this password. \
                 You need it to extract the package.\n\n",
            ),
        }

        out.push_str("## Deployment\n\n");
        match self.profile {
            PackageProfile::Secure => {
                out.push_str(
                    "1. Upload `index.html`, `script.js` and `style.css` to the same directory on your web server.\n",
                );
                out.push_str(
                    "2. Serve the page over http or https. Opened straight from disk it shows a warning instead of the page.\n",
                );
                match self.allowed_domain {
                    Some(domain) => out.push_str(&format!(
                        "3. The page only displays on `{}` and its subdomains (and on localhost for testing).\n",
                        domain
                    )),
                    None => out.push_str("3. The page is not locked to a domain.\n"),
                }
                out.push_str("4. Do not edit or reformat `script.js`; a modified script stops the page from loading.\n\n");
            }
            PackageProfile::Standard => {
                out.push_str("1. Extract the archive using the package password.\n");
                out.push_str("2. Upload `index.html` and `style.css` to the same directory on your web server.\n");
                out.push_str("3. Keep the hidden tracking element in `index.html` intact.\n\n");
            }
        }

        out.push_str("## Checksums (MD5)\n\n");
        for file in files.iter().filter(|f| f.name != README_NAME) {
            out.push_str(&format!("- `{}`: {}\n", file.name, md5_hex(file.contents.as_bytes())));
        }
        out
    }
}

/// Lowercase hex MD5 digest of `bytes`, as listed in the checksum section.
pub fn md5_hex(bytes: &[u8]) -> String {
    let mut context = Context::new();
    context.consume(bytes);
    format!("{:x}", context.finalize())
}
