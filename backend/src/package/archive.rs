//! # Archive Assembler
//!
//! Collects the fixed file set for a package and serialises it as a zip.
//!
//! - **Secure**: `index.html` (shell with a loading placeholder inside the
//!   guard's container), `script.js` (the obfuscated guard carrying the
//!   encrypted page), `style.css` and `README.md`. Entries are stored
//!   unencrypted; the password is for reference only.
//! - **Standard**: `index.html` with the markup inline and a hidden tracking
//!   node, `style.css` and `README.md`, every entry AES-256 encrypted with the
//!   package password.
//!
//! Assembly either produces the complete archive or fails; there is no
//! partially written output.

use crate::package::manifest::{CredentialManifest, README_NAME};
use crate::protect::guard::CONTAINER_ID;
use crate::render::html::escape;
use crate::render::RenderedPage;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Datelike, Timelike, Utc};
use common::model::package::PackageProfile;
use std::io::{Cursor, Write};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{AesMode, CompressionMethod, ZipWriter};

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("secure packages need a guard script")]
    MissingGuardScript,
    #[error("timestamp {0} cannot be stored in a zip archive")]
    Timestamp(String),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

const LOADING_CSS: &str = ".lp-loading{display:flex;align-items:center;justify-content:center;min-height:100vh;color:#64748b}\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFile {
    pub name: String,
    pub contents: String,
}

impl PackageFile {
    pub fn new(name: &str, contents: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            contents: contents.into(),
        }
    }
}

/// Files of one package, in archive order, with its password.
#[derive(Debug, Clone)]
pub struct PackageArchive {
    pub profile: PackageProfile,
    pub files: Vec<PackageFile>,
    pub password: String,
    pub generated_at: DateTime<Utc>,
}

/// Builds the file set for `meta.profile`.
///
/// A secure package requires `guard_script`; a standard package ignores it.
pub fn assemble_package(
    page: &RenderedPage,
    guard_script: Option<&str>,
    meta: &CredentialManifest<'_>,
) -> Result<PackageArchive, PackageError> {
    let mut files = match meta.profile {
        PackageProfile::Secure => {
            let script = guard_script.ok_or(PackageError::MissingGuardScript)?;
            vec![
                PackageFile::new("index.html", secure_shell(meta)),
                PackageFile::new("script.js", script),
                PackageFile::new("style.css", format!("{}{}", page.stylesheet, LOADING_CSS)),
            ]
        }
        PackageProfile::Standard => vec![
            PackageFile::new("index.html", standard_page(page, meta)),
            PackageFile::new("style.css", page.stylesheet.as_str()),
        ],
    };
    let readme = meta.to_readme(&files);
    files.push(PackageFile::new(README_NAME, readme));

    Ok(PackageArchive {
        profile: meta.profile,
        files,
        password: meta.password.to_string(),
        generated_at: meta.generated_at,
    })
}

fn head(meta: &CredentialManifest<'_>) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n  <title>{}</title>\n  <link rel=\"stylesheet\" href=\"style.css?v={}\">\n</head>\n",
        escape(meta.brand_name.trim()),
        meta.page_version
    )
}

fn secure_shell(meta: &CredentialManifest<'_>) -> String {
    let mut html = head(meta);
    html.push_str("<body>\n");
    html.push_str(&format!("  <div id=\"{}\">\n", CONTAINER_ID));
    html.push_str("    <div class=\"lp-loading\" role=\"status\">Loading&hellip;</div>\n");
    html.push_str("  </div>\n");
    html.push_str("  <noscript>This page needs JavaScript enabled.</noscript>\n");
    html.push_str(&format!("  <script src=\"script.js?v={}\"></script>\n", meta.page_version));
    html.push_str("</body>\n</html>\n");
    html
}

fn standard_page(page: &RenderedPage, meta: &CredentialManifest<'_>) -> String {
    let mut html = head(meta);
    html.push_str("<body>\n");
    html.push_str(&page.markup);
    if !page.markup.ends_with('\n') {
        html.push('\n');
    }
    html.push_str(&format!(
        "<span hidden aria-hidden=\"true\" data-ref=\"{}\" data-site=\"{}\"></span>\n",
        BASE64.encode(meta.affiliate_token),
        escape(meta.site_slug)
    ));
    html.push_str("</body>\n</html>\n");
    html
}

impl PackageArchive {
    /// Serialises the archive. Standard packages encrypt every entry with
    /// the password.
    pub fn to_zip_bytes(&self) -> Result<Vec<u8>, PackageError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let base = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip_timestamp(self.generated_at)?)
            .unix_permissions(0o644);
        let options = match self.profile {
            PackageProfile::Standard => base.with_aes_encryption(AesMode::Aes256, &self.password),
            PackageProfile::Secure => base,
        };

        for file in &self.files {
            writer.start_file(file.name.as_str(), options.clone())?;
            writer.write_all(file.contents.as_bytes())?;
        }
        Ok(writer.finish()?.into_inner())
    }
}

fn zip_timestamp(at: DateTime<Utc>) -> Result<zip::DateTime, PackageError> {
    let fields = (
        u16::try_from(at.year()),
        u8::try_from(at.month()),
        u8::try_from(at.day()),
        u8::try_from(at.hour()),
        u8::try_from(at.minute()),
        u8::try_from(at.second()),
    );
    let invalid = || PackageError::Timestamp(at.to_rfc3339());
    match fields {
        (Ok(year), Ok(month), Ok(day), Ok(hour), Ok(minute), Ok(second)) => {
            zip::DateTime::from_date_and_time(year, month, day, hour, minute, second).map_err(|_| invalid())
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
impl PackageArchive {
    fn file(&self, name: &str) -> Option<&PackageFile> {
        self.files.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Read;
    use zip::ZipArchive;

    fn page() -> RenderedPage {
        RenderedPage {
            markup: "<div class=\"lp\">Hello</div>\n".to_string(),
            stylesheet: ":root {}\n".to_string(),
        }
    }

    fn meta(profile: PackageProfile) -> CredentialManifest<'static> {
        CredentialManifest {
            profile,
            brand_name: "Acme <Corp>",
            site_slug: "acme",
            affiliate_code: "AFF1",
            affiliate_token: "AFF1-token",
            password: "00112233445566778899AABB",
            allowed_domain: None,
            page_version: "cafe0001",
            generated_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 6).unwrap(),
        }
    }

    fn names(archive: &PackageArchive) -> Vec<&str> {
        archive.files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn secure_layout_is_fixed() {
        let archive = assemble_package(&page(), Some("(function () {})();"), &meta(PackageProfile::Secure)).unwrap();
        assert_eq!(names(&archive), vec!["index.html", "script.js", "style.css", "README.md"]);

        let index = &archive.file("index.html").unwrap().contents;
        assert!(index.contains("<div id=\"prelander-root\">"));
        assert!(index.contains("lp-loading"));
        assert!(index.contains("<script src=\"script.js?v=cafe0001\"></script>"));
        assert!(index.contains("href=\"style.css?v=cafe0001\""));
        assert!(index.contains("<title>Acme &lt;Corp&gt;</title>"));
        // The page content only travels inside the script.
        assert!(!index.contains("Hello"));
    }

    #[test]
    fn secure_package_needs_a_script() {
        let err = assemble_package(&page(), None, &meta(PackageProfile::Secure)).unwrap_err();
        assert!(matches!(err, PackageError::MissingGuardScript));
    }

    #[test]
    fn standard_layout_inlines_markup_and_token() {
        let archive = assemble_package(&page(), None, &meta(PackageProfile::Standard)).unwrap();
        assert_eq!(names(&archive), vec!["index.html", "style.css", "README.md"]);
        let index = &archive.file("index.html").unwrap().contents;
        assert!(index.contains("<div class=\"lp\">Hello</div>"));
        assert!(index.contains(&format!("data-ref=\"{}\"", BASE64.encode("AFF1-token"))));
    }

    #[test]
    fn secure_zip_entries_are_readable_without_password() {
        let archive = assemble_package(&page(), Some("x();"), &meta(PackageProfile::Secure)).unwrap();
        let bytes = archive.to_zip_bytes().unwrap();
        let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(zip.len(), 4);

        let mut readme = String::new();
        zip.by_name("README.md").unwrap().read_to_string(&mut readme).unwrap();
        assert!(readme.contains("00112233445566778899AABB"));

        let mut script = String::new();
        zip.by_name("script.js").unwrap().read_to_string(&mut script).unwrap();
        assert_eq!(script, "x();");
    }

    #[test]
    fn standard_zip_entries_need_the_password() {
        let archive = assemble_package(&page(), None, &meta(PackageProfile::Standard)).unwrap();
        let bytes = archive.to_zip_bytes().unwrap();
        let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(zip.len(), 3);
        assert!(zip.by_name("index.html").is_err());

        let mut index = String::new();
        zip.by_name_decrypt("index.html", b"00112233445566778899AABB")
            .unwrap()
            .read_to_string(&mut index)
            .unwrap();
        assert!(index.contains("Hello"));
    }

    #[test]
    fn timestamps_before_1980_are_rejected() {
        let old = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(zip_timestamp(old), Err(PackageError::Timestamp(_))));
    }
}
