//! Drives one package request from site record to zip bytes.
//!
//! `render -> encrypt -> guard script -> obfuscate -> assemble -> zip` for the
//! secure profile, `render -> assemble -> zip` for the standard one. All
//! randomness (page version, key, IV, token, password) comes from the caller's
//! RNG and the clock reading is passed in, so a seeded run is reproducible.

use crate::package::archive::{assemble_package, PackageError};
use crate::package::filename::sanitize_filename;
use crate::package::manifest::CredentialManifest;
use crate::package::password::generate_password;
use crate::protect::crypto::{self, CryptoError};
use crate::protect::guard::{build_guard_script, ProtectedColors, ProtectedContent};
use crate::protect::obfuscate::{ObfuscateError, ObfuscationBackend, ObfuscationProfile};
use crate::render::html::resolved_palette;
use crate::render::{self, PageVersion, RenderError, RenderedPage};
use chrono::{DateTime, Utc};
use common::model::package::PackageProfile;
use common::model::site::SiteRecord;
use log::debug;
use rand::RngCore;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
    #[error("content serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("encryption failed: {0}")]
    Crypto(#[from] CryptoError),
    #[error("obfuscation failed: {0}")]
    Obfuscate(#[from] ObfuscateError),
    #[error("archive assembly failed: {0}")]
    Package(#[from] PackageError),
}

/// Obfuscation profile applied to every secure guard script.
pub const SECURE_OBFUSCATION_PROFILE: &str = "maximum";

pub struct PackageInputs<'a> {
    pub site: &'a SiteRecord,
    pub affiliate_code: &'a str,
    /// Already normalised. Only the secure profile uses it.
    pub allowed_domain: Option<&'a str>,
    pub generated_at: DateTime<Utc>,
}

/// A finished archive plus the credentials that travel outside it.
#[derive(Debug, Clone)]
pub struct BuiltPackage {
    pub profile: PackageProfile,
    pub filename: String,
    pub password: String,
    pub affiliate_token: String,
    pub page_version: String,
    pub bytes: Vec<u8>,
}

/// `<code>-<32 hex digits>`, unique per package.
pub fn affiliate_token<R: RngCore + ?Sized>(affiliate_code: &str, rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    let id = uuid::Builder::from_random_bytes(bytes).into_uuid();
    format!("{}-{}", affiliate_code.trim(), id.simple())
}

pub fn archive_filename(profile: PackageProfile, brand_name: &str, affiliate_code: &str) -> String {
    let prefix = match profile {
        PackageProfile::Secure => "secure",
        PackageProfile::Standard => "prelander",
    };
    format!(
        "{}_{}_{}.zip",
        prefix,
        sanitize_filename(Some(brand_name)),
        sanitize_filename(Some(affiliate_code))
    )
}

pub fn build_secure_package<R: RngCore + ?Sized>(
    inputs: &PackageInputs<'_>,
    obfuscator: &dyn ObfuscationBackend,
    rng: &mut R,
) -> Result<BuiltPackage, PipelineError> {
    let site = inputs.site;
    let version = PageVersion::generate(rng);
    let page = render::render(&site.template_id, &site.config, &version)?;

    let palette = resolved_palette(&site.config.colors);
    let content = serde_json::to_string(&ProtectedContent {
        html: &page.markup,
        colors: ProtectedColors {
            primary: &palette.primary,
            secondary: &palette.secondary,
            accent: &palette.accent,
        },
    })?;
    let payload = crypto::encrypt(&content, rng);
    crypto::verify_round_trip(&payload, &content)?;

    let token = affiliate_token(inputs.affiliate_code, rng);
    let guard = build_guard_script(&payload, &token, inputs.allowed_domain, &site.slug);
    let profile = ObfuscationProfile::by_name(SECURE_OBFUSCATION_PROFILE)?;
    let script = obfuscator.apply(&guard, &profile)?;
    debug!(
        "Guard script for '{}': {} bytes, {} after '{}' obfuscation",
        site.slug,
        guard.len(),
        script.len(),
        profile.name
    );

    let password = generate_password(rng);
    finish(PackageProfile::Secure, inputs, &page, Some(&script), token, password, version)
}

pub fn build_standard_package<R: RngCore + ?Sized>(
    inputs: &PackageInputs<'_>,
    rng: &mut R,
) -> Result<BuiltPackage, PipelineError> {
    let site = inputs.site;
    let version = PageVersion::generate(rng);
    let page = render::render(&site.template_id, &site.config, &version)?;
    let token = affiliate_token(inputs.affiliate_code, rng);
    let password = generate_password(rng);
    finish(PackageProfile::Standard, inputs, &page, None, token, password, version)
}

fn finish(
    profile: PackageProfile,
    inputs: &PackageInputs<'_>,
    page: &RenderedPage,
    script: Option<&str>,
    token: String,
    password: String,
    version: PageVersion,
) -> Result<BuiltPackage, PipelineError> {
    let site = inputs.site;
    let manifest = CredentialManifest {
        profile,
        brand_name: &site.config.brand_name,
        site_slug: &site.slug,
        affiliate_code: inputs.affiliate_code,
        affiliate_token: &token,
        password: &password,
        allowed_domain: match profile {
            PackageProfile::Secure => inputs.allowed_domain,
            PackageProfile::Standard => None,
        },
        page_version: version.as_str(),
        generated_at: inputs.generated_at,
    };
    let archive = assemble_package(page, script, &manifest)?;
    let bytes = archive.to_zip_bytes()?;

    Ok(BuiltPackage {
        profile,
        filename: archive_filename(profile, &site.config.brand_name, inputs.affiliate_code),
        password,
        affiliate_token: token,
        page_version: version.to_string(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protect::obfuscate::PassObfuscator;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    struct Passthrough;

    impl ObfuscationBackend for Passthrough {
        fn apply(&self, source: &str, _profile: &ObfuscationProfile) -> Result<String, ObfuscateError> {
            Ok(source.to_string())
        }
    }

    struct Refuses;

    impl ObfuscationBackend for Refuses {
        fn apply(&self, _source: &str, _profile: &ObfuscationProfile) -> Result<String, ObfuscateError> {
            Err(ObfuscateError::Unbalanced)
        }
    }

    #[derive(Default)]
    struct Recording {
        requested: std::sync::Mutex<Vec<ObfuscationProfile>>,
    }

    impl ObfuscationBackend for Recording {
        fn apply(&self, source: &str, profile: &ObfuscationProfile) -> Result<String, ObfuscateError> {
            self.requested.lock().unwrap().push(profile.clone());
            Ok(source.to_string())
        }
    }

    fn site(template_id: &str) -> SiteRecord {
        SiteRecord {
            slug: "acme".to_string(),
            template_id: template_id.to_string(),
            config: serde_json::from_value(serde_json::json!({
                "brandName": "Café Royale™",
                "copy": {"headline": "Ship faster", "cta": "Go"},
                "colors": {"primary": "#101010", "secondary": "#202020", "accent": "#303030"}
            }))
            .unwrap(),
        }
    }

    fn inputs<'a>(site: &'a SiteRecord, allowed_domain: Option<&'a str>) -> PackageInputs<'a> {
        PackageInputs {
            site,
            affiliate_code: "AFF1",
            allowed_domain,
            generated_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    fn read(bytes: &[u8], name: &str) -> String {
        let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut out = String::new();
        zip.by_name(name).unwrap().read_to_string(&mut out).unwrap();
        out
    }

    fn quoted_after<'a>(script: &'a str, marker: &str) -> &'a str {
        let start = script.find(marker).unwrap() + marker.len();
        let end = start + script[start..].find('"').unwrap();
        &script[start..end]
    }

    #[test]
    fn secure_package_carries_decryptable_content() {
        let site = site("classic");
        let mut rng = StdRng::seed_from_u64(1);
        let built = build_secure_package(&inputs(&site, Some("example.com")), &Passthrough, &mut rng).unwrap();
        assert_eq!(built.filename, "secure_caf_royale_aff1.zip");
        assert!(built.affiliate_token.starts_with("AFF1-"));

        let script = read(&built.bytes, "script.js");
        assert!(!script.contains("Ship faster"));
        assert!(script.contains("var __g_allowed = \"example.com\";"));

        let cipher = quoted_after(&script, "cipher: \"");
        let key = quoted_after(&script, "key: \"");
        let content: serde_json::Value = serde_json::from_str(&crypto::decrypt(cipher, key).unwrap()).unwrap();
        let expected = render::render("classic", &site.config, &PageVersion::pinned(&built.page_version)).unwrap();
        assert_eq!(content["html"], expected.markup.as_str());
        assert_eq!(content["colors"]["accent"], "#303030");
    }

    #[test]
    fn secure_package_is_reproducible_with_a_seed() {
        let site = site("prize-wheel");
        let obfuscator = PassObfuscator::with_seed(4);
        let a = build_secure_package(&inputs(&site, None), &obfuscator, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = build_secure_package(&inputs(&site, None), &obfuscator, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a.bytes, b.bytes);
        assert_eq!(a.password, b.password);
        assert!(!read(&a.bytes, "script.js").contains("__g_"));
    }

    #[test]
    fn secure_guard_is_obfuscated_with_the_maximum_profile() {
        let site = site("classic");
        let backend = Recording::default();
        build_secure_package(&inputs(&site, None), &backend, &mut StdRng::seed_from_u64(6)).unwrap();
        let requested = backend.requested.lock().unwrap();
        assert_eq!(*requested, vec![ObfuscationProfile::maximum()]);
    }

    #[test]
    fn readme_repeats_the_returned_password() {
        let site = site("minimal");
        let built = build_secure_package(&inputs(&site, None), &Passthrough, &mut StdRng::seed_from_u64(2)).unwrap();
        assert!(read(&built.bytes, "README.md").contains(&built.password));
    }

    #[test]
    fn standard_package_uses_its_own_name() {
        let site = site("classic");
        let built = build_standard_package(&inputs(&site, Some("ignored.com")), &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(built.profile, PackageProfile::Standard);
        assert_eq!(built.filename, "prelander_caf_royale_aff1.zip");
        let mut zip = ZipArchive::new(Cursor::new(built.bytes)).unwrap();
        assert_eq!(zip.len(), 3);
        let mut readme = String::new();
        zip.by_name_decrypt("README.md", built.password.as_bytes())
            .unwrap()
            .read_to_string(&mut readme)
            .unwrap();
        assert!(!readme.contains("ignored.com"));
    }

    #[test]
    fn stage_failures_surface_as_pipeline_errors() {
        let unknown = site("nope");
        let err = build_secure_package(&inputs(&unknown, None), &Passthrough, &mut StdRng::seed_from_u64(5)).unwrap_err();
        assert!(matches!(err, PipelineError::Render(RenderError::UnknownTemplate(_))));

        let site = site("classic");
        let err = build_secure_package(&inputs(&site, None), &Refuses, &mut StdRng::seed_from_u64(5)).unwrap_err();
        assert!(matches!(err, PipelineError::Obfuscate(ObfuscateError::Unbalanced)));
    }
}
