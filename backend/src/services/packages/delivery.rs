//! Shared request flow of both package endpoints.
//!
//! 1.  **Validation**: required fields, email shape and, for secure packages,
//!     the allowed domain. Failures are `400`.
//! 2.  **Site lookup**: the record is read fresh from the `SiteStore` on the
//!     blocking pool. An unknown slug is `404`.
//! 3.  **Pipeline**: the package is built on the blocking pool with an RNG
//!     seeded from entropy for this request alone. Any stage failure is `500`
//!     and no archive bytes are sent.
//! 4.  **Response**: zip body plus credential headers.
//! 5.  **Side effects**: the email and download record are queued only after
//!     the response is built; queuing never blocks or fails the request.

use super::request::validate;
use super::{FILENAME_HEADER, PAGE_VERSION_HEADER, PASSWORD_HEADER};
use crate::error::ServiceError;
use crate::notifications::{PackageNotice, SideEffect};
use crate::package::{build_secure_package, build_standard_package, PackageInputs};
use crate::services::AppState;
use crate::storage::DownloadRecord;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::package::PackageProfile;
use common::requests::SecurePackageRequest;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub(crate) async fn deliver(
    state: web::Data<AppState>,
    request: SecurePackageRequest,
    profile: PackageProfile,
) -> Result<HttpResponse, ServiceError> {
    let request = validate(request, profile)?;

    let sites = state.sites.clone();
    let slug = request.slug.clone();
    let site = web::block(move || sites.find_site(&slug))
        .await??
        .ok_or_else(|| ServiceError::NotFound(format!("Site '{}' not found", request.slug)))?;
    let brand_name = site.config.brand_name.clone();

    let obfuscator = state.obfuscator.clone();
    let job = request.clone();
    let generated_at = Utc::now();
    let built = web::block(move || {
        let mut rng = StdRng::from_entropy();
        let inputs = PackageInputs {
            site: &site,
            affiliate_code: &job.affiliate_code,
            allowed_domain: job.allowed_domain.as_deref(),
            generated_at,
        };
        match profile {
            PackageProfile::Secure => build_secure_package(&inputs, obfuscator.as_ref(), &mut rng),
            PackageProfile::Standard => build_standard_package(&inputs, &mut rng),
        }
    })
    .await??;

    info!(
        "Built {} package for site '{}' (affiliate {}): {} bytes",
        profile.as_str(),
        request.slug,
        request.affiliate_code,
        built.bytes.len()
    );

    let notice = PackageNotice {
        to: request.user_email.clone(),
        brand_name,
        profile,
        filename: built.filename.clone(),
        password: built.password.clone(),
        affiliate_code: request.affiliate_code.clone(),
    };
    let record = DownloadRecord {
        slug: request.slug,
        user_email: request.user_email,
        affiliate_code: request.affiliate_code,
        affiliate_token: built.affiliate_token.clone(),
        profile,
        filename: built.filename.clone(),
        created_at: generated_at,
    };

    let response = HttpResponse::Ok()
        .content_type("application/zip")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", built.filename),
        ))
        .insert_header((FILENAME_HEADER, built.filename))
        .insert_header((PASSWORD_HEADER, built.password))
        .insert_header((PAGE_VERSION_HEADER, built.page_version))
        .body(built.bytes);

    state.notifications.dispatch(SideEffect::PackageEmail(notice));
    state.notifications.dispatch(SideEffect::DownloadRecord(record));
    Ok(response)
}
