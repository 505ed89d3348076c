//! `POST /api/secure-package`: encrypted content behind an obfuscated guard
//! script.

use super::delivery::deliver;
use crate::error::ServiceError;
use crate::services::AppState;
use actix_web::{web, HttpResponse};
use common::model::package::PackageProfile;
use common::requests::SecurePackageRequest;

/// Actix web handler for the `POST /api/secure-package` endpoint.
///
/// # Returns
/// - `200 OK` with the zip and credential headers.
/// - `400 Bad Request` with `{error}` for a missing or malformed field.
/// - `404 Not Found` with `{error}` for an unknown slug.
/// - `500 Internal Server Error` with `{error, details}` if any pipeline stage fails.
pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SecurePackageRequest>,
) -> Result<HttpResponse, ServiceError> {
    deliver(state, payload.into_inner(), PackageProfile::Secure).await
}
