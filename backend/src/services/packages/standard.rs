//! `POST /api/standard-package`: plain files in a password-protected archive.

use super::delivery::deliver;
use crate::error::ServiceError;
use crate::services::AppState;
use actix_web::{web, HttpResponse};
use common::model::package::PackageProfile;
use common::requests::SecurePackageRequest;

/// Actix web handler for the `POST /api/standard-package` endpoint. Same
/// responses as the secure endpoint.
pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SecurePackageRequest>,
) -> Result<HttpResponse, ServiceError> {
    deliver(state, payload.into_inner(), PackageProfile::Standard).await
}
