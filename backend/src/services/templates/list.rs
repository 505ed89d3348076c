//! # Template Catalogue
//!
//! `GET /api/templates` lists every registered template in registry order.
//! The external editor reads it to offer the template picker and build the
//! form for each template's field schema.

use crate::render::catalogue;
use actix_web::HttpResponse;

/// Actix web handler for the `GET /api/templates` endpoint.
///
/// # Returns
/// - `200 OK` with a JSON array of `TemplateInfo`.
pub async fn process() -> HttpResponse {
    HttpResponse::Ok().json(catalogue())
}
