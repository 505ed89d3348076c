//! # Template Detail
//!
//! `GET /api/templates/{template_id}` returns the catalogue entry of a single
//! template, including the field schema the editor builds its form from.
//! Ids are matched exactly against the registry; anything else is a `404`.

use crate::error::ServiceError;
use crate::render::TemplateId;
use actix_web::{web, HttpResponse};

/// # Returns
/// - `200 OK` with the `TemplateInfo` as JSON.
/// - `404 Not Found` with `{error}` if no template is registered under the id.
pub async fn process(template_id: web::Path<String>) -> Result<HttpResponse, ServiceError> {
    let id: TemplateId = template_id.parse()?;
    Ok(HttpResponse::Ok().json(id.info()))
}
