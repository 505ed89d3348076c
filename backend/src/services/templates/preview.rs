//! # Render Preview
//!
//! `POST /api/templates/{template_id}/render` runs the same pure renderer the
//! package pipeline uses, so the editor shows exactly what will be shipped.
//!
//! ## Workflow
//!
//! 1.  **Version**: a `pageVersion` in the body is pinned as given (after
//!     sanitising); otherwise a random one is drawn.
//! 2.  **Render**: the template is looked up and rendered. An unknown id is a
//!     `404`.
//! 3.  **Response**: `{markup, stylesheet, pageVersion}` as JSON.

use crate::error::ServiceError;
use crate::render::{self, PageVersion};
use actix_web::{web, HttpResponse};
use common::requests::RenderPreviewRequest;
use common::responses::RenderPreviewResponse;
use log::debug;

/// Actix web handler for `POST /api/templates/{template_id}/render`.
///
/// Rendering is pure and cheap, so it runs inline on the worker.
pub async fn process(
    template_id: web::Path<String>,
    payload: web::Json<RenderPreviewRequest>,
) -> Result<HttpResponse, ServiceError> {
    let request = payload.into_inner();
    let version = match request.page_version.as_deref() {
        Some(pinned) => PageVersion::pinned(pinned),
        None => PageVersion::generate(&mut rand::thread_rng()),
    };
    let page = render::render(&template_id, &request.config, &version)?;
    debug!(
        "Preview of '{}' for '{}': {} bytes markup",
        template_id.as_str(),
        request.config.brand_name,
        page.markup.len()
    );

    Ok(HttpResponse::Ok().json(RenderPreviewResponse {
        markup: page.markup,
        stylesheet: page.stylesheet,
        page_version: version.to_string(),
    }))
}
