//! # Template Service Module
//!
//! Read-only access to the template registry for the external editor, plus a
//! render preview that runs the same pure renderer the packages use.

mod get;
mod list;
mod preview;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for all template-related routes.
///
/// # Registered Routes:
///
/// *   **`GET /api/templates`**:
///     - **Handler**: `list::process`
///     - **Description**: Every registered template as `{id, name, description,
///       fieldSchema}`, in registry order.
///
/// *   **`GET /{template_id}`**:
///     - **Handler**: `get::process`
///     - **Description**: One catalogue entry, or `404` for an unknown id.
///
/// *   **`POST /{template_id}/render`**:
///     - **Handler**: `preview::process`
///     - **Description**: Renders a `BrandConfig` body and returns
///       `{markup, stylesheet, pageVersion}`. A `pageVersion` in the body is
///       used as given; otherwise a random one is drawn.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/{template_id}", get().to(get::process))
        .route("/{template_id}/render", post().to(preview::process))
}
