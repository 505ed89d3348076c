//! # Package Service Module
//!
//! Download endpoints for generated landing-page archives.
//!
//! Both routes take the same JSON body, `{slug, userEmail, affiliateCode,
//! allowedDomain?}`, and answer with the zip bytes. The credentials travel in
//! headers next to the body:
//!
//! - `Content-Disposition: attachment; filename="<name>.zip"`
//! - `X-Package-Filename`: the same name
//! - `X-Package-Password`: the generated package password, in clear text
//! - `X-Page-Version`: the page version stamped into the rendered output

mod delivery;
mod request;
mod secure;
mod standard;

use actix_web::web::{post, scope};
use actix_web::Scope;

pub use request::{validate, ValidatedRequest};

const API_PATH: &str = "/api";

pub const PASSWORD_HEADER: &str = "X-Package-Password";
pub const FILENAME_HEADER: &str = "X-Package-Filename";
pub const PAGE_VERSION_HEADER: &str = "X-Page-Version";

/// Configures and returns the Actix `Scope` for the package routes.
///
/// # Registered Routes:
///
/// *   **`POST /api/secure-package`**:
///     - **Handler**: `secure::process`
///     - **Description**: Encrypted content behind the obfuscated guard
///       script. `allowedDomain` locks the page to a host and its subdomains.
///
/// *   **`POST /api/standard-package`**:
///     - **Handler**: `standard::process`
///     - **Description**: Plain page files in an AES-256 encrypted archive.
///       `allowedDomain` is ignored.
///
/// Register this scope after the template scope: it owns the whole `/api`
/// prefix.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/secure-package", post().to(secure::process))
        .route("/standard-package", post().to(standard::process))
}
