//! Landing-page renderer and package generator.
//!
//! A stored brand configuration is rendered by one of the registered
//! templates and delivered as a zip, either as a secure package (encrypted
//! content behind an obfuscated guard script) or as a standard package
//! (plain files in a password-protected archive).

pub mod config;
pub mod error;
pub mod notifications;
pub mod package;
pub mod protect;
pub mod render;
pub mod services;
pub mod storage;

pub use services::AppState;

use actix_web::web;

/// Registers the JSON body settings, the shared state and every API scope.
///
/// Usable both from `main.rs` and from `actix_web::test` service setups:
/// `App::new().configure(configure_app(state, json_limit))`.
pub fn configure_app(state: AppState, json_limit: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(
            web::JsonConfig::default()
                .limit(json_limit)
                .error_handler(error::json_error_handler),
        )
        .app_data(web::Data::new(state))
        // The template scope must come first: the package scope owns `/api`.
        .service(services::templates::configure_routes())
        .service(services::packages::configure_routes());
    }
}
