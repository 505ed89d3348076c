//! HTTP boundary.
//!
//! - `templates`: catalogue, detail and render preview under `/api/templates`.
//! - `packages`: the secure and standard package downloads under `/api`.
//!
//! Handlers share one [`AppState`], injected as `web::Data`.

pub mod packages;
pub mod templates;

use crate::notifications::NotificationQueue;
use crate::protect::obfuscate::ObfuscationBackend;
use crate::storage::SiteStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Site records, looked up fresh for every package request.
    pub sites: Arc<dyn SiteStore>,
    /// Best-effort email and download-record side effects.
    pub notifications: NotificationQueue,
    /// Backend applied to the guard script of secure packages.
    pub obfuscator: Arc<dyn ObfuscationBackend>,
}
