//! # Storage
//!
//! Site records and download records live in one SQLite file.
//!
//! The HTTP layer only sees the two traits: [`SiteStore`] to resolve a slug
//! and [`DownloadLog`] for the best-effort download record. [`SqliteStore`]
//! implements both, opening a fresh connection per call, so it can be shared
//! freely between actix workers and the notification worker.
//!
//! ## Schema
//!
//! - `sites(slug PRIMARY KEY, template_id, config_json)`: `config_json` holds
//!   a serialized `BrandConfig`.
//! - `downloads(id PRIMARY KEY, slug, user_email, affiliate_code,
//!   affiliate_token, profile, filename, created_at)`: `created_at` is
//!   RFC 3339 UTC.

mod sqlite;

pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};
use common::model::package::PackageProfile;
use common::model::site::SiteRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("stored config for site '{slug}' is invalid: {source}")]
    InvalidConfig {
        slug: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid stored value: {0}")]
    InvalidValue(String),
}

/// One delivered package.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRecord {
    pub slug: String,
    pub user_email: String,
    pub affiliate_code: String,
    pub affiliate_token: String,
    pub profile: PackageProfile,
    pub filename: String,
    pub created_at: DateTime<Utc>,
}

/// Read access to site records by slug.
pub trait SiteStore: Send + Sync {
    fn find_site(&self, slug: &str) -> Result<Option<SiteRecord>, StoreError>;
}

pub trait DownloadLog: Send + Sync {
    fn record_download(&self, record: &DownloadRecord) -> Result<(), StoreError>;
}
