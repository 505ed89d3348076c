//! # SQLite Store
//!
//! Site records and download records live in one SQLite file. Every call
//! opens its own connection and runs on the blocking pool.
//!
//! - `sites(slug, template_id, config_json)`: written by the external editor,
//!   read by slug for every package request.
//! - `downloads(...)`: one row per delivered package, appended by the
//!   notification worker.

use super::{DownloadLog, DownloadRecord, SiteStore, StoreError};
use chrono::SecondsFormat;
use common::model::site::SiteRecord;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS sites (
    slug        TEXT PRIMARY KEY,
    template_id TEXT NOT NULL,
    config_json TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS downloads (
    id              TEXT PRIMARY KEY,
    slug            TEXT NOT NULL,
    user_email      TEXT NOT NULL,
    affiliate_code  TEXT NOT NULL,
    affiliate_token TEXT NOT NULL,
    profile         TEXT NOT NULL,
    filename        TEXT NOT NULL,
    created_at      TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS downloads_by_slug ON downloads (slug);
";

#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.path)?)
    }

    /// Creates the tables if they do not exist yet.
    pub fn init_schema(&self) -> Result<(), StoreError> {
        self.connect()?.execute_batch(SCHEMA)?;
        debug!("SQLite schema ready at {}", self.path.display());
        Ok(())
    }

    /// Inserts or replaces the site stored under `site.slug`.
    pub fn insert_site(&self, site: &SiteRecord) -> Result<(), StoreError> {
        let config_json = serde_json::to_string(&site.config)?;
        self.connect()?.execute(
            "INSERT OR REPLACE INTO sites (slug, template_id, config_json) VALUES (?1, ?2, ?3)",
            params![&site.slug, &site.template_id, config_json],
        )?;
        Ok(())
    }
}

impl SiteStore for SqliteStore {
    fn find_site(&self, slug: &str) -> Result<Option<SiteRecord>, StoreError> {
        let conn = self.connect()?;
        let row: Option<(String, String)> = conn
            .query_row(
                "SELECT template_id, config_json FROM sites WHERE slug = ?1",
                params![slug],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((template_id, config_json)) = row else {
            return Ok(None);
        };
        let config = serde_json::from_str(&config_json).map_err(|source| StoreError::InvalidConfig {
            slug: slug.to_string(),
            source,
        })?;
        Ok(Some(SiteRecord {
            slug: slug.to_string(),
            template_id,
            config,
        }))
    }
}

impl DownloadLog for SqliteStore {
    fn record_download(&self, record: &DownloadRecord) -> Result<(), StoreError> {
        self.connect()?.execute(
            "INSERT INTO downloads (id, slug, user_email, affiliate_code, affiliate_token, profile, filename, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                Uuid::new_v4().to_string(),
                &record.slug,
                &record.user_email,
                &record.affiliate_code,
                &record.affiliate_token,
                record.profile.as_str(),
                &record.filename,
                record.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            ],
        )?;
        Ok(())
    }
}

#[cfg(test)]
impl SqliteStore {
    /// Download records for `slug`, oldest first.
    pub(crate) fn downloads_for(&self, slug: &str) -> Result<Vec<DownloadRecord>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT slug, user_email, affiliate_code, affiliate_token, profile, filename, created_at
             FROM downloads WHERE slug = ?1 ORDER BY created_at, rowid",
        )?;
        let rows = stmt
            .query_map(params![slug], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = Vec::with_capacity(rows.len());
        for (slug, user_email, affiliate_code, affiliate_token, profile, filename, created_at) in rows {
            let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
                .map_err(|_| StoreError::InvalidValue(format!("created_at '{}'", created_at)))?
                .with_timezone(&chrono::Utc);
            records.push(DownloadRecord {
                slug,
                user_email,
                affiliate_code,
                affiliate_token,
                profile: Self::parse_profile(&profile)?,
                filename,
                created_at,
            });
        }
        Ok(records)
    }

    fn parse_profile(value: &str) -> Result<common::model::package::PackageProfile, StoreError> {
        match value {
            "secure" => Ok(common::model::package::PackageProfile::Secure),
            "standard" => Ok(common::model::package::PackageProfile::Standard),
            other => Err(StoreError::InvalidValue(format!("profile '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use common::model::brand::BrandConfig;
    use common::model::package::PackageProfile;
    use tempfile::TempDir;

    fn store() -> (TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::new(dir.path().join("store.sqlite"));
        store.init_schema().unwrap();
        (dir, store)
    }

    #[test]
    fn sites_round_trip_by_slug() {
        let (_dir, store) = store();
        let site = SiteRecord {
            slug: "acme".to_string(),
            template_id: "classic".to_string(),
            config: BrandConfig {
                brand_name: "Acme".to_string(),
                ..Default::default()
            },
        };
        store.insert_site(&site).unwrap();
        assert_eq!(store.find_site("acme").unwrap(), Some(site));
        assert_eq!(store.find_site("missing").unwrap(), None);
    }

    #[test]
    fn schema_init_is_idempotent() {
        let (_dir, store) = store();
        store.init_schema().unwrap();
    }

    #[test]
    fn corrupt_config_is_reported() {
        let (_dir, store) = store();
        Connection::open(store.path())
            .unwrap()
            .execute(
                "INSERT INTO sites (slug, template_id, config_json) VALUES ('bad', 'classic', '{not json')",
                [],
            )
            .unwrap();
        assert!(matches!(store.find_site("bad"), Err(StoreError::InvalidConfig { .. })));
    }

    #[test]
    fn downloads_are_appended() {
        let (_dir, store) = store();
        let record = DownloadRecord {
            slug: "acme".to_string(),
            user_email: "a@b.com".to_string(),
            affiliate_code: "AFF1".to_string(),
            affiliate_token: "AFF1-abc".to_string(),
            profile: PackageProfile::Secure,
            filename: "secure_acme_aff1.zip".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 2, 3, 4, 5, 6).unwrap(),
        };
        store.record_download(&record).unwrap();
        store.record_download(&record).unwrap();
        assert_eq!(store.downloads_for("acme").unwrap(), vec![record.clone(), record]);
        assert!(store.downloads_for("other").unwrap().is_empty());
    }
}
