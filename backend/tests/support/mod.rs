#![allow(dead_code)]

use backend::notifications::{NotificationQueue, SideEffect};
use backend::protect::obfuscate::PassObfuscator;
use backend::storage::SqliteStore;
use backend::AppState;
use common::model::site::SiteRecord;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;

pub const JSON_LIMIT: usize = 1 << 20;

/// A temporary database with the `acme` site, plus the receiving end of the
/// side-effect queue so tests can inspect what a request queued.
pub struct TestEnv {
    _dir: TempDir,
    pub store: Arc<SqliteStore>,
    pub side_effects: mpsc::Receiver<SideEffect>,
    pub state: AppState,
}

pub fn acme_site() -> SiteRecord {
    SiteRecord {
        slug: "acme".to_string(),
        template_id: "classic".to_string(),
        config: serde_json::from_value(serde_json::json!({
            "brandName": "Acme",
            "copy": {"headline": "Launch in a day", "subheadline": "Everything included", "cta": "Start now"},
            "colors": {"primary": "#0f766e", "secondary": "#0f172a", "accent": "#f97316"},
            "ctaUrl": "https://acme.test/start",
            "sections": {"faq": {"items": [{"question": "Is there a trial?", "answer": "Yes, 14 days."}]}}
        }))
        .unwrap(),
    }
}

pub fn env() -> TestEnv {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteStore::new(dir.path().join("prelander.sqlite")));
    store.init_schema().unwrap();
    store.insert_site(&acme_site()).unwrap();

    let (notifications, side_effects) = NotificationQueue::channel(16);
    let state = AppState {
        sites: store.clone(),
        notifications,
        obfuscator: Arc::new(PassObfuscator::with_seed(42)),
    };
    TestEnv {
        _dir: dir,
        store,
        side_effects,
        state,
    }
}

/// Drains everything queued so far.
pub fn queued(env: &mut TestEnv) -> Vec<SideEffect> {
    let mut effects = Vec::new();
    while let Ok(effect) = env.side_effects.try_recv() {
        effects.push(effect);
    }
    effects
}
