use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use backend::config::AppConfig;
use backend::notifications::{start_notification_worker, LogMailer, NotificationQueue};
use backend::protect::obfuscate::PassObfuscator;
use backend::storage::SqliteStore;
use backend::{configure_app, AppState};
use env_logger::Env;
use log::info;
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let store = Arc::new(SqliteStore::new(&config.db_path));
    store
        .init_schema()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    info!("Using database {}", store.path().display());

    // Side effects run on their own task so they never hold up a response.
    let (notifications, rx) = NotificationQueue::channel(config.queue_capacity);
    tokio::spawn(start_notification_worker(rx, Arc::new(LogMailer), store.clone()));

    let state = AppState {
        sites: store,
        notifications,
        obfuscator: Arc::new(PassObfuscator::new()),
    };
    let json_limit = config.json_limit;

    info!("Server running at {}", config.url());

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(configure_app(state.clone(), json_limit))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
