//! Detached side effects of a package download.
//!
//! After a package response is built, the handler queues a confirmation
//! email and a download record. Neither may delay or fail the response, so
//! they go through a bounded channel to a single worker task:
//!
//! - `NotificationQueue`: clonable sender kept in the application state.
//!   Queuing never waits; a full or closed queue drops the effect with a
//!   warning.
//! - `start_notification_worker`: long-running task spawned from `main.rs`.
//!   Each effect runs on the blocking pool and failures are logged only.

mod mailer;

pub use mailer::{LogMailer, Mailer, PackageNotice};

use crate::storage::{DownloadLog, DownloadRecord, StoreError};
use log::{debug, warn};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("mail delivery failed: {0}")]
    Mail(String),
    #[error("download record failed: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub enum SideEffect {
    PackageEmail(PackageNotice),
    DownloadRecord(DownloadRecord),
}

impl SideEffect {
    fn describe(&self) -> String {
        match self {
            SideEffect::PackageEmail(notice) => format!("package email for '{}'", notice.filename),
            SideEffect::DownloadRecord(record) => format!("download record for '{}'", record.slug),
        }
    }
}

#[derive(Clone)]
pub struct NotificationQueue {
    tx: mpsc::Sender<SideEffect>,
}

impl NotificationQueue {
    /// A queue and the receiver to hand to [`start_notification_worker`].
    /// `capacity` must be non-zero.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<SideEffect>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Queues `effect` without waiting. Returns whether it was accepted.
    pub fn dispatch(&self, effect: SideEffect) -> bool {
        match self.tx.try_send(effect) {
            Ok(()) => true,
            Err(TrySendError::Full(effect)) => {
                warn!("Notification queue full, dropping {}", effect.describe());
                false
            }
            Err(TrySendError::Closed(effect)) => {
                warn!("Notification worker has stopped, dropping {}", effect.describe());
                false
            }
        }
    }
}

/// Runs queued side effects until every sender is gone.
pub async fn start_notification_worker(
    mut rx: mpsc::Receiver<SideEffect>,
    mailer: Arc<dyn Mailer>,
    downloads: Arc<dyn DownloadLog>,
) {
    while let Some(effect) = rx.recv().await {
        let label = effect.describe();
        let mailer = mailer.clone();
        let downloads = downloads.clone();
        let handle =
            tokio::task::spawn_blocking(move || run_side_effect(&effect, mailer.as_ref(), downloads.as_ref()));

        match handle.await {
            Ok(Ok(())) => debug!("Completed {}", label),
            Ok(Err(e)) => warn!("Side effect failed ({}): {}", label, e),
            Err(e) => warn!("Side effect task error ({}): {}", label, e),
        }
    }
    debug!("Notification worker stopped");
}

fn run_side_effect(effect: &SideEffect, mailer: &dyn Mailer, downloads: &dyn DownloadLog) -> Result<(), NotifyError> {
    match effect {
        SideEffect::PackageEmail(notice) => mailer.send_package_notice(notice),
        SideEffect::DownloadRecord(record) => Ok(downloads.record_download(record)?),
    }
}
