//! User Registry Library
//!
//! Local user registration: a redb-backed record store, the user service
//! enforcing email uniqueness, the view state driving the page, and the
//! axum routes serving it.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod presentation;
pub mod routes;
pub mod service;
pub mod validation;

pub use config::Config;
pub use db::{open_database, Db, RecordStore, RedbStore};
pub use error::{AppError, Result, ServiceError, StoreError};
pub use service::UserService;

use chrono::Duration;
use std::sync::Arc;
use tokio::sync::Mutex;

use presentation::{Pending, ViewState};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
    pub service: UserService,
    /// Locked only for synchronous transitions, never across a store call
    pub view: Arc<Mutex<ViewState>>,
}

impl AppState {
    /// Create a new AppState with the given database and configuration
    pub fn new(db: Db, config: Config) -> Self {
        let service = UserService::new(Arc::new(RedbStore::new(db.clone())));
        let ttl = Duration::milliseconds(
            i64::try_from(config.notification_ttl_ms).unwrap_or(i64::MAX),
        );

        Self {
            db,
            config,
            service,
            view: Arc::new(Mutex::new(ViewState::new(ttl))),
        }
    }

    /// Execute a pending operation and hand its outcome to the view
    ///
    /// Runs in its own task so the view leaves `Loading` even if the
    /// request that started it goes away.
    pub async fn run(&self, pending: Pending) {
        let service = self.service.clone();
        let view = self.view.clone();

        let task = tokio::spawn(async move {
            let outcome = presentation::execute(&service, pending).await;
            view.lock().await.complete(outcome);
        });

        if let Err(e) = task.await {
            tracing::error!("Operation task failed: {:?}", e);
        }
    }

    /// Fill the view with every stored record
    pub async fn load_users(&self) {
        let pending = self.view.lock().await.begin_load();
        if let Ok(pending) = pending {
            self.run(pending).await;
        }
    }
}
