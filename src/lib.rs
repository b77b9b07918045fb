//! Board Service Library
//!
//! Create, rename, delete, favorite and fetch whiteboard boards, gated by
//! caller identity and backed by an embedded document store.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod security;
pub mod service;

pub use config::Config;
pub use db::{open_database, Db, DocumentStore, RedbStore};
pub use error::{AppError, Result};
pub use service::BoardService;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use security::HmacIdentityResolver;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: BoardService,
    pub config: Config,
}

impl AppState {
    /// Wire a redb-backed store and the gateway identity resolver from `config`
    pub fn new(db: Db, config: Config) -> Self {
        let store = Arc::new(RedbStore::new(db));
        let identity = Arc::new(HmacIdentityResolver::new(
            config.identity_secret_key.clone(),
            config.identity_max_age_secs,
        ));

        Self {
            service: BoardService::new(store, identity),
            config,
        }
    }
}

/// Build the router for all board routes
pub fn app(state: AppState) -> Router {
    use routes::*;

    Router::new()
        .route("/health", get(health_check))
        .route("/api/boards", post(create_board))
        .route(
            "/api/boards/:id",
            get(get_board).patch(update_board).delete(remove_board),
        )
        .route(
            "/api/boards/:id/favorite",
            post(favorite_board).delete(unfavorite_board),
        )
        .with_state(state)
}
