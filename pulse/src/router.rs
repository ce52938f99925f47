use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use common_database::DatabaseReader;
use common_redis::Client as CacheClient;

use crate::api::endpoints::{db_test, health, index};

#[derive(Clone)]
pub struct AppState {
    pub database: DatabaseReader,
    pub cache: Arc<dyn CacheClient + Send + Sync>,
}

pub fn router(database: DatabaseReader, cache: Arc<dyn CacheClient + Send + Sync>) -> Router {
    let state = AppState { database, cache };

    Router::new()
        .route("/", get(index))
        .route("/db-test", get(db_test))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
