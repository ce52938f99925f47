use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    api::types::{DbTestResponse, HealthCheckError, HealthResponse},
    router::AppState,
};

/// Reply a healthy Redis gives to PING; anything else fails the probe.
const EXPECTED_PING_REPLY: &str = "PONG";

pub async fn db_test(State(state): State<AppState>) -> impl IntoResponse {
    match state.database.server_time().await {
        Ok(time) => (StatusCode::OK, Json(DbTestResponse::success(time))),
        Err(error) => {
            tracing::error!(error = %error, "db-test query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DbTestResponse::failure(error.to_string())),
            )
        }
    }
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match run_checks(&state).await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::healthy())),
        Err(error) => {
            tracing::error!(error = %error, "health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse::unhealthy(error.to_string())),
            )
        }
    }
}

// Database first, cache second; the first failure short-circuits.
async fn run_checks(state: &AppState) -> Result<(), HealthCheckError> {
    state.database.connection_check().await?;

    let reply = state.cache.ping().await?;
    if reply != EXPECTED_PING_REPLY {
        return Err(HealthCheckError::UnexpectedPingReply(reply));
    }

    Ok(())
}

pub async fn index() -> &'static str {
    "pulse"
}
