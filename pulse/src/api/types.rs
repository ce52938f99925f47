use chrono::{DateTime, Utc};
use common_database::CustomDatabaseError;
use common_redis::CustomRedisError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthCheckError {
    #[error("database check failed: {0}")]
    Database(#[from] CustomDatabaseError),

    #[error("cache check failed: {0}")]
    Cache(#[from] CustomRedisError),

    #[error("unexpected cache ping reply: {0}")]
    UnexpectedPingReply(String),
}

/// Body for `GET /db-test`: `success` plus either the database's clock
/// reading or the error that prevented one.
#[derive(Debug, Serialize, Deserialize)]
pub struct DbTestResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DbTestResponse {
    pub fn success(time: DateTime<Utc>) -> Self {
        Self {
            success: true,
            time: Some(time),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            time: None,
            error: Some(error),
        }
    }
}

/// Body for `GET /health`: `{"ok":true}` or `ok:false` with a description.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn unhealthy(error: String) -> Self {
        Self {
            ok: false,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn success_bodies_omit_the_error_field() {
        let time = Utc.with_ymd_and_hms(2024, 5, 17, 10, 30, 0).unwrap();
        let body = serde_json::to_value(DbTestResponse::success(time)).unwrap();

        assert_eq!(body["success"], true);
        assert_eq!(body["time"], "2024-05-17T10:30:00Z");
        assert!(body.get("error").is_none());
    }

    #[test]
    fn failure_bodies_omit_the_time_field() {
        let body =
            serde_json::to_value(DbTestResponse::failure("connection refused".to_string()))
                .unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "connection refused");
        assert!(body.get("time").is_none());
    }

    #[test]
    fn healthy_body_is_exactly_ok_true() {
        let body = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert_eq!(body, r#"{"ok":true}"#);
    }
}
