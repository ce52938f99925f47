use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CustomRedisError {
    #[error("Not found in redis")]
    NotFound,
    #[error("Timeout error")]
    Timeout,
    #[error(transparent)]
    Redis(#[from] Arc<redis::RedisError>),
}

impl From<redis::RedisError> for CustomRedisError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_timeout() {
            CustomRedisError::Timeout
        } else {
            CustomRedisError::Redis(Arc::new(err))
        }
    }
}

#[async_trait]
pub trait Client {
    /// Server round-trip. Returns the raw reply, `PONG` on a healthy server;
    /// callers decide what reply they accept.
    async fn ping(&self) -> Result<String, CustomRedisError>;

    async fn get(&self, k: String) -> Result<String, CustomRedisError>;
    async fn set(&self, k: String, v: String) -> Result<(), CustomRedisError>;
    async fn del(&self, k: String) -> Result<(), CustomRedisError>;
}

// Module declarations
mod client;
mod mock;

// Re-export public APIs
pub use client::RedisClient;
pub use mock::{MockRedisCall, MockRedisClient};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_errors_fold_into_the_timeout_variant() {
        let io_timeout = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err: CustomRedisError = redis::RedisError::from(io_timeout).into();
        assert!(matches!(err, CustomRedisError::Timeout));
    }

    #[test]
    fn non_timeout_errors_keep_the_underlying_error() {
        let refused: CustomRedisError =
            redis::RedisError::from((redis::ErrorKind::IoError, "connection refused")).into();
        assert!(matches!(refused, CustomRedisError::Redis(_)));
    }
}
