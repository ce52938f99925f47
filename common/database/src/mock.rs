use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{Client, CustomDatabaseError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockDatabaseCall {
    ServerTime,
    ConnectionCheck,
}

/// Canned-response database client for handler tests. Unconfigured calls
/// fail, so tests state exactly what they rely on.
#[derive(Clone, Default)]
pub struct MockDatabaseClient {
    server_time_ret: Option<Result<DateTime<Utc>, String>>,
    connection_check_ret: Option<Result<(), String>>,
    calls: Arc<Mutex<Vec<MockDatabaseCall>>>,
}

impl MockDatabaseClient {
    pub fn new() -> Self {
        Self::default()
    }

    // Helper method to safely lock the calls mutex
    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<MockDatabaseCall>> {
        match self.calls.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn server_time_ret(&mut self, ret: Result<DateTime<Utc>, &str>) -> Self {
        self.server_time_ret = Some(ret.map_err(str::to_owned));
        self.clone()
    }

    pub fn connection_check_ret(&mut self, ret: Result<(), &str>) -> Self {
        self.connection_check_ret = Some(ret.map_err(str::to_owned));
        self.clone()
    }

    pub fn get_calls(&self) -> Vec<MockDatabaseCall> {
        self.lock_calls().clone()
    }
}

fn mock_error(message: &str) -> CustomDatabaseError {
    CustomDatabaseError::Other(sqlx::Error::Protocol(message.to_owned()))
}

#[async_trait]
impl Client for MockDatabaseClient {
    async fn server_time(&self) -> Result<DateTime<Utc>, CustomDatabaseError> {
        self.lock_calls().push(MockDatabaseCall::ServerTime);

        match &self.server_time_ret {
            Some(Ok(time)) => Ok(*time),
            Some(Err(message)) => Err(mock_error(message)),
            None => Err(mock_error("no mocked server_time response")),
        }
    }

    async fn connection_check(&self) -> Result<(), CustomDatabaseError> {
        self.lock_calls().push(MockDatabaseCall::ConnectionCheck);

        match &self.connection_check_ret {
            Some(Ok(())) => Ok(()),
            Some(Err(message)) => Err(mock_error(message)),
            None => Err(mock_error("no mocked connection_check response")),
        }
    }
}
