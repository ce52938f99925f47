use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{Client, CustomRedisError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockRedisCall {
    Ping,
    Get(String),
    Set(String, String),
    Del(String),
}

/// Canned-response cache client. Clones share the recorded call log, so a
/// test can keep a probe handle while the router owns the client.
#[derive(Clone)]
pub struct MockRedisClient {
    ping_ret: Result<String, CustomRedisError>,
    get_ret: HashMap<String, Result<String, CustomRedisError>>,
    set_ret: HashMap<String, Result<(), CustomRedisError>>,
    del_ret: HashMap<String, Result<(), CustomRedisError>>,
    calls: Arc<Mutex<Vec<MockRedisCall>>>,
}

impl Default for MockRedisClient {
    fn default() -> Self {
        Self {
            // A freshly started Redis answers PONG; tests override to break it.
            ping_ret: Ok("PONG".to_string()),
            get_ret: HashMap::new(),
            set_ret: HashMap::new(),
            del_ret: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockRedisClient {
    pub fn new() -> Self {
        Self::default()
    }

    // Helper method to safely lock the calls mutex
    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<MockRedisCall>> {
        match self.calls.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn ping_ret(&mut self, ret: Result<String, CustomRedisError>) -> Self {
        self.ping_ret = ret;
        self.clone()
    }

    pub fn get_ret(&mut self, key: &str, ret: Result<String, CustomRedisError>) -> Self {
        self.get_ret.insert(key.to_owned(), ret);
        self.clone()
    }

    pub fn set_ret(&mut self, key: &str, ret: Result<(), CustomRedisError>) -> Self {
        self.set_ret.insert(key.to_owned(), ret);
        self.clone()
    }

    pub fn del_ret(&mut self, key: &str, ret: Result<(), CustomRedisError>) -> Self {
        self.del_ret.insert(key.to_owned(), ret);
        self.clone()
    }

    pub fn get_calls(&self) -> Vec<MockRedisCall> {
        self.lock_calls().clone()
    }
}

#[async_trait]
impl Client for MockRedisClient {
    async fn ping(&self) -> Result<String, CustomRedisError> {
        self.lock_calls().push(MockRedisCall::Ping);
        self.ping_ret.clone()
    }

    async fn get(&self, key: String) -> Result<String, CustomRedisError> {
        self.lock_calls().push(MockRedisCall::Get(key.clone()));

        match self.get_ret.get(&key) {
            Some(result) => result.clone(),
            None => Err(CustomRedisError::NotFound),
        }
    }

    async fn set(&self, key: String, value: String) -> Result<(), CustomRedisError> {
        self.lock_calls()
            .push(MockRedisCall::Set(key.clone(), value));

        match self.set_ret.get(&key) {
            Some(result) => result.clone(),
            None => Err(CustomRedisError::NotFound),
        }
    }

    async fn del(&self, key: String) -> Result<(), CustomRedisError> {
        self.lock_calls().push(MockRedisCall::Del(key.clone()));

        match self.del_ret.get(&key) {
            Some(result) => result.clone(),
            None => Err(CustomRedisError::NotFound),
        }
    }
}
