//! 메모리 기반 세션 저장소 (테스트용)

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use async_trait::async_trait;
use crate::errors::{AppError, AppResult};
use super::session_repo::SessionStore;

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| deadline > now)
    }
}

#[derive(Default)]
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 만료되지 않은 키 개수
    pub fn live_keys(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .map(|entries| entries.values().filter(|entry| entry.is_live(now)).count())
            .unwrap_or(0)
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::StoreUnavailable("session store lock poisoned".to_string()))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> AppResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: ttl_seconds.and_then(|ttl| Instant::now().checked_add(Duration::from_secs(ttl))),
        };
        self.lock()?.insert(key.to_string(), entry);
        Ok(())
    }

    async fn load(&self, key: &str) -> AppResult<Option<String>> {
        let now = Instant::now();
        Ok(self
            .lock()?
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    async fn take(&self, key: &str) -> AppResult<Option<String>> {
        let now = Instant::now();
        Ok(self
            .lock()?
            .remove(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value))
    }
}
