//! Process-local user repository
//!
//! Backs the `memory` storage backend and the test suite. All state lives
//! behind one lock, which is what makes `insert` atomic.

use super::{NewUser, UserRecord, UserRepository};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    last_id: i64,
    by_username: HashMap<String, UserRecord>,
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_username.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self.inner.read().await.by_username.get(username).cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        Ok(self.inner.read().await.by_username.contains_key(username))
    }

    async fn insert(&self, user: &NewUser) -> Result<Option<UserRecord>> {
        let mut inner = self.inner.write().await;
        if inner.by_username.contains_key(&user.username) {
            return Ok(None);
        }

        inner.last_id += 1;
        let record = UserRecord {
            id: inner.last_id,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            created_at: Utc::now(),
        };
        inner
            .by_username
            .insert(record.username.clone(), record.clone());

        Ok(Some(record))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
