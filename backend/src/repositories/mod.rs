//! User storage
//!
//! [`UserRepository`] is the only way the rest of the backend touches
//! stored users. The handle is built once at startup and injected into
//! the services that need it.

use anyhow::Result;
use async_trait::async_trait;
use authgate_shared::PublicUser;
use chrono::{DateTime, Utc};

pub mod memory;
pub mod user;

pub use memory::InMemoryUserRepository;
pub use user::PgUserRepository;

/// User record from storage
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Everything but the password hash
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Input for inserting a user. `username` must already be normalized and
/// `password_hash` already derived.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub avatar: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exact-match lookup
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>>;

    async fn username_exists(&self, username: &str) -> Result<bool>;

    /// Insert a user, or `None` if the username is taken
    ///
    /// The uniqueness check and the insert are a single atomic step, so two
    /// concurrent inserts of one username cannot both succeed.
    async fn insert(&self, user: &NewUser) -> Result<Option<UserRecord>>;

    /// Readiness probe
    async fn ping(&self) -> Result<()>;
}
