//! Credential checks and user creation
//!
//! Usernames are lowercased here, on both paths, so lookups and the
//! uniqueness check are case-insensitive no matter what the caller sends.
//! Argon2 work runs on the blocking pool.

use crate::auth::PasswordService;
use crate::error::ApiError;
use crate::repositories::{NewUser, UserRepository};
use authgate_shared::{normalize_username, PublicUser};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, instrument, warn};

/// Hashed once and verified against when a login names an unknown user, so
/// that a miss costs the same Argon2 work as a wrong password.
const DUMMY_PASSWORD: &str = "authgate-unknown-user";

/// Fields for a new account, already past schema and semantic validation
#[derive(Debug, Clone)]
pub struct NewUserInput {
    pub username: String,
    pub password: String,
    pub email: String,
    pub avatar: Option<String>,
}

#[derive(Clone)]
pub struct CredentialService {
    users: Arc<dyn UserRepository>,
    dummy_hash: Arc<OnceCell<String>>,
}

impl CredentialService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    async fn unknown_user_hash(&self) -> anyhow::Result<&str> {
        let hash = self
            .dummy_hash
            .get_or_try_init(|| PasswordService::hash_async(DUMMY_PASSWORD.to_string()))
            .await?;
        Ok(hash.as_str())
    }

    /// Check a username/password pair
    ///
    /// Unknown user and wrong password both come back as
    /// [`ApiError::WrongCredentials`], after the same Argon2 verify.
    #[instrument(skip(self, password))]
    pub async fn check_login(&self, username: &str, password: &str) -> Result<PublicUser, ApiError> {
        let username = normalize_username(username);

        let Some(user) = self.users.find_by_username(&username).await? else {
            let dummy = self.unknown_user_hash().await?.to_string();
            PasswordService::verify_async(password.to_string(), dummy).await?;
            warn!(%username, "login for unknown user");
            return Err(ApiError::WrongCredentials);
        };

        let valid =
            PasswordService::verify_async(password.to_string(), user.password_hash.clone()).await?;
        if !valid {
            warn!(%username, user_id = user.id, "login with wrong password");
            return Err(ApiError::WrongCredentials);
        }

        info!(user_id = user.id, "user logged in");
        Ok(user.to_public())
    }

    /// Create an account
    ///
    /// A taken username, including one taken by a concurrent signup between
    /// the pre-check and the insert, yields [`ApiError::UserExists`].
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn add_user(&self, input: NewUserInput) -> Result<PublicUser, ApiError> {
        let username = normalize_username(&input.username);

        // Skips the hashing cost for the common duplicate case
        if self.users.username_exists(&username).await? {
            warn!(%username, "signup for existing username");
            return Err(ApiError::UserExists);
        }

        let password_hash = PasswordService::hash_async(input.password).await?;

        let new_user = NewUser {
            username,
            password_hash,
            email: input.email,
            avatar: input.avatar,
        };

        match self.users.insert(&new_user).await? {
            Some(user) => {
                info!(user_id = user.id, username = %user.username, "user created");
                Ok(user.to_public())
            }
            None => {
                warn!(username = %new_user.username, "username taken during signup");
                Err(ApiError::UserExists)
            }
        }
    }
}
