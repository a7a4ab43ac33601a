//! Application state management
//!
//! Shared resources handed to every handler through Axum's state
//! extraction. Everything here is built once at startup, is read-only
//! afterwards, and clones in O(1).

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::repositories::UserRepository;
use crate::services::CredentialService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// User storage handle, owned by process bootstrap
    pub users: Arc<dyn UserRepository>,
    pub config: Arc<AppConfig>,
    /// JWT service with keys derived from the configured secret
    pub jwt: JwtService,
    pub credentials: CredentialService,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>, config: AppConfig) -> Self {
        let jwt = JwtService::new(
            &config.jwt.secret,
            &config.jwt.issuer,
            config.jwt.access_token_expiry_secs,
        );
        let credentials = CredentialService::new(users.clone());

        Self {
            users,
            config: Arc::new(config),
            jwt,
            credentials,
        }
    }

    #[inline]
    pub fn users(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn credentials(&self) -> &CredentialService {
        &self.credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::IdentityClaim;
    use crate::repositories::InMemoryUserRepository;

    fn state() -> AppState {
        AppState::new(Arc::new(InMemoryUserRepository::new()), AppConfig::default())
    }

    #[test]
    fn test_state_clone_shares_storage() {
        let state = state();
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.users, &cloned.users));
        assert!(Arc::ptr_eq(&state.config, &cloned.config));
    }

    #[test]
    fn test_jwt_service_uses_config() {
        let state = state();
        assert_eq!(
            state.jwt().access_token_expiry_secs(),
            state.config().jwt.access_token_expiry_secs
        );

        let identity = IdentityClaim {
            id: 1,
            username: "test".to_string(),
            email: "test@test.com".to_string(),
            avatar: None,
        };
        let token = state.jwt().issue(&identity).unwrap();
        assert_eq!(state.jwt().verify(&token).unwrap(), identity);
    }

    #[tokio::test]
    async fn test_users_handle_is_usable() {
        assert!(state().users().ping().await.is_ok());
    }
}
