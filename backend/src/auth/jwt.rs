//! JWT issuance and verification
//!
//! Tokens are HS256-signed and carry a fixed, versioned identity claim.
//! The claim is built from [`PublicUser`], never from the storage record,
//! so a password hash has no path into a token. Validity is purely
//! signature, issuer and expiry: nothing is stored server-side.

use anyhow::Result;
use authgate_shared::{AuthError, PublicUser};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Current layout of [`IdentityClaim`]. Tokens carrying any other version
/// are rejected.
pub const IDENTITY_CLAIM_VERSION: u8 = 1;

/// Identity embedded in every access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl From<PublicUser> for IdentityClaim {
    fn from(user: PublicUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            avatar: user.avatar,
        }
    }
}

impl From<IdentityClaim> for PublicUser {
    fn from(claim: IdentityClaim) -> Self {
        Self {
            id: claim.id,
            username: claim.username,
            email: claim.email,
            avatar: claim.avatar,
        }
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Identity claim version
    pub ver: u8,
    /// Subject (user ID)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    pub identity: IdentityClaim,
}

/// Keys derived once from the secret and shared between clones
#[derive(Clone)]
struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token issuer and verifier
///
/// Build once at startup and keep in `AppState`; cloning is cheap.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
    issuer: Arc<str>,
    access_token_expiry_secs: i64,
}

impl JwtService {
    pub fn new(secret: &str, issuer: &str, access_token_expiry_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_aud = false;

        Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
            issuer: Arc::from(issuer),
            access_token_expiry_secs,
        }
    }

    /// Sign an access token for `identity`
    pub fn issue(&self, identity: &IdentityClaim) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.access_token_expiry_secs);

        let claims = Claims {
            ver: IDENTITY_CLAIM_VERSION,
            sub: identity.id.to_string(),
            iss: self.issuer.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            identity: identity.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to sign access token: {}", e))?;
        debug!(user_id = identity.id, "access token issued");
        Ok(token)
    }

    /// Check signature, issuer, expiry and claim version
    pub fn verify(&self, token: &str) -> Result<IdentityClaim, AuthError> {
        let data = decode::<Claims>(token, &self.keys.decoding, &self.validation).map_err(|e| {
            debug!(error = %e, "token rejected");
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        let claims = data.claims;
        if claims.ver != IDENTITY_CLAIM_VERSION {
            debug!(ver = claims.ver, "unsupported identity claim version");
            return Err(AuthError::InvalidToken);
        }
        if claims.sub != claims.identity.id.to_string() {
            debug!(sub = %claims.sub, "subject does not match identity");
            return Err(AuthError::InvalidToken);
        }

        Ok(claims.identity)
    }

    #[inline]
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_token_expiry_secs
    }
}
