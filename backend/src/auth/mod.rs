//! Authentication module
//!
//! JWT issuance/verification, the bearer-token guard, and argon2
//! password hashing.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, IdentityClaim, JwtService, IDENTITY_CLAIM_VERSION};
pub use middleware::{bearer_token, AuthUser};
pub use password::PasswordService;
