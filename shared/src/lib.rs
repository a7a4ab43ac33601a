//! authgate shared library
//!
//! Wire types, payload validation and error enums used by the backend
//! and by anything that talks to it.

pub mod errors;
pub mod schema;
pub mod types;
pub mod validation;

pub use errors::*;
pub use schema::{validate_login_payload, validate_signup_payload};
pub use types::*;
pub use validation::{normalize_username, validate_signup_fields};
