//! Request body shape checks
//!
//! Each endpoint declares a [`PayloadSchema`]: the fields it reads, whether
//! they are required, and which JSON kinds they accept. A body is checked
//! against its schema before it is deserialized, so handlers only ever see
//! well-formed requests and every shape problem is reported as a
//! [`SchemaError`] naming the offending field. Keys not listed in a schema
//! are ignored.

use crate::errors::SchemaError;
use crate::types::{LoginRequest, SignupRequest};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// JSON kinds a field may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    NullableString,
}

impl FieldKind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::NullableString => value.is_string() || value.is_null(),
        }
    }

    fn expected(self) -> &'static str {
        match self {
            FieldKind::String => "a string",
            FieldKind::NullableString => "a string or null",
        }
    }
}

/// A single field in a payload schema
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl Field {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            required: true,
            kind,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            required: false,
            kind,
        }
    }
}

/// Field list for one request body
#[derive(Debug, Clone, Copy)]
pub struct PayloadSchema {
    pub fields: &'static [Field],
}

impl PayloadSchema {
    /// Check `body` against the schema without deserializing it
    pub fn check(&self, body: &Value) -> Result<(), SchemaError> {
        let object = body.as_object().ok_or(SchemaError::NotAnObject)?;

        for field in self.fields {
            match object.get(field.name) {
                None if field.required => return Err(SchemaError::MissingField(field.name)),
                None => {}
                Some(value) if !field.kind.accepts(value) => {
                    return Err(SchemaError::WrongType {
                        field: field.name,
                        expected: field.kind.expected(),
                    })
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Check `body`, then deserialize it into `T`
    pub fn parse<T: DeserializeOwned>(&self, body: &Value) -> Result<T, SchemaError> {
        self.check(body)?;
        T::deserialize(body).map_err(|e| SchemaError::Malformed(e.to_string()))
    }
}

pub const LOGIN_SCHEMA: PayloadSchema = PayloadSchema {
    fields: &[
        Field::required("username", FieldKind::String),
        Field::required("password", FieldKind::String),
    ],
};

pub const SIGNUP_SCHEMA: PayloadSchema = PayloadSchema {
    fields: &[
        Field::required("username", FieldKind::String),
        Field::required("password", FieldKind::String),
        Field::required("email", FieldKind::String),
        Field::optional("avatar", FieldKind::NullableString),
    ],
};

/// Validate a login body: `username` and `password`, both strings
pub fn validate_login_payload(body: &Value) -> Result<LoginRequest, SchemaError> {
    LOGIN_SCHEMA.parse(body)
}

/// Validate a signup body: `username`, `password`, `email` strings and an
/// optional `avatar`
pub fn validate_signup_payload(body: &Value) -> Result<SignupRequest, SchemaError> {
    SIGNUP_SCHEMA.parse(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_login_payload_accepted() {
        let req = validate_login_payload(&json!({"username": "test", "password": "1234"})).unwrap();
        assert_eq!(req.username, "test");
        assert_eq!(req.password, "1234");
    }

    #[rstest]
    #[case(json!({}), SchemaError::MissingField("username"))]
    #[case(json!({"username": "test"}), SchemaError::MissingField("password"))]
    #[case(json!({"password": "x"}), SchemaError::MissingField("username"))]
    #[case(
        json!({"username": 1, "password": "x"}),
        SchemaError::WrongType { field: "username", expected: "a string" }
    )]
    #[case(
        json!({"username": "a", "password": null}),
        SchemaError::WrongType { field: "password", expected: "a string" }
    )]
    #[case(json!(["username", "password"]), SchemaError::NotAnObject)]
    #[case(json!(null), SchemaError::NotAnObject)]
    fn test_login_payload_rejected(#[case] body: Value, #[case] expected: SchemaError) {
        assert_eq!(validate_login_payload(&body).unwrap_err(), expected);
    }

    #[test]
    fn test_signup_payload_without_avatar() {
        let req = validate_signup_payload(&json!({
            "username": "a",
            "password": "a",
            "email": "my@email.com"
        }))
        .unwrap();
        assert_eq!(req.email, "my@email.com");
        assert!(req.avatar.is_none());
    }

    #[test]
    fn test_signup_payload_with_null_avatar() {
        let req = validate_signup_payload(&json!({
            "username": "a",
            "password": "a",
            "email": "my@email.com",
            "avatar": null
        }))
        .unwrap();
        assert!(req.avatar.is_none());
    }

    #[test]
    fn test_signup_payload_with_avatar() {
        let req = validate_signup_payload(&json!({
            "username": "a",
            "password": "a",
            "email": "my@email.com",
            "avatar": "https://cdn.example.com/a.png"
        }))
        .unwrap();
        assert_eq!(req.avatar.as_deref(), Some("https://cdn.example.com/a.png"));
    }

    #[rstest]
    #[case(json!({"username": "a", "password": "a"}), SchemaError::MissingField("email"))]
    #[case(
        json!({"username": "a", "password": "a", "email": 5}),
        SchemaError::WrongType { field: "email", expected: "a string" }
    )]
    #[case(
        json!({"username": "a", "password": "a", "email": "a@b", "avatar": 3}),
        SchemaError::WrongType { field: "avatar", expected: "a string or null" }
    )]
    fn test_signup_payload_rejected(#[case] body: Value, #[case] expected: SchemaError) {
        assert_eq!(validate_signup_payload(&body).unwrap_err(), expected);
    }

    #[test]
    fn test_error_message_names_field() {
        let err = validate_signup_payload(&json!({"username": "a", "password": "a"})).unwrap_err();
        assert_eq!(err.to_string(), "'email' is a required property");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Extra keys never affect acceptance of an otherwise valid body
        #[test]
        fn prop_extra_keys_ignored(
            username in ".*",
            password in ".*",
            extra_key in "[a-z]{1,12}",
            extra_value in any::<i64>()
        ) {
            prop_assume!(extra_key != "username" && extra_key != "password");

            let mut body = json!({"username": username.clone(), "password": password.clone()});
            body[extra_key] = json!(extra_value);

            let req = validate_login_payload(&body).unwrap();
            prop_assert_eq!(req.username, username);
            prop_assert_eq!(req.password, password);
        }

        /// Any non-string username is a type error, never accepted
        #[test]
        fn prop_non_string_username_rejected(n in any::<i64>(), b in any::<bool>()) {
            for value in [json!(n), json!(b), json!([n]), json!({"n": n})] {
                let body = json!({"username": value, "password": "x"});
                let is_wrong_type = matches!(
                    validate_login_payload(&body),
                    Err(SchemaError::WrongType { field: "username", .. })
                );
                prop_assert!(is_wrong_type);
            }
        }
    }
}
