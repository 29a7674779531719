//! Account types and request payloads.

use crate::error::{AuthError, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Registered account.
///
/// The stored password digest never leaves the crate boundary in serialized
/// form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Email address (stored lowercased)
    pub email: String,
    /// Salted password digest
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Creation time (unix seconds)
    pub created_at: i64,
    /// Last update time (unix seconds)
    pub updated_at: i64,
}

fn required_error(field: &str) -> AuthError {
    AuthError::invalid_input(field, format!("The {} field is required.", field))
}

fn require_string(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(required_error(field)),
    }
}

/// Basic shape check: a local part and a domain around a single `@`.
fn validate_email(field: &str, email: &str) -> Result<()> {
    let valid = matches!(
        email.split_once('@'),
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@')
    );

    if !valid {
        return Err(AuthError::invalid_input(
            field,
            format!("The {} field must be a valid email address.", field),
        ));
    }

    Ok(())
}

/// Raw registration payload as received from a request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validated registration data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterInput {
    /// Minimum accepted password length.
    pub const MIN_PASSWORD_LEN: usize = 8;

    /// Validate all fields and produce registration data. Emails are
    /// trimmed and lowercased before storage.
    pub fn into_new(self) -> Result<NewUser> {
        let name = require_string("name", self.name)?;

        let email = require_string("email", self.email)?.trim().to_lowercase();
        validate_email("email", &email)?;

        let password = require_string("password", self.password)?;
        if password.chars().count() < Self::MIN_PASSWORD_LEN {
            return Err(AuthError::invalid_input(
                "password",
                format!(
                    "The password field must be at least {} characters.",
                    Self::MIN_PASSWORD_LEN
                ),
            ));
        }

        Ok(NewUser {
            name,
            email,
            password,
        })
    }
}

/// Raw login payload as received from a request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validated login credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    /// Validate both fields and produce credentials, normalizing the email
    /// the same way registration does.
    pub fn into_credentials(self) -> Result<Credentials> {
        let email = require_string("email", self.email)?.trim().to_lowercase();
        validate_email("email", &email)?;

        let password = require_string("password", self.password)?;

        Ok(Credentials { email, password })
    }
}
