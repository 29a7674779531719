//! Account registration, login, and bearer-token authentication.

use crate::error::{AuthError, Result};
use crate::password::{hash_password, verify_password};
use crate::token::{generate_token, hash_token};
use crate::types::{Credentials, NewUser, User};
use sqlx::{query, query_as, SqlitePool};
use tracing::{debug, info};

/// Authentication service backed by the catalog database.
#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
}

impl AuthService {
    /// Create a new `AuthService` backed by the provided pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new account.
    ///
    /// # Errors
    /// Returns `EmailTaken` if the email is already registered.
    pub async fn register(&self, new_user: NewUser) -> Result<User> {
        let taken: i64 = query_as("SELECT COUNT(*) as count FROM users WHERE email = ?")
            .bind(&new_user.email)
            .fetch_one(&self.pool)
            .await
            .map(|row: (i64,)| row.0)?;

        if taken > 0 {
            return Err(AuthError::EmailTaken);
        }

        let now = chrono::Utc::now().timestamp();
        let password_hash = hash_password(&new_user.password);

        let result = query(
            r#"
            INSERT INTO users (name, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&password_hash)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let user = self.fetch_user(result.last_insert_rowid()).await?;

        info!(user_id = user.id, "Registered new account");

        Ok(user)
    }

    /// Log in with email and password, issuing a fresh API token.
    ///
    /// Unknown email and wrong password fail identically so the response
    /// does not reveal which emails are registered.
    pub async fn login(&self, credentials: Credentials) -> Result<(User, String)> {
        let user = query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(&credentials.email)
            .fetch_optional(&self.pool)
            .await?;

        let user = match user {
            Some(user) if verify_password(&credentials.password, &user.password_hash) => user,
            _ => {
                debug!("Login rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let token = generate_token();
        let now = chrono::Utc::now().timestamp();

        query("INSERT INTO api_tokens (user_id, token_hash, created_at) VALUES (?, ?, ?)")
            .bind(user.id)
            .bind(hash_token(&token))
            .bind(now)
            .execute(&self.pool)
            .await?;

        info!(user_id = user.id, "Issued API token");

        Ok((user, token))
    }

    /// Revoke a token.
    ///
    /// # Errors
    /// Returns `InvalidToken` if the token is unknown or already revoked.
    pub async fn logout(&self, token: &str) -> Result<()> {
        let result = query("DELETE FROM api_tokens WHERE token_hash = ?")
            .bind(hash_token(token))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::InvalidToken);
        }

        Ok(())
    }

    /// Resolve a bearer token to its account.
    ///
    /// # Errors
    /// Returns `InvalidToken` if the token is unknown or revoked.
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let user = query_as::<_, User>(
            r#"
            SELECT users.* FROM users
            INNER JOIN api_tokens ON api_tokens.user_id = users.id
            WHERE api_tokens.token_hash = ?
            "#,
        )
        .bind(hash_token(token))
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or(AuthError::InvalidToken)
    }

    async fn fetch_user(&self, id: i64) -> Result<User> {
        let user = query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }
}
