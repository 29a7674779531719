//! # Authentication Module
//!
//! Token-based account authentication for the catalog API.
//!
//! ## Overview
//!
//! This module handles account registration, login, and bearer-token
//! authentication against the catalog database. Passwords are stored as
//! salted digests; API tokens are opaque random values stored hashed and
//! revoked on logout.
//!
//! ## Features
//!
//! - Registration with email uniqueness enforcement
//! - Login issuing per-session API tokens
//! - Bearer-token resolution for request authentication
//! - Token revocation on logout

pub mod error;
pub mod password;
pub mod service;
pub mod token;
pub mod types;

pub use error::{AuthError, Result};
pub use service::AuthService;
pub use types::{Credentials, LoginInput, NewUser, RegisterInput, User};
