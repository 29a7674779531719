//! # MusicBox HTTP Server
//!
//! The axum surface over `core-catalog` and `core-auth`: routing, bearer-token
//! middleware, JSON envelopes, and the error-to-status mapping.
//!
//! ## Overview
//!
//! This crate wires:
//! - Route table for catalog CRUD, search, and account endpoints
//! - Bearer-token middleware guarding everything except register/login
//! - Domain error translation into the HTTP status/body contract
//! - Environment-driven server configuration

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;
