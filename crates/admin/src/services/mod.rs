//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Password login restricted to accounts with the admin flag

pub mod auth;

pub use auth::{AdminAuthError, AdminAuthService};
