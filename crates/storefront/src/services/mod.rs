//! Business logic services for the storefront.
//!
//! - `auth` - Registration, login and password changes

pub mod auth;
