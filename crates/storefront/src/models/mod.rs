//! Storefront domain models.
//!
//! Catalog entities live in `loja_core::models`; this module holds the
//! account and session types only the storefront needs.

pub mod session;
pub mod user;

pub use session::{CurrentUser, keys as session_keys};
pub use user::{ProfileUpdate, User};
