//! Domain types for the back office.

pub mod session;
pub mod user;

pub use session::{CurrentAdmin, keys as session_keys};
pub use user::UserSummary;
