//! Account listing for the users screen.

use chrono::{DateTime, Utc};
use serde::Serialize;

use loja_core::{Email, UserId};

/// An account without its password hash or address details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub country: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}
