//! Session-related types.
//!
//! Types stored in the session for authentication and cart state.

use serde::{Deserialize, Serialize};

use loja_core::{Email, UserId};

use super::user::User;

/// Session-stored user identity.
///
/// Only what identifies the account. Anything that can change while the
/// user is logged in, such as the admin flag, is read from the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// User's database ID.
    pub user_id: UserId,
    /// User's email address.
    pub email: Email,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
        }
    }
}

/// Session keys for storefront data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the visitor's cart.
    pub const CART: &str = "cart";

    /// Key for the id of the current cart contents. Replaced on every cart
    /// change and stored with the order, so one cart becomes one order.
    pub const CHECKOUT_KEY: &str = "checkout_key";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_current_user_omits_admin_flag() {
        let now = Utc::now();
        let user = User {
            id: UserId::new(12),
            email: Email::parse("ana@example.pt").unwrap(),
            name: "Ana".to_string(),
            phone: None,
            address: None,
            city: None,
            postal_code: None,
            country: "PT".to_string(),
            is_admin: true,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(CurrentUser::from(&user)).unwrap();
        assert_eq!(json["userId"], 12);
        assert_eq!(json["email"], "ana@example.pt");
        assert!(json.get("isAdmin").is_none());
    }
}
