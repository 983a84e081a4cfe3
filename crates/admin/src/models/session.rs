//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use loja_core::{Email, UserId};

/// Session-stored admin identity.
///
/// Minimal data stored in the session to identify the logged-in admin. The
/// admin flag itself is not cached here; it is re-read on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentAdmin {
    /// Account ID in `shop.user`.
    pub user_id: UserId,
    /// Admin's email address.
    pub email: Email,
    /// Admin's display name.
    pub name: String,
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_current_admin_uses_camel_case() {
        let admin = CurrentAdmin {
            user_id: UserId::new(7),
            email: Email::parse("gestao@lojavapor.pt").unwrap(),
            name: "Gestão".to_string(),
        };

        let json = serde_json::to_value(&admin).unwrap();
        assert_eq!(json["userId"], 7);
        assert_eq!(json["email"], "gestao@lojavapor.pt");

        let back: CurrentAdmin = serde_json::from_value(json).unwrap();
        assert_eq!(back, admin);
    }
}
