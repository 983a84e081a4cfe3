//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use loja_core::{Email, UserId};

/// A customer account.
///
/// The password hash never leaves the repository layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable account fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl ProfileUpdate {
    /// Trim every field and turn blanks into `None`.
    #[must_use]
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            name: clean(self.name),
            phone: clean(self.phone),
            address: clean(self.address),
            city: clean(self.city),
            postal_code: clean(self.postal_code),
            country: clean(self.country),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_normalized_drops_blanks() {
        let update = ProfileUpdate {
            name: Some("  Ana Silva ".to_string()),
            phone: Some("   ".to_string()),
            city: Some("Porto".to_string()),
            ..ProfileUpdate::default()
        }
        .normalized();

        assert_eq!(update.name.as_deref(), Some("Ana Silva"));
        assert_eq!(update.phone, None);
        assert_eq!(update.city.as_deref(), Some("Porto"));
        assert_eq!(update.country, None);
    }

    #[test]
    fn test_profile_update_deserializes_camel_case() {
        let update: ProfileUpdate =
            serde_json::from_str(r#"{"postalCode":"4000-001","name":"Rui"}"#).unwrap_or_default();
        assert_eq!(update.postal_code.as_deref(), Some("4000-001"));
        assert_eq!(update.name.as_deref(), Some("Rui"));
    }
}
