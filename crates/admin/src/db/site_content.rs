//! Editable interface copy.

use sqlx::PgPool;

use loja_core::models::SiteContent;

use super::{RepositoryError, require_affected};

/// Longest accepted content key.
pub const MAX_KEY_CHARS: usize = 100;

/// Keys look like `home.hero.title`: lowercase ASCII, digits, `.`, `_`, `-`.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_KEY_CHARS
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'))
}

/// Values written by an upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFields {
    pub value_pt: String,
    pub value_en: Option<String>,
    pub description: Option<String>,
}

/// Repository for site content entries.
pub struct SiteContentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SiteContentRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every entry, by key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<SiteContent>, RepositoryError> {
        let entries = sqlx::query_as::<_, SiteContent>(
            "SELECT key, value_pt, value_en, description, updated_at FROM shop.site_content ORDER BY key",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// Create the entry or replace its values.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    pub async fn upsert(
        &self,
        key: &str,
        fields: &ContentFields,
    ) -> Result<SiteContent, RepositoryError> {
        let entry = sqlx::query_as::<_, SiteContent>(
            r"
            INSERT INTO shop.site_content (key, value_pt, value_en, description)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (key) DO UPDATE
            SET value_pt = EXCLUDED.value_pt,
                value_en = EXCLUDED.value_en,
                description = EXCLUDED.description,
                updated_at = NOW()
            RETURNING key, value_pt, value_en, description, updated_at
            ",
        )
        .bind(key)
        .bind(&fields.value_pt)
        .bind(fields.value_en.as_deref())
        .bind(fields.description.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(entry)
    }

    /// Delete an entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no entry has that key.
    pub async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.site_content WHERE key = $1")
            .bind(key)
            .execute(self.pool)
            .await?;

        require_affected(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("home.hero.title"));
        assert!(is_valid_key("footer_copyright-2"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("Home.Title"));
        assert!(!is_valid_key("com espaço"));
        assert!(!is_valid_key(&"a".repeat(MAX_KEY_CHARS + 1)));
    }
}
