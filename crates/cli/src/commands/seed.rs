//! Seed site content from a YAML file.
//!
//! The file maps each content key to its Portuguese text, with optional
//! English text and an editor-facing description:
//!
//! ```yaml
//! home.hero.title:
//!   pt: Vaporizadores de qualidade
//!   en: Quality vaporizers
//!   description: Título principal da página inicial
//! footer.copyright:
//!   pt: © Loja Vapor
//! ```
//!
//! Existing keys are overwritten, so the command can be re-run safely.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use loja_admin::db::site_content::{ContentFields, is_valid_key};
use loja_admin::db::{RepositoryError, SiteContentRepository};

use super::{DatabaseUrlError, connect};

/// One entry of the seed file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentEntry {
    pub pt: String,
    #[serde(default)]
    pub en: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<ContentEntry> for ContentFields {
    fn from(entry: ContentEntry) -> Self {
        Self {
            value_pt: entry.pt,
            value_en: entry.en,
            description: entry.description,
        }
    }
}

/// Parsed seed file, ordered by key.
pub type ContentSeed = BTreeMap<String, ContentEntry>;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Could not read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid content: {0} problem(s) found")]
    Invalid(usize),

    #[error(transparent)]
    Connection(#[from] DatabaseUrlError),

    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Parse a seed document.
///
/// # Errors
///
/// Returns `serde_yaml::Error` if the document is not a key to entry map.
pub fn parse(yaml: &str) -> Result<ContentSeed, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Every problem in a parsed seed, one message each.
#[must_use]
pub fn validate(seed: &ContentSeed) -> Vec<String> {
    let mut problems = Vec::new();
    for (key, entry) in seed {
        if !is_valid_key(key) {
            problems.push(format!("invalid key '{key}'"));
        }
        if entry.pt.trim().is_empty() {
            problems.push(format!("'{key}' has no Portuguese text"));
        }
    }
    problems
}

/// Upsert every entry of a YAML file.
///
/// The file is parsed and validated before connecting to the database.
///
/// # Errors
///
/// Returns `SeedError` if the file is missing or invalid, or a write fails.
pub async fn content(file_path: &str) -> Result<(), SeedError> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(SeedError::FileNotFound(file_path.to_string()));
    }

    info!(path = %file_path, "Loading site content from file");
    let raw = tokio::fs::read_to_string(path).await?;
    let seed = parse(&raw)?;

    let problems = validate(&seed);
    if !problems.is_empty() {
        for problem in &problems {
            error!("{problem}");
        }
        return Err(SeedError::Invalid(problems.len()));
    }

    info!(entries = seed.len(), "Parsed content");

    let pool = connect().await?;
    let repo = SiteContentRepository::new(&pool);
    let total = seed.len();
    for (key, entry) in seed {
        repo.upsert(&key, &entry.into()).await?;
    }

    info!(entries = total, "Site content seeded");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entries() {
        let seed = parse(
            r"
home.hero.title:
  pt: Vaporizadores de qualidade
  en: Quality vaporizers
  description: Título principal
footer.copyright:
  pt: © Loja Vapor
",
        )
        .unwrap();

        assert_eq!(seed.len(), 2);
        let footer = &seed["footer.copyright"];
        assert_eq!(footer.pt, "© Loja Vapor");
        assert_eq!(footer.en, None);

        let fields: ContentFields = seed["home.hero.title"].clone().into();
        assert_eq!(fields.value_en.as_deref(), Some("Quality vaporizers"));
        assert_eq!(fields.description.as_deref(), Some("Título principal"));
    }

    #[test]
    fn test_parse_rejects_missing_pt_and_unknown_fields() {
        assert!(parse("home.title:\n  en: Hello\n").is_err());
        assert!(parse("home.title:\n  pt: Olá\n  fr: Bonjour\n").is_err());
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let seed = parse("Home.Title:\n  pt: Olá\nhome.empty:\n  pt: '  '\nhome.ok:\n  pt: Sim\n")
            .unwrap();
        let problems = validate(&seed);
        assert_eq!(problems.len(), 2);
        assert!(problems.iter().any(|p| p.contains("Home.Title")));
        assert!(problems.iter().any(|p| p.contains("home.empty")));
    }

    #[test]
    fn test_bundled_seed_file_is_valid() {
        let seed = parse(include_str!("../../seeds/site_content.yaml")).unwrap();
        assert!(!seed.is_empty());
        assert!(validate(&seed).is_empty());
    }
}
