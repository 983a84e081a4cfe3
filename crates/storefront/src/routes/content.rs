//! Site content for the frontend, in the visitor's language.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use loja_core::Locale;

use crate::db::SiteContentRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::validation::ApiJson;

#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

impl LangQuery {
    fn locale(&self) -> Locale {
        self.lang.as_deref().map(Locale::from_tag).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub lang: Locale,
    pub content: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct ContentValueResponse {
    pub key: String,
    pub lang: Locale,
    pub value: String,
}

/// Every content key mapped to its value.
///
/// GET /api/content?lang=pt|en
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<ApiJson<ContentResponse>> {
    let locale = query.locale();
    let entries = SiteContentRepository::new(state.pool()).list().await?;

    let content = entries
        .iter()
        .map(|entry| (entry.key.clone(), entry.value_for(locale).to_string()))
        .collect();

    Ok(ApiJson(ContentResponse {
        lang: locale,
        content,
    }))
}

/// A single content value.
///
/// GET /api/content/{key}?lang=
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<ApiJson<ContentValueResponse>> {
    let locale = query.locale();
    let entry = SiteContentRepository::new(state.pool())
        .get(&key)
        .await?
        .ok_or_else(|| AppError::NotFound("Conteúdo não encontrado".to_string()))?;

    Ok(ApiJson(ContentValueResponse {
        value: entry.value_for(locale).to_string(),
        key: entry.key,
        lang: locale,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_query_locale() {
        assert_eq!(LangQuery::default().locale(), Locale::Pt);
        let en = LangQuery {
            lang: Some("en".to_string()),
        };
        assert_eq!(en.locale(), Locale::En);
        let unknown = LangQuery {
            lang: Some("fr".to_string()),
        };
        assert_eq!(unknown.locale(), Locale::Pt);
    }
}
