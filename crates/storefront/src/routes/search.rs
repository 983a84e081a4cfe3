//! Search suggestions.
//!
//! Stateless: the client debounces keystrokes and calls this endpoint with
//! whatever has been typed so far.

use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use loja_core::models::Product;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::search::{SearchTerm, clamp_limit};
use crate::state::AppState;
use crate::validation::ApiJson;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<Product>,
}

/// Products matching the query, best matches first.
///
/// GET /api/search?q=&limit=
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<ApiJson<SearchResponse>> {
    let trimmed = query.q.trim().to_string();

    let Some(term) = SearchTerm::parse(&trimmed) else {
        return Ok(ApiJson(SearchResponse {
            query: trimmed,
            results: Vec::new(),
        }));
    };

    let results = ProductRepository::new(state.pool())
        .search(&term, clamp_limit(query.limit))
        .await?;

    tracing::debug!(count = results.len(), "Search suggestions");
    Ok(ApiJson(SearchResponse {
        query: trimmed,
        results,
    }))
}
