//! Handlers HTTP: busca, detalhe com análise e CRUD de artigos salvos.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::types::Json as DbJson;
use tracing::{debug, info};
use wiki_core::ArticleAnalysis;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::store::{ArticlePatch, NewArticle, SavedArticle};
use crate::wikipedia::WikiSearchResponse;
use crate::AppState;

const SEARCH_DEFAULT_LIMIT: i64 = 10;
const SEARCH_MAX_LIMIT: i64 = 50;
const LIST_DEFAULT_LIMIT: i64 = 100;
const LIST_MAX_LIMIT: i64 = 100;

/// Id dos registros montados na hora para artigos que não estão salvos.
pub const TRANSIENT_ARTICLE_ID: i64 = -1;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    skip: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArticleDetailResponse {
    pub article: SavedArticle,
    pub analysis: ArticleAnalysis,
}

#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub items: Vec<SavedArticle>,
    pub total: i64,
}

/// Lê um inteiro opcional da query string e valida o intervalo.
fn parse_bounded(name: &str, raw: Option<&str>, default: i64, min: i64, max: i64) -> Result<i64, ApiError> {
    let value = match raw {
        None => return Ok(default),
        Some(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::Validation(format!("'{name}' must be an integer")))?,
    };
    if value < min || value > max {
        return Err(ApiError::Validation(format!(
            "'{name}' must be between {min} and {max}"
        )));
    }
    Ok(value)
}

/// GET `/`
pub async fn root(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "message": format!("Welcome to the {}", state.project_name),
        "version": state.version,
    }))
}

/// GET `/search/?q=&limit=`
pub async fn search(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<WikiSearchResponse>, ApiError> {
    let q = params.q.unwrap_or_default();
    if q.trim().is_empty() {
        return Err(ApiError::Validation("'q' must not be empty".to_string()));
    }
    let limit = parse_bounded("limit", params.limit.as_deref(), SEARCH_DEFAULT_LIMIT, 1, SEARCH_MAX_LIMIT)?;

    let response = state.source.search(&q, limit as u32).await?;
    debug!(query = %q, results = response.results.len(), total = response.total, "busca concluída");
    Ok(Json(response))
}

/// GET `/articles/detail/:page_id`
///
/// Busca o texto na Wikipedia e analisa. Se o artigo já estiver salvo, devolve o
/// registro salvo; senão monta um registro transitório com id `-1`.
pub async fn article_detail(
    State(state): State<Arc<AppState>>,
    ApiPath(page_id): ApiPath<u64>,
) -> Result<Json<ArticleDetailResponse>, ApiError> {
    let content = state.source.content(page_id).await?;
    let analysis = run_analysis(&state, content.content).await?;

    let article = match state.store.find_by_wikipedia_id(&page_id.to_string()).await? {
        Some(saved) => saved,
        None => {
            let summary = state.source.summary(page_id).await?;
            let now = Utc::now();
            SavedArticle {
                id: TRANSIENT_ARTICLE_ID,
                title: content.title,
                wikipedia_id: page_id.to_string(),
                wikipedia_url: content.url,
                summary: Some(summary.summary),
                word_count: Some(analysis.word_count as i64),
                frequent_words: Some(DbJson(analysis.frequent_words.clone())),
                personal_notes: None,
                created_at: now,
                updated_at: now,
            }
        }
    };

    Ok(Json(ArticleDetailResponse { article, analysis }))
}

/// Roda a análise numa thread de bloqueio, limitada pelo timeout configurado.
async fn run_analysis(state: &AppState, text: String) -> Result<ArticleAnalysis, ApiError> {
    let analyzer = state.analyzer.clone();
    let task = tokio::task::spawn_blocking(move || analyzer.analyze(&text));

    match tokio::time::timeout(state.analysis_timeout, task).await {
        Err(_) => Err(ApiError::Timeout(state.analysis_timeout.as_secs())),
        Ok(Err(join_err)) => Err(ApiError::Internal(join_err.to_string())),
        Ok(Ok(result)) => Ok(result?),
    }
}

/// POST `/articles/`
pub async fn save_article(
    State(state): State<Arc<AppState>>,
    ApiJson(article): ApiJson<NewArticle>,
) -> Result<Json<SavedArticle>, ApiError> {
    let saved = state.store.create(article).await?;
    Ok(Json(saved))
}

/// GET `/articles/?skip=&limit=`
pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<ArticleListResponse>, ApiError> {
    let skip = parse_bounded("skip", params.skip.as_deref(), 0, 0, i64::MAX)?;
    let limit = parse_bounded("limit", params.limit.as_deref(), LIST_DEFAULT_LIMIT, 1, LIST_MAX_LIMIT)?;

    let (items, total) = state.store.list(skip, limit).await?;
    Ok(Json(ArticleListResponse { items, total }))
}

/// PATCH `/articles/:id`
pub async fn update_article(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<ArticlePatch>,
) -> Result<Json<SavedArticle>, ApiError> {
    let updated = state.store.update(id, patch).await?;
    info!(id, "artigo atualizado");
    Ok(Json(updated))
}

/// DELETE `/articles/:id`
pub async fn delete_article(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Value>, ApiError> {
    if !state.store.delete(id).await? {
        return Err(ApiError::NotFound("Article not found".to_string()));
    }
    info!(id, "artigo removido");
    Ok(Json(json!({ "message": "Article deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bounded() {
        assert_eq!(parse_bounded("limit", None, 10, 1, 50).unwrap(), 10);
        assert_eq!(parse_bounded("limit", Some("50"), 10, 1, 50).unwrap(), 50);
        assert!(matches!(
            parse_bounded("limit", Some("51"), 10, 1, 50),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            parse_bounded("limit", Some("0"), 10, 1, 50),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            parse_bounded("skip", Some("abc"), 0, 0, i64::MAX),
            Err(ApiError::Validation(_))
        ));
    }
}
