//! # Cliente da Wikipedia
//!
//! Fonte de artigos sobre a API de ação do MediaWiki (`/w/api.php`). O trait
//! [`ArticleSource`] permite trocar o cliente HTTP real por um stub nos testes.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum WikiError {
    #[error("error connecting to Wikipedia: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Wikipedia answered with status {0}")]
    Status(u16),
}

/// Um resultado de busca.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiSearchResult {
    pub page_id: u64,
    pub title: String,
    pub snippet: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiSearchResponse {
    pub results: Vec<WikiSearchResult>,
    pub total: u64,
}

/// Texto completo de um artigo (texto plano, sem marcação).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleContent {
    pub page_id: u64,
    pub title: String,
    pub content: String,
    pub url: String,
}

/// Introdução de um artigo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub page_id: u64,
    pub title: String,
    pub summary: String,
    pub url: String,
}

/// Fonte de artigos.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn search(&self, query: &str, limit: u32) -> Result<WikiSearchResponse, WikiError>;

    async fn content(&self, page_id: u64) -> Result<ArticleContent, WikiError>;

    async fn summary(&self, page_id: u64) -> Result<ArticleSummary, WikiError>;
}

/// URL pública de um artigo a partir do título.
pub fn article_url(title: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{}", title.replace(' ', "_"))
}

fn curid_url(page_id: u64) -> String {
    format!("https://en.wikipedia.org/?curid={page_id}")
}

// --- Formato das respostas do MediaWiki ---

#[derive(Debug, Default, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    query: SearchQuery,
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    searchinfo: SearchInfo,
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchInfo {
    #[serde(default)]
    totalhits: u64,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    pageid: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

#[derive(Debug, Default, Deserialize)]
struct PagesEnvelope {
    #[serde(default)]
    query: PagesQuery,
}

#[derive(Debug, Default, Deserialize)]
struct PagesQuery {
    #[serde(default)]
    pages: HashMap<String, Page>,
}

#[derive(Debug, Default, Deserialize)]
struct Page {
    #[serde(default)]
    title: String,
    #[serde(default)]
    extract: String,
    fullurl: Option<String>,
}

/// Cliente HTTP da API do MediaWiki.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    http: reqwest::Client,
    api_url: String,
}

impl WikipediaClient {
    pub fn new(api_url: impl Into<String>) -> Result<Self, WikiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("wiki-analyzer/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(20))
            .build()?;
        Ok(Self {
            http,
            api_url: api_url.into(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, params: &[(&str, String)]) -> Result<T, WikiError> {
        let response = self
            .http
            .get(&self.api_url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                error!("falha na requisição à API da Wikipedia: {e}");
                WikiError::Request(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "API da Wikipedia respondeu com erro");
            return Err(WikiError::Status(status.as_u16()));
        }
        Ok(response.json::<T>().await?)
    }

    async fn page(&self, page_id: u64, intro_only: bool) -> Result<Page, WikiError> {
        let mut params = vec![
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("prop", "extracts|info".to_string()),
            ("pageids", page_id.to_string()),
            ("inprop", "url".to_string()),
            ("explaintext", "1".to_string()),
        ];
        if intro_only {
            params.push(("exintro", "1".to_string()));
        }

        let mut envelope: PagesEnvelope = self.get(&params).await?;
        Ok(envelope
            .query
            .pages
            .remove(&page_id.to_string())
            .unwrap_or_default())
    }
}

#[async_trait]
impl ArticleSource for WikipediaClient {
    async fn search(&self, query: &str, limit: u32) -> Result<WikiSearchResponse, WikiError> {
        info!(query, limit, "buscando artigos");

        let params = [
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("list", "search".to_string()),
            ("srsearch", query.to_string()),
            ("srlimit", limit.to_string()),
            ("srinfo", "totalhits".to_string()),
            ("srprop", "snippet".to_string()),
        ];
        let envelope: SearchEnvelope = self.get(&params).await?;

        let results = envelope
            .query
            .search
            .into_iter()
            .map(|hit| WikiSearchResult {
                page_id: hit.pageid,
                url: Some(article_url(&hit.title)),
                title: hit.title,
                snippet: Some(hit.snippet),
            })
            .collect();

        Ok(WikiSearchResponse {
            results,
            total: envelope.query.searchinfo.totalhits,
        })
    }

    async fn content(&self, page_id: u64) -> Result<ArticleContent, WikiError> {
        info!(page_id, "obtendo conteúdo completo do artigo");
        let page = self.page(page_id, false).await?;
        Ok(ArticleContent {
            page_id,
            title: page.title,
            content: page.extract,
            url: page.fullurl.unwrap_or_else(|| curid_url(page_id)),
        })
    }

    async fn summary(&self, page_id: u64) -> Result<ArticleSummary, WikiError> {
        info!(page_id, "obtendo resumo do artigo");
        let page = self.page(page_id, true).await?;
        Ok(ArticleSummary {
            page_id,
            title: page.title,
            summary: page.extract,
            url: page.fullurl.unwrap_or_else(|| curid_url(page_id)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> WikipediaClient {
        WikipediaClient::new(format!("{}/w/api.php", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_search_maps_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("list", "search"))
            .and(query_param("srsearch", "python"))
            .and(query_param("srlimit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": {
                    "searchinfo": {"totalhits": 1234},
                    "search": [
                        {"pageid": 23862, "title": "Python (programming language)", "snippet": "a <b>language</b>"},
                        {"pageid": 46332325, "title": "Python", "snippet": "snake"}
                    ]
                }
            })))
            .mount(&server)
            .await;

        let response = client_for(&server).await.search("python", 2).await.unwrap();

        assert_eq!(response.total, 1234);
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].page_id, 23862);
        assert_eq!(
            response.results[0].url.as_deref(),
            Some("https://en.wikipedia.org/wiki/Python_(programming_language)")
        );
        assert_eq!(response.results[1].snippet.as_deref(), Some("snake"));
    }

    #[tokio::test]
    async fn test_content_and_summary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("exintro", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": {"pages": {"42": {"pageid": 42, "title": "Answer", "extract": "Intro only."}}}
            })))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("pageids", "42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": {"pages": {"42": {
                    "pageid": 42,
                    "title": "Answer",
                    "extract": "Intro only. And the rest of the article.",
                    "fullurl": "https://en.wikipedia.org/wiki/Answer"
                }}}
            })))
            .with_priority(2)
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        let content = client.content(42).await.unwrap();
        assert_eq!(content.title, "Answer");
        assert_eq!(content.content, "Intro only. And the rest of the article.");
        assert_eq!(content.url, "https://en.wikipedia.org/wiki/Answer");

        let summary = client.summary(42).await.unwrap();
        assert_eq!(summary.summary, "Intro only.");
        assert_eq!(summary.url, "https://en.wikipedia.org/?curid=42");
    }

    #[tokio::test]
    async fn test_missing_page_defaults_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"batchcomplete": ""})))
            .mount(&server)
            .await;

        let content = client_for(&server).await.content(7).await.unwrap();
        assert_eq!(content.title, "");
        assert_eq!(content.content, "");
        assert_eq!(content.url, "https://en.wikipedia.org/?curid=7");
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).await.search("x", 1).await.unwrap_err();
        assert!(matches!(err, WikiError::Status(503)));
    }
}
