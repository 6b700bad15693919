//! # wiki-web — API HTTP do Wikipedia Analyzer
//!
//! Servidor Axum que busca artigos na Wikipedia, analisa o texto com o [`wiki_core`] e
//! guarda artigos anotados em SQLite.
//!
//! | Método | Rota                          | Descrição                              |
//! |--------|-------------------------------|----------------------------------------|
//! | GET    | `/`                           | Boas-vindas                            |
//! | GET    | `{prefix}/search/`            | Busca na Wikipedia (`q`, `limit`)      |
//! | GET    | `{prefix}/articles/detail/:id`| Texto + análise de um artigo           |
//! | POST   | `{prefix}/articles/`          | Salva um artigo                        |
//! | GET    | `{prefix}/articles/`          | Lista artigos salvos (`skip`, `limit`) |
//! | PATCH  | `{prefix}/articles/:id`       | Edita título, resumo ou notas          |
//! | DELETE | `{prefix}/articles/:id`       | Remove um artigo salvo                 |

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod store;
pub mod wikipedia;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::HeaderValue,
    routing::{get, patch},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use wiki_core::TextAnalyzer;

use crate::config::Settings;
use crate::store::ArticleStore;
use crate::wikipedia::ArticleSource;

/// Estado compartilhado entre os handlers.
pub struct AppState {
    pub analyzer: TextAnalyzer,
    pub source: Arc<dyn ArticleSource>,
    pub store: ArticleStore,
    pub analysis_timeout: Duration,
    pub project_name: String,
    pub version: String,
}

impl AppState {
    pub fn new(
        settings: &Settings,
        analyzer: TextAnalyzer,
        source: Arc<dyn ArticleSource>,
        store: ArticleStore,
    ) -> Self {
        Self {
            analyzer,
            source,
            store,
            analysis_timeout: settings.analysis_timeout,
            project_name: settings.project_name.clone(),
            version: settings.version.clone(),
        }
    }
}

/// Rotas da API, sem prefixo.
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", get(routes::search))
        .route("/search/", get(routes::search))
        .route("/articles", get(routes::list_articles).post(routes::save_article))
        .route("/articles/", get(routes::list_articles).post(routes::save_article))
        .route("/articles/detail/:page_id", get(routes::article_detail))
        .route(
            "/articles/:id",
            patch(routes::update_article).delete(routes::delete_article),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "origem CORS inválida ignorada");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Monta o roteador completo (rotas, prefixo, CORS e tracing).
pub fn build_router(state: Arc<AppState>, settings: &Settings) -> Router {
    let api = api_routes();
    let app = if settings.api_prefix.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(&settings.api_prefix, api)
    };

    app.route("/", get(routes::root))
        .layer(cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
