//! Servidor HTTP do Wikipedia Analyzer

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wiki_core::TextAnalyzer;
use wiki_web::{
    build_router,
    config::{startup_log_filter, Settings},
    store::ArticleStore,
    wikipedia::WikipediaClient,
    AppState,
};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let settings = Settings::from_env();

    let default_filter = startup_log_filter(&settings);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            error!("configuração inválida: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(settings).await {
        error!("falha ao iniciar o servidor: {e}");
        std::process::exit(1);
    }
}

async fn run(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    // Capacidades carregadas uma vez; sem elas o processo não sobe
    let analyzer = TextAnalyzer::from_config(&settings.analyzer)?;
    let store = ArticleStore::connect(&settings.database_url).await?;
    let source = Arc::new(WikipediaClient::new(settings.wikipedia_api_url.clone())?);

    let state = Arc::new(AppState::new(&settings, analyzer, source, store));
    let app = build_router(state, &settings);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    info!(
        "🚀 {} v{} em http://{} (prefixo '{}')",
        settings.project_name, settings.version, settings.bind_addr, settings.api_prefix
    );
    axum::serve(listener, app).await?;
    Ok(())
}
