mod config;
mod db;
mod documents;
mod errors;
mod llm_client;
mod models;
mod planning;
mod routes;
mod skills;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::llm_client::{LlmClient, TextGenerator};
use crate::planning::store::{InMemoryPlanStore, PgPlanStore, PlanStore};
use crate::routes::build_router;
use crate::skills::taxonomy::SkillTaxonomy;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Study Planner API v{}", env!("CARGO_PKG_VERSION"));

    // Plan storage: PostgreSQL when configured, in-memory otherwise
    let store: Arc<dyn PlanStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgPlanStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; study plans are kept in memory only");
            Arc::new(InMemoryPlanStore::new())
        }
    };

    // Text-generation collaborator (optional)
    let llm: Option<Arc<dyn TextGenerator>> = match config.llm_credentials() {
        Some((api_key, model)) => {
            let client = LlmClient::new(api_key, model)?;
            info!(
                "LLM client initialized (model: {}, enrichment: {})",
                client.model(),
                config.enable_ai_enrichment
            );
            Some(Arc::new(client))
        }
        None => {
            info!("OpenRouter not configured; running with offline extraction and plans");
            None
        }
    };

    let taxonomy = Arc::new(SkillTaxonomy::default());
    info!("Skill taxonomy loaded ({} skills)", taxonomy.len());

    let state = AppState {
        store,
        llm,
        taxonomy,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
