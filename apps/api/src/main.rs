mod analysis;
mod config;
mod errors;
mod matching;
mod ml;
mod models;
mod parser_client;
mod routes;
mod state;
mod vocabulary;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::career_paths::CareerCatalog;
use crate::analysis::job_listings::JobBoard;
use crate::analysis::pipeline::Analyzer;
use crate::config::Config;
use crate::ml::ats::{AtsScale, ProxyAtsScorer};
use crate::ml::role::{CatalogRoleClassifier, NaiveBayesRoleClassifier, RoleClassifier};
use crate::parser_client::{DocumentParser, HttpResumeParser, NullResumeParser};
use crate::routes::build_router;
use crate::state::AppState;
use crate::vocabulary::Vocabulary;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skillscope API v{}", env!("CARGO_PKG_VERSION"));

    let vocabulary = Arc::new(load_vocabulary(&config)?);

    let catalog = Arc::new(match &config.career_catalog_path {
        Some(path) => CareerCatalog::from_json_file(path)?,
        None => CareerCatalog::builtin(),
    });

    let jobs = Arc::new(match &config.job_listings_path {
        Some(path) => JobBoard::from_json_file(path)?,
        None => JobBoard::builtin(),
    });

    // Resume parser (NullResumeParser when no parsing API is configured)
    let parser: Arc<dyn DocumentParser> = match &config.resume_parser_url {
        Some(url) => {
            info!("Resume parser: {url}");
            Arc::new(
                HttpResumeParser::new(
                    url.clone(),
                    config.resume_parser_api_key.clone(),
                    config.upstream_timeout(),
                )
                .context("building resume parser HTTP client")?,
            )
        }
        None => {
            warn!("RESUME_PARSER_URL not set; uploaded resumes will parse to empty data");
            Arc::new(NullResumeParser)
        }
    };

    // Role classifier (catalog overlap when no trained artifact is configured)
    let classifier: Arc<dyn RoleClassifier> = match &config.role_model_path {
        Some(path) => Arc::new(
            NaiveBayesRoleClassifier::from_json_file(path)
                .with_context(|| format!("loading role model {}", path.display()))?,
        ),
        None => {
            info!("ROLE_MODEL_PATH not set; using catalog role classifier");
            Arc::new(CatalogRoleClassifier::new(catalog.clone()))
        }
    };

    let analyzer = Analyzer::new(
        vocabulary,
        parser,
        Arc::new(ProxyAtsScorer::default()),
        classifier,
        AtsScale::new(config.ats_score_scale),
        config.upstream_timeout(),
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        analyzer: Arc::new(analyzer),
        catalog,
        jobs,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Falls back to the built-in tables when the configured file cannot be loaded.
fn load_vocabulary(config: &Config) -> Result<Vocabulary> {
    if let Some(path) = &config.vocabulary_path {
        match Vocabulary::from_json_file(path) {
            Ok(vocabulary) => return Ok(vocabulary),
            Err(e) => warn!(
                "Failed to load vocabulary from {}: {e}; using built-in tables",
                path.display()
            ),
        }
    }
    Vocabulary::builtin().context("building built-in vocabulary")
}
