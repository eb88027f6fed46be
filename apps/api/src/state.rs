use std::sync::Arc;

use crate::analysis::career_paths::CareerCatalog;
use crate::analysis::job_listings::JobBoard;
use crate::analysis::pipeline::Analyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything behind the `Arc`s is built once in `main` and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Vocabulary plus the pluggable parser, scorer, and role classifier.
    pub analyzer: Arc<Analyzer>,
    pub catalog: Arc<CareerCatalog>,
    pub jobs: Arc<JobBoard>,
}
