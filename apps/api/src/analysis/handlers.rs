//! Axum route handlers for the Analysis API.

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::career_paths::{recommend_career_paths, CareerPath};
use crate::analysis::job_listings::{find_matching_jobs, JobListing};
use crate::analysis::pipeline::AnalysisResponse;
use crate::errors::AppError;
use crate::matching::{extract_keywords, MatchResult};
use crate::models::resume::ResumeData;
use crate::parser_client::pdf::extract_pdf_text;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeStructuredRequest {
    pub resume: ResumeData,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub skills: Vec<String>,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub keywords: Vec<String>,
    #[serde(flatten)]
    pub result: MatchResult,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SkillsRequest {
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictRoleResponse {
    pub predicted_role: String,
}

#[derive(Debug, Serialize)]
pub struct CareerPathsResponse {
    pub career_paths: Vec<CareerPath>,
    pub total_paths: usize,
}

#[derive(Debug, Deserialize)]
pub struct JobDetailsRequest {
    #[serde(default)]
    pub predicted_role: String,
}

#[derive(Debug, Serialize)]
pub struct JobDetailsResponse {
    pub matching_jobs: Vec<JobListing>,
    pub total_jobs: usize,
    pub predicted_role: String,
}

/// Runs CPU-bound work on the blocking pool. A panicked or cancelled task is an
/// internal error.
async fn run_blocking<T, F>(task: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let output = tokio::task::spawn_blocking(task)
        .await
        .context("blocking task failed")?;
    Ok(output)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart upload: `pdf` (required) and `job_description` (optional text field).
pub async fn handle_analyze_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let mut pdf: Option<Bytes> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("pdf") => {
                let filename = field.file_name().unwrap_or("resume.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
                debug!(filename = %filename, bytes = data.len(), "Received resume upload");
                pdf = Some(data);
            }
            Some("job_description") => {
                job_description = field.text().await.map_err(|e| {
                    AppError::Validation(format!("failed to read job_description: {e}"))
                })?;
            }
            _ => {}
        }
    }

    let pdf = pdf.ok_or_else(|| AppError::Validation("No PDF uploaded".to_string()))?;
    let resume_text = run_blocking(move || extract_pdf_text(&pdf))
        .await?
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

    let response = state
        .analyzer
        .analyze_text(&resume_text, &job_description)
        .await?;
    Ok(Json(response))
}

/// POST /api/v1/analyze/text
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let response = state
        .analyzer
        .analyze_text(&request.resume_text, &request.job_description)
        .await?;
    Ok(Json(response))
}

/// POST /api/v1/analyze/structured
///
/// Caller supplies already-parsed resume data; the parsing API is not called.
pub async fn handle_analyze_structured(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeStructuredRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let response = state
        .analyzer
        .analyze_parsed(request.resume, &request.job_description)
        .await?;
    Ok(Json(response))
}

/// POST /api/v1/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let (keywords, result) = state
        .analyzer
        .match_against(&request.skills, &request.job_description);
    Ok(Json(MatchResponse { keywords, result }))
}

/// POST /api/v1/keywords
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    let keywords = extract_keywords(&request.text, state.analyzer.vocabulary());
    Ok(Json(KeywordsResponse { keywords }))
}

/// POST /api/v1/predict-role
pub async fn handle_predict_role(
    State(state): State<AppState>,
    Json(request): Json<SkillsRequest>,
) -> Result<Json<PredictRoleResponse>, AppError> {
    let predicted_role = state.analyzer.predict_role(&request.skills).await;
    Ok(Json(PredictRoleResponse { predicted_role }))
}

/// POST /api/v1/career-paths
pub async fn handle_career_paths(
    State(state): State<AppState>,
    Json(request): Json<SkillsRequest>,
) -> Result<Json<CareerPathsResponse>, AppError> {
    if request.skills.iter().all(|s| s.trim().is_empty()) {
        return Err(AppError::Validation("No skills provided".to_string()));
    }

    let career_paths = recommend_career_paths(&request.skills, &state.catalog);
    info!(
        skills = request.skills.len(),
        paths = career_paths.len(),
        "Career paths computed"
    );
    Ok(Json(CareerPathsResponse {
        total_paths: career_paths.len(),
        career_paths,
    }))
}

/// POST /api/v1/job-details
pub async fn handle_job_details(
    State(state): State<AppState>,
    Json(request): Json<JobDetailsRequest>,
) -> Result<Json<JobDetailsResponse>, AppError> {
    let predicted_role = request.predicted_role.trim().to_string();
    if predicted_role.is_empty() {
        return Err(AppError::Validation("No predicted role provided".to_string()));
    }

    let matching_jobs = find_matching_jobs(&predicted_role, &state.jobs);
    debug!(role = %predicted_role, jobs = matching_jobs.len(), "Job listings matched");
    Ok(Json(JobDetailsResponse {
        total_jobs: matching_jobs.len(),
        matching_jobs,
        predicted_role,
    }))
}
