//! Analysis pipeline: orchestrates one resume analysis.
//!
//! Flow:
//!   1. Parse resume text → `ResumeData` (external, degraded to empty on failure)
//!   2. Features → ATS scorer → rescaled `ats_score`
//!   3. JD keywords → weighted fuzzy match against resume skills
//!   4. Suggestions
//!   5. Role prediction (degraded to "unknown" on failure)
//!
//! Every external call is bounded by `timeout`.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::features::{extract_features, ResumeFeatureVector};
use crate::analysis::suggestions::generate_suggestions;
use crate::errors::AppError;
use crate::matching::{extract_keywords, match_skills, MatchResult};
use crate::ml::ats::{AtsScale, AtsScorer};
use crate::ml::role::{clean_skills_input, RoleClassifier, UNKNOWN_ROLE};
use crate::models::resume::ResumeData;
use crate::parser_client::DocumentParser;
use crate::vocabulary::Vocabulary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ats_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub total_skills_matched: usize,
    pub total_skills_required: usize,
    pub match_percentage: f64,
    pub suggestions: Vec<String>,
    pub predicted_role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub job_description: String,
    pub resume_sections: ResumeData,
    pub features: ResumeFeatureVector,
}

pub struct Analyzer {
    vocabulary: Arc<Vocabulary>,
    parser: Arc<dyn DocumentParser>,
    scorer: Arc<dyn AtsScorer>,
    classifier: Arc<dyn RoleClassifier>,
    scale: AtsScale,
    timeout: Duration,
}

impl Analyzer {
    pub fn new(
        vocabulary: Arc<Vocabulary>,
        parser: Arc<dyn DocumentParser>,
        scorer: Arc<dyn AtsScorer>,
        classifier: Arc<dyn RoleClassifier>,
        scale: AtsScale,
        timeout: Duration,
    ) -> Self {
        Self {
            vocabulary,
            parser,
            scorer,
            classifier,
            scale,
            timeout,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Full analysis from raw resume text (uploaded PDF text or pasted text).
    pub async fn analyze_text(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisResponse, AppError> {
        if resume_text.trim().is_empty() {
            return Err(AppError::Validation(
                "resume text cannot be empty".to_string(),
            ));
        }

        let resume = self.parse_resume(resume_text).await;
        self.analyze_parsed(resume, job_description).await
    }

    /// Analysis of already-structured resume data; the parser is not called.
    pub async fn analyze_parsed(
        &self,
        resume: ResumeData,
        job_description: &str,
    ) -> Result<AnalysisResponse, AppError> {
        let analysis_id = Uuid::new_v4();

        let features = extract_features(&resume);
        let raw_score = match tokio::time::timeout(
            self.timeout,
            self.scorer.score_features(&features),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(AppError::Upstream(format!(
                    "ATS scorer ({}) timed out",
                    self.scorer.backend()
                )))
            }
        };
        let ats_score = self.scale.rescale(raw_score);

        let (_, matched) = self.match_against(&resume.skills, job_description);
        let suggestions =
            generate_suggestions(&resume, &matched.missing, matched.match_percentage);
        let predicted_role = self.predict_role(&resume.skills).await;

        info!(
            %analysis_id,
            scorer = self.scorer.backend(),
            ats_score,
            match_percentage = matched.match_percentage,
            matched = matched.matched_count,
            required = matched.total_required,
            suggestions = suggestions.len(),
            predicted_role = %predicted_role,
            "Analysis complete"
        );

        Ok(AnalysisResponse {
            analysis_id,
            analyzed_at: Utc::now(),
            result: AnalysisResult {
                ats_score,
                total_skills_matched: matched.matched_count,
                total_skills_required: matched.total_required,
                match_percentage: matched.match_percentage,
                matched_skills: matched.matched,
                missing_skills: matched.missing,
                suggestions,
                predicted_role,
            },
            job_description: job_description.to_string(),
            resume_sections: resume,
            features,
        })
    }

    /// Extracts JD keywords and matches `skills` against them.
    pub fn match_against(
        &self,
        skills: &[String],
        job_description: &str,
    ) -> (Vec<String>, MatchResult) {
        let keywords = extract_keywords(job_description, &self.vocabulary);
        let result = match_skills(skills, &keywords, &self.vocabulary);
        (keywords, result)
    }

    /// Predicts a role from a skill list. Classifier errors and timeouts yield `UNKNOWN_ROLE`.
    pub async fn predict_role(&self, skills: &[String]) -> String {
        let input = clean_skills_input(&skills.join(", "));
        match tokio::time::timeout(self.timeout, self.classifier.predict_role(&input)).await {
            Ok(Ok(role)) => role,
            Ok(Err(e)) => {
                warn!("Role classifier failed: {e}");
                UNKNOWN_ROLE.to_string()
            }
            Err(_) => {
                warn!("Role classifier timed out after {:?}", self.timeout);
                UNKNOWN_ROLE.to_string()
            }
        }
    }

    async fn parse_resume(&self, resume_text: &str) -> ResumeData {
        match tokio::time::timeout(self.timeout, self.parser.parse_document(resume_text)).await {
            Ok(Ok(data)) => data,
            Ok(Err(e)) => {
                warn!("Resume parser failed, continuing with empty data: {e}");
                ResumeData::default()
            }
            Err(_) => {
                warn!(
                    "Resume parser timed out after {:?}, continuing with empty data",
                    self.timeout
                );
                ResumeData::default()
            }
        }
    }
}
