//! Role prediction: maps a resume's skills to the most likely job role.
//!
//! Backends:
//! - `NaiveBayesRoleClassifier`: multinomial Naive Bayes exported as a JSON artifact
//!   (classes, class log priors, per-class feature log probabilities, token vocabulary).
//! - `CatalogRoleClassifier`: no artifact; picks the catalog role whose required skills
//!   the resume covers best.
//!
//! Input is always cleaned with `clean_skills_input` first.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::career_paths::CareerCatalog;
use crate::ml::ModelError;

/// Returned when no prediction can be made.
pub const UNKNOWN_ROLE: &str = "unknown";

#[async_trait]
pub trait RoleClassifier: Send + Sync {
    async fn predict_role(&self, skills_text: &str) -> Result<String, ModelError>;
}

/// Lower-cases, maps `;` and `|` separators to `,`, collapses double spaces, trims.
pub fn clean_skills_input(raw: &str) -> String {
    let mut cleaned = raw.to_lowercase().replace([';', '|'], ",");
    while cleaned.contains("  ") {
        cleaned = cleaned.replace("  ", " ");
    }
    cleaned.trim().to_string()
}

/// Splits a cleaned skills phrase into comma-separated tokens, dropping punctuation.
fn skill_tokens(skills_text: &str) -> Vec<String> {
    skills_text
        .split(',')
        .map(|token| {
            token
                .chars()
                .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
                .collect::<String>()
                .trim()
                .to_string()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Naive Bayes artifact
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBayesArtifact {
    pub classes: Vec<String>,
    pub class_log_prior: Vec<f64>,
    /// `feature_log_prob[class][feature]`
    pub feature_log_prob: Vec<Vec<f64>>,
    /// token → feature index
    pub vocabulary: HashMap<String, usize>,
}

#[derive(Debug, Clone)]
pub struct NaiveBayesRoleClassifier {
    artifact: NaiveBayesArtifact,
}

impl NaiveBayesRoleClassifier {
    pub fn from_artifact(artifact: NaiveBayesArtifact) -> Result<Self, ModelError> {
        let n_classes = artifact.classes.len();
        if n_classes == 0 {
            return Err(ModelError::Malformed("no classes".to_string()));
        }
        if artifact.class_log_prior.len() != n_classes
            || artifact.feature_log_prob.len() != n_classes
        {
            return Err(ModelError::Malformed(format!(
                "expected {n_classes} priors and feature rows, got {} and {}",
                artifact.class_log_prior.len(),
                artifact.feature_log_prob.len()
            )));
        }

        let n_features = artifact.vocabulary.len();
        if let Some(row) = artifact
            .feature_log_prob
            .iter()
            .find(|row| row.len() != n_features)
        {
            return Err(ModelError::Malformed(format!(
                "feature row has {} entries, vocabulary has {n_features}",
                row.len()
            )));
        }
        if let Some((token, &index)) = artifact
            .vocabulary
            .iter()
            .find(|&(_, &index)| index >= n_features)
        {
            return Err(ModelError::Malformed(format!(
                "token '{token}' maps to out-of-range index {index}"
            )));
        }

        Ok(Self { artifact })
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path)?;
        let artifact: NaiveBayesArtifact = serde_json::from_str(&raw)?;
        let classifier = Self::from_artifact(artifact)?;
        info!(
            path = %path.display(),
            classes = classifier.artifact.classes.len(),
            features = classifier.artifact.vocabulary.len(),
            "Role model loaded"
        );
        Ok(classifier)
    }

    /// Joint log-likelihood argmax. Unseen tokens are ignored; ties go to the first class.
    fn classify(&self, skills_text: &str) -> &str {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in skill_tokens(skills_text) {
            if let Some(&index) = self.artifact.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut best_class = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (class, prior) in self.artifact.class_log_prior.iter().enumerate() {
            let row = &self.artifact.feature_log_prob[class];
            let score = prior
                + counts
                    .iter()
                    .map(|(&feature, &count)| count * row[feature])
                    .sum::<f64>();
            if score > best_score {
                best_score = score;
                best_class = class;
            }
        }

        &self.artifact.classes[best_class]
    }
}

#[async_trait]
impl RoleClassifier for NaiveBayesRoleClassifier {
    async fn predict_role(&self, skills_text: &str) -> Result<String, ModelError> {
        Ok(self.classify(skills_text).to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog fallback
// ────────────────────────────────────────────────────────────────────────────

pub struct CatalogRoleClassifier {
    catalog: Arc<CareerCatalog>,
}

impl CatalogRoleClassifier {
    pub fn new(catalog: Arc<CareerCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl RoleClassifier for CatalogRoleClassifier {
    async fn predict_role(&self, skills_text: &str) -> Result<String, ModelError> {
        let tokens: HashSet<String> = skill_tokens(skills_text).into_iter().collect();
        if tokens.is_empty() {
            return Ok(UNKNOWN_ROLE.to_string());
        }

        let mut best: Option<(&str, f64)> = None;
        for profile in self.catalog.profiles() {
            if profile.skills.is_empty() {
                continue;
            }
            let covered = profile
                .skills
                .iter()
                .filter(|s| tokens.contains(s.as_str()))
                .count();
            let coverage = covered as f64 / profile.skills.len() as f64;
            if coverage > 0.0 && best.map_or(true, |(_, b)| coverage > b) {
                best = Some((profile.job.as_str(), coverage));
            }
        }

        Ok(best
            .map(|(job, _)| job.to_string())
            .unwrap_or_else(|| UNKNOWN_ROLE.to_string()))
    }
}
