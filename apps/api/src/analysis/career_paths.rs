//! Career path recommendation: ranks catalog roles the user is close to but not
//! yet fully qualified for.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Minimum share of a role's required skills the user must already have.
const MIN_MATCH_PERCENT: f64 = 40.0;
const MAX_PATHS: usize = 8;

/// A job title and the skills it requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub job: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPath {
    pub job_title: String,
    pub match_percentage: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub total_required: usize,
    pub total_matched: usize,
}

/// Role catalog shared by career-path recommendation and the fallback role classifier.
#[derive(Debug, Clone)]
pub struct CareerCatalog {
    profiles: Vec<RoleProfile>,
}

const BUILTIN_ROLES: &[(&str, &[&str])] = &[
    (
        "Frontend Developer",
        &["html", "css", "javascript", "react", "typescript", "tailwind"],
    ),
    (
        "Backend Developer",
        &["node", "express", "mongodb", "sql", "rest api", "docker"],
    ),
    (
        "Full Stack Developer",
        &["html", "css", "javascript", "react", "node", "mongodb", "git"],
    ),
    (
        "Data Scientist",
        &["python", "pandas", "numpy", "machine learning", "statistics", "sql"],
    ),
    (
        "Data Analyst",
        &["excel", "sql", "powerbi", "python", "data analysis", "tableau"],
    ),
    (
        "Machine Learning Engineer",
        &["python", "tensorflow", "pytorch", "machine learning", "deep learning", "docker"],
    ),
    (
        "DevOps Engineer",
        &["docker", "kubernetes", "aws", "jenkins", "linux", "ci/cd"],
    ),
    (
        "Cloud Engineer",
        &["aws", "azure", "gcp", "linux", "terraform", "networking"],
    ),
    (
        "Mobile Developer",
        &["java", "kotlin", "swift", "flutter", "firebase", "git"],
    ),
    (
        "Python Developer",
        &["python", "django", "flask", "sql", "rest api", "git"],
    ),
];

impl CareerCatalog {
    /// Titles are trimmed, skills trimmed and lower-cased; empty skill entries are dropped.
    pub fn new(profiles: Vec<RoleProfile>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|p| RoleProfile {
                job: p.job.trim().to_string(),
                skills: p
                    .skills
                    .iter()
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect(),
            })
            .collect();
        Self { profiles }
    }

    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_ROLES
                .iter()
                .map(|(job, skills)| RoleProfile {
                    job: job.to_string(),
                    skills: skills.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        )
    }

    /// Reads a JSON array of `{"job": "...", "skills": ["..."]}`.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading career catalog {}", path.display()))?;
        let profiles: Vec<RoleProfile> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing career catalog {}", path.display()))?;
        let catalog = Self::new(profiles);
        info!(path = %path.display(), roles = catalog.profiles.len(), "Career catalog loaded");
        Ok(catalog)
    }

    pub fn profiles(&self) -> &[RoleProfile] {
        &self.profiles
    }
}

/// Roles with at least 40% of their required skills covered and at least one gap,
/// best first, at most 8. A title is reported once: later rows with the same title
/// (case-insensitive) are skipped after one qualifies.
pub fn recommend_career_paths(user_skills: &[String], catalog: &CareerCatalog) -> Vec<CareerPath> {
    let mut seen_user = HashSet::new();
    let user_skills: Vec<&str> = user_skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && seen_user.insert(s.to_lowercase()))
        .collect();
    let user_lower: HashSet<String> = user_skills.iter().map(|s| s.to_lowercase()).collect();

    let mut seen_titles = HashSet::new();
    let mut paths = Vec::new();

    for profile in catalog.profiles() {
        if profile.skills.is_empty() || seen_titles.contains(&profile.job.to_lowercase()) {
            continue;
        }

        let matched_skills: Vec<String> = user_skills
            .iter()
            .filter(|s| profile.skills.contains(&s.to_lowercase()))
            .map(|s| s.to_string())
            .collect();
        let missing_skills: Vec<String> = profile
            .skills
            .iter()
            .filter(|s| !user_lower.contains(s.as_str()))
            .cloned()
            .collect();

        let pct = matched_skills.len() as f64 / profile.skills.len() as f64 * 100.0;
        if pct < MIN_MATCH_PERCENT || missing_skills.is_empty() {
            continue;
        }

        seen_titles.insert(profile.job.to_lowercase());
        paths.push(CareerPath {
            job_title: profile.job.clone(),
            match_percentage: (pct * 10.0).round() / 10.0,
            total_required: profile.skills.len(),
            total_matched: matched_skills.len(),
            matched_skills,
            missing_skills,
        });
    }

    paths.sort_by(|a, b| b.match_percentage.total_cmp(&a.match_percentage));
    paths.truncate(MAX_PATHS);
    paths
}
