//! Maps structured resume data to the fixed-order feature vector consumed by the ATS scorer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeData;

/// Count-based resume features. Field order is the model's input order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeFeatureVector {
    pub skill_count: usize,
    pub education_count: usize,
    /// Education entries with a non-empty institution.
    pub college_count: usize,
    /// Distinct non-empty company names across experience entries.
    pub company_count: usize,
    pub experience_count: usize,
    pub project_count: usize,
    /// Total characters across project descriptions.
    pub text_length: usize,
}

impl ResumeFeatureVector {
    pub fn as_array(&self) -> [f64; 7] {
        [
            self.skill_count as f64,
            self.education_count as f64,
            self.college_count as f64,
            self.company_count as f64,
            self.experience_count as f64,
            self.project_count as f64,
            self.text_length as f64,
        ]
    }
}

pub fn extract_features(resume: &ResumeData) -> ResumeFeatureVector {
    let college_count = resume
        .education
        .iter()
        .filter(|e| e.institution.as_deref().is_some_and(|i| !i.is_empty()))
        .count();

    let companies: HashSet<&str> = resume
        .experience
        .iter()
        .filter_map(|e| e.company.as_deref())
        .filter(|c| !c.is_empty())
        .collect();

    let text_length = resume
        .projects
        .iter()
        .filter_map(|p| p.description.as_deref())
        .map(|d| d.chars().count())
        .sum();

    ResumeFeatureVector {
        skill_count: resume.skills.len(),
        education_count: resume.education.len(),
        college_count,
        company_count: companies.len(),
        experience_count: resume.experience.len(),
        project_count: resume.projects.len(),
        text_length,
    }
}
