//! Rule-based resume improvement suggestions.
//!
//! Rules run in a fixed order (role gaps first, then completeness checks) and each
//! appends at most one suggestion, so identical inputs always give identical output.

use std::collections::HashSet;

use crate::models::resume::ResumeData;

/// Role categories with their expected skills, in declaration order.
pub const ROLE_SKILLS: &[(&str, &[&str])] = &[
    (
        "Frontend Development",
        &["html", "css", "javascript", "react", "tailwind", "typescript"],
    ),
    (
        "Backend Development",
        &["node", "express", "mongodb", "sql", "django", "flask"],
    ),
    (
        "Data Science",
        &["python", "pandas", "numpy", "matplotlib", "excel", "powerbi"],
    ),
    (
        "DevOps",
        &["docker", "kubernetes", "aws", "gitlab", "jenkins", "ci/cd"],
    ),
];

/// Below this fraction of a role's expected skills, the role gets a suggestion.
const ROLE_COVERAGE_THRESHOLD: f64 = 0.5;
/// Missing skills named per role suggestion.
const MAX_NAMED_GAPS: usize = 3;
const MIN_SKILLS: usize = 5;
const MIN_PROJECTS: usize = 2;
const MIN_MATCH_PERCENT: f64 = 50.0;

/// Produces suggestions from parsed resume content and the JD match outcome.
/// No current rule reads `_missing_skills`; keyword alignment keys off `match_percent`.
pub fn generate_suggestions(
    resume: &ResumeData,
    _missing_skills: &[String],
    match_percent: f64,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    let resume_skills: HashSet<String> = resume
        .skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();

    for (role, expected) in ROLE_SKILLS {
        if let Some(suggestion) = role_gap_suggestion(role, expected, &resume_skills) {
            suggestions.push(suggestion);
        }
    }

    if resume.skills.len() < MIN_SKILLS {
        suggestions.push("Try to list at least 5 relevant technical or soft skills.".to_string());
    }
    if resume.projects.len() < MIN_PROJECTS {
        suggestions.push("Showcase more projects to demonstrate practical expertise.".to_string());
    }
    if resume.certifications.is_empty() {
        suggestions
            .push("Add certifications to validate your knowledge in specific tools.".to_string());
    }
    if !resume.has_summary() {
        suggestions.push(
            "Include a brief professional summary to grab recruiter attention.".to_string(),
        );
    }
    if match_percent < MIN_MATCH_PERCENT {
        suggestions.push(
            "Improve your resume by adding more relevant keywords from the job description."
                .to_string(),
        );
    }
    if !resume.has_professional_link() {
        suggestions.push(
            "Add a LinkedIn profile link to connect with recruiters and showcase your professional network."
                .to_string(),
        );
    }

    suggestions
}

fn role_gap_suggestion(
    role: &str,
    expected: &[&str],
    resume_skills: &HashSet<String>,
) -> Option<String> {
    if expected.is_empty() {
        return None;
    }

    let (present, missing): (Vec<&str>, Vec<&str>) = expected
        .iter()
        .copied()
        .partition(|skill| resume_skills.contains(*skill));

    let coverage = present.len() as f64 / expected.len() as f64;
    if coverage >= ROLE_COVERAGE_THRESHOLD {
        return None;
    }

    let named: Vec<&str> = missing.into_iter().take(MAX_NAMED_GAPS).collect();
    Some(format!(
        "Your {role} skills are limited. Consider learning: {}",
        named.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Person, ProjectEntry};
    use serde_json::json;

    fn strong_resume() -> ResumeData {
        ResumeData {
            person: Person {
                linkedin: Some("linkedin.com/in/someone".to_string()),
                ..Default::default()
            },
            skills: [
                "HTML", "CSS", "JavaScript", "Node", "Express", "SQL", "Python", "Pandas",
                "NumPy", "Docker", "Kubernetes", "AWS",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            projects: vec![ProjectEntry::default(), ProjectEntry::default()],
            certifications: vec![json!("CKA")],
            summary: "Platform engineer".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_strong_resume_gets_no_suggestions() {
        assert!(generate_suggestions(&strong_resume(), &[], 80.0).is_empty());
    }

    #[test]
    fn test_empty_resume_gets_every_rule_in_order() {
        let suggestions = generate_suggestions(&ResumeData::default(), &[], 0.0);
        assert_eq!(suggestions.len(), 10);
        assert_eq!(
            suggestions[0],
            "Your Frontend Development skills are limited. Consider learning: html, css, javascript"
        );
        assert!(suggestions[1].starts_with("Your Backend Development"));
        assert!(suggestions[2].starts_with("Your Data Science"));
        assert!(suggestions[3].starts_with("Your DevOps"));
        assert!(suggestions[4].contains("at least 5"));
        assert!(suggestions[5].contains("projects"));
        assert!(suggestions[6].contains("certifications"));
        assert!(suggestions[7].contains("summary"));
        assert!(suggestions[8].contains("keywords"));
        assert!(suggestions[9].contains("LinkedIn"));
    }

    #[test]
    fn test_role_gap_names_missing_in_declared_order() {
        let resume = ResumeData {
            skills: vec!["docker".to_string()],
            ..strong_resume()
        };
        let suggestions = generate_suggestions(&resume, &[], 80.0);
        assert!(suggestions.contains(
            &"Your DevOps skills are limited. Consider learning: kubernetes, aws, gitlab"
                .to_string()
        ));
    }

    #[test]
    fn test_role_at_half_coverage_is_not_flagged() {
        let resume = ResumeData {
            skills: vec!["Docker".to_string(), "AWS".to_string(), "jenkins".to_string()],
            ..strong_resume()
        };
        let suggestions = generate_suggestions(&resume, &[], 80.0);
        assert!(!suggestions.iter().any(|s| s.contains("DevOps")));
    }

    #[test]
    fn test_low_match_adds_keyword_suggestion() {
        let suggestions = generate_suggestions(&strong_resume(), &[], 49.99);
        assert_eq!(
            suggestions,
            vec!["Improve your resume by adding more relevant keywords from the job description."]
        );
        assert!(generate_suggestions(&strong_resume(), &[], 50.0).is_empty());
    }

    #[test]
    fn test_suggestions_are_deterministic() {
        let resume = ResumeData {
            skills: vec!["react".to_string(), "flask".to_string()],
            ..Default::default()
        };
        let missing = vec!["docker".to_string()];
        let first = generate_suggestions(&resume, &missing, 42.0);
        let second = generate_suggestions(&resume, &missing, 42.0);
        assert_eq!(first, second);
    }
}
