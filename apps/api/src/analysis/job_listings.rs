//! Job listings for a predicted role: open positions whose title mentions the role.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

const MAX_LISTINGS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub job_title: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub work_from_home: bool,
    #[serde(default)]
    pub job_link: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct JobBoard {
    listings: Vec<JobListing>,
}

// title, company, location, salary, remote, skills
const BUILTIN_LISTINGS: &[(&str, &str, &str, &str, bool, &[&str])] = &[
    (
        "Frontend Developer Intern",
        "Pixelcraft Labs",
        "Bangalore",
        "15,000 /month",
        true,
        &["html", "css", "javascript", "react"],
    ),
    (
        "Junior Frontend Developer",
        "Brightleaf Software",
        "Pune",
        "4,50,000 /year",
        false,
        &["react", "typescript", "tailwind"],
    ),
    (
        "Backend Developer",
        "Ledgerline",
        "Hyderabad",
        "6,00,000 /year",
        false,
        &["node", "express", "mongodb", "sql"],
    ),
    (
        "Full Stack Developer",
        "Orbitdesk",
        "Remote",
        "7,20,000 /year",
        true,
        &["react", "node", "mongodb", "git"],
    ),
    (
        "Data Scientist",
        "Quantica Analytics",
        "Mumbai",
        "9,00,000 /year",
        false,
        &["python", "pandas", "machine learning", "sql"],
    ),
    (
        "Data Scientist Intern",
        "Healthgrid",
        "Chennai",
        "20,000 /month",
        true,
        &["python", "numpy", "statistics"],
    ),
    (
        "Data Analyst",
        "Retailmetrics",
        "Delhi",
        "5,00,000 /year",
        false,
        &["excel", "sql", "powerbi"],
    ),
    (
        "Machine Learning Engineer",
        "Neuronforge",
        "Bangalore",
        "12,00,000 /year",
        false,
        &["python", "pytorch", "tensorflow", "docker"],
    ),
    (
        "DevOps Engineer",
        "Stackharbor",
        "Noida",
        "8,00,000 /year",
        true,
        &["docker", "kubernetes", "aws", "jenkins"],
    ),
    (
        "Cloud Engineer",
        "Skyvault",
        "Gurgaon",
        "8,50,000 /year",
        false,
        &["aws", "azure", "terraform", "linux"],
    ),
    (
        "Mobile Developer",
        "Appnest",
        "Kolkata",
        "5,50,000 /year",
        true,
        &["kotlin", "flutter", "firebase"],
    ),
    (
        "Python Developer",
        "Scriptworks",
        "Ahmedabad",
        "5,00,000 /year",
        false,
        &["python", "django", "flask", "rest api"],
    ),
];

impl JobBoard {
    pub fn new(listings: Vec<JobListing>) -> Self {
        Self { listings }
    }

    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_LISTINGS
                .iter()
                .map(|(title, company, location, salary, remote, skills)| JobListing {
                    job_title: title.to_string(),
                    company_name: company.to_string(),
                    location: location.to_string(),
                    salary: Some(salary.to_string()),
                    work_from_home: *remote,
                    job_link: None,
                    skills: skills.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        )
    }

    /// Reads a JSON array of `JobListing` objects.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading job listings {}", path.display()))?;
        let listings: Vec<JobListing> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing job listings {}", path.display()))?;
        info!(path = %path.display(), listings = listings.len(), "Job listings loaded");
        Ok(Self::new(listings))
    }

    pub fn listings(&self) -> &[JobListing] {
        &self.listings
    }
}

/// First five listings, in board order, whose title contains `predicted_role`
/// (case-insensitive).
pub fn find_matching_jobs(predicted_role: &str, board: &JobBoard) -> Vec<JobListing> {
    let role = predicted_role.trim().to_lowercase();
    if role.is_empty() {
        return Vec::new();
    }

    board
        .listings()
        .iter()
        .filter(|listing| listing.job_title.to_lowercase().contains(&role))
        .take(MAX_LISTINGS)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn listing(title: &str) -> JobListing {
        JobListing {
            job_title: title.to_string(),
            company_name: "Acme".to_string(),
            location: "Remote".to_string(),
            salary: None,
            work_from_home: true,
            job_link: None,
            skills: Vec::new(),
        }
    }

    fn titles(jobs: &[JobListing]) -> Vec<&str> {
        jobs.iter().map(|j| j.job_title.as_str()).collect()
    }

    #[test]
    fn test_title_contains_role_case_insensitive() {
        let board = JobBoard::new(vec![
            listing("Senior DATA SCIENTIST"),
            listing("Data Analyst"),
            listing("data scientist intern"),
        ]);
        let jobs = find_matching_jobs("Data Scientist", &board);
        assert_eq!(titles(&jobs), vec!["Senior DATA SCIENTIST", "data scientist intern"]);
    }

    #[test]
    fn test_at_most_five_in_board_order() {
        let board = JobBoard::new(
            (0..8)
                .map(|i| listing(&format!("DevOps Engineer {i}")))
                .collect(),
        );
        let jobs = find_matching_jobs("devops engineer", &board);
        assert_eq!(jobs.len(), 5);
        assert_eq!(jobs[0].job_title, "DevOps Engineer 0");
        assert_eq!(jobs[4].job_title, "DevOps Engineer 4");
    }

    #[test]
    fn test_blank_role_matches_nothing() {
        assert!(find_matching_jobs("   ", &JobBoard::builtin()).is_empty());
    }

    #[test]
    fn test_builtin_board_has_listings_for_catalog_roles() {
        let board = JobBoard::builtin();
        let jobs = find_matching_jobs("Data Scientist", &board);
        assert_eq!(titles(&jobs), vec!["Data Scientist", "Data Scientist Intern"]);
        assert!(find_matching_jobs("unknown", &board).is_empty());
    }

    #[test]
    fn test_board_from_json_file_with_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"job_title": "Rust Developer", "salary": "10 LPA"}}]"#
        )
        .unwrap();
        let board = JobBoard::from_json_file(file.path()).unwrap();
        assert_eq!(board.listings().len(), 1);
        assert_eq!(board.listings()[0].salary.as_deref(), Some("10 LPA"));
        assert!(!board.listings()[0].work_from_home);
        assert!(board.listings()[0].skills.is_empty());
    }
}
