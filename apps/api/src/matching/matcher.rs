//! Weighted fuzzy matcher: scores a resume's skills against required JD keywords.
//!
//! Algorithm, per required keyword (in the order given):
//! 1. weight = vocabulary weight (core skills 2.0, others 1.0); add to total_weight
//! 2. scan normalized candidate skills in order; the first candidate that either
//!    fuzzy-matches (partial_ratio ≥ 85) or is a synonym claims the keyword
//! 3. otherwise the keyword is missing
//!
//! match_percentage = round(100 × matched_weight / total_weight, 2), or 0.0 when nothing
//! was required. This is a weighted ratio, not matched_count / total_required.

use serde::{Deserialize, Serialize};

use crate::matching::fuzzy::partial_ratio;
use crate::vocabulary::Vocabulary;

/// Minimum partial-ratio similarity (0–100) for a direct match.
pub const FUZZY_MATCH_THRESHOLD: u8 = 85;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Required keywords that were matched, in required order.
    pub matched: Vec<String>,
    /// Required keywords with no matching candidate, in required order.
    pub missing: Vec<String>,
    pub matched_count: usize,
    pub total_required: usize,
    /// 0.0 – 100.0, weighted by keyword importance.
    pub match_percentage: f64,
}

impl MatchResult {
    fn empty() -> Self {
        Self {
            matched: Vec::new(),
            missing: Vec::new(),
            matched_count: 0,
            total_required: 0,
            match_percentage: 0.0,
        }
    }
}

/// Matches `candidate_skills` (raw resume skills) against `required_keywords`
/// (normalized JD keywords). Total: never fails.
pub fn match_skills(
    candidate_skills: &[String],
    required_keywords: &[String],
    vocabulary: &Vocabulary,
) -> MatchResult {
    if required_keywords.is_empty() {
        return MatchResult::empty();
    }

    let candidates: Vec<String> = candidate_skills
        .iter()
        .map(|s| vocabulary.normalize(s))
        .filter(|s| !s.is_empty())
        .collect();

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut total_weight = 0.0_f64;
    let mut matched_weight = 0.0_f64;

    for required in required_keywords {
        let weight = vocabulary.weight(required);
        total_weight += weight;

        let found = candidates.iter().any(|candidate| {
            partial_ratio(candidate, required) >= FUZZY_MATCH_THRESHOLD
                || vocabulary.are_synonyms(required, candidate)
        });

        if found {
            matched.push(required.clone());
            matched_weight += weight;
        } else {
            missing.push(required.clone());
        }
    }

    let match_percentage = if total_weight > 0.0 {
        round2(100.0 * matched_weight / total_weight).clamp(0.0, 100.0)
    } else {
        0.0
    };

    MatchResult {
        matched_count: matched.len(),
        total_required: matched.len() + missing.len(),
        matched,
        missing,
        match_percentage,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
