// Skill matching: keyword extraction from JD text, fuzzy similarity, weighted scoring.
// Pure functions over the shared `Vocabulary`. No I/O.

pub mod extractor;
pub mod fuzzy;
pub mod matcher;

pub use extractor::extract_keywords;
pub use matcher::{match_skills, MatchResult};
