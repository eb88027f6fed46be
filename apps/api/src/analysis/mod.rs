// Analysis API: feature extraction, suggestions, career paths, job listings, and the
// pipeline that ties them to the external parser and model capabilities.

pub mod career_paths;
pub mod features;
pub mod handlers;
pub mod job_listings;
pub mod pipeline;
pub mod suggestions;
