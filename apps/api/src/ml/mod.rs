// Black-box model capabilities: ATS scoring and role prediction.
// The analysis pipeline only sees the traits; backends are chosen in main.rs.

pub mod ats;
pub mod role;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid model artifact JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed model artifact: {0}")]
    Malformed(String),

    #[error("Model produced a non-finite score")]
    NonFinite,
}
