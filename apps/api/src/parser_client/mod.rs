/// Parser Client: the single point of entry for the external resume-parsing API.
///
/// Turns raw resume text into `ResumeData`. Callers treat any error as "no data"
/// (see `analysis::pipeline`), so failures here degrade an analysis but never abort it.
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::resume::{ParsedDocument, ResumeData};

pub mod pdf;

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Parser unavailable after {retries} retries")]
    Unavailable { retries: u32 },

    #[error("PDF extraction failed: {0}")]
    Pdf(String),
}

/// Structured extraction of resume text. Implement to swap parsing backends.
#[async_trait]
pub trait DocumentParser: Send + Sync {
    async fn parse_document(&self, raw_text: &str) -> Result<ResumeData, ParserError>;
}

/// Used when no parsing API is configured: every document parses to empty data.
pub struct NullResumeParser;

#[async_trait]
impl DocumentParser for NullResumeParser {
    async fn parse_document(&self, _raw_text: &str) -> Result<ResumeData, ParserError> {
        Ok(ResumeData::default())
    }
}

/// HTTP client for a text-in, JSON-out resume parsing API.
/// Posts the raw text as `text/plain` and expects `{"data": {...}}` back.
#[derive(Clone)]
pub struct HttpResumeParser {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HttpResumeParser {
    pub fn new(
        url: String,
        api_key: Option<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, ParserError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url,
            api_key,
        })
    }
}

#[async_trait]
impl DocumentParser for HttpResumeParser {
    /// Retries on 429 and 5xx with exponential backoff.
    async fn parse_document(&self, raw_text: &str) -> Result<ResumeData, ParserError> {
        let mut last_error: Option<ParserError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 500ms, 1s
                let delay = std::time::Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "Parser call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self
                .client
                .post(&self.url)
                .header("content-type", "text/plain")
                .body(raw_text.to_string());
            if let Some(key) = &self.api_key {
                request = request.header("x-api-key", key);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ParserError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Parser API returned {}: {}", status, body);
                last_error = Some(ParserError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ParserError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let body = response.text().await?;
            let parsed: ParsedDocument = serde_json::from_str(&body)?;

            debug!(
                skills = parsed.data.skills.len(),
                experience = parsed.data.experience.len(),
                "Parser call succeeded"
            );

            return Ok(parsed.data);
        }

        Err(last_error.unwrap_or(ParserError::Unavailable {
            retries: MAX_RETRIES,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_parser_returns_empty_data() {
        let data = NullResumeParser.parse_document("Jane Doe\nPython").await.unwrap();
        assert_eq!(data, ResumeData::default());
    }

    #[tokio::test]
    async fn test_unreachable_parser_reports_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let parser = HttpResumeParser::new(
            "http://127.0.0.1:9/parse".to_string(),
            None,
            std::time::Duration::from_millis(200),
        )
        .unwrap();
        assert!(parser.parse_document("text").await.is_err());
    }
}
