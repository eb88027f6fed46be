//! PDF text extraction for uploaded resumes.

use crate::parser_client::ParserError;

/// Extracts plain text from PDF bytes. CPU-bound; callers run it on the blocking pool.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ParserError> {
    if bytes.is_empty() {
        return Err(ParserError::Pdf("empty upload".to_string()));
    }
    // pdf-extract panics on some malformed documents.
    let text = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| ParserError::Pdf("malformed PDF".to_string()))?
        .map_err(|e| ParserError::Pdf(e.to_string()))?;
    Ok(text.trim().to_string())
}
