//! Uploaded document text extraction (resumes, job descriptions, syllabi).
//!
//! PDFs go through `pdf-extract`; anything else is decoded as UTF-8 with
//! invalid sequences replaced. Extraction is CPU-bound: handlers call it
//! inside `tokio::task::spawn_blocking`.

pub mod handlers;

use std::panic::{catch_unwind, AssertUnwindSafe};

use anyhow::{anyhow, Result};

const PDF_MAGIC: &[u8] = b"%PDF";

/// Extracts plain text from an uploaded file. An empty upload yields "".
pub fn extract_text(bytes: &[u8], file_name: Option<&str>) -> Result<String> {
    if bytes.is_empty() {
        return Ok(String::new());
    }

    if is_pdf(bytes, file_name) {
        // pdf-extract panics on some malformed files.
        let text = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
            .map_err(|_| anyhow!("failed to extract text from PDF: malformed document"))?
            .map_err(|e| anyhow!("failed to extract text from PDF: {e}"))?;
        return Ok(text.trim().to_string());
    }

    Ok(String::from_utf8_lossy(bytes).trim().to_string())
}

fn is_pdf(bytes: &[u8], file_name: Option<&str>) -> bool {
    bytes.starts_with(PDF_MAGIC)
        || file_name.is_some_and(|n| n.to_ascii_lowercase().ends_with(".pdf"))
}
