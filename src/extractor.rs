//! PDF text extraction.
//!
//! Uses pdf-extract and keeps page order: one page's text after another,
//! separated by a newline.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("PDF file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to extract text from {}: {reason}", path.display())]
    Pdf { path: PathBuf, reason: String },
}

/// Read a PDF and return the text of every page, joined with newlines
pub async fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let bytes = fs::read(path).await.map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ExtractError::NotFound(path.to_path_buf())
        } else {
            ExtractError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
        ExtractError::Pdf {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    tracing::debug!(path = %path.display(), pages = pages.len(), "extracted PDF text");
    Ok(pages.join("\n"))
}
