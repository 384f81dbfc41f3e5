//! The upload pipeline: PDF in, LinkedIn profile record out.

use crate::extractor::{self, ExtractError};
use crate::formatter;
use crate::parser;
use crate::resume::LinkedInProfile;
use crate::summarizer::Summarizer;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error("failed to serialize profile: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs extract, parse and format with an injected summarizer.
pub struct ResumeProcessor {
    summarizer: Box<dyn Summarizer>,
}

impl ResumeProcessor {
    pub fn new(summarizer: Box<dyn Summarizer>) -> Self {
        Self { summarizer }
    }

    /// Parse already-extracted text into a profile
    pub async fn process_text(&self, text: &str) -> LinkedInProfile {
        let parsed = parser::parse_resume(text);
        if parsed.is_empty() {
            warn!("no recognizable section headings found in resume text");
        }
        info!(
            experience = parsed.experience.len(),
            education = parsed.education.len(),
            skills = parsed.skills.len(),
            projects = parsed.projects.len(),
            "parsed resume sections"
        );
        formatter::to_linkedin_profile(&parsed, self.summarizer.as_ref()).await
    }

    /// Extract a PDF and turn it into a profile
    pub async fn process(&self, pdf_path: &Path) -> Result<LinkedInProfile, PipelineError> {
        let text = extractor::extract_text(pdf_path).await?;
        Ok(self.process_text(&text).await)
    }
}

/// Write the profile as pretty-printed JSON, replacing any existing file
pub fn save_profile(profile: &LinkedInProfile, path: &Path) -> Result<(), PipelineError> {
    let json = serde_json::to_string_pretty(profile)?;
    std::fs::write(path, json).map_err(|source| PipelineError::Write {
        path: path.display().to_string(),
        source,
    })
}
