//! Experience line summarization.
//!
//! [`Summarizer`] is the seam: the formatter only sees the trait. The Ollama
//! implementation never fails outward; when the endpoint is unreachable or
//! replies with something other than JSON it degrades to echoing its input.

use crate::config::SummarizerConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum SummarizerError {
    #[error("request to generation endpoint failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// Turns one resume line into a short description.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> String;
}

/// Leaves every description empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSummarizer;

#[async_trait]
impl Summarizer for NoopSummarizer {
    async fn summarize(&self, _text: &str) -> String {
        String::new()
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Summarizer backed by a local Ollama `/api/generate` endpoint
pub struct OllamaSummarizer {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaSummarizer {
    pub fn new(config: &SummarizerConfig) -> Result<Self, SummarizerError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/generate", config.host.trim_end_matches('/')),
            model: config.model.clone(),
        })
    }

    async fn generate(&self, text: &str) -> Result<String, SummarizerError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: build_prompt(text),
            stream: false,
        };

        // Status is not checked: an error body without `response` reads as empty.
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;
        debug!(status = %response.status(), "generation endpoint replied");
        let response: GenerateResponse = response.json().await?;

        Ok(response.response.trim().to_string())
    }
}

#[async_trait]
impl Summarizer for OllamaSummarizer {
    async fn summarize(&self, text: &str) -> String {
        match self.generate(text).await {
            Ok(summary) => {
                debug!(model = %self.model, chars = summary.len(), "summarized experience line");
                summary
            }
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "failed to contact Ollama, keeping original text");
                text.to_string()
            }
        }
    }
}

/// Prompt sent for a single experience line
fn build_prompt(text: &str) -> String {
    format!(
        "Summarize this resume bullet point for a LinkedIn profile:\n\n{}\n\nSummary:",
        text
    )
}
