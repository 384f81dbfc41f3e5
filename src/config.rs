//! Configuration loading and management for resumelink.
//!
//! Loads settings from `resumelink.toml` with environment variable overrides for
//! credentials. Loading never touches the process environment; the binary reads
//! `.env` once at startup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "resumelink.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing required credential: {0}")]
    MissingCredential(String),
}

/// Overleaf site settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverleafConfig {
    pub base_url: String,
}

/// LinkedIn site settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedInConfig {
    pub base_url: String,
    /// How long the session stays open after the profile pass, for inspection
    pub linger_secs: u64,
}

/// Local generation endpoint used to summarize experience lines
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Ollama host, e.g. "http://localhost:11434"
    pub host: String,
    /// Model identifier (e.g., "mistral")
    pub model: String,
    pub timeout_secs: u64,
}

/// Browser launch settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BrowserSettings {
    /// Run without a visible window. Manual login still needs a visible one.
    pub headless: bool,
    /// Explicit Chrome/Chromium binary; autodetected when unset
    pub chrome_executable: Option<PathBuf>,
}

/// Where intermediate artifacts land
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pdf_path: PathBuf,
    pub json_path: PathBuf,
}

/// Credentials (normally loaded from the environment or `.env`)
#[derive(Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CredentialsConfig {
    pub linkedin_email: Option<String>,
    pub linkedin_password: Option<String>,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("linkedin_email", &self.linkedin_email)
            .field(
                "linkedin_password",
                &self.linkedin_password.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// A resolved LinkedIn login
#[derive(Clone)]
pub struct LinkedInCredentials {
    pub email: String,
    pub password: String,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub overleaf: OverleafConfig,
    pub linkedin: LinkedInConfig,
    pub summarizer: SummarizerConfig,
    pub browser: BrowserSettings,
    pub output: OutputConfig,
    pub credentials: CredentialsConfig,
}

impl Config {
    /// Load configuration from an explicit path, or from the default locations.
    ///
    /// Unlike an explicit path, a missing default file is not an error: the
    /// built-in defaults are used instead.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::read_file(path)?,
            None => match Self::find_config_file() {
                Some(path) => Self::read_file(&path)?,
                None => Config::default(),
            },
        };
        config.apply_env();
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(toml::from_str(&content)?)
    }

    fn apply_env(&mut self) {
        if let Ok(email) = std::env::var("LINKEDIN_EMAIL") {
            self.credentials.linkedin_email = Some(email);
        }
        if let Ok(password) = std::env::var("LINKEDIN_PASSWORD") {
            self.credentials.linkedin_password = Some(password);
        }
        if let Ok(host) = std::env::var("OLLAMA_HOST") {
            self.summarizer.host = normalize_ollama_host(&host);
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from(CONFIG_FILE_NAME);
        if local_config.exists() {
            return Some(local_config);
        }

        let home = dirs::home_dir()?;
        let home_config = home
            .join(".config")
            .join("resumelink")
            .join(CONFIG_FILE_NAME);
        home_config.exists().then_some(home_config)
    }

    /// Get the LinkedIn login, failing if either half is missing
    pub fn linkedin_credentials(&self) -> Result<LinkedInCredentials, ConfigError> {
        let email = self
            .credentials
            .linkedin_email
            .clone()
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ConfigError::MissingCredential("LINKEDIN_EMAIL".to_string()))?;
        let password = self
            .credentials
            .linkedin_password
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ConfigError::MissingCredential("LINKEDIN_PASSWORD".to_string()))?;
        Ok(LinkedInCredentials { email, password })
    }
}

impl SummarizerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl LinkedInConfig {
    pub fn linger(&self) -> Duration {
        Duration::from_secs(self.linger_secs)
    }
}

/// `OLLAMA_HOST` is commonly given as a bare `host:port`
fn normalize_ollama_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

impl Default for OverleafConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.overleaf.com".to_string(),
        }
    }
}

impl Default for LinkedInConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.linkedin.com".to_string(),
            linger_secs: 30,
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:11434".to_string(),
            model: "mistral".to_string(),
            timeout_secs: 120,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pdf_path: PathBuf::from("resume_from_overleaf.pdf"),
            json_path: PathBuf::from("resume_parsed.json"),
        }
    }
}
