//! # resumelink
//!
//! Carries a LaTeX resume from Overleaf to LinkedIn.
//!
//! ## Features
//!
//! - **Download**: compiles an Overleaf project in a headed browser and saves the PDF
//! - **Parse**: splits the PDF text into summary, experience, education, skills and projects
//! - **Summarize**: optionally rewrites experience lines through a local Ollama model
//! - **Upload**: logs into LinkedIn and shows (or, with `--apply`, writes) the profile

pub mod browser;
pub mod config;
pub mod extractor;
pub mod formatter;
pub mod linkedin;
pub mod overleaf;
pub mod parser;
pub mod pipeline;
pub mod resume;
pub mod summarizer;

pub use config::Config;
pub use linkedin::{LinkedInUploader, UploadMode};
pub use overleaf::OverleafDownloader;
pub use pipeline::ResumeProcessor;
pub use resume::{ExperienceEntry, LinkedInProfile, ParsedResume};
pub use summarizer::{NoopSummarizer, OllamaSummarizer, Summarizer};
