//! Resume records - the values passed from one pipeline stage to the next.

use serde::{Deserialize, Serialize};

/// Sections pulled out of the raw resume text.
///
/// Every field stays empty when no matching heading is found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResume {
    /// Body of the summary/about section, verbatim
    pub summary: String,
    /// One entry per non-empty experience line
    pub experience: Vec<String>,
    pub education: Vec<String>,
    /// Raw comma/newline split, whitespace preserved
    pub skills: Vec<String>,
    pub projects: Vec<String>,
}

impl ParsedResume {
    /// Check if any section was recognized
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
            && self.experience.is_empty()
            && self.education.is_empty()
            && self.skills.is_empty()
            && self.projects.is_empty()
    }
}

/// A single position in LinkedIn's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    /// Summarizer output, empty when summarizing is off
    pub description: String,
}

/// The profile record persisted to `resume_parsed.json` and handed to the uploader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedInProfile {
    /// At most 120 characters
    pub headline: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<String>,
    pub skills: Vec<String>,
}
