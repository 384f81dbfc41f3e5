//! Conversion from parsed resume sections to the LinkedIn profile shape.

use crate::resume::{ExperienceEntry, LinkedInProfile, ParsedResume};
use crate::summarizer::Summarizer;
use lazy_static::lazy_static;
use regex::Regex;

/// LinkedIn's headline limit
pub const HEADLINE_MAX_CHARS: usize = 120;

const UNKNOWN: &str = "Unknown";

lazy_static! {
    /// "<title> at <company> (<duration>)"
    static ref EXPERIENCE_LINE: Regex = Regex::new(r"^(.*) at (.*) \((.*)\)").unwrap();
}

/// Build the profile record, running every experience line through `summarizer`
pub async fn to_linkedin_profile(
    parsed: &ParsedResume,
    summarizer: &dyn Summarizer,
) -> LinkedInProfile {
    let mut experience = Vec::with_capacity(parsed.experience.len());
    for line in &parsed.experience {
        let (title, company, duration) = split_experience_line(line);
        let description = summarizer.summarize(line).await;
        experience.push(ExperienceEntry {
            title,
            company,
            duration,
            description,
        });
    }

    LinkedInProfile {
        headline: headline(&parsed.summary),
        experience,
        education: parsed.education.clone(),
        skills: parsed.skills.clone(),
    }
}

/// Split an experience line into (title, company, duration).
///
/// Lines that don't look like "X at Y (Z)" keep the whole line as the title.
pub fn split_experience_line(line: &str) -> (String, String, String) {
    match EXPERIENCE_LINE.captures(line) {
        Some(caps) => (
            caps[1].trim().to_string(),
            caps[2].trim().to_string(),
            caps[3].trim().to_string(),
        ),
        None => (line.trim().to_string(), UNKNOWN.to_string(), UNKNOWN.to_string()),
    }
}

/// First 120 characters of the summary. Not word-aware.
pub fn headline(summary: &str) -> String {
    summary.chars().take(HEADLINE_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::NoopSummarizer;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the lines it sees and tags them
    #[derive(Default)]
    struct Recording {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Summarizer for Recording {
        async fn summarize(&self, text: &str) -> String {
            self.seen.lock().unwrap().push(text.to_string());
            format!("did: {}", text)
        }
    }

    #[test]
    fn matching_line_is_split_into_three_parts() {
        let (title, company, duration) =
            split_experience_line("Senior Engineer at Acme Corp (2019-2022)");
        assert_eq!(title, "Senior Engineer");
        assert_eq!(company, "Acme Corp");
        assert_eq!(duration, "2019-2022");
    }

    #[test]
    fn non_matching_line_falls_back_to_unknown() {
        let (title, company, duration) = split_experience_line("Freelance work");
        assert_eq!(title, "Freelance work");
        assert_eq!(company, "Unknown");
        assert_eq!(duration, "Unknown");
    }

    #[test]
    fn captured_groups_are_trimmed() {
        let (title, company, duration) = split_experience_line("Lead  at  Initech ( 2001 )");
        assert_eq!(title, "Lead");
        assert_eq!(company, "Initech");
        assert_eq!(duration, "2001");
    }

    #[test]
    fn greedy_title_takes_the_last_at() {
        let (title, company, _) = split_experience_line("Head of Look at Things at Org (2020)");
        assert_eq!(title, "Head of Look at Things");
        assert_eq!(company, "Org");
    }

    #[test]
    fn long_summary_is_cut_to_120_chars() {
        let summary = "a".repeat(200);
        assert_eq!(headline(&summary), "a".repeat(120));
    }

    #[test]
    fn short_summary_is_unchanged() {
        let summary = "b".repeat(120);
        assert_eq!(headline(&summary), summary);
        assert_eq!(headline("Built things."), "Built things.");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let summary = "é".repeat(130);
        let cut = headline(&summary);
        assert_eq!(cut.chars().count(), 120);
        assert_eq!(cut.len(), 240);
    }

    #[tokio::test]
    async fn summarizer_sees_the_original_line() {
        let parsed = ParsedResume {
            experience: vec![
                "Engineer at X (2020-2021)".to_string(),
                "Freelance work".to_string(),
            ],
            ..ParsedResume::default()
        };
        let recorder = Recording::default();

        let profile = to_linkedin_profile(&parsed, &recorder).await;

        assert_eq!(
            *recorder.seen.lock().unwrap(),
            vec!["Engineer at X (2020-2021)", "Freelance work"]
        );
        assert_eq!(profile.experience[0].description, "did: Engineer at X (2020-2021)");
        assert_eq!(profile.experience[1].title, "Freelance work");
        assert_eq!(profile.experience[1].company, "Unknown");
    }

    #[tokio::test]
    async fn education_and_skills_pass_through() {
        let parsed = ParsedResume {
            summary: "s".repeat(150),
            education: vec!["BSc".to_string()],
            skills: vec!["Python".to_string(), " Go".to_string()],
            projects: vec!["ignored".to_string()],
            ..ParsedResume::default()
        };

        let profile = to_linkedin_profile(&parsed, &NoopSummarizer).await;

        assert_eq!(profile.headline.len(), 120);
        assert_eq!(profile.education, vec!["BSc"]);
        assert_eq!(profile.skills, vec!["Python", " Go"]);
        assert!(profile.experience.is_empty());
    }
}
