//! Heading-based resume section splitter.
//!
//! A new section starts on any line that begins with a capitalized word followed
//! directly by a colon (`Experience:`, `Skills:`). Everything up to the next such
//! line belongs to that section.

use crate::resume::ParsedResume;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEADING_BREAK: Regex = Regex::new(r"\n[A-Z][a-z]+:").unwrap();
    static ref SKILL_SEPARATOR: Regex = Regex::new(r"[,\n]").unwrap();
}

/// Split raw resume text into labeled sections
pub fn parse_resume(text: &str) -> ParsedResume {
    let mut parsed = ParsedResume::default();

    for section in split_sections(text) {
        let (header, body) = match section.split_once(':') {
            Some((header, body)) => (header.to_lowercase(), body.trim()),
            None => (section.to_lowercase(), ""),
        };

        if header.contains("summary") || header.contains("about") {
            parsed.summary = body.to_string();
        } else if header.contains("experience") {
            parsed.experience = non_empty_lines(body);
        } else if header.contains("education") {
            parsed.education = non_empty_lines(body);
        } else if header.contains("skills") {
            parsed.skills = SKILL_SEPARATOR.split(body).map(str::to_string).collect();
        } else if header.contains("project") {
            parsed.projects = non_empty_lines(body);
        }
    }

    parsed
}

/// Cut the text before each heading line. The newline preceding a heading is
/// dropped; the heading itself opens the next section.
fn split_sections(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut start = 0;
    for heading in HEADING_BREAK.find_iter(text) {
        sections.push(&text[start..heading.start()]);
        start = heading.start() + 1;
    }
    sections.push(&text[start..]);
    sections
}

fn non_empty_lines(body: &str) -> Vec<String> {
    body.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
