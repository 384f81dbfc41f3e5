/// PDF extraction against generated documents
///
/// These tests verify page order and the PDF → profile path
mod common;

use common::text_pdf;
use resumelink::extractor::extract_text;
use resumelink::{NoopSummarizer, ResumeProcessor};

const PAGE_ONE: &str = "Summary: Built things.";
const PAGE_TWO: &str = "Experience: Engineer at X (2020-2021)";

fn write_pdf(dir: &tempfile::TempDir, name: &str, pages: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text_pdf(pages)).expect("Failed to write PDF");
    path
}

#[tokio::test]
async fn test_pages_are_joined_in_physical_order() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_pdf(&dir, "two_pages.pdf", &[PAGE_ONE, PAGE_TWO]);

    let text = extract_text(&path).await.unwrap();

    let first = text.find(PAGE_ONE).expect("page one text missing");
    let second = text.find(PAGE_TWO).expect("page two text missing");
    assert!(first < second, "pages out of order: {:?}", text);
    assert!(
        text[first + PAGE_ONE.len()..second].contains('\n'),
        "pages not separated by a newline: {:?}",
        text
    );
}

#[tokio::test]
async fn test_page_order_follows_the_document_not_the_content() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_pdf(&dir, "reversed.pdf", &[PAGE_TWO, PAGE_ONE]);

    let text = extract_text(&path).await.unwrap();

    assert!(text.find(PAGE_TWO).unwrap() < text.find(PAGE_ONE).unwrap());
}

#[tokio::test]
async fn test_pdf_to_profile() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_pdf(&dir, "resume.pdf", &[PAGE_ONE, PAGE_TWO]);

    let profile = ResumeProcessor::new(Box::new(NoopSummarizer))
        .process(&path)
        .await
        .unwrap();

    assert_eq!(profile.headline, "Built things.");
    assert_eq!(profile.experience.len(), 1);
    assert_eq!(profile.experience[0].title, "Engineer");
    assert_eq!(profile.experience[0].company, "X");
    assert_eq!(profile.experience[0].duration, "2020-2021");
    assert_eq!(profile.experience[0].description, "");
}
