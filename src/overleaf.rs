//! Overleaf: log in by hand, compile the project, save the PDF.

use crate::browser::{self, BrowserError, BrowserSession, TextMatch};
use crate::config::{BrowserSettings, OverleafConfig};
use colored::Colorize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// PDF preview panel and its download control
const PDF_PANEL_SPANS: &str = "#panel-pdf span";
const DOWNLOAD_LABEL: &str = "Download";

const DOWNLOAD_BUTTON_TIMEOUT: Duration = Duration::from_secs(10);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Drives a headed browser through an Overleaf compile and download.
pub struct OverleafDownloader {
    site: OverleafConfig,
    browser: BrowserSettings,
}

impl OverleafDownloader {
    pub fn new(site: OverleafConfig, browser: BrowserSettings) -> Self {
        Self { site, browser }
    }

    /// Download the compiled PDF of `project_url` to `output`
    pub async fn download_pdf(&self, project_url: &str, output: &Path) -> Result<(), BrowserError> {
        let session = BrowserSession::launch(&self.browser).await?;
        let outcome = self.run(&session, project_url, output).await;
        session.close().await;
        outcome
    }

    async fn run(
        &self,
        session: &BrowserSession,
        project_url: &str,
        output: &Path,
    ) -> Result<(), BrowserError> {
        println!("[*] Opening Overleaf login page...");
        let page = session.open(&format!("{}/login", self.site.base_url)).await?;
        browser::pace(1000, 1500).await;

        println!("[*] Please log in manually (e.g., Google SSO)...");
        browser::manual_gate("🔒 Press ENTER once you're logged in and the project is fully loaded")
            .await?;

        let project_url = normalize_project_url(&self.site.base_url, project_url);
        println!("[*] Navigating to Overleaf project page...");
        info!(url = %project_url, "opening project");
        page.goto(project_url.as_str()).await?;
        browser::pace(2000, 3000).await;

        println!("[*] Triggering compile via Ctrl+Enter...");
        browser::press_ctrl_enter(&page, browser::jitter(200, 400)).await?;
        println!("[*] Waiting for Overleaf to generate PDF...");
        browser::pace(3000, 5000).await;

        let download = session.expect_download().await?;

        println!("[*] Clicking 'Download PDF' button...");
        browser::wait_for_text(
            &page,
            PDF_PANEL_SPANS,
            DOWNLOAD_LABEL,
            TextMatch::Contains,
            DOWNLOAD_BUTTON_TIMEOUT,
        )
        .await?
        .click()
        .await?;
        browser::pace(1000, 2000).await;

        println!("[*] Waiting for download...");
        download.save_as(output, DOWNLOAD_TIMEOUT).await?;

        println!(
            "{} PDF downloaded to {}",
            "✅".green(),
            output.display().to_string().bold()
        );
        Ok(())
    }
}

/// Rewrite any URL containing `/project/` to `{base}/project/{id}`, where the id
/// is the last path segment. Other URLs are used as given.
pub fn normalize_project_url(base_url: &str, project_url: &str) -> String {
    if !project_url.contains("/project/") {
        return project_url.to_string();
    }
    let project_id = project_url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    format!("{}/project/{}", base_url.trim_end_matches('/'), project_id)
}
