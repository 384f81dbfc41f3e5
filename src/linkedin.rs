//! LinkedIn: log in, open the profile editor, show or apply the profile.

use crate::browser::{self, BrowserError, BrowserSession, TextMatch};
use crate::config::{BrowserSettings, LinkedInConfig, LinkedInCredentials};
use crate::resume::{ExperienceEntry, LinkedInProfile};
use chromiumoxide::Page;
use colored::Colorize;
use std::time::Duration;
use tracing::{info, warn};

const USERNAME_INPUT: &str = "input#username";
const PASSWORD_INPUT: &str = "input#password";
const SUBMIT_BUTTON: &str = "button[type='submit']";

const INTRO_EDIT_PATH: &str = "/in/me/edit/intro/";
const NEW_POSITION_PATH: &str = "/in/me/edit/forms/position/new/";

// Profile edit forms
const HEADLINE_INPUT: &str = "[id$='-headline']";
const POSITION_TITLE_INPUT: &str = "input[id$='-title']";
const POSITION_COMPANY_INPUT: &str = "input[id$='-requiredCompany']";
const POSITION_DESCRIPTION_INPUT: &str = "textarea[id$='-description']";
const FORM_BUTTONS: &str = ".artdeco-modal__actionbar button, footer button";
const SAVE_LABEL: &str = "Save";
const SAVE_MATCH: TextMatch = TextMatch::Exact;

const SETTLE: Duration = Duration::from_secs(5);
const FIELD_TIMEOUT: Duration = Duration::from_secs(10);

/// What the uploader does once it reaches the profile editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadMode {
    /// Print what would be written and touch nothing
    #[default]
    DryRun,
    /// Write headline and positions into the edit forms
    Apply,
}

pub struct LinkedInUploader {
    site: LinkedInConfig,
    browser: BrowserSettings,
    credentials: LinkedInCredentials,
    mode: UploadMode,
}

impl LinkedInUploader {
    pub fn new(
        site: LinkedInConfig,
        browser: BrowserSettings,
        credentials: LinkedInCredentials,
        mode: UploadMode,
    ) -> Self {
        Self {
            site,
            browser,
            credentials,
            mode,
        }
    }

    /// Log in and carry `profile` over to the profile editor
    pub async fn fill_profile(&self, profile: &LinkedInProfile) -> Result<(), BrowserError> {
        let session = BrowserSession::launch(&self.browser).await?;
        let outcome = self.run(&session, profile).await;
        session.close().await;
        outcome
    }

    async fn run(&self, session: &BrowserSession, profile: &LinkedInProfile) -> Result<(), BrowserError> {
        println!("[*] Logging into LinkedIn...");
        let page = session.open(&self.url("/login")).await?;
        browser::pace(1000, 1500).await;
        browser::fill(&page, USERNAME_INPUT, &self.credentials.email, FIELD_TIMEOUT).await?;
        browser::pace(200, 500).await;
        browser::fill(&page, PASSWORD_INPUT, &self.credentials.password, FIELD_TIMEOUT).await?;
        browser::pace(200, 500).await;
        page.find_element(SUBMIT_BUTTON).await?.click().await?;
        tokio::time::sleep(SETTLE).await;

        if captcha_detected(&page.content().await?) {
            println!("{} CAPTCHA detected. Please solve it manually.", "⚠️".yellow());
            browser::manual_gate("🔒 Press ENTER when done").await?;
        }

        println!("[*] Navigating to profile...");
        page.goto(self.url(INTRO_EDIT_PATH)).await?;
        tokio::time::sleep(SETTLE).await;

        if self.mode == UploadMode::Apply {
            self.apply_headline(&page, &profile.headline).await?;
        }

        for entry in &profile.experience {
            println!("{}", experience_line(entry));
            if self.mode == UploadMode::Apply {
                self.apply_position(&page, entry).await?;
            }
        }

        if self.mode == UploadMode::DryRun {
            println!("{}", "Dry run: profile fields were not modified (use --apply).".dimmed());
        }

        info!(secs = self.site.linger_secs, "holding session open for inspection");
        tokio::time::sleep(self.site.linger()).await;
        Ok(())
    }

    async fn apply_headline(&self, page: &Page, headline: &str) -> Result<(), BrowserError> {
        if headline.is_empty() {
            warn!("empty headline, leaving intro form untouched");
            return Ok(());
        }
        browser::fill(page, HEADLINE_INPUT, headline, FIELD_TIMEOUT).await?;
        browser::pace(200, 500).await;
        self.save_form(page).await?;
        println!("{} Headline updated", "✅".green());
        Ok(())
    }

    async fn apply_position(&self, page: &Page, entry: &ExperienceEntry) -> Result<(), BrowserError> {
        page.goto(self.url(NEW_POSITION_PATH)).await?;
        browser::pace(2000, 3000).await;

        browser::fill(page, POSITION_TITLE_INPUT, &entry.title, FIELD_TIMEOUT).await?;
        browser::pace(200, 500).await;
        browser::fill(page, POSITION_COMPANY_INPUT, &entry.company, FIELD_TIMEOUT).await?;
        browser::pace(200, 500).await;
        if !entry.description.is_empty() {
            browser::fill(page, POSITION_DESCRIPTION_INPUT, &entry.description, FIELD_TIMEOUT)
                .await?;
            browser::pace(200, 500).await;
        }
        self.save_form(page).await?;
        Ok(())
    }

    async fn save_form(&self, page: &Page) -> Result<(), BrowserError> {
        browser::wait_for_text(page, FORM_BUTTONS, SAVE_LABEL, SAVE_MATCH, FIELD_TIMEOUT)
            .await?
            .click()
            .await?;
        tokio::time::sleep(SETTLE).await;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.site.base_url.trim_end_matches('/'), path)
    }
}

/// LinkedIn puts a challenge page in front of suspicious logins
pub fn captcha_detected(html: &str) -> bool {
    html.to_lowercase().contains("captcha")
}

/// Console line shown for each position
pub fn experience_line(entry: &ExperienceEntry) -> String {
    format!("• {} @ {} ({})", entry.title, entry.company, entry.duration)
}
