//! Browser session plumbing shared by the Overleaf and LinkedIn flows.
//!
//! Uses chromiumoxide over the Chrome DevTools Protocol. A [`BrowserSession`]
//! owns the Chromium process and its event handler task; dropping it kills the
//! process, so a failed flow never leaves a browser behind.

use crate::config::BrowserSettings;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::{
    DownloadProgressState, EventDownloadProgress, SetDownloadBehaviorBehavior,
    SetDownloadBehaviorParams,
};
use chromiumoxide::cdp::browser_protocol::input::{DispatchKeyEventParams, DispatchKeyEventType};
use chromiumoxide::error::CdpError;
use chromiumoxide::listeners::EventStream;
use chromiumoxide::{Element, Page};
use dialoguer::Input;
use futures::StreamExt;
use rand::Rng;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How often element lookups are retried while waiting
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// CDP modifier bit for Control
const MODIFIER_CTRL: i64 = 2;

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("invalid browser configuration: {0}")]
    Config(String),
    #[error("browser protocol error: {0}")]
    Cdp(#[from] CdpError),
    #[error("failed to build protocol command: {0}")]
    Command(String),
    #[error("timed out after {secs}s waiting for {what}")]
    Timeout { what: String, secs: u64 },
    #[error("download was canceled by the browser")]
    DownloadCanceled,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("manual step needs an interactive terminal")]
    NoTerminal,
    #[error("manual step failed: {0}")]
    Gate(String),
}

/// A launched Chromium plus the task pumping its protocol events.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch a browser, visible unless `settings.headless` is set
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, BrowserError> {
        let mut builder = BrowserConfig::builder().window_size(1280, 900);
        if !settings.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &settings.chrome_executable {
            builder = builder.chrome_executable(executable);
        }
        let config = builder.build().map_err(BrowserError::Config)?;

        let (browser, mut events) = Browser::launch(config).await?;
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "browser handler event error");
                }
            }
        });

        debug!(headless = settings.headless, "browser launched");
        Ok(Self { browser, handler })
    }

    /// Open a new tab at `url`
    pub async fn open(&self, url: &str) -> Result<Page, BrowserError> {
        Ok(self.browser.new_page(url).await?)
    }

    /// Route downloads into a scratch directory and start listening for them.
    ///
    /// Call before the action that triggers the download.
    pub async fn expect_download(&self) -> Result<PendingDownload, BrowserError> {
        let dir = tempfile::tempdir()?;
        let events = self
            .browser
            .event_listener::<EventDownloadProgress>()
            .await?;

        let params = SetDownloadBehaviorParams::builder()
            .behavior(SetDownloadBehaviorBehavior::AllowAndName)
            .download_path(dir.path().to_string_lossy())
            .events_enabled(true)
            .build()
            .map_err(BrowserError::Command)?;
        self.browser.execute(params).await?;

        Ok(PendingDownload { dir, events })
    }

    /// Shut the browser down. Errors are logged, never returned.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "failed to close browser cleanly");
        }
        if let Err(e) = self.browser.wait().await {
            debug!(error = %e, "failed to reap browser process");
        }
        self.handler.abort();
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

/// A download the browser has been told to expect.
pub struct PendingDownload {
    dir: TempDir,
    events: EventStream<EventDownloadProgress>,
}

impl PendingDownload {
    /// Wait for the download to finish and copy it to `output`
    pub async fn save_as(mut self, output: &Path, timeout: Duration) -> Result<(), BrowserError> {
        let finished = async {
            while let Some(progress) = self.events.next().await {
                match progress.state {
                    DownloadProgressState::Completed => return Ok(progress.guid.clone()),
                    DownloadProgressState::Canceled => return Err(BrowserError::DownloadCanceled),
                    _ => {}
                }
            }
            Err(BrowserError::DownloadCanceled)
        };

        let guid = tokio::time::timeout(timeout, finished)
            .await
            .map_err(|_| BrowserError::Timeout {
                what: "download".to_string(),
                secs: timeout.as_secs(),
            })??;

        // AllowAndName stores the file under its download guid
        tokio::fs::copy(self.dir.path().join(&guid), output).await?;
        debug!(output = %output.display(), "download saved");
        Ok(())
    }
}

/// Random duration between `min_ms` and `max_ms`
pub fn jitter(min_ms: u64, max_ms: u64) -> Duration {
    let ms = if min_ms >= max_ms {
        min_ms
    } else {
        rand::rng().random_range(min_ms..=max_ms)
    };
    Duration::from_millis(ms)
}

/// Sleep for a human-looking random interval
pub async fn pace(min_ms: u64, max_ms: u64) {
    tokio::time::sleep(jitter(min_ms, max_ms)).await;
}

async fn poll_until<T, F, Fut>(what: String, timeout: Duration, mut probe: F) -> Result<T, BrowserError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let search = async {
        loop {
            if let Some(found) = probe().await {
                return found;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    };

    tokio::time::timeout(timeout, search)
        .await
        .map_err(|_| BrowserError::Timeout {
            what,
            secs: timeout.as_secs(),
        })
}

/// Wait until `selector` matches an element
pub async fn wait_for_element(
    page: &Page,
    selector: &str,
    timeout: Duration,
) -> Result<Element, BrowserError> {
    poll_until(format!("element '{}'", selector), timeout, || async move {
        page.find_element(selector).await.ok()
    })
    .await
}

/// How an element's inner text is compared against the wanted label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch {
    /// Label appears anywhere in the text
    Contains,
    /// Whole text, trimmed, equals the label
    Exact,
}

impl TextMatch {
    pub fn matches(self, inner: &str, label: &str) -> bool {
        match self {
            TextMatch::Contains => inner.contains(label),
            TextMatch::Exact => inner.trim() == label,
        }
    }
}

/// Wait until an element matching `selector` carries `text` in its inner text
pub async fn wait_for_text(
    page: &Page,
    selector: &str,
    text: &str,
    rule: TextMatch,
    timeout: Duration,
) -> Result<Element, BrowserError> {
    poll_until(
        format!("'{}' inside '{}'", text, selector),
        timeout,
        || async move {
            let elements = page.find_elements(selector).await.ok()?;
            for element in elements {
                if let Ok(Some(inner)) = element.inner_text().await {
                    if rule.matches(&inner, text) {
                        return Some(element);
                    }
                }
            }
            None
        },
    )
    .await
}

/// Replace the value of an input with `value`, typed key by key
pub async fn fill(
    page: &Page,
    selector: &str,
    value: &str,
    timeout: Duration,
) -> Result<(), BrowserError> {
    let element = wait_for_element(page, selector, timeout).await?;
    element
        .call_js_fn("function() { this.value = ''; }", false)
        .await?;
    element.click().await?.type_str(value).await?;
    Ok(())
}

fn key_event(
    kind: DispatchKeyEventType,
    key: &str,
    code: &str,
    key_code: i64,
    modifiers: i64,
) -> Result<DispatchKeyEventParams, BrowserError> {
    DispatchKeyEventParams::builder()
        .r#type(kind)
        .key(key)
        .code(code)
        .windows_virtual_key_code(key_code)
        .native_virtual_key_code(key_code)
        .modifiers(modifiers)
        .build()
        .map_err(BrowserError::Command)
}

/// Hold Control, wait `hold`, tap Enter, release Control
pub async fn press_ctrl_enter(page: &Page, hold: Duration) -> Result<(), BrowserError> {
    page.execute(key_event(
        DispatchKeyEventType::RawKeyDown,
        "Control",
        "ControlLeft",
        17,
        MODIFIER_CTRL,
    )?)
    .await?;
    tokio::time::sleep(hold).await;
    page.execute(key_event(
        DispatchKeyEventType::RawKeyDown,
        "Enter",
        "Enter",
        13,
        MODIFIER_CTRL,
    )?)
    .await?;
    page.execute(key_event(
        DispatchKeyEventType::KeyUp,
        "Enter",
        "Enter",
        13,
        MODIFIER_CTRL,
    )?)
    .await?;
    page.execute(key_event(
        DispatchKeyEventType::KeyUp,
        "Control",
        "ControlLeft",
        17,
        0,
    )?)
    .await?;
    Ok(())
}

/// Block until the operator presses ENTER. No timeout.
pub async fn manual_gate(prompt: &str) -> Result<(), BrowserError> {
    if !atty::is(atty::Stream::Stdin) {
        return Err(BrowserError::NoTerminal);
    }

    let prompt = prompt.to_string();
    tokio::task::spawn_blocking(move || {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
    })
    .await
    .map_err(|e| BrowserError::Gate(e.to_string()))?
    .map_err(|e| BrowserError::Gate(e.to_string()))?;
    Ok(())
}
