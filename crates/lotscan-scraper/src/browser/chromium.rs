//! [`BrowserPage`] backed by a headless Chromium over CDP (`chromiumoxide`).

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;

use super::{BrowserPage, PaginationControl};
use crate::error::ScraperError;

/// How to start the browser.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub headless: bool,
    pub chrome_executable: Option<PathBuf>,
    pub user_agent: String,
    /// Per-request CDP timeout; navigation fails once it elapses.
    pub nav_timeout: Duration,
}

impl LaunchOptions {
    #[must_use]
    pub fn from_config(config: &lotscan_core::AppConfig) -> Self {
        Self {
            headless: config.headless,
            chrome_executable: config.chrome_executable.clone(),
            user_agent: config.user_agent.clone(),
            nav_timeout: Duration::from_secs(config.nav_timeout_secs),
        }
    }

    fn user_agent_override(&self) -> SetUserAgentOverrideParams {
        SetUserAgentOverrideParams::new(self.user_agent.clone())
    }
}

/// A single Chromium tab plus the browser process that owns it.
pub struct ChromiumPage {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl ChromiumPage {
    /// Launches Chromium, opens one blank tab, and applies the user agent.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] if the browser cannot be found or
    /// started, or the tab cannot be created.
    pub async fn launch(options: &LaunchOptions) -> Result<Self, ScraperError> {
        let mut builder = BrowserConfig::builder().request_timeout(options.nav_timeout);
        if !options.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &options.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(ScraperError::Browser)?;

        let (browser, mut handler) = Browser::launch(config).await?;

        // The CDP connection only makes progress while its handler is polled.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "chromium handler event error");
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        page.set_user_agent(options.user_agent_override()).await?;

        tracing::info!(headless = options.headless, "chromium launched");
        Ok(Self {
            browser,
            page,
            handler_task,
        })
    }

    /// Closes the browser and stops the handler task.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Browser`] if the close command fails.
    pub async fn close(mut self) -> Result<(), ScraperError> {
        let result = self.browser.close().await;
        self.handler_task.abort();
        result?;
        Ok(())
    }

    async fn find_control(
        &self,
        control: &PaginationControl,
    ) -> Result<Option<Element>, ScraperError> {
        let click_error = |e: chromiumoxide::error::CdpError| ScraperError::Click {
            control: control.to_string(),
            reason: e.to_string(),
        };

        match control {
            PaginationControl::Css(css) => {
                let found = self.page.find_elements(css.as_str()).await.map_err(click_error)?;
                Ok(found.into_iter().next())
            }
            PaginationControl::ButtonText(_) => {
                let buttons = self.page.find_elements("button").await.map_err(click_error)?;
                for button in buttons {
                    let text = button.inner_text().await.map_err(click_error)?;
                    if text.is_some_and(|t| control.matches_button_text(&t)) {
                        return Ok(Some(button));
                    }
                }
                Ok(None)
            }
        }
    }
}

impl BrowserPage for ChromiumPage {
    async fn goto(&mut self, url: &str) -> Result<(), ScraperError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| ScraperError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn html(&mut self) -> Result<String, ScraperError> {
        match self.page.content().await {
            Ok(html) => Ok(html),
            Err(e) => {
                let url = self.page.url().await.ok().flatten().unwrap_or_default();
                Err(ScraperError::Snapshot {
                    url,
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn click(&mut self, control: &PaginationControl) -> Result<bool, ScraperError> {
        let Some(element) = self.find_control(control).await? else {
            return Ok(false);
        };
        element.click().await.map_err(|e| ScraperError::Click {
            control: control.to_string(),
            reason: e.to_string(),
        })?;
        Ok(true)
    }

    async fn pause(&mut self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
