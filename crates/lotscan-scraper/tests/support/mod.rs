//! In-memory [`BrowserPage`] serving canned HTML.
//!
//! Each registered URL holds a sequence of DOM states. Navigation shows the
//! first state; a successful click on a present pagination control advances
//! to the next one, the way "Load More" appends rows to a live listing.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use lotscan_scraper::{BrowserPage, PaginationControl, ScraperError};
use scraper::Html;

#[derive(Debug, Default)]
pub struct FixturePage {
    pages: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    current: Option<(String, usize)>,
    /// Every URL passed to `goto`, in order, including failed ones.
    pub visits: Vec<String>,
    pub clicks: Vec<PaginationControl>,
    pub pauses: Vec<Duration>,
}

impl FixturePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `html` at `url`.
    pub fn with_page(self, url: &str, html: impl Into<String>) -> Self {
        self.with_states(url, vec![html.into()])
    }

    /// Serves `states[0]` at `url`, advancing one state per click.
    pub fn with_states(mut self, url: &str, states: Vec<String>) -> Self {
        self.pages.insert(url.to_string(), states);
        self
    }

    /// Makes navigation to `url` fail.
    pub fn with_failure(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    fn current_html(&self) -> Option<&str> {
        let (url, state) = self.current.as_ref()?;
        self.pages.get(url)?.get(*state).map(String::as_str)
    }
}

impl BrowserPage for FixturePage {
    async fn goto(&mut self, url: &str) -> Result<(), ScraperError> {
        self.visits.push(url.to_string());
        if self.failing.contains(url) || !self.pages.contains_key(url) {
            self.current = None;
            return Err(ScraperError::Navigation {
                url: url.to_string(),
                reason: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            });
        }
        self.current = Some((url.to_string(), 0));
        Ok(())
    }

    async fn html(&mut self) -> Result<String, ScraperError> {
        self.current_html()
            .map(str::to_string)
            .ok_or_else(|| ScraperError::Snapshot {
                url: "about:blank".to_string(),
                reason: "no document loaded".to_string(),
            })
    }

    async fn click(&mut self, control: &PaginationControl) -> Result<bool, ScraperError> {
        let Some(html) = self.current_html() else {
            return Ok(false);
        };
        if !control.is_present_in(&Html::parse_document(html)) {
            return Ok(false);
        }
        self.clicks.push(control.clone());

        let Some((url, state)) = self.current.as_mut() else {
            return Ok(false);
        };
        let has_next = self.pages.get(url.as_str()).is_some_and(|s| *state + 1 < s.len());
        if !has_next {
            return Err(ScraperError::Click {
                control: control.to_string(),
                reason: "element is detached from the document".to_string(),
            });
        }
        *state += 1;
        Ok(true)
    }

    async fn pause(&mut self, duration: Duration) {
        self.pauses.push(duration);
    }
}

/// A listing page body linking to each of `hrefs`, with an optional
/// "Load More" button.
pub fn listing_html(hrefs: &[&str], load_more: bool) -> String {
    let cards: String = hrefs
        .iter()
        .map(|href| format!(r#"<div class="vehicle-card"><a href="{href}">View details</a></div>"#))
        .collect();
    let button = if load_more {
        r#"<button class="btn">Load More</button>"#
    } else {
        ""
    };
    format!("<html><body><div class=\"srp\">{cards}</div>{button}</body></html>")
}
