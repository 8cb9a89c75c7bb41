//! The slice of browser automation the collector and extractor rely on.
//!
//! Everything above this module talks to a [`BrowserPage`]; element queries
//! and text reads happen on HTML snapshots parsed with `scraper`, so the only
//! live-page operations are navigation, clicking, and waiting.

pub mod chromium;

use std::fmt;
use std::future::Future;
use std::time::Duration;

use scraper::{Html, Selector};

use crate::error::ScraperError;

/// One tab of a browser, reused sequentially for every page load.
pub trait BrowserPage {
    /// Navigates to `url` and resolves once the document has loaded.
    fn goto(&mut self, url: &str) -> impl Future<Output = Result<(), ScraperError>>;

    /// Serializes the current DOM, including client-rendered content.
    fn html(&mut self) -> impl Future<Output = Result<String, ScraperError>>;

    /// Clicks the first element matching `control`.
    ///
    /// Resolves to `Ok(false)` when nothing on the page matches; an `Err`
    /// means a matching element was found but the click itself failed.
    fn click(
        &mut self,
        control: &PaginationControl,
    ) -> impl Future<Output = Result<bool, ScraperError>>;

    /// Waits for a fixed duration.
    fn pause(&mut self, duration: Duration) -> impl Future<Output = ()>;
}

/// A "load more" or "next page" control on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationControl {
    /// A `<button>` whose text contains this phrase, ignoring case.
    ButtonText(String),
    /// Any element matching a CSS selector.
    Css(String),
}

impl PaginationControl {
    /// Whether the button text satisfies this control. Always `false` for
    /// [`PaginationControl::Css`].
    #[must_use]
    pub fn matches_button_text(&self, text: &str) -> bool {
        match self {
            PaginationControl::ButtonText(phrase) => collapse_whitespace(text)
                .to_lowercase()
                .contains(&phrase.to_lowercase()),
            PaginationControl::Css(_) => false,
        }
    }

    /// Whether `document` contains an element this control would click.
    ///
    /// An unparsable CSS selector never matches.
    #[must_use]
    pub fn is_present_in(&self, document: &Html) -> bool {
        match self {
            PaginationControl::ButtonText(_) => {
                let Ok(buttons) = Selector::parse("button") else {
                    return false;
                };
                document
                    .select(&buttons)
                    .any(|el| self.matches_button_text(&el.text().collect::<String>()))
            }
            PaginationControl::Css(css) => {
                Selector::parse(css).is_ok_and(|sel| document.select(&sel).next().is_some())
            }
        }
    }
}

impl fmt::Display for PaginationControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaginationControl::ButtonText(text) => write!(f, "button \"{text}\""),
            PaginationControl::Css(css) => write!(f, "{css}"),
        }
    }
}

/// Controls tried, in order, during interactive pagination.
#[must_use]
pub fn default_controls() -> Vec<PaginationControl> {
    vec![
        PaginationControl::ButtonText("Load More".to_string()),
        PaginationControl::ButtonText("Show More".to_string()),
        PaginationControl::Css(".pagination a[rel='next']".to_string()),
        PaginationControl::Css("a[aria-label='Next']".to_string()),
    ]
}

/// Collapses runs of whitespace to single spaces and trims the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
