//! Listing traversal: gathers detail URLs across every page of a listing.
//!
//! Collection runs in three steps over one shared [`BrowserPage`]:
//!
//! 1. load the start URL and scan it;
//! 2. click "load more" / "next" controls until none remain (phase A);
//! 3. for inventory listings, request `?page=N` until a page adds nothing
//!    new (phase B).
//!
//! Each step takes the [`LinkSet`] built so far and hands it back extended.
//! Failures after the first page load end the current phase; they never
//! discard links already found.

use std::collections::BTreeSet;

use lotscan_core::Pacing;
use url::Url;

use crate::browser::{default_controls, BrowserPage, PaginationControl};
use crate::error::ScraperError;
use crate::links::detail_links_in;
use crate::pagination::{has_inventory_segment, paged_url, FIRST_FALLBACK_PAGE};

/// Detail URLs accumulated across pagination steps, kept sorted and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: BTreeSet<String>,
}

impl LinkSet {
    /// Adds every detail link in `html`, returning how many were new.
    pub fn absorb(&mut self, html: &str, base: &Url) -> usize {
        detail_links_in(html, base)
            .into_iter()
            .map(|link| self.links.insert(link))
            .filter(|inserted| *inserted)
            .count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeSet<String> {
        self.links
    }
}

pub struct LinkCollector {
    base: Url,
    controls: Vec<PaginationControl>,
    pacing: Pacing,
}

impl LinkCollector {
    /// Creates a collector resolving relative links against `base`, using
    /// the default pagination controls.
    #[must_use]
    pub fn new(base: Url, pacing: Pacing) -> Self {
        Self {
            base,
            controls: default_controls(),
            pacing,
        }
    }

    /// Replaces the pagination controls tried during phase A.
    #[must_use]
    pub fn with_controls(mut self, controls: Vec<PaginationControl>) -> Self {
        self.controls = controls;
        self
    }

    /// Collects every detail URL reachable from `start_url`.
    ///
    /// # Errors
    ///
    /// Returns the navigation or snapshot error of the first page load.
    /// Errors on later pages end pagination and are only logged.
    pub async fn collect<P: BrowserPage>(
        &self,
        page: &mut P,
        start_url: &str,
    ) -> Result<BTreeSet<String>, ScraperError> {
        page.goto(start_url).await?;
        page.pause(self.pacing.listing_settle).await;
        let html = page.html().await?;

        let mut links = LinkSet::default();
        let found = links.absorb(&html, &self.base);
        tracing::debug!(url = %start_url, found, "scanned listing start page");

        let links = self.click_through(page, links).await;
        let links = if has_inventory_segment(start_url) {
            self.page_through(page, start_url, links).await
        } else {
            links
        };

        tracing::info!(url = %start_url, links = links.len(), "listing collected");
        Ok(links.into_inner())
    }

    /// Phase A: click pagination controls until none is present or a click
    /// fails.
    async fn click_through<P: BrowserPage>(&self, page: &mut P, mut links: LinkSet) -> LinkSet {
        for step in 0..self.pacing.max_pages {
            let Some(control) = self.click_first_control(page).await else {
                break;
            };
            page.pause(self.pacing.click_settle).await;

            let html = match page.html().await {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!(error = %e, "listing snapshot failed after click");
                    break;
                }
            };
            let added = links.absorb(&html, &self.base);
            tracing::debug!(step, control = %control, added, total = links.len(), "clicked pagination control");
        }
        links
    }

    /// Clicks the first control present on the page.
    ///
    /// Returns `None` when no control is present or the click failed; both
    /// mean the listing has no further interactive pages.
    async fn click_first_control<P: BrowserPage>(
        &self,
        page: &mut P,
    ) -> Option<&PaginationControl> {
        for control in &self.controls {
            match page.click(control).await {
                Ok(true) => return Some(control),
                Ok(false) => {}
                Err(e) => {
                    tracing::debug!(control = %control, error = %e, "pagination click failed; ending phase");
                    return None;
                }
            }
        }
        None
    }

    /// Phase B: request `page=N` for N = 2, 3, ... until a page contributes
    /// no new links or fails to load.
    async fn page_through<P: BrowserPage>(
        &self,
        page: &mut P,
        start_url: &str,
        mut links: LinkSet,
    ) -> LinkSet {
        for page_num in (FIRST_FALLBACK_PAGE..).take(self.pacing.max_pages) {
            let url = paged_url(start_url, page_num);
            if let Err(e) = page.goto(&url).await {
                tracing::warn!(url = %url, error = %e, "paged listing failed to load");
                break;
            }
            page.pause(self.pacing.listing_settle).await;

            let html = match page.html().await {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "paged listing snapshot failed");
                    break;
                }
            };
            let added = links.absorb(&html, &self.base);
            tracing::debug!(url = %url, added, total = links.len(), "scanned paged listing");
            if added == 0 {
                break;
            }
            page.pause(self.pacing.page_gap).await;
        }
        links
    }
}
