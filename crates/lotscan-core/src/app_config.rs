use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Fixed waits inserted around browser navigation.
///
/// These stand in for a readiness signal: client-rendered listings get a
/// bounded amount of time to appear before the DOM is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pacing {
    pub listing_settle: Duration,
    pub click_settle: Duration,
    pub page_gap: Duration,
    pub detail_settle: Duration,
    /// A pause of `batch_pause` follows every `batch_size` detail pages.
    pub batch_size: usize,
    pub batch_pause: Duration,
    /// Upper bound on pagination steps per listing, per phase.
    pub max_pages: usize,
}

impl Pacing {
    /// No waits at all; used by tests driving in-memory pages.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            listing_settle: Duration::ZERO,
            click_settle: Duration::ZERO,
            page_gap: Duration::ZERO,
            detail_settle: Duration::ZERO,
            batch_size: 5,
            batch_pause: Duration::ZERO,
            max_pages: 200,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            listing_settle: Duration::from_millis(800),
            click_settle: Duration::from_millis(1200),
            page_gap: Duration::from_millis(400),
            detail_settle: Duration::from_millis(600),
            batch_size: 5,
            batch_pause: Duration::from_millis(500),
            max_pages: 200,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Origin every relative detail link is resolved against.
    pub base_url: Url,
    /// Listing pages to walk, already joined onto `base_url`.
    pub listing_urls: Vec<Url>,
    pub output_path: PathBuf,
    pub log_level: String,
    pub user_agent: String,
    pub headless: bool,
    pub chrome_executable: Option<PathBuf>,
    pub nav_timeout_secs: u64,
    pub pacing: Pacing,
}
