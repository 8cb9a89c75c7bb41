pub mod browser;
pub mod collector;
pub mod error;
pub mod extractor;
pub mod jsonld;
pub mod labels;
pub mod links;
pub mod normalize;
pub mod pagination;

pub use browser::chromium::{ChromiumPage, LaunchOptions};
pub use browser::{default_controls, BrowserPage, PaginationControl};
pub use collector::{LinkCollector, LinkSet};
pub use error::ScraperError;
pub use extractor::{extract_from_html, DetailExtractor, SkipReason};
pub use links::{detail_links_in, is_detail_url};
