//! Numeric `page=N` pagination for inventory listings.
//!
//! When a listing offers no clickable "next" control, the collector falls
//! back to requesting `?page=2`, `?page=3`, ... on the start URL. This only
//! applies to start URLs whose path has an `inventory` segment.

use url::Url;

/// First page index requested by the numeric fallback. Page 1 is the start
/// URL itself.
pub const FIRST_FALLBACK_PAGE: usize = 2;

/// Returns `true` if `start_url` has an `inventory` path segment.
#[must_use]
pub fn has_inventory_segment(start_url: &str) -> bool {
    Url::parse(start_url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .map(|mut segs| segs.any(|s| s.eq_ignore_ascii_case("inventory")))
        })
        .unwrap_or(false)
}

/// Appends `page=<page>` to `start_url`, using `&` when a query is already
/// present and `?` otherwise.
#[must_use]
pub fn paged_url(start_url: &str, page: usize) -> String {
    let sep = if start_url.contains('?') { '&' } else { '?' };
    format!("{start_url}{sep}page={page}")
}
