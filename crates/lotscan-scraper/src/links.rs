//! Detail-link discovery on listing pages.
//!
//! A detail link is any `<a href>` whose path contains
//! `/viewdetails/new/` or `/viewdetails/used/` (any case). Hrefs are reduced
//! to `origin + path`: the query string and fragment are dropped and relative
//! paths are resolved against the dealership origin.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

static DETAIL_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/viewdetails/(new|used)/").expect("valid regex"));

static ANCHORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

/// Returns `true` if the path portion of `url` matches the detail pattern.
///
/// Query strings are not consulted, so a listing URL carrying a detail path
/// in a redirect parameter does not qualify.
#[must_use]
pub fn is_detail_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|u| DETAIL_PATH.is_match(u.path()))
}

/// Resolves `href` against `base` with query and fragment removed.
///
/// Returns `None` when the result is not a detail URL.
#[must_use]
pub fn normalize_detail_href(base: &Url, href: &str) -> Option<String> {
    let stripped = href.trim().split(['?', '#']).next().unwrap_or_default();
    if stripped.is_empty() {
        return None;
    }
    let absolute = base.join(stripped).ok()?;
    if DETAIL_PATH.is_match(absolute.path()) {
        Some(absolute.to_string())
    } else {
        None
    }
}

/// Returns every detail URL linked from `html`, in document order.
///
/// Duplicates are kept; callers accumulate into a set.
#[must_use]
pub fn detail_links_in(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&ANCHORS)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| normalize_detail_href(base, href))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.toyotagallatin.com").unwrap()
    }

    #[test]
    fn relative_href_is_joined_to_origin() {
        assert_eq!(
            normalize_detail_href(&base(), "/viewdetails/new/4T1B11HK5RU000001/2024-toyota-camry")
                .as_deref(),
            Some("https://www.toyotagallatin.com/viewdetails/new/4T1B11HK5RU000001/2024-toyota-camry")
        );
    }

    #[test]
    fn query_and_fragment_are_stripped() {
        assert_eq!(
            normalize_detail_href(&base(), "/viewdetails/used/ABC/2019-rav4?src=srp&pos=3#photos")
                .as_deref(),
            Some("https://www.toyotagallatin.com/viewdetails/used/ABC/2019-rav4")
        );
    }

    #[test]
    fn absolute_href_keeps_its_host() {
        assert_eq!(
            normalize_detail_href(&base(), "https://cdn.dealer.example/viewdetails/new/X/y").as_deref(),
            Some("https://cdn.dealer.example/viewdetails/new/X/y")
        );
    }

    #[test]
    fn pattern_is_case_insensitive() {
        assert!(normalize_detail_href(&base(), "/ViewDetails/USED/abc").is_some());
    }

    #[test]
    fn non_detail_hrefs_are_rejected() {
        assert!(normalize_detail_href(&base(), "/inventory/new?page=2").is_none());
        assert!(normalize_detail_href(&base(), "/viewdetails/certified/abc").is_none());
        assert!(normalize_detail_href(&base(), "#top").is_none());
        assert!(normalize_detail_href(&base(), "").is_none());
    }

    #[test]
    fn detail_path_inside_query_is_rejected() {
        assert!(normalize_detail_href(&base(), "/login?next=/viewdetails/new/abc/").is_none());
    }

    #[test]
    fn is_detail_url_checks_path_only() {
        assert!(is_detail_url("https://www.toyotagallatin.com/viewdetails/new/abc/def"));
        assert!(!is_detail_url(
            "https://www.toyotagallatin.com/search?q=/viewdetails/new/abc/"
        ));
        assert!(!is_detail_url("/viewdetails/new/abc/"));
    }

    #[test]
    fn detail_links_in_keeps_document_order_and_duplicates() {
        let html = r#"
            <a href="/viewdetails/used/B/two">B</a>
            <a href="/about">About</a>
            <a href="/viewdetails/new/A/one?x=1">A</a>
            <a>no href</a>
            <a href="/viewdetails/used/B/two#gallery">B again</a>
        "#;
        assert_eq!(
            detail_links_in(html, &base()),
            vec![
                "https://www.toyotagallatin.com/viewdetails/used/B/two",
                "https://www.toyotagallatin.com/viewdetails/new/A/one",
                "https://www.toyotagallatin.com/viewdetails/used/B/two",
            ]
        );
    }

    #[test]
    fn detail_links_in_empty_page() {
        assert!(detail_links_in("<html><body></body></html>", &base()).is_empty());
    }
}
