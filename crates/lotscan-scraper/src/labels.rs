//! Label/value scan of the rendered detail page.
//!
//! Spec tables on dealer sites are usually `<li>Stock #: T12345</li>` style
//! rows. Short texts with a colon are split into a lowercase label and a
//! value; longer texts are prose and ignored.

use std::collections::HashMap;
use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::browser::collapse_whitespace;
use crate::extractor::VehicleDraft;

static SPEC_ROWS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("li, .spec-item, .vehicle-detail, .vdp-specs *").expect("valid selector")
});

/// Texts this long or longer are treated as prose, not a spec row.
const MAX_ROW_CHARS: usize = 120;

pub const STOCK_NUMBER_LABELS: &[&str] = &["stock", "stock #", "stock number"];
pub const EXTERIOR_COLOR_LABELS: &[&str] = &["exterior", "exterior color", "ext. color"];
pub const INTERIOR_COLOR_LABELS: &[&str] = &["interior", "interior color", "int. color"];
pub const ENGINE_LABELS: &[&str] = &["engine"];
pub const TRANSMISSION_LABELS: &[&str] = &["transmission"];
pub const DRIVETRAIN_LABELS: &[&str] = &["drivetrain", "drive type", "driveline"];

/// Lowercase label to value, built from one page scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelLookup(HashMap<String, String>);

impl LabelLookup {
    /// Scans every candidate spec row in `document`.
    #[must_use]
    pub fn scan(document: &Html) -> Self {
        Self::from_texts(
            document
                .select(&SPEC_ROWS)
                .map(|el| el.text().collect::<String>()),
        )
    }

    /// Builds a lookup from raw element texts, in document order. A later
    /// text with the same label replaces an earlier one; a label with no
    /// value (a bare `<span>Engine:</span>`) is not recorded.
    #[must_use]
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for text in texts {
            if let Some((label, value)) = split_row(text.as_ref()) {
                map.insert(label, value);
            }
        }
        Self(map)
    }

    /// Returns the value of the first label in `labels` that was seen.
    #[must_use]
    pub fn first_of(&self, labels: &[&str]) -> Option<&str> {
        labels
            .iter()
            .find_map(|label| self.0.get(*label))
            .map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn split_row(raw: &str) -> Option<(String, String)> {
    let text = collapse_whitespace(raw);
    if text.chars().count() >= MAX_ROW_CHARS {
        return None;
    }
    let (label, value) = text.split_once(':')?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some((label.trim().to_lowercase(), value.to_string()))
}

/// Fills the draft's still-empty descriptive fields from `lookup`.
pub(crate) fn fill_gaps(draft: &mut VehicleDraft, lookup: &LabelLookup) {
    let slots: [(&mut Option<String>, &[&str]); 6] = [
        (&mut draft.stock_number, STOCK_NUMBER_LABELS),
        (&mut draft.exterior_color, EXTERIOR_COLOR_LABELS),
        (&mut draft.interior_color, INTERIOR_COLOR_LABELS),
        (&mut draft.engine, ENGINE_LABELS),
        (&mut draft.transmission, TRANSMISSION_LABELS),
        (&mut draft.drivetrain, DRIVETRAIN_LABELS),
    ];
    for (slot, labels) in slots {
        if slot.is_none() {
            *slot = lookup.first_of(labels).map(str::to_string);
        }
    }
}
