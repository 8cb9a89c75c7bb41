//! Detail-page extraction into a [`VehicleRecord`].
//!
//! Two sources feed each record, in priority order: schema.org JSON-LD
//! ([`crate::jsonld`]) and the label/value scan of the rendered page
//! ([`crate::labels`]). Text collected from both is normalized last.

use std::time::Duration;

use lotscan_core::{Numeric, VehicleRecord};
use scraper::Html;
use serde_json::Number;
use thiserror::Error;
use url::Url;

use crate::browser::BrowserPage;
use crate::error::ScraperError;
use crate::jsonld::read_structured_data;
use crate::labels::{fill_gaps, LabelLookup};
use crate::normalize::{normalize_mileage, normalize_price, normalize_year};

/// A detail URL that produced no record.
#[derive(Debug, Error)]
#[error("skipped {url}: {source}")]
pub struct SkipReason {
    pub url: String,
    #[source]
    pub source: ScraperError,
}

/// A price or mileage as the page gave it.
///
/// JSON numbers are kept as numbers; only text goes through the
/// normalizers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Amount {
    Number(Number),
    Text(String),
}

impl Amount {
    fn into_price(self) -> Numeric<f64> {
        match self {
            Amount::Number(n) => n
                .as_f64()
                .map_or_else(|| Numeric::Raw(n.to_string()), Numeric::Parsed),
            Amount::Text(text) => normalize_price(&text),
        }
    }

    /// A fractional mileage is not an odometer reading; it is kept as text
    /// rather than truncated.
    fn into_mileage(self) -> Numeric<i64> {
        match self {
            Amount::Number(n) => n
                .as_i64()
                .map_or_else(|| Numeric::Raw(n.to_string()), Numeric::Parsed),
            Amount::Text(text) => normalize_mileage(&text),
        }
    }
}

/// Field values gathered before numeric normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct VehicleDraft {
    pub vin: Option<String>,
    pub year: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim: Option<String>,
    pub price: Option<Amount>,
    pub mileage: Option<Amount>,
    pub stock_number: Option<String>,
    pub exterior_color: Option<String>,
    pub interior_color: Option<String>,
    pub drivetrain: Option<String>,
    pub transmission: Option<String>,
    pub engine: Option<String>,
    pub images: Option<Vec<String>>,
}

impl VehicleDraft {
    fn into_record(self, url: &str) -> VehicleRecord {
        VehicleRecord {
            vin: self.vin,
            year: self.year.as_deref().map(normalize_year),
            make: self.make,
            model: self.model,
            trim: self.trim,
            price: self.price.map(Amount::into_price),
            mileage: self.mileage.map(Amount::into_mileage),
            stock_number: self.stock_number,
            exterior_color: self.exterior_color,
            interior_color: self.interior_color,
            drivetrain: self.drivetrain,
            transmission: self.transmission,
            engine: self.engine,
            images: self.images.unwrap_or_default(),
            ..VehicleRecord::new(url)
        }
    }
}

/// Loads detail pages and turns them into records.
#[derive(Debug, Clone)]
pub struct DetailExtractor {
    settle: Duration,
}

impl DetailExtractor {
    /// `settle` is how long to wait after navigation before snapshotting,
    /// giving client-side scripts time to render spec tables.
    #[must_use]
    pub fn new(settle: Duration) -> Self {
        Self { settle }
    }

    /// Loads `url` on `page` and extracts its record.
    ///
    /// # Errors
    ///
    /// Returns [`SkipReason`] when `url` is not an absolute http(s) URL or
    /// the page fails to load or snapshot.
    pub async fn extract<P: BrowserPage>(
        &self,
        page: &mut P,
        url: &str,
    ) -> Result<VehicleRecord, SkipReason> {
        let skip = |source| SkipReason {
            url: url.to_string(),
            source,
        };

        let parsed = Url::parse(url).map_err(|e| {
            skip(ScraperError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            })
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(skip(ScraperError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            }));
        }

        page.goto(url).await.map_err(skip)?;
        page.pause(self.settle).await;
        let html = page.html().await.map_err(skip)?;

        let record = extract_from_html(url, &html);
        tracing::debug!(url = %url, vin = ?record.vin, "extracted detail page");
        Ok(record)
    }
}

/// Extracts a record from a detail page snapshot.
///
/// Deterministic in `(url, html)`: the same snapshot always yields the
/// same record.
#[must_use]
pub fn extract_from_html(url: &str, html: &str) -> VehicleRecord {
    let document = Html::parse_document(html);

    let mut draft = VehicleDraft::default();
    read_structured_data(&document, &mut draft);
    fill_gaps(&mut draft, &LabelLookup::scan(&document));

    draft.into_record(url)
}
