//! schema.org JSON-LD extraction from `<script type="application/ld+json">`.
//!
//! Dealer sites describe the vehicle on a detail page as a `Product`, `Car`,
//! or `Vehicle` blob. Property shapes vary between sites: a brand may be a
//! string or `{"@type": "Brand", "name": ...}`, mileage may be a number or a
//! `QuantitativeValue`. [`JsonField`] absorbs that variation.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;

use crate::extractor::{Amount, VehicleDraft};

static LD_JSON: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid selector")
});

/// A JSON-LD property value as either a bare scalar or a nested object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonField {
    /// A string or number.
    Scalar(String),
    /// An object carrying its payload under `value` (or `name`), with an
    /// optional unit such as `"SMI"` for statute miles.
    Nested {
        value: Option<String>,
        unit: Option<String>,
    },
}

impl JsonField {
    /// Classifies `value`. Booleans, nulls, and arrays are not fields.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(JsonField::Nested {
                value: map
                    .get("value")
                    .or_else(|| map.get("name"))
                    .and_then(scalar_text),
                unit: map
                    .get("unitCode")
                    .or_else(|| map.get("unitText"))
                    .and_then(scalar_text),
            }),
            other => scalar_text(other).map(JsonField::Scalar),
        }
    }

    /// Unwraps to the field's text: a scalar's own text, or a nested
    /// object's value. Blank text counts as absent.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        let text = match self {
            JsonField::Scalar(text) => Some(text),
            JsonField::Nested { value, .. } => value,
        };
        text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parses one script block into its candidate blobs.
///
/// Top-level arrays contribute each element, and `@graph` containers
/// contribute their members. Malformed JSON yields no blobs.
#[must_use]
pub fn parse_blobs(text: &str) -> Vec<Value> {
    let Ok(value) = serde_json::from_str::<Value>(text) else {
        tracing::debug!("skipping malformed JSON-LD block");
        return Vec::new();
    };

    let mut blobs = match value {
        Value::Array(items) => items,
        other => vec![other],
    };

    let graph_members: Vec<Value> = blobs
        .iter()
        .filter_map(|blob| blob.get("@graph").and_then(Value::as_array))
        .flatten()
        .cloned()
        .collect();
    blobs.extend(graph_members);
    blobs
}

/// Returns `true` if the blob's `@type` mentions "product" or "vehicle",
/// ignoring case. An `@type` array qualifies if any entry does.
#[must_use]
pub fn is_vehicle_type(blob: &Value) -> bool {
    let mentions = |t: &str| {
        let t = t.to_lowercase();
        t.contains("product") || t.contains("vehicle")
    };
    match blob.get("@type") {
        Some(Value::String(t)) => mentions(t),
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).any(mentions),
        _ => false,
    }
}

/// Reads every JSON-LD block in `document` into `draft`.
///
/// Fields already set on the draft are never overwritten, so the first
/// qualifying blob to supply a field wins.
pub(crate) fn read_structured_data(document: &Html, draft: &mut VehicleDraft) {
    for script in document.select(&LD_JSON) {
        let text: String = script.text().collect();
        for blob in parse_blobs(&text) {
            if is_vehicle_type(&blob) {
                apply_blob(&blob, draft);
            }
        }
    }
}

/// Copies the fields of one qualifying blob into empty draft slots.
fn apply_blob(blob: &Value, draft: &mut VehicleDraft) {
    let vehicle = blob.get("vehicle").filter(|v| v.is_object()).unwrap_or(blob);

    fill(&mut draft.vin, first_text(vehicle, &["vehicleIdentificationNumber", "vin"]));
    fill(&mut draft.year, first_text(vehicle, &["modelDate", "productionDate", "vehicleModelDate"]));
    fill(&mut draft.make, first_text(vehicle, &["brand", "manufacturer"]));
    fill(&mut draft.model, first_text(vehicle, &["model"]));
    fill(&mut draft.trim, first_text(vehicle, &["trim"]));
    fill(&mut draft.mileage, first_amount(vehicle, &["mileage", "mileageFromOdometer"]));
    fill(&mut draft.stock_number, first_text(vehicle, &["sku", "stockNumber"]));
    fill(&mut draft.exterior_color, first_text(vehicle, &["color"]));
    fill(&mut draft.interior_color, first_text(vehicle, &["vehicleInteriorColor"]));
    fill(&mut draft.transmission, first_text(vehicle, &["vehicleTransmission"]));
    fill(&mut draft.drivetrain, first_text(vehicle, &["driveWheelConfiguration"]));
    fill(&mut draft.engine, first_text(vehicle, &["vehicleEngine"]));

    if draft.price.is_none() {
        draft.price = offer_price(blob).or_else(|| offer_price(vehicle));
    }
    if draft.images.is_none() {
        draft.images = image_list(blob).or_else(|| image_list(vehicle));
    }
}

fn fill<T>(slot: &mut Option<T>, candidate: Option<T>) {
    if slot.is_none() {
        *slot = candidate;
    }
}

/// Returns the text of the first key in `keys` that unwraps to a value.
fn first_text(obj: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .filter_map(JsonField::from_value)
        .find_map(JsonField::into_text)
}

/// Like [`first_text`], but a JSON number (bare or under `value`) is kept
/// as a number.
fn first_amount(obj: &Value, keys: &[&str]) -> Option<Amount> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(|value| {
            let payload = match value {
                Value::Object(map) => map.get("value").unwrap_or(value),
                other => other,
            };
            match payload {
                Value::Number(n) => Some(Amount::Number(n.clone())),
                _ => JsonField::from_value(value)
                    .and_then(JsonField::into_text)
                    .map(Amount::Text),
            }
        })
}

/// `offers.price`, falling back to `offers.priceSpecification.price`.
///
/// `offers` and `priceSpecification` may each be a single object or a list;
/// the first object is used.
fn offer_price(obj: &Value) -> Option<Amount> {
    let offers = first_object(obj.get("offers")?)?;
    first_amount(offers, &["price"]).or_else(|| {
        let spec = first_object(offers.get("priceSpecification")?)?;
        first_amount(spec, &["price"])
    })
}

fn first_object(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(_) => Some(value),
        Value::Array(items) => items.iter().find(|v| v.is_object()),
        _ => None,
    }
}

/// `image` as a list of URLs, a single URL, or an `ImageObject`.
fn image_list(obj: &Value) -> Option<Vec<String>> {
    let images: Vec<String> = match obj.get("image")? {
        Value::Array(items) => items.iter().filter_map(image_url).collect(),
        single => image_url(single).into_iter().collect(),
    };
    if images.is_empty() {
        None
    } else {
        Some(images)
    }
}

fn image_url(value: &Value) -> Option<String> {
    let url = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map
            .get("url")
            .or_else(|| map.get("contentUrl"))
            .and_then(Value::as_str)?,
        _ => return None,
    };
    let url = url.trim();
    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}
