use url::Url;

/// Output column order. Rows produced by [`VehicleRecord::csv_row`] follow it.
pub const CSV_COLUMNS: [&str; 16] = [
    "url",
    "vin",
    "condition",
    "year",
    "make",
    "model",
    "trim",
    "price",
    "mileage",
    "stock_number",
    "exterior_color",
    "interior_color",
    "drivetrain",
    "transmission",
    "engine",
    "images",
];

/// Joins the image list into a single CSV cell.
pub const IMAGE_SEPARATOR: &str = "|";

/// Inventory condition, taken from the `/viewdetails/<condition>/` URL segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    New,
    Used,
}

impl Condition {
    /// Reads the condition from a detail URL's path.
    ///
    /// Only the segment directly after `viewdetails` counts; page content is
    /// never consulted. Returns `None` for URLs outside the detail pattern.
    #[must_use]
    pub fn from_detail_url(url: &str) -> Option<Self> {
        let parsed = Url::parse(url).ok()?;
        let mut segments = parsed.path_segments()?;
        segments.find(|s| s.eq_ignore_ascii_case("viewdetails"))?;
        match segments.next()?.to_ascii_lowercase().as_str() {
            "new" => Some(Self::New),
            "used" => Some(Self::Used),
            _ => None,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::New => write!(f, "new"),
            Condition::Used => write!(f, "used"),
        }
    }
}

/// A numeric field after normalization.
///
/// `Raw` keeps the source text when no number could be pulled out of it, so
/// a value like `"Call for price"` survives to the output unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric<T> {
    Parsed(T),
    Raw(String),
}

impl<T: Copy> Numeric<T> {
    #[must_use]
    pub fn parsed(&self) -> Option<T> {
        match self {
            Numeric::Parsed(v) => Some(*v),
            Numeric::Raw(_) => None,
        }
    }
}

/// One row of dealership inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleRecord {
    pub url: String,
    pub vin: Option<String>,
    pub condition: Option<Condition>,
    pub year: Option<Numeric<i32>>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub trim: Option<String>,
    pub price: Option<Numeric<f64>>,
    pub mileage: Option<Numeric<i64>>,
    pub stock_number: Option<String>,
    pub exterior_color: Option<String>,
    pub interior_color: Option<String>,
    pub drivetrain: Option<String>,
    pub transmission: Option<String>,
    pub engine: Option<String>,
    pub images: Vec<String>,
}

impl VehicleRecord {
    /// Creates an empty record for `url` with the condition already derived.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let condition = Condition::from_detail_url(&url);
        Self {
            url,
            vin: None,
            condition,
            year: None,
            make: None,
            model: None,
            trim: None,
            price: None,
            mileage: None,
            stock_number: None,
            exterior_color: None,
            interior_color: None,
            drivetrain: None,
            transmission: None,
            engine: None,
            images: Vec::new(),
        }
    }

    /// Renders the record as CSV cells in [`CSV_COLUMNS`] order.
    ///
    /// Absent values become empty cells. Parsed prices carry two decimals.
    #[must_use]
    pub fn csv_row(&self) -> Vec<String> {
        vec![
            self.url.clone(),
            text_cell(self.vin.as_ref()),
            self.condition.map(|c| c.to_string()).unwrap_or_default(),
            numeric_cell(self.year.as_ref(), ToString::to_string),
            text_cell(self.make.as_ref()),
            text_cell(self.model.as_ref()),
            text_cell(self.trim.as_ref()),
            numeric_cell(self.price.as_ref(), |p| format!("{p:.2}")),
            numeric_cell(self.mileage.as_ref(), ToString::to_string),
            text_cell(self.stock_number.as_ref()),
            text_cell(self.exterior_color.as_ref()),
            text_cell(self.interior_color.as_ref()),
            text_cell(self.drivetrain.as_ref()),
            text_cell(self.transmission.as_ref()),
            text_cell(self.engine.as_ref()),
            self.images.join(IMAGE_SEPARATOR),
        ]
    }
}

fn text_cell(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

fn numeric_cell<T>(value: Option<&Numeric<T>>, render: impl Fn(&T) -> String) -> String {
    match value {
        Some(Numeric::Parsed(v)) => render(v),
        Some(Numeric::Raw(raw)) => raw.clone(),
        None => String::new(),
    }
}
