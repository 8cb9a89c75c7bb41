use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("browser error: {0}")]
    Browser(String),

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("could not read page content of {url}: {reason}")]
    Snapshot { url: String, reason: String },

    #[error("clicking {control} failed: {reason}")]
    Click { control: String, reason: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl From<chromiumoxide::error::CdpError> for ScraperError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        ScraperError::Browser(err.to_string())
    }
}
