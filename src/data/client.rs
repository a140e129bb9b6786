//! Default-source acquisition.
//!
//! The dashboard auto-loads a well-known dataset on startup: the relative
//! path `data/dashboard_data.csv`, or, when `DASHBOARD_DATA_URL` is set in
//! the environment (or a `.env` file), that URL fetched over HTTP.
//!
//! Absence of the default source is not fatal. Every failure here is an
//! acquisition error (exit code 3), which the front-ends surface as
//! "awaiting manual input" rather than a crash.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::AppError;

/// Well-known relative path of the auto-loaded dataset.
pub const DEFAULT_DATA_PATH: &str = "data/dashboard_data.csv";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetched default-source payload plus a label for the status line.
#[derive(Debug, Clone)]
pub struct FetchedData {
    /// CSV text of the default dataset.
    pub text: String,
    /// Where it came from, e.g. the path or URL.
    pub source: String,
}

pub struct DataClient {
    client: Client,
    url: Option<String>,
}

impl DataClient {
    /// Build a client from the environment. `DASHBOARD_DATA_URL` is
    /// optional; without it the default source is the local path.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let url = std::env::var("DASHBOARD_DATA_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| AppError::runtime(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, url })
    }

    /// Fetch the default dataset as CSV text.
    pub fn fetch_default(&self) -> Result<FetchedData, AppError> {
        match &self.url {
            Some(url) => self.fetch_url(url),
            None => read_local(Path::new(DEFAULT_DATA_PATH)),
        }
    }

    fn fetch_url(&self, url: &str) -> Result<FetchedData, AppError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::acquisition(format!("Data fetch failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::acquisition(format!(
                "Data fetch failed with status {}.",
                resp.status()
            )));
        }

        let text = resp
            .text()
            .map_err(|e| AppError::acquisition(format!("Failed to read data response: {e}")))?;

        Ok(FetchedData {
            text,
            source: url.to_string(),
        })
    }
}

fn read_local(path: &Path) -> Result<FetchedData, AppError> {
    let text = fs::read_to_string(path).map_err(|_| {
        AppError::acquisition(format!(
            "No data file found at '{}'. Load a file manually to view metrics.",
            path.display()
        ))
    })?;

    Ok(FetchedData {
        text,
        source: path.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn missing_local_default_is_a_recoverable_acquisition_error() {
        let err = read_local(Path::new("data/definitely_not_here.csv")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Acquisition);
        assert_eq!(err.exit_code(), 3);
    }
}
