//! Entity Source: where the bubble list comes from.
//!
//! Every source yields the full list; the scene takes it wholesale.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::bubble::{active, mock::mock_bubbles, Bubble};
use crate::error::SourceError;

/// Env var holding an API key for hosted backends
pub const API_KEY_ENV: &str = "BUBBLE_API_KEY";

#[derive(Debug, Clone, PartialEq)]
pub enum BubbleSource {
    /// Deterministic generated bubbles
    Mock(usize),
    /// JSON array of rows on disk
    File(PathBuf),
    /// JSON array of rows over HTTP
    Remote(String),
}

impl BubbleSource {
    /// Load the list and drop bubbles that have already popped.
    pub fn load(&self, now: DateTime<Utc>) -> Result<Vec<Bubble>, SourceError> {
        let bubbles = match self {
            BubbleSource::Mock(count) => mock_bubbles(*count, now),
            BubbleSource::File(path) => load_bubbles_file(path)?,
            BubbleSource::Remote(url) => load_remote(url)?,
        };
        let total = bubbles.len();
        let live = active(bubbles, now);
        log::info!(
            "loaded {} bubbles from {} ({} expired)",
            live.len(),
            self.describe(),
            total - live.len()
        );
        Ok(live)
    }

    pub fn describe(&self) -> String {
        match self {
            BubbleSource::Mock(count) => format!("mock x{}", count),
            BubbleSource::File(path) => path.display().to_string(),
            BubbleSource::Remote(url) => url.clone(),
        }
    }
}

/// Read a JSON array of bubble rows.
pub fn load_bubbles_file(path: &Path) -> Result<Vec<Bubble>, SourceError> {
    let text = std::fs::read_to_string(path).map_err(|e| SourceError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    decode_bubbles(&text)
}

pub fn decode_bubbles(text: &str) -> Result<Vec<Bubble>, SourceError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(feature = "remote")]
fn load_remote(url: &str) -> Result<Vec<Bubble>, SourceError> {
    fetch_bubbles(url)
}

#[cfg(not(feature = "remote"))]
fn load_remote(url: &str) -> Result<Vec<Bubble>, SourceError> {
    Err(SourceError::Request(format!(
        "{}: built without the `remote` feature",
        url
    )))
}

/// Prepend `https://` when no scheme is given, then validate.
#[cfg(feature = "remote")]
pub fn normalize_url(url_str: &str) -> Result<url::Url, SourceError> {
    let url = if !url_str.starts_with("http://") && !url_str.starts_with("https://") {
        format!("https://{}", url_str)
    } else {
        url_str.to_string()
    };
    url::Url::parse(&url).map_err(|e| SourceError::InvalidUrl(format!("{}: {}", url_str, e)))
}

/// Fetch the bubble list (blocking).
#[cfg(feature = "remote")]
pub fn fetch_bubbles(url_str: &str) -> Result<Vec<Bubble>, SourceError> {
    let parsed = normalize_url(url_str)?;

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("bubble-orbit/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(15))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SourceError::Request(format!("Client error: {}", e)))?;

    let mut request = client
        .get(parsed.as_str())
        .header("Accept", "application/json");
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        request = request
            .header("apikey", key.as_str())
            .header("Authorization", format!("Bearer {}", key));
    }

    let response = request
        .send()
        .map_err(|e| SourceError::Request(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .map_err(|e| SourceError::Request(format!("Failed to read body: {}", e)))?;
    if !status.is_success() {
        return Err(SourceError::Http {
            status: status.as_u16(),
            message: truncate_body(&body, 200),
        });
    }

    log::debug!("GET {} -> {} ({} bytes)", parsed, status.as_u16(), body.len());
    decode_bubbles(&body)
}

#[cfg(feature = "remote")]
fn truncate_body(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
