//! Weather lookup via wttr.in one-line summaries
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};
use std::time::Duration;

/// One-line weather summary for a city
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn fetch(&self, city: &str) -> Result<String>;
}

#[derive(Clone)]
pub struct WttrWeather {
    client: Client,
    base_url: String,
}

impl WttrWeather {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// `{base}/{city}?format=3`, with the city percent-encoded as one path segment
    pub fn url_for(&self, city: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("invalid weather base URL {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("weather base URL cannot take a path"))?
            .pop_if_empty()
            .push(city.trim());
        url.query_pairs_mut().append_pair("format", "3");
        Ok(url)
    }
}

#[async_trait]
impl WeatherLookup for WttrWeather {
    async fn fetch(&self, city: &str) -> Result<String> {
        let url = self.url_for(city)?;
        debug!("Fetching weather: {url}");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("weather service returned {status}"));
        }

        let body = response.text().await?;
        let summary = body.trim();
        if summary.is_empty() {
            return Err(anyhow::anyhow!("weather service returned an empty summary"));
        }
        Ok(summary.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_encodes_city() {
        let weather = WttrWeather::new("https://wttr.in", Duration::from_secs(1)).unwrap();
        let url = weather.url_for(" new york ").unwrap();
        assert_eq!(url.as_str(), "https://wttr.in/new%20york?format=3");
    }

    #[test]
    fn test_url_for_keeps_base_path() {
        let weather = WttrWeather::new("http://localhost:9000/wx/", Duration::from_secs(1)).unwrap();
        let url = weather.url_for("oslo").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/wx/oslo?format=3");
    }

    #[test]
    fn test_bad_base_url() {
        let weather = WttrWeather::new("not a url", Duration::from_secs(1)).unwrap();
        assert!(weather.url_for("oslo").is_err());
    }
}
