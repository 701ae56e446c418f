//! Encyclopedia summaries from the Wikipedia REST API
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

/// Sentences kept from an article summary
pub const SUMMARY_SENTENCES: usize = 2;

#[async_trait]
pub trait KnowledgeLookup: Send + Sync {
    /// Short summary of `topic`; an error means nothing usable was found
    async fn summary(&self, topic: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    extract: String,
}

#[derive(Clone)]
pub struct WikipediaSummary {
    client: Client,
    base_url: String,
}

impl WikipediaSummary {
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

    pub fn url_for(&self, topic: &str) -> Result<Url> {
        let title = topic.split_whitespace().collect::<Vec<_>>().join("_");
        if title.is_empty() {
            return Err(anyhow::anyhow!("no topic given"));
        }

        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("invalid knowledge base URL {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("knowledge base URL cannot take a path"))?
            .pop_if_empty()
            .extend(["page", "summary", title.as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl KnowledgeLookup for WikipediaSummary {
    async fn summary(&self, topic: &str) -> Result<String> {
        let url = self.url_for(topic)?;
        debug!("Fetching summary: {url}");

        let response = self.client.get(url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => return Err(anyhow::anyhow!("no article for '{topic}'")),
            status if !status.is_success() => {
                return Err(anyhow::anyhow!("knowledge service returned {status}"))
            }
            _ => {}
        }

        let page: PageSummary = response.json().await?;
        if page.kind == "disambiguation" {
            return Err(anyhow::anyhow!("'{topic}' is ambiguous"));
        }

        let summary = first_sentences(&page.extract, SUMMARY_SENTENCES);
        if summary.is_empty() {
            return Err(anyhow::anyhow!("article for '{topic}' has no summary"));
        }
        Ok(summary)
    }
}

/// First `count` sentences of `text`
pub fn first_sentences(text: &str, count: usize) -> String {
    let text = text.trim();
    let mut ends = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if matches!(ch, '.' | '!' | '?') {
            let at_boundary = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
            if at_boundary {
                ends += 1;
                if ends == count {
                    return text[..idx + ch.len_utf8()].to_string();
                }
            }
        }
    }
    text.to_string()
}
