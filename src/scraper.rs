use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use std::time::Duration;

use crate::config::ScraperConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeTarget {
    RedditSubreddit { subreddit: String },
    RedditPost { url: String },
    GoogleSearch { query: String, limit: usize },
    BingSearch { query: String, limit: usize },
    YoutubeTranscript { query: String },
}

impl ScrapeTarget {
    pub fn name(&self) -> &'static str {
        match self {
            ScrapeTarget::RedditSubreddit { .. } => "reddit_subreddit",
            ScrapeTarget::RedditPost { .. } => "reddit_post",
            ScrapeTarget::GoogleSearch { .. } => "google_search",
            ScrapeTarget::BingSearch { .. } => "bing_search",
            ScrapeTarget::YoutubeTranscript { .. } => "youtube_transcript",
        }
    }

    fn payload<'a>(&'a self, language: &'a str) -> ScrapePayload<'a> {
        let mut payload = ScrapePayload {
            target: self.name(),
            ..Default::default()
        };
        match self {
            ScrapeTarget::RedditSubreddit { subreddit } => {
                payload.url = Some(subreddit_url(subreddit));
            }
            ScrapeTarget::RedditPost { url } => {
                payload.url = Some(url.clone());
            }
            ScrapeTarget::GoogleSearch { query, limit } => {
                payload.query = Some(query.as_str());
                payload.headless = Some("html");
                payload.page_from = Some("1");
                payload.limit = Some(*limit);
                payload.google_results_language = Some(language);
                payload.parse = Some(true);
            }
            ScrapeTarget::BingSearch { query, limit } => {
                payload.query = Some(query.as_str());
                payload.page_from = Some("1");
                payload.limit = Some(*limit);
                payload.parse = Some(true);
            }
            ScrapeTarget::YoutubeTranscript { query } => {
                payload.query = Some(query.as_str());
                payload.language_code = Some(language);
            }
        }
        payload
    }
}

pub fn subreddit_url(subreddit: &str) -> String {
    let name = subreddit.trim().trim_start_matches("r/").trim_matches('/');
    format!("https://www.reddit.com/r/{}/", urlencoding::encode(name))
}

#[derive(Debug, Default, Serialize)]
struct ScrapePayload<'a> {
    target: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headless: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_from: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    google_results_language: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse: Option<bool>,
}

#[derive(Clone)]
pub struct ScraperClient {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
    language: String,
}

impl ScraperClient {
    pub fn from_config(config: &ScraperConfig) -> Result<Self> {
        let timeout = Duration::from_millis(config.timeout_ms);
        ScraperClient::new(
            config.api_url.clone(),
            config.basic_token(),
            timeout,
            config.language.clone(),
        )
    }

    pub fn new(
        api_url: String,
        token: Option<String>,
        timeout: Duration,
        language: String,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        if token.is_none() {
            tracing::warn!("scraper credentials not configured; requests will be unauthenticated");
        }
        Ok(Self {
            client,
            api_url,
            token,
            language,
        })
    }

    pub async fn scrape(&self, target: &ScrapeTarget) -> Result<String> {
        let payload = target.payload(&self.language);
        tracing::debug!(scrape_target = target.name(), "scraper request");

        let mut request = self
            .client
            .post(&self.api_url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&payload);
        if let Some(token) = self.token.as_ref() {
            request = request.header(AUTHORIZATION, format!("Basic {}", token));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UnexpectedStatus {
                service: "scraper",
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_json(target: &ScrapeTarget) -> serde_json::Value {
        serde_json::to_value(target.payload("en")).unwrap()
    }

    #[test]
    fn google_payload_fields() {
        let target = ScrapeTarget::GoogleSearch {
            query: "viral".to_string(),
            limit: 10,
        };
        assert_eq!(
            payload_json(&target),
            serde_json::json!({
                "target": "google_search",
                "query": "viral",
                "headless": "html",
                "page_from": "1",
                "limit": 10,
                "google_results_language": "en",
                "parse": true
            })
        );
    }

    #[test]
    fn youtube_and_bing_payloads() {
        let youtube = ScrapeTarget::YoutubeTranscript {
            query: "rust".to_string(),
        };
        assert_eq!(
            payload_json(&youtube),
            serde_json::json!({"target": "youtube_transcript", "query": "rust", "language_code": "en"})
        );

        let bing = ScrapeTarget::BingSearch {
            query: "hot".to_string(),
            limit: 5,
        };
        let value = payload_json(&bing);
        assert_eq!(value["target"], "bing_search");
        assert_eq!(value["limit"], 5);
        assert!(value.get("headless").is_none());
    }

    #[test]
    fn reddit_post_passes_url_through() {
        let target = ScrapeTarget::RedditPost {
            url: "https://www.reddit.com/r/rust/comments/abc/".to_string(),
        };
        assert_eq!(
            payload_json(&target),
            serde_json::json!({"target": "reddit_post", "url": "https://www.reddit.com/r/rust/comments/abc/"})
        );
    }

    #[test]
    fn subreddit_url_normalizes_name() {
        assert_eq!(subreddit_url("rust"), "https://www.reddit.com/r/rust/");
        assert_eq!(subreddit_url("r/rust/"), "https://www.reddit.com/r/rust/");
        assert_eq!(
            payload_json(&ScrapeTarget::RedditSubreddit {
                subreddit: "programming".to_string()
            }),
            serde_json::json!({"target": "reddit_subreddit", "url": "https://www.reddit.com/r/programming/"})
        );
    }
}
