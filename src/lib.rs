pub mod analysis;
pub mod config;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod llm;
pub mod scheduler;
pub mod scoring;
pub mod scraper;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub use analysis::{analyze, AnalysisConfig, Analyzer, Variation, VariationMode};
pub use config::AnalyzerConfig;
pub use error::{Error, Result};
pub use scoring::{EngagementScorer, EngagementWeights};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Reddit,
    Youtube,
    Google,
    Bing,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Reddit,
        Platform::Youtube,
        Platform::Google,
        Platform::Bing,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "reddit" => Some(Platform::Reddit),
            "youtube" => Some(Platform::Youtube),
            "google" => Some(Platform::Google),
            "bing" => Some(Platform::Bing),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Reddit => "reddit",
            Platform::Youtube => "youtube",
            Platform::Google => "google",
            Platform::Bing => "bing",
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Platform::parse(value).ok_or_else(|| Error::UnknownPlatform(value.to_string()))
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Post,
    Video,
    Article,
    Tweet,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub views: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shares: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upvotes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub downvotes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub engagement_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViralContent {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub platform: Platform,
    pub content_type: ContentType,
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
    pub scraped_date: DateTime<Utc>,
    #[serde(default)]
    pub engagement_metrics: EngagementMetrics,
    #[serde(default, deserialize_with = "null_as_default")]
    pub viral_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViralPattern {
    pub hook_strength: f64,
    pub emotional_trigger: String,
    pub content_structure: String,
    pub timing_factor: f64,
    pub audience_appeal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffiliateOpportunity {
    pub product_category: String,
    pub monetization_angle: String,
    pub target_audience: String,
    pub commission_potential: String,
    #[serde(default)]
    pub recommended_products: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub content_id: String,
    pub viral_patterns: ViralPattern,
    pub affiliate_opportunities: Vec<AffiliateOpportunity>,
    pub key_insights: Vec<String>,
    pub success_factors: Vec<String>,
    pub recommended_adaptations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBrief {
    pub id: String,
    pub original_content_id: String,
    pub title: String,
    pub hook_suggestions: Vec<String>,
    pub content_angles: Vec<String>,
    pub target_audience: String,
    pub call_to_actions: Vec<String>,
    pub affiliate_products: Vec<String>,
    pub content_outline: Vec<String>,
    pub trending_topics: Vec<String>,
    pub estimated_engagement: f64,
    pub generated_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapingRequest {
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_time_range")]
    pub time_range: String,
    #[serde(default)]
    pub reddit_subreddit: Option<String>,
}

impl Default for ScrapingRequest {
    fn default() -> Self {
        Self {
            platforms: Vec::new(),
            keywords: Vec::new(),
            limit: default_limit(),
            time_range: default_time_range(),
            reddit_subreddit: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapingResponse {
    pub success: bool,
    pub content_count: usize,
    pub contents: Vec<ViralContent>,
    pub message: String,
}

fn default_limit() -> usize {
    20
}

fn default_time_range() -> String {
    "24h".to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.*}", digits, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_parse_is_case_insensitive() {
        assert_eq!(Platform::parse("Reddit"), Some(Platform::Reddit));
        assert_eq!(Platform::parse(" BING "), Some(Platform::Bing));
        assert_eq!(Platform::parse("tiktok"), None);
        assert!(matches!(
            "tiktok".parse::<Platform>(),
            Err(Error::UnknownPlatform(name)) if name == "tiktok"
        ));
    }

    #[test]
    fn content_tolerates_missing_and_null_fields() {
        let raw = r#"{
            "id": "abc",
            "title": null,
            "platform": "reddit",
            "content_type": "post",
            "url": "https://reddit.com/r/x/1",
            "scraped_date": "2024-05-01T10:00:00Z",
            "engagement_metrics": {"views": null, "comments": 12}
        }"#;
        let content: ViralContent = serde_json::from_str(raw).unwrap();
        assert_eq!(content.title, "");
        assert_eq!(content.engagement_metrics.views, 0);
        assert_eq!(content.engagement_metrics.comments, 12);
        assert_eq!(content.viral_score, 0.0);
        assert!(content.tags.is_empty());
        assert!(content.published_date.is_none());
    }

    #[test]
    fn scraping_request_defaults() {
        let request: ScrapingRequest = serde_json::from_str(r#"{"platforms": ["google"]}"#).unwrap();
        assert_eq!(request.limit, 20);
        assert_eq!(request.time_range, "24h");
        assert!(request.keywords.is_empty());
        assert!(request.reddit_subreddit.is_none());
    }
}
