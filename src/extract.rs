use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::scoring::EngagementScorer;
use crate::{ContentType, EngagementMetrics, Platform, ViralContent};

// reddit reports no views; estimated from upvotes
const REDDIT_VIEWS_PER_UPVOTE: u64 = 10;

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    results: Vec<ScrapeResult>,
}

#[derive(Debug, Deserialize)]
struct ScrapeResult {
    #[serde(default)]
    content: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    #[serde(default)]
    kind: String,
    data: Option<PostData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PostData {
    title: Option<String>,
    selftext: Option<String>,
    permalink: Option<String>,
    author: Option<String>,
    subreddit: Option<String>,
    thumbnail: Option<String>,
    ups: Option<i64>,
    downs: Option<i64>,
    num_comments: Option<i64>,
    created_utc: Option<f64>,
}

pub fn extract_contents(
    body: &str,
    platform: Platform,
    scorer: &EngagementScorer,
) -> Vec<ViralContent> {
    let response: ScrapeResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(%platform, error = %err, "unparseable scraper response");
            return Vec::new();
        }
    };

    if response.results.is_empty() {
        tracing::warn!(%platform, "scraper response has no results");
        return Vec::new();
    }

    let scraped_at = Utc::now();
    let contents: Vec<ViralContent> = match platform {
        Platform::Reddit => response
            .results
            .iter()
            .flat_map(|result| reddit_posts(&result.content))
            .map(|post| reddit_content(post, scraped_at, scorer))
            .collect(),
        Platform::Google | Platform::Bing | Platform::Youtube => {
            tracing::debug!(%platform, "no extractor for platform response layout");
            Vec::new()
        }
    };

    tracing::info!(%platform, count = contents.len(), "extracted contents");
    contents
}

fn reddit_posts(content: &serde_json::Value) -> Vec<PostData> {
    // a post page is an array: the post listing, then its comment listing
    if let Some(listings) = content.as_array() {
        return listings.iter().flat_map(reddit_posts).collect();
    }
    let listing = match Listing::deserialize(content) {
        Ok(listing) => listing,
        Err(_) => return Vec::new(),
    };
    listing
        .data
        .children
        .into_iter()
        .filter(|thing| thing.kind == "t3")
        .filter_map(|thing| thing.data)
        .collect()
}

fn reddit_content(
    post: PostData,
    scraped_at: DateTime<Utc>,
    scorer: &EngagementScorer,
) -> ViralContent {
    let upvotes = non_negative(post.ups);
    let metrics = EngagementMetrics {
        upvotes,
        downvotes: non_negative(post.downs),
        comments: non_negative(post.num_comments),
        views: upvotes.saturating_mul(REDDIT_VIEWS_PER_UPVOTE),
        ..Default::default()
    };
    let viral_score = scorer.score(&metrics);

    let published_date = post
        .created_utc
        .filter(|secs| *secs > 0.0)
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs as i64, 0))
        .unwrap_or(scraped_at);

    ViralContent {
        id: Uuid::new_v4().to_string(),
        title: post.title.unwrap_or_else(|| "No title".to_string()),
        platform: Platform::Reddit,
        content_type: ContentType::Post,
        url: format!("https://reddit.com{}", post.permalink.unwrap_or_default()),
        content_text: post.selftext.unwrap_or_default(),
        author: post.author.unwrap_or_else(|| "Unknown".to_string()),
        published_date: Some(published_date),
        scraped_date: scraped_at,
        engagement_metrics: metrics,
        viral_score,
        tags: vec![post.subreddit.unwrap_or_else(|| "reddit".to_string())],
        thumbnail_url: post.thumbnail.unwrap_or_default(),
    }
}

fn non_negative(value: Option<i64>) -> u64 {
    value.unwrap_or(0).max(0) as u64
}
