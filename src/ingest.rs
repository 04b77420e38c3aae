use futures::future::join_all;
use std::sync::Arc;

use crate::error::Result;
use crate::extract::extract_contents;
use crate::scoring::EngagementScorer;
use crate::scraper::{ScrapeTarget, ScraperClient};
use crate::store::{sort_by_score, ContentStore};
use crate::{Platform, ScrapingRequest, ViralContent};

pub const DEFAULT_KEYWORDS: [&str; 2] = ["trending", "viral"];

#[derive(Clone)]
pub struct Ingestor {
    scraper: ScraperClient,
    store: Arc<ContentStore>,
    scorer: EngagementScorer,
    default_subreddit: String,
}

impl Ingestor {
    pub fn new(
        scraper: ScraperClient,
        store: Arc<ContentStore>,
        scorer: EngagementScorer,
        default_subreddit: String,
    ) -> Self {
        Self {
            scraper,
            store,
            scorer,
            default_subreddit,
        }
    }

    pub fn store(&self) -> &Arc<ContentStore> {
        &self.store
    }

    pub fn targets_for(&self, platform: Platform, request: &ScrapingRequest) -> Vec<ScrapeTarget> {
        let keywords: Vec<String> = if request.keywords.is_empty() {
            DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
        } else {
            request.keywords.clone()
        };

        match platform {
            Platform::Reddit => {
                let subreddit = request
                    .reddit_subreddit
                    .clone()
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| self.default_subreddit.clone());
                vec![ScrapeTarget::RedditSubreddit { subreddit }]
            }
            Platform::Google => keywords
                .into_iter()
                .map(|query| ScrapeTarget::GoogleSearch {
                    query,
                    limit: request.limit,
                })
                .collect(),
            Platform::Bing => keywords
                .into_iter()
                .map(|query| ScrapeTarget::BingSearch {
                    query,
                    limit: request.limit,
                })
                .collect(),
            Platform::Youtube => keywords
                .into_iter()
                .map(|query| ScrapeTarget::YoutubeTranscript { query })
                .collect(),
        }
    }

    pub async fn scrape_trending(&self, request: &ScrapingRequest) -> Result<Vec<ViralContent>> {
        tracing::info!(
            platforms = ?request.platforms,
            keywords = ?request.keywords,
            limit = request.limit,
            "starting scrape"
        );

        let runs = request
            .platforms
            .iter()
            .map(|platform| self.scrape_platform(*platform, request));
        let per_platform = join_all(runs).await;

        let mut contents: Vec<ViralContent> = Vec::new();
        let mut successful = 0usize;
        for (platform, result) in request.platforms.iter().zip(per_platform) {
            let platform_contents = match result {
                Ok(platform_contents) => platform_contents,
                Err(err) => {
                    tracing::error!(%platform, error = %err, "scrape failed, skipping platform");
                    continue;
                }
            };
            if platform_contents.is_empty() {
                tracing::info!(%platform, "no content from platform, skipping");
                continue;
            }
            successful += 1;
            contents.extend(platform_contents.into_iter().take(request.limit));
        }

        if successful == 0 {
            tracing::warn!("no successful scrapes");
        }

        sort_by_score(&mut contents);
        self.store.merge(contents.clone()).await?;

        contents.truncate(request.limit);
        Ok(contents)
    }

    pub async fn scrape_post(&self, url: &str) -> Result<Vec<ViralContent>> {
        tracing::info!(url, "scraping reddit post");
        let target = ScrapeTarget::RedditPost {
            url: url.trim().to_string(),
        };
        let body = self.scraper.scrape(&target).await?;

        let mut contents = extract_contents(&body, Platform::Reddit, &self.scorer);
        sort_by_score(&mut contents);
        self.store.merge(contents.clone()).await?;
        Ok(contents)
    }

    async fn scrape_platform(
        &self,
        platform: Platform,
        request: &ScrapingRequest,
    ) -> Result<Vec<ViralContent>> {
        let mut contents = Vec::new();
        for target in self.targets_for(platform, request) {
            tracing::debug!(%platform, scrape_target = target.name(), "scraping");
            let body = self.scraper.scrape(&target).await?;
            contents.extend(extract_contents(&body, platform, &self.scorer));
        }
        Ok(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn ingestor(dir: &tempfile::TempDir) -> Ingestor {
        let scraper = ScraperClient::new(
            "http://127.0.0.1:9/scrape".to_string(),
            None,
            Duration::from_millis(100),
            "en".to_string(),
        )
        .unwrap();
        let store = ContentStore::load(dir.path().join("store.json")).await.unwrap();
        Ingestor::new(
            scraper,
            Arc::new(store),
            EngagementScorer::default(),
            "programming".to_string(),
        )
    }

    #[tokio::test]
    async fn search_platforms_default_to_trending_keywords() {
        let dir = tempfile::tempdir().unwrap();
        let targets = ingestor(&dir)
            .await
            .targets_for(Platform::Google, &ScrapingRequest::default());
        assert_eq!(
            targets,
            vec![
                ScrapeTarget::GoogleSearch {
                    query: "trending".to_string(),
                    limit: 20
                },
                ScrapeTarget::GoogleSearch {
                    query: "viral".to_string(),
                    limit: 20
                },
            ]
        );
    }

    #[tokio::test]
    async fn reddit_uses_requested_or_default_subreddit() {
        let dir = tempfile::tempdir().unwrap();
        let ingestor = ingestor(&dir).await;

        let blank = ScrapingRequest {
            reddit_subreddit: Some("  ".to_string()),
            ..ScrapingRequest::default()
        };
        assert_eq!(
            ingestor.targets_for(Platform::Reddit, &blank),
            vec![ScrapeTarget::RedditSubreddit {
                subreddit: "programming".to_string()
            }]
        );

        let custom = ScrapingRequest {
            reddit_subreddit: Some("rust".to_string()),
            keywords: vec!["ignored".to_string()],
            ..ScrapingRequest::default()
        };
        assert_eq!(
            ingestor.targets_for(Platform::Reddit, &custom),
            vec![ScrapeTarget::RedditSubreddit {
                subreddit: "rust".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn unreachable_backend_yields_empty_run() {
        let dir = tempfile::tempdir().unwrap();
        let ingestor = ingestor(&dir).await;
        let request = ScrapingRequest {
            platforms: vec![Platform::Reddit, Platform::Youtube],
            ..ScrapingRequest::default()
        };
        let contents = ingestor.scrape_trending(&request).await.unwrap();
        assert!(contents.is_empty());
        assert!(ingestor.store().last_updated().await.is_some());
    }
}
