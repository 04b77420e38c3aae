use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::SchedulerConfig;
use crate::ingest::Ingestor;
use crate::{Platform, ScrapingRequest};

pub fn scheduled_request(config: &SchedulerConfig) -> ScrapingRequest {
    let platforms = config
        .platforms
        .iter()
        .filter_map(|name| {
            let platform = Platform::parse(name);
            if platform.is_none() {
                tracing::warn!(platform = %name, "ignoring unknown scheduler platform");
            }
            platform
        })
        .collect();

    ScrapingRequest {
        platforms,
        keywords: config.keywords.clone(),
        limit: config.limit,
        time_range: config.time_range.clone(),
        reddit_subreddit: None,
    }
}

pub fn spawn(ingestor: Ingestor, config: &SchedulerConfig) -> Option<JoinHandle<()>> {
    if !config.enabled {
        tracing::info!("scheduled scraping disabled");
        return None;
    }

    let request = scheduled_request(config);
    if request.platforms.is_empty() {
        tracing::warn!("scheduler has no valid platforms; not starting");
        return None;
    }

    let period = Duration::from_secs(config.interval_secs.max(1));
    tracing::info!(interval_secs = period.as_secs(), platforms = ?request.platforms, "scheduler started");

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // interval yields immediately on the first tick
        ticker.tick().await;

        loop {
            ticker.tick().await;
            tracing::info!("running scheduled scrape");
            match ingestor.scrape_trending(&request).await {
                Ok(contents) => {
                    tracing::info!(count = contents.len(), "scheduled scrape finished")
                }
                Err(err) => tracing::error!(error = %err, "scheduled scrape failed"),
            }
        }
    }))
}
