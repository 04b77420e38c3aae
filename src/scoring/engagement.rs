use serde::{Deserialize, Serialize};

use crate::EngagementMetrics;

pub const MAX_VIRAL_SCORE: f64 = 100.0;

const NO_VIEWS_DIVISOR: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementWeights {
    pub views: f64,
    pub likes: f64,
    pub comments: f64,
    pub shares: f64,
    pub upvotes: f64,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            views: 0.1,
            likes: 2.0,
            comments: 3.0,
            shares: 5.0,
            upvotes: 2.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngagementScorer {
    weights: EngagementWeights,
}

impl EngagementScorer {
    pub fn new(weights: EngagementWeights) -> Self {
        Self { weights }
    }

    pub fn raw_total(&self, metrics: &EngagementMetrics) -> f64 {
        let mut total = 0.0;

        total += metrics.views as f64 * self.weights.views;
        total += metrics.likes as f64 * self.weights.likes;
        total += metrics.comments as f64 * self.weights.comments;
        total += metrics.shares as f64 * self.weights.shares;
        total += metrics.upvotes as f64 * self.weights.upvotes;

        total
    }

    pub fn score(&self, metrics: &EngagementMetrics) -> f64 {
        let total = self.raw_total(metrics);
        let rate = if metrics.views > 0 {
            total / metrics.views as f64 * 100.0
        } else {
            total / NO_VIEWS_DIVISOR
        };

        rate.clamp(0.0, MAX_VIRAL_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(metrics: &EngagementMetrics) -> f64 {
        EngagementScorer::default().score(metrics)
    }

    #[test]
    fn zero_metrics_score_zero() {
        assert_eq!(score(&EngagementMetrics::default()), 0.0);
    }

    #[test]
    fn no_views_divides_by_thousand() {
        let metrics = EngagementMetrics {
            comments: 100,
            likes: 50,
            ..Default::default()
        };
        // 100*3 + 50*2 = 400
        assert!((score(&metrics) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn rate_relative_to_views() {
        let metrics = EngagementMetrics {
            views: 10_000,
            likes: 100,
            ..Default::default()
        };
        // (1000 + 200) / 10000 * 100 = 12
        assert!((score(&metrics) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn large_totals_cap_at_one_hundred() {
        let metrics = EngagementMetrics {
            shares: 50_000,
            upvotes: 20_000,
            ..Default::default()
        };
        assert_eq!(score(&metrics), MAX_VIRAL_SCORE);

        let with_views = EngagementMetrics {
            views: 100,
            comments: 1_000,
            ..Default::default()
        };
        assert_eq!(score(&with_views), MAX_VIRAL_SCORE);
    }

    #[test]
    fn each_counter_weakly_increases_raw_total() {
        let scorer = EngagementScorer::default();
        let base = EngagementMetrics {
            views: 10,
            likes: 1,
            comments: 1,
            shares: 1,
            upvotes: 1,
            ..Default::default()
        };
        let base_total = scorer.raw_total(&base);

        let bumps: [fn(&mut EngagementMetrics); 6] = [
            |m| m.views += 1,
            |m| m.likes += 1,
            |m| m.comments += 1,
            |m| m.shares += 1,
            |m| m.upvotes += 1,
            |m| m.downvotes += 1,
        ];
        for bump in bumps {
            let mut metrics = base.clone();
            bump(&mut metrics);
            assert!(scorer.raw_total(&metrics) >= base_total);
        }
    }

    #[test]
    fn custom_weights_are_applied() {
        let scorer = EngagementScorer::new(EngagementWeights {
            views: 0.0,
            likes: 0.0,
            comments: 0.0,
            shares: 10.0,
            upvotes: 0.0,
        });
        let metrics = EngagementMetrics {
            shares: 10,
            ..Default::default()
        };
        assert!((scorer.score(&metrics) - 0.1).abs() < 1e-9);
    }
}
