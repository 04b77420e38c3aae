pub mod brief;
pub mod classifier;
pub mod insights;
pub mod tables;
pub mod variation;

pub use brief::compose;
pub use classifier::classify;
pub use insights::{generate, GeneratedInsights};
pub use variation::{Variation, VariationMode};

use serde::{Deserialize, Serialize};

use crate::{ContentAnalysis, ContentBrief, ViralContent};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub variation: VariationMode,
    pub seed: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            variation: VariationMode::default(),
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, content: &ViralContent) -> ContentAnalysis {
        let mut variation = self.variation("analysis", content);
        analyze(content, &mut variation)
    }

    pub fn brief(&self, content: &ViralContent, analysis: &ContentAnalysis) -> ContentBrief {
        let mut variation = self.variation("brief", content);
        compose(content, analysis, &mut variation)
    }

    fn variation(&self, stage: &str, content: &ViralContent) -> Variation {
        let key = format!("{}:{}", stage, content.id);
        Variation::for_mode(self.config.variation, self.config.seed, &key)
    }
}

pub fn analyze(content: &ViralContent, variation: &mut Variation) -> ContentAnalysis {
    let pattern = classify(content, variation);
    let generated = generate(content, &pattern);

    ContentAnalysis {
        content_id: content.id.clone(),
        viral_patterns: pattern,
        affiliate_opportunities: generated.affiliate_opportunities,
        key_insights: generated.key_insights,
        success_factors: generated.success_factors,
        recommended_adaptations: generated.recommended_adaptations,
    }
}
