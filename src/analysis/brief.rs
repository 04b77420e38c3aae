use chrono::Utc;
use uuid::Uuid;

use crate::analysis::tables::{
    call_to_actions_for, contains_any, content_angles_for, lookup, outline_for, AUDIENCE_RULES,
    BRIEF_TITLE_CHARS, BRIEF_TITLE_PREFIX, DEFAULT_EMOTION, ENGAGEMENT_MULTIPLIER_RANGE,
    FALLBACK_AFFILIATE_PRODUCTS, FALLBACK_AUDIENCE, FALLBACK_TOPICS, MAX_AFFILIATE_PRODUCTS,
    PRODUCTS_PER_OPPORTUNITY, TRENDING_TOPICS,
};
use crate::analysis::Variation;
use crate::{AffiliateOpportunity, ContentAnalysis, ContentBrief, ViralContent};

pub struct TitleWords<'a> {
    pub lowercase: &'a str,
    pub words: Vec<&'a str>,
}

impl<'a> TitleWords<'a> {
    pub fn new(lowercase: &'a str) -> Self {
        Self {
            lowercase,
            words: lowercase.split_whitespace().collect(),
        }
    }

    fn word(&self, index: usize, fallback: &str) -> String {
        self.words
            .get(index)
            .map(|word| word.to_string())
            .unwrap_or_else(|| fallback.to_string())
    }

    fn span(&self, start: usize, end: usize, min_len: usize, fallback: &str) -> String {
        if self.words.len() > min_len {
            let end = end.min(self.words.len());
            self.words[start..end].join(" ")
        } else {
            fallback.to_string()
        }
    }

    fn replaced(&self, from: &str, to: &str) -> String {
        self.lowercase.replace(from, to)
    }
}

pub type HookTemplate = fn(&TitleWords) -> String;

pub const HOOK_TEMPLATES: &[(&str, [HookTemplate; 3])] = &[
    (
        "curiosity",
        [
            |t| format!("What if I told you {}?", t.replaced("how", "there's a way")),
            |t| {
                let fragment = if t.words.len() > 3 {
                    t.words[1..4].join(" ")
                } else {
                    t.words.join(" ")
                };
                format!("The secret behind {}", fragment)
            },
            |t| {
                format!(
                    "You won't believe what happened when I tried {}",
                    t.span(1, 3, 2, "this method")
                )
            },
        ],
    ),
    (
        "excitement",
        [
            |t| format!("This {} will blow your mind!", t.word(1, "method")),
            |t| format!("BREAKTHROUGH: {}", t.replaced("how", "new way")),
            |t| {
                format!(
                    "The {} discovery everyone's talking about",
                    t.span(1, 3, 2, "amazing")
                )
            },
        ],
    ),
    (
        "fear",
        [
            |t| format!("WARNING: Avoid these {}", t.span(1, 3, 2, "mistakes")),
            |t| format!("Don't make this {} mistake", t.word(1, "common")),
            |t| {
                format!(
                    "Why {} fail (and how to avoid it)",
                    t.replaced("how", "most people")
                )
            },
        ],
    ),
];

pub fn compose(
    content: &ViralContent,
    analysis: &ContentAnalysis,
    variation: &mut Variation,
) -> ContentBrief {
    let title_lower = content.title.to_lowercase();
    let platform_key = content.platform.label();

    ContentBrief {
        id: Uuid::new_v4().to_string(),
        original_content_id: content.id.clone(),
        title: brief_title(&content.title),
        hook_suggestions: hook_suggestions(&analysis.viral_patterns.emotional_trigger, &title_lower),
        content_angles: content_angles(platform_key),
        target_audience: target_audience(&analysis.affiliate_opportunities).to_string(),
        call_to_actions: call_to_actions(platform_key),
        affiliate_products: affiliate_products(&analysis.affiliate_opportunities),
        content_outline: outline_for(&analysis.viral_patterns.content_structure)
            .iter()
            .map(|step| step.to_string())
            .collect(),
        trending_topics: trending_topics(&title_lower),
        estimated_engagement: content.viral_score * variation.uniform(ENGAGEMENT_MULTIPLIER_RANGE),
        generated_date: Utc::now(),
    }
}

pub fn brief_title(title: &str) -> String {
    let truncated: String = title.chars().take(BRIEF_TITLE_CHARS).collect();
    let ellipsis = if title.chars().count() > BRIEF_TITLE_CHARS {
        "..."
    } else {
        ""
    };
    format!("{}{}{}", BRIEF_TITLE_PREFIX, truncated, ellipsis)
}

pub fn hook_suggestions(emotional_trigger: &str, title_lower: &str) -> Vec<String> {
    let templates = lookup(HOOK_TEMPLATES, emotional_trigger)
        .or_else(|| lookup(HOOK_TEMPLATES, DEFAULT_EMOTION))
        .unwrap_or(&HOOK_TEMPLATES[0].1);
    let words = TitleWords::new(title_lower);

    templates
        .iter()
        .map(|template| template(&words).trim().to_string())
        .collect()
}

pub fn content_angles(platform_key: &str) -> Vec<String> {
    content_angles_for(platform_key)
        .iter()
        .map(|angle| angle.to_string())
        .collect()
}

pub fn call_to_actions(platform_key: &str) -> Vec<String> {
    call_to_actions_for(platform_key)
        .iter()
        .map(|cta| cta.to_string())
        .collect()
}

pub fn target_audience(opportunities: &[AffiliateOpportunity]) -> &'static str {
    AUDIENCE_RULES
        .iter()
        .find(|rule| {
            opportunities.iter().any(|opportunity| {
                opportunity
                    .product_category
                    .to_lowercase()
                    .contains(rule.category_match)
            })
        })
        .map(|rule| rule.audience)
        .unwrap_or(FALLBACK_AUDIENCE)
}

pub fn affiliate_products(opportunities: &[AffiliateOpportunity]) -> Vec<String> {
    let products: Vec<String> = opportunities
        .iter()
        .flat_map(|opportunity| {
            opportunity
                .recommended_products
                .iter()
                .take(PRODUCTS_PER_OPPORTUNITY)
                .cloned()
        })
        .take(MAX_AFFILIATE_PRODUCTS)
        .collect();

    if products.is_empty() {
        FALLBACK_AFFILIATE_PRODUCTS
            .iter()
            .map(|product| product.to_string())
            .collect()
    } else {
        products
    }
}

pub fn trending_topics(title_lower: &str) -> Vec<String> {
    let topics = TRENDING_TOPICS
        .iter()
        .find(|rule| contains_any(title_lower, rule.keywords))
        .map(|rule| rule.topics)
        .unwrap_or(FALLBACK_TOPICS);

    topics.iter().map(|topic| topic.to_string()).collect()
}
