use crate::analysis::tables::{
    contains_any, OpportunityRule, ADAPT_CODE, ADAPT_COMMUNITY, ADAPT_PERSONAL, ADAPT_VIDEO,
    DISCUSSION_COMMENT_THRESHOLD, FACTOR_DISCUSSION, FACTOR_FILLER, FACTOR_MONEY, FACTOR_TECH,
    FACTOR_VALUE, FALLBACK_OPPORTUNITY, HIGH_ENGAGEMENT_THRESHOLD, INSIGHT_COMMUNITY,
    INSIGHT_CURIOSITY_GAP, INSIGHT_FILLER, INSIGHT_HIGH_ENGAGEMENT, INSIGHT_STRONG_HOOK,
    INSIGHT_VISUAL, LIST_LEN, MONEY_FACTOR_KEYWORDS, OPPORTUNITY_RULES, STRONG_HOOK_THRESHOLD,
    TECH_FACTOR_KEYWORDS,
};
use crate::{AffiliateOpportunity, Platform, ViralContent, ViralPattern};

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedInsights {
    pub key_insights: Vec<String>,
    pub success_factors: Vec<String>,
    pub recommended_adaptations: Vec<String>,
    pub affiliate_opportunities: Vec<AffiliateOpportunity>,
}

pub fn generate(content: &ViralContent, pattern: &ViralPattern) -> GeneratedInsights {
    let title = content.title.to_lowercase();

    GeneratedInsights {
        key_insights: key_insights(content, pattern),
        success_factors: success_factors(content, &title),
        recommended_adaptations: adaptations(content.platform, &title),
        affiliate_opportunities: affiliate_opportunities(&title),
    }
}

fn key_insights(content: &ViralContent, pattern: &ViralPattern) -> Vec<String> {
    let mut insights = Vec::new();
    if pattern.hook_strength > STRONG_HOOK_THRESHOLD {
        insights.push(INSIGHT_STRONG_HOOK);
    }
    if content.viral_score > HIGH_ENGAGEMENT_THRESHOLD {
        insights.push(INSIGHT_HIGH_ENGAGEMENT);
    }
    if pattern.emotional_trigger == "curiosity" {
        insights.push(INSIGHT_CURIOSITY_GAP);
    }
    match content.platform {
        Platform::Reddit => insights.push(INSIGHT_COMMUNITY),
        Platform::Youtube => insights.push(INSIGHT_VISUAL),
        Platform::Google | Platform::Bing => {}
    }

    fit_to_len(insights, INSIGHT_FILLER)
}

fn success_factors(content: &ViralContent, title: &str) -> Vec<String> {
    let mut factors = Vec::new();
    if contains_any(title, TECH_FACTOR_KEYWORDS) {
        factors.push(FACTOR_TECH);
    }
    if contains_any(title, MONEY_FACTOR_KEYWORDS) {
        factors.push(FACTOR_MONEY);
    }
    factors.push(FACTOR_VALUE);
    if content.engagement_metrics.comments > DISCUSSION_COMMENT_THRESHOLD {
        factors.push(FACTOR_DISCUSSION);
    }

    fit_to_len(factors, FACTOR_FILLER)
}

fn adaptations(platform: Platform, title: &str) -> Vec<String> {
    let mut adaptations = Vec::new();
    if platform != Platform::Youtube {
        adaptations.push(ADAPT_VIDEO);
    }
    if platform != Platform::Reddit {
        adaptations.push(ADAPT_COMMUNITY);
    }
    adaptations.push(ADAPT_PERSONAL);
    if title.contains("programming") {
        adaptations.push(ADAPT_CODE);
    }

    adaptations
        .into_iter()
        .take(LIST_LEN)
        .map(str::to_string)
        .collect()
}

pub fn affiliate_opportunities(title: &str) -> Vec<AffiliateOpportunity> {
    let mut opportunities: Vec<AffiliateOpportunity> = OPPORTUNITY_RULES
        .iter()
        .filter(|rule| contains_any(title, rule.keywords))
        .map(opportunity_from_rule)
        .collect();

    if opportunities.is_empty() {
        opportunities.push(opportunity_from_rule(&FALLBACK_OPPORTUNITY));
    }
    opportunities
}

fn opportunity_from_rule(rule: &OpportunityRule) -> AffiliateOpportunity {
    AffiliateOpportunity {
        product_category: rule.category.to_string(),
        monetization_angle: rule.angle.to_string(),
        target_audience: rule.audience.to_string(),
        commission_potential: rule.commission.to_string(),
        recommended_products: rule.products.iter().map(|p| p.to_string()).collect(),
    }
}

pub(crate) fn fit_to_len<S: AsRef<str>>(items: Vec<S>, filler: &str) -> Vec<String> {
    let mut fitted: Vec<String> = items
        .into_iter()
        .take(LIST_LEN)
        .map(|item| item.as_ref().to_string())
        .collect();
    while fitted.len() < LIST_LEN {
        fitted.push(filler.to_string());
    }
    fitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::content;

    fn pattern(hook_strength: f64, trigger: &str) -> ViralPattern {
        ViralPattern {
            hook_strength,
            emotional_trigger: trigger.to_string(),
            content_structure: "standard".to_string(),
            timing_factor: 7.0,
            audience_appeal: "broad appeal".to_string(),
        }
    }

    #[test]
    fn insights_pad_with_filler() {
        let item = content("Quiet news", Platform::Google, 10.0);
        let generated = generate(&item, &pattern(5.0, "fear"));
        assert_eq!(
            generated.key_insights,
            vec![INSIGHT_FILLER, INSIGHT_FILLER, INSIGHT_FILLER]
        );
    }

    #[test]
    fn insights_truncate_in_rule_order() {
        let item = content("How to win", Platform::Reddit, 90.0);
        let generated = generate(&item, &pattern(9.0, "curiosity"));
        assert_eq!(
            generated.key_insights,
            vec![INSIGHT_STRONG_HOOK, INSIGHT_HIGH_ENGAGEMENT, INSIGHT_CURIOSITY_GAP]
        );
    }

    #[test]
    fn success_factors_always_three() {
        let quiet = content("Cats", Platform::Bing, 0.0);
        let factors = generate(&quiet, &pattern(5.0, "curiosity")).success_factors;
        assert_eq!(factors, vec![FACTOR_VALUE, FACTOR_FILLER, FACTOR_FILLER]);

        let mut busy = content("AI business programming", Platform::Bing, 0.0);
        busy.engagement_metrics.comments = 500;
        let factors = generate(&busy, &pattern(5.0, "curiosity")).success_factors;
        assert_eq!(factors, vec![FACTOR_TECH, FACTOR_MONEY, FACTOR_VALUE]);
    }

    #[test]
    fn discussion_factor_needs_over_hundred_comments() {
        let mut item = content("Cats", Platform::Bing, 0.0);
        item.engagement_metrics.comments = 101;
        let factors = generate(&item, &pattern(5.0, "curiosity")).success_factors;
        assert_eq!(factors[1], FACTOR_DISCUSSION);
    }

    #[test]
    fn adaptations_complement_platform_and_cap() {
        let reddit = content("programming tricks", Platform::Reddit, 0.0);
        assert_eq!(
            generate(&reddit, &pattern(5.0, "curiosity")).recommended_adaptations,
            vec![ADAPT_VIDEO, ADAPT_PERSONAL, ADAPT_CODE]
        );

        let google = content("programming tricks", Platform::Google, 0.0);
        let adaptations = generate(&google, &pattern(5.0, "curiosity")).recommended_adaptations;
        assert_eq!(adaptations, vec![ADAPT_VIDEO, ADAPT_COMMUNITY, ADAPT_PERSONAL]);

        let youtube = content("cats", Platform::Youtube, 0.0);
        let adaptations = generate(&youtube, &pattern(5.0, "curiosity")).recommended_adaptations;
        assert_eq!(adaptations, vec![ADAPT_COMMUNITY, ADAPT_PERSONAL]);
    }

    #[test]
    fn opportunities_fire_independently() {
        let opportunities = affiliate_opportunities("programming for business");
        let categories: Vec<&str> = opportunities
            .iter()
            .map(|o| o.product_category.as_str())
            .collect();
        assert_eq!(categories, vec!["programming tools", "business tools"]);
        assert_eq!(opportunities[0].commission_potential, "high");
        assert_eq!(opportunities[1].commission_potential, "medium");
    }

    #[test]
    fn no_keywords_yields_general_productivity() {
        let opportunities = affiliate_opportunities("cute cats sleeping");
        assert_eq!(opportunities.len(), 1);
        assert_eq!(opportunities[0].product_category, "general productivity");
        assert_eq!(
            opportunities[0].recommended_products,
            vec!["productivity apps", "online courses", "digital tools"]
        );
    }
}
