use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::analysis::tables::LIST_LEN;
use crate::error::{Error, Result};
use crate::{ContentAnalysis, ContentBrief, ViralContent};

const CONTENT_EXCERPT_CHARS: usize = 500;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisText {
    pub key_insights: Vec<String>,
    pub success_factors: Vec<String>,
    pub recommended_adaptations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BriefText {
    pub hook_suggestions: Vec<String>,
    pub content_angles: Vec<String>,
    pub call_to_actions: Vec<String>,
    pub target_audience: Option<String>,
}

#[derive(Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl LlmClient {
    pub fn from_env(model_override: Option<String>) -> Option<Self> {
        let api_key = env::var("LLM_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty())?;
        let api_base =
            env::var("LLM_API_BASE").unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let model = model_override
            .or_else(|| env::var("LLM_MODEL").ok())
            .unwrap_or_else(|| "gpt-3.5-turbo".to_string());
        Self::new(api_key, api_base, model).ok()
    }

    pub fn new(api_key: String, api_base: String, model: String) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            api_base,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn analysis_text(
        &self,
        content: &ViralContent,
        heuristic: &ContentAnalysis,
    ) -> Result<AnalysisText> {
        let raw = self
            .complete(analysis_system_prompt(), analysis_prompt(content, heuristic), 0.7)
            .await?;
        parse_reply(&raw)
    }

    pub async fn brief_text(
        &self,
        content: &ViralContent,
        analysis: &ContentAnalysis,
    ) -> Result<BriefText> {
        let raw = self
            .complete(brief_system_prompt(), brief_prompt(content, analysis), 0.8)
            .await?;
        parse_reply(&raw)
    }

    async fn complete(&self, system: &str, user: String, temperature: f64) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let request = ChatRequest {
            model: self.model.clone(),
            temperature,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UnexpectedStatus {
                service: "llm",
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .first()
            .ok_or(Error::MissingField {
                service: "llm",
                what: "choices",
            })?
            .message
            .content
            .trim()
            .to_string();
        Ok(content)
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

fn parse_reply<T: for<'de> Deserialize<'de>>(raw: &str) -> Result<T> {
    let json = extract_json(raw).ok_or(Error::MissingField {
        service: "llm",
        what: "JSON object",
    })?;
    serde_json::from_str(json).map_err(|err| Error::json("llm reply", err))
}

fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start >= end {
        return None;
    }
    Some(&text[start..=end])
}

fn analysis_system_prompt() -> &'static str {
    r#"You are a viral content strategist and affiliate marketing expert.
Return a single JSON object with these fields:
- key_insights (array of 3 short strings explaining why the content works)
- success_factors (array of 3 short strings)
- recommended_adaptations (array of up to 3 short, actionable strings)
Rules:
- Output JSON only, no markdown or commentary.
"#
}

fn brief_system_prompt() -> &'static str {
    r#"You are a content marketing strategist specializing in viral content and affiliate marketing.
Return a single JSON object with these fields:
- hook_suggestions (array of 3 hook variations leveraging the emotional trigger)
- content_angles (array of 3 content angles)
- call_to_actions (array of 3 platform-optimized calls to action)
- target_audience (one sentence)
Rules:
- Output JSON only, no markdown or commentary.
"#
}

fn analysis_prompt(content: &ViralContent, heuristic: &ContentAnalysis) -> String {
    let excerpt: String = content.content_text.chars().take(CONTENT_EXCERPT_CHARS).collect();
    let metrics = &content.engagement_metrics;
    format!(
        "Title: {}\nPlatform: {}\nContent: {}\nEngagement: views {}, likes {}, comments {}\nViral score: {:.1}\nHook strength: {:.1}/10\nEmotional trigger: {}",
        content.title,
        content.platform,
        excerpt,
        metrics.views,
        metrics.likes,
        metrics.comments,
        content.viral_score,
        heuristic.viral_patterns.hook_strength,
        heuristic.viral_patterns.emotional_trigger,
    )
}

fn brief_prompt(content: &ViralContent, analysis: &ContentAnalysis) -> String {
    let categories: Vec<&str> = analysis
        .affiliate_opportunities
        .iter()
        .map(|opportunity| opportunity.product_category.as_str())
        .collect();
    format!(
        "Original title: {}\nPlatform: {}\nSuccess factors: {}\nAffiliate categories: {}\nEmotional trigger: {}\nHook strength: {:.1}/10",
        content.title,
        content.platform,
        analysis.success_factors.join("; "),
        categories.join(", "),
        analysis.viral_patterns.emotional_trigger,
        analysis.viral_patterns.hook_strength,
    )
}

fn blend_list(primary: Vec<String>, fallback: &[String], len: usize) -> Vec<String> {
    let mut blended: Vec<String> = Vec::with_capacity(len);
    let cleaned = primary
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty());
    for item in cleaned.chain(fallback.iter().cloned()) {
        if blended.len() == len {
            break;
        }
        if !blended.contains(&item) {
            blended.push(item);
        }
    }
    // Fallback lists may repeat a filler entry; keep the heuristic length.
    let mut spare = fallback.iter();
    while blended.len() < len.min(fallback.len()) {
        match spare.next() {
            Some(item) => blended.push(item.clone()),
            None => break,
        }
    }
    blended
}

pub fn apply_analysis_text(mut analysis: ContentAnalysis, text: AnalysisText) -> ContentAnalysis {
    analysis.key_insights = blend_list(text.key_insights, &analysis.key_insights, LIST_LEN);
    analysis.success_factors = blend_list(text.success_factors, &analysis.success_factors, LIST_LEN);
    if text.recommended_adaptations.iter().any(|a| !a.trim().is_empty()) {
        analysis.recommended_adaptations = blend_list(text.recommended_adaptations, &[], LIST_LEN);
    }
    analysis
}

pub fn apply_brief_text(mut brief: ContentBrief, text: BriefText) -> ContentBrief {
    brief.hook_suggestions = blend_list(text.hook_suggestions, &brief.hook_suggestions, LIST_LEN);
    brief.content_angles = blend_list(text.content_angles, &brief.content_angles, LIST_LEN);
    brief.call_to_actions = blend_list(text.call_to_actions, &brief.call_to_actions, LIST_LEN);
    if let Some(audience) = text.target_audience.filter(|a| !a.trim().is_empty()) {
        brief.target_audience = audience.trim().to_string();
    }
    brief
}

pub async fn enhance_analysis(
    client: Option<&LlmClient>,
    content: &ViralContent,
    heuristic: ContentAnalysis,
) -> (ContentAnalysis, Vec<String>) {
    let Some(client) = client else {
        return (
            heuristic,
            vec!["AI analysis not configured: set LLM_API_KEY".to_string()],
        );
    };
    match client.analysis_text(content, &heuristic).await {
        Ok(text) => (apply_analysis_text(heuristic, text), Vec::new()),
        Err(err) => {
            tracing::warn!(content_id = %content.id, error = %err, "AI analysis failed, using heuristic result");
            (heuristic, vec![format!("AI analysis failed: {}", err)])
        }
    }
}

pub async fn enhance_brief(
    client: Option<&LlmClient>,
    content: &ViralContent,
    analysis: &ContentAnalysis,
    heuristic: ContentBrief,
) -> (ContentBrief, Vec<String>) {
    let Some(client) = client else {
        return (
            heuristic,
            vec!["AI brief not configured: set LLM_API_KEY".to_string()],
        );
    };
    match client.brief_text(content, analysis).await {
        Ok(text) => (apply_brief_text(heuristic, text), Vec::new()),
        Err(err) => {
            tracing::warn!(content_id = %content.id, error = %err, "AI brief failed, using heuristic result");
            (heuristic, vec![format!("AI brief failed: {}", err)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn extract_json_strips_fences() {
        let raw = "```json\n{\"key_insights\": [\"a\"]}\n```";
        let text: AnalysisText = parse_reply(raw).unwrap();
        assert_eq!(text.key_insights, vec!["a"]);
        assert!(text.success_factors.is_empty());
        assert!(parse_reply::<AnalysisText>("no json here").is_err());
    }

    #[test]
    fn blend_pads_from_fallback_without_duplicates() {
        let blended = blend_list(
            strings(&["  fresh  ", "", "shared"]),
            &strings(&["shared", "old one", "old two"]),
            3,
        );
        assert_eq!(blended, vec!["fresh", "shared", "old one"]);

        let truncated = blend_list(strings(&["a", "b", "c", "d"]), &[], 3);
        assert_eq!(truncated, vec!["a", "b", "c"]);
    }

    #[test]
    fn blend_keeps_length_when_fallback_repeats_filler() {
        let filler = strings(&["Engaging content approach"; 3]);
        let blended = blend_list(strings(&["new insight"]), &filler, 3);
        assert_eq!(
            blended,
            vec!["new insight", "Engaging content approach", "Engaging content approach"]
        );
    }
}
