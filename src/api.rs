use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use viral_analyzer::{ContentAnalysis, ContentBrief, Platform, ViralContent};

pub const MAX_TOP_LIMIT: usize = 100;

#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RootMessage {
    pub message: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentQuery {
    pub platform: Option<String>,
    pub min_viral_score: Option<f64>,
}

impl ContentQuery {
    pub fn apply(&self, contents: Vec<ViralContent>) -> Vec<ViralContent> {
        let platform = self
            .platform
            .as_deref()
            .filter(|value| !value.eq_ignore_ascii_case("all"))
            .and_then(Platform::parse);
        let min_score = self.min_viral_score.filter(|score| *score > 0.0);

        contents
            .into_iter()
            .filter(|content| platform.map_or(true, |p| content.platform == p))
            .filter(|content| min_score.map_or(true, |min| content.viral_score >= min))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub limit: Option<usize>,
}

impl TopQuery {
    pub fn validated_limit(&self) -> Result<usize, ApiError> {
        let limit = self.limit.unwrap_or(10);
        if limit == 0 || limit > MAX_TOP_LIMIT {
            return Err(ApiError::bad_request(format!(
                "Limit must be between 1 and {}",
                MAX_TOP_LIMIT
            )));
        }
        Ok(limit)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AiQuery {
    pub use_ai: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    #[serde(flatten)]
    pub analysis: ContentAnalysis,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BriefResponse {
    #[serde(flatten)]
    pub brief: ContentBrief,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
