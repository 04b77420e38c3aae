use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::api::{
    AiQuery, AnalysisResponse, ApiError, BriefResponse, ContentQuery, RootMessage, SearchQuery,
    StatusMessage, TopQuery,
};
use viral_analyzer::ingest::Ingestor;
use viral_analyzer::llm::{self, LlmClient};
use viral_analyzer::store::ContentStore;
use viral_analyzer::{Analyzer, Platform, ScrapingRequest, ScrapingResponse, ViralContent};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ContentStore>,
    pub ingestor: Ingestor,
    pub analyzer: Analyzer,
    pub llm_client: Option<LlmClient>,
}

pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/scrape", post(scrape_handler))
        .route("/content", get(list_handler))
        .route("/content/platform/:platform", get(platform_handler))
        .route("/content/search", get(search_handler))
        .route("/content/top", get(top_handler))
        .route("/analyze/:content_id", post(analyze_handler))
        .route("/generate-brief/:content_id", post(brief_handler))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

pub async fn serve(state: AppState, host: &str, port: u16, allowed_origins: &[String]) -> Result<(), String> {
    let app = build_app(state, allowed_origins);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind server: {}", err))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal, starting graceful shutdown");
}

async fn root() -> Json<RootMessage> {
    Json(RootMessage {
        message: "Viral Content Analyzer API",
        status: "active",
    })
}

async fn health() -> Json<StatusMessage> {
    Json(StatusMessage {
        status: "healthy",
        message: "API is running",
    })
}

async fn scrape_handler(
    State(state): State<AppState>,
    Json(request): Json<ScrapingRequest>,
) -> Result<Json<ScrapingResponse>, ApiError> {
    let contents = state
        .ingestor
        .scrape_trending(&request)
        .await
        .map_err(|err| ApiError::internal(format!("Scraping failed: {}", err)))?;

    Ok(Json(ScrapingResponse {
        success: true,
        content_count: contents.len(),
        message: format!("Successfully scraped {} contents", contents.len()),
        contents,
    }))
}

async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Json<Vec<ViralContent>> {
    Json(query.apply(state.store.all().await))
}

async fn platform_handler(
    State(state): State<AppState>,
    Path(platform): Path<String>,
) -> Result<Json<Vec<ViralContent>>, ApiError> {
    let platform = Platform::parse(&platform)
        .ok_or_else(|| ApiError::bad_request(format!("Invalid platform: {}", platform)))?;
    Ok(Json(state.store.by_platform(platform).await))
}

async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ViralContent>>, ApiError> {
    if query.q.trim().is_empty() {
        return Err(ApiError::bad_request("Search query cannot be empty"));
    }
    Ok(Json(state.store.search(&query.q).await))
}

async fn top_handler(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> Result<Json<Vec<ViralContent>>, ApiError> {
    let limit = query.validated_limit()?;
    Ok(Json(state.store.top(limit).await))
}

async fn find_content(state: &AppState, content_id: &str) -> Result<ViralContent, ApiError> {
    state
        .store
        .get(content_id)
        .await
        .ok_or_else(|| ApiError::not_found("Content not found"))
}

async fn analyze_handler(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
    Query(query): Query<AiQuery>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let content = find_content(&state, &content_id).await?;
    let heuristic = state.analyzer.analyze(&content);

    let (analysis, warnings) = if query.use_ai.unwrap_or(false) {
        llm::enhance_analysis(state.llm_client.as_ref(), &content, heuristic).await
    } else {
        (heuristic, Vec::new())
    };

    Ok(Json(AnalysisResponse { analysis, warnings }))
}

async fn brief_handler(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
    Query(query): Query<AiQuery>,
) -> Result<Json<BriefResponse>, ApiError> {
    let content = find_content(&state, &content_id).await?;
    let use_ai = query.use_ai.unwrap_or(false);
    let mut warnings = Vec::new();

    let mut analysis = state.analyzer.analyze(&content);
    if use_ai {
        let (enhanced, analysis_warnings) =
            llm::enhance_analysis(state.llm_client.as_ref(), &content, analysis).await;
        analysis = enhanced;
        warnings.extend(analysis_warnings);
    }

    let mut brief = state.analyzer.brief(&content, &analysis);
    if use_ai {
        let (enhanced, brief_warnings) =
            llm::enhance_brief(state.llm_client.as_ref(), &content, &analysis, brief).await;
        brief = enhanced;
        warnings.extend(brief_warnings);
    }

    Ok(Json(BriefResponse { brief, warnings }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use std::time::Duration;
    use tower::ServiceExt;
    use viral_analyzer::scraper::ScraperClient;
    use viral_analyzer::{ContentType, EngagementMetrics, EngagementScorer};

    fn sample(id: &str, title: &str, platform: Platform, score: f64) -> ViralContent {
        ViralContent {
            id: id.to_string(),
            title: title.to_string(),
            platform,
            content_type: ContentType::Post,
            url: format!("https://example.com/{}", id),
            content_text: String::new(),
            author: "someone".to_string(),
            published_date: None,
            scraped_date: Utc::now(),
            engagement_metrics: EngagementMetrics::default(),
            viral_score: score,
            tags: vec!["tag".to_string()],
            thumbnail_url: String::new(),
        }
    }

    async fn test_app(dir: &tempfile::TempDir) -> Router {
        let store = Arc::new(
            ContentStore::load(dir.path().join("store.json"))
                .await
                .unwrap(),
        );
        store
            .merge(vec![
                sample("r1", "How I Made $10,000 With AI Tools?", Platform::Reddit, 85.0),
                sample("g1", "Gardening basics", Platform::Google, 20.0),
            ])
            .await
            .unwrap();

        let scraper = ScraperClient::new(
            "http://127.0.0.1:9/scrape".to_string(),
            None,
            Duration::from_millis(200),
            "en".to_string(),
        )
        .unwrap();
        let ingestor = Ingestor::new(
            scraper,
            Arc::clone(&store),
            EngagementScorer::default(),
            "programming".to_string(),
        );
        let state = AppState {
            store,
            ingestor,
            analyzer: Analyzer::default(),
            llm_client: None,
        };
        build_app(state, &["http://localhost:3000".to_string()])
    }

    async fn call(app: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn health_and_root() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = call(test_app(&dir).await, "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (_, body) = call(test_app(&dir).await, "GET", "/").await;
        assert_eq!(body["message"], "Viral Content Analyzer API");
    }

    #[tokio::test]
    async fn content_filters() {
        let dir = tempfile::tempdir().unwrap();
        let (_, body) = call(test_app(&dir).await, "GET", "/content?platform=all").await;
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (_, body) = call(test_app(&dir).await, "GET", "/content?min_viral_score=50").await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (_, body) = call(test_app(&dir).await, "GET", "/content?platform=tiktok").await;
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, _) = call(test_app(&dir).await, "GET", "/content/platform/tiktok").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_and_top_validation() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = call(test_app(&dir).await, "GET", "/content/search?q=%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Search query cannot be empty");

        let (status, _) = call(test_app(&dir).await, "GET", "/content/top?limit=101").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(test_app(&dir).await, "GET", "/content/top?limit=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "r1");
    }

    #[tokio::test]
    async fn analyze_and_brief() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _) = call(test_app(&dir).await, "POST", "/analyze/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = call(test_app(&dir).await, "POST", "/analyze/r1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content_id"], "r1");
        assert_eq!(body["viral_patterns"]["emotional_trigger"], "curiosity");
        assert!(body.get("warnings").is_none());

        let (status, body) = call(test_app(&dir).await, "POST", "/generate-brief/r1?use_ai=true").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["original_content_id"], "r1");
        assert_eq!(body["hook_suggestions"].as_array().unwrap().len(), 3);
        assert_eq!(body["warnings"].as_array().unwrap().len(), 2);
    }
}
