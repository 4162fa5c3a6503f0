use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chistes_core::{DocId, QueryError, SearchEngine};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

const MAX_QUERY_CHARS: usize = 200;
const MAX_TOP: usize = 100;
const SNIPPET_CHARS: usize = 180;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_top")]
    pub top: usize,
}
fn default_top() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    pub top: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub docid: DocId,
    #[serde(rename = "categoria")]
    pub category: String,
    pub snippet: String,
}

#[derive(Serialize)]
pub struct DocResponse {
    pub docid: DocId,
    #[serde(rename = "categoria")]
    pub category: String,
    pub text: String,
}

/// Error surfaced to clients as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed query or out-of-range parameter (400).
    BadRequest(String),
    /// Unknown document id (404).
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        (status, Json(serde_json::json!({ "error": msg }))).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self { ApiError::BadRequest(err.to_string()) }
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
}

/// Routes over an already built engine. `static_dir` holds the web frontend
/// (`index.html` is served at `/`).
pub fn build_app(engine: Arc<SearchEngine>, static_dir: Option<PathBuf>) -> Router {
    let cors = cors_layer(std::env::var("CORS_ALLOW_ORIGIN").ok().as_deref());

    let mut app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler));
    if let Some(dir) = static_dir {
        app = app
            .route_service("/", ServeFile::new(dir.join("index.html")))
            .nest_service("/static", ServeDir::new(dir));
    }
    app.with_state(AppState { engine })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Comma-separated origin allow-list; any origin when unset or nothing in it parses.
fn cors_layer(allowed: Option<&str>) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed
        .into_iter()
        .flat_map(|list| list.split(','))
        .filter_map(|origin| HeaderValue::from_str(origin.trim()).ok())
        .filter(|origin| !origin.is_empty())
        .collect();
    let allow_origin = if origins.is_empty() { AllowOrigin::any() } else { AllowOrigin::list(origins) };
    CorsLayer::new().allow_origin(allow_origin).allow_methods(Any).allow_headers(Any)
}

pub async fn search_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(params) = params?;
    let q_len = params.q.chars().count();
    if q_len == 0 || q_len > MAX_QUERY_CHARS {
        return Err(ApiError::BadRequest(format!("q must be 1 to {MAX_QUERY_CHARS} characters")));
    }
    if params.top == 0 || params.top > MAX_TOP {
        return Err(ApiError::BadRequest(format!("top must be between 1 and {MAX_TOP}")));
    }

    let hits = state.engine.search(&params.q)?;
    let results = hits
        .iter()
        .take(params.top)
        .filter_map(|&id| state.engine.document(id))
        .map(|doc| SearchHit { docid: doc.id, category: doc.category.clone(), snippet: snippet(&doc.text) })
        .collect();

    Ok(Json(SearchResponse { query: params.q, total: hits.len(), top: params.top, results }))
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<DocId>,
) -> Result<Json<DocResponse>, ApiError> {
    let doc = state
        .engine
        .document(doc_id)
        .ok_or_else(|| ApiError::NotFound(format!("document {doc_id} not found")))?;
    Ok(Json(DocResponse { docid: doc.id, category: doc.category.clone(), text: doc.text.clone() }))
}

/// Whole text when short enough, otherwise its head plus `...`, counted in characters.
fn snippet(text: &str) -> String {
    if text.chars().count() <= SNIPPET_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(SNIPPET_CHARS - 3).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_kept() {
        assert_eq!(snippet("hola"), "hola");
        let exact = "ñ".repeat(SNIPPET_CHARS);
        assert_eq!(snippet(&exact), exact);
    }

    #[test]
    fn long_text_is_cut_on_char_boundary() {
        let long = "á".repeat(SNIPPET_CHARS + 1);
        let s = snippet(&long);
        assert_eq!(s.chars().count(), SNIPPET_CHARS);
        assert!(s.ends_with("..."));
    }

    async fn allow_origin_for(allowed: Option<&str>, origin: &str) -> Option<String> {
        use axum::body::Body;
        use axum::http::Request;
        use tower::ServiceExt;

        let app: Router = Router::new().route("/", get(|| async { "ok" })).layer(cors_layer(allowed));
        let req = Request::get("/").header("origin", origin).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        resp.headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn cors_allows_any_origin_by_default() {
        assert_eq!(allow_origin_for(None, "http://a.example").await.as_deref(), Some("*"));
        assert_eq!(allow_origin_for(Some(" , "), "http://a.example").await.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn cors_restricts_to_listed_origins() {
        let list = Some("http://a.example, http://b.example");
        assert_eq!(allow_origin_for(list, "http://b.example").await.as_deref(), Some("http://b.example"));
        assert_eq!(allow_origin_for(list, "http://evil.example").await, None);
    }
}
