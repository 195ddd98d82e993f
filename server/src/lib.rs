use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use vsm_core::config::DEFAULT_ALPHA;
use vsm_core::{CorpusListing, DocId, SearchEngine};

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Optional cap on returned results; all matches by default.
    pub k: Option<usize>,
}
fn default_alpha() -> f64 { DEFAULT_ALPHA }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub alpha: f64,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub rank: usize,
    pub doc_id: DocId,
    pub file_name: String,
    pub title: String,
    pub score: f64,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub corpus: Arc<CorpusListing>,
}

pub fn build_app(engine: SearchEngine, corpus: CorpusListing) -> Router {
    let app_state = AppState { engine: Arc::new(engine), corpus: Arc::new(corpus) };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let engine = state.engine.clone();
    let (q, alpha) = (params.q.clone(), params.alpha);
    // scoring walks every document; keep it off the async workers
    let hits = tokio::task::spawn_blocking(move || engine.calculate(&q, alpha))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let total_hits = hits.len();
    let k = params.k.unwrap_or(total_hits);
    let mut results = Vec::with_capacity(k.min(total_hits));
    for (i, hit) in hits.into_iter().take(k).enumerate() {
        let title = state.corpus.title(hit.doc_id).ok().flatten().unwrap_or_default();
        results.push(SearchHit {
            rank: i + 1,
            doc_id: hit.doc_id,
            file_name: state.corpus.file_name(hit.doc_id).unwrap_or_default(),
            title,
            score: hit.score,
        });
    }

    let elapsed = start.elapsed();
    Ok(Json(SearchResponse { query: params.q, alpha: params.alpha, took_s: elapsed.as_secs_f64(), total_hits, results }))
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let text = state
        .corpus
        .text(doc_id)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")))?
        .ok_or((StatusCode::NOT_FOUND, "not found".to_string()))?;
    Ok(Json(serde_json::json!({
        "doc_id": doc_id,
        "file_name": state.corpus.file_name(doc_id),
        "title": text.lines().next().unwrap_or("").trim(),
        "text": text,
    })))
}
