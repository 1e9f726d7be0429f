use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use blogforge_composer::{GeneratedPost, PostDraft, compose};
use blogforge_core::error::ApiError;
use blogforge_core::types::{MediaKind, SearchQuery};
use blogforge_mailer::dispatch::Dispatcher;
use blogforge_metadata::CanonicalMedia;
use blogforge_metadata::normalize::normalize;

use crate::error::AppError;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/media/lookup", post(lookup).get(lookup_query))
        .route("/posts/compose", post(compose_post))
        .route("/posts/dispatch", post(dispatch_post))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Media lookup
// ---------------------------------------------------------------------------

/// Accepted via POST body or GET query string, matching the original form.
#[derive(Deserialize)]
struct LookupParams {
    query: Option<String>,
    #[serde(rename = "type")]
    kind: Option<MediaKind>,
}

async fn lookup(
    State(state): State<AppState>,
    Json(params): Json<LookupParams>,
) -> Result<Json<CanonicalMedia>, AppError> {
    run_lookup(&state, params).await
}

async fn lookup_query(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<CanonicalMedia>, AppError> {
    run_lookup(&state, params).await
}

async fn run_lookup(
    state: &AppState,
    params: LookupParams,
) -> Result<Json<CanonicalMedia>, AppError> {
    let (Some(text), Some(kind)) = (params.query, params.kind) else {
        return Err(
            ApiError::BadRequest("missing query or type parameter (movie|tv)".into()).into(),
        );
    };

    let query = SearchQuery::new(&text, kind)
        .ok_or_else(|| ApiError::BadRequest("query must not be empty".into()))?;

    let provider = state
        .provider
        .as_ref()
        .ok_or_else(|| ApiError::Configuration("metadata provider is not configured".into()))?;

    let raw = provider.fetch_media(&query).await?;
    Ok(Json(normalize(&raw)))
}

// ---------------------------------------------------------------------------
// Post composition
// ---------------------------------------------------------------------------

async fn compose_post(Json(draft): Json<PostDraft>) -> Json<GeneratedPost> {
    Json(compose(&draft))
}

// ---------------------------------------------------------------------------
// Post dispatch
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct DispatchRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    html: String,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    token: Option<String>,
}

async fn dispatch_post(
    State(state): State<AppState>,
    Json(body): Json<DispatchRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if let Some(expected) = &state.admin_token {
        let provided = body.token.as_deref().unwrap_or("");
        if !constant_time_eq(provided, expected) {
            return Err(ApiError::Unauthorized("invalid admin token".into()).into());
        }
    }

    if body.title.trim().is_empty() || body.html.trim().is_empty() {
        return Err(ApiError::BadRequest("missing title or html in request body".into()).into());
    }

    let transport = state
        .transport
        .as_ref()
        .ok_or_else(|| ApiError::Configuration("mail transport is not configured".into()))?;

    let post = GeneratedPost {
        title: body.title,
        html: body.html,
    };
    Dispatcher::new(transport.clone())
        .dispatch(&post, &body.labels)
        .await?;

    Ok(Json(serde_json::json!({ "ok": true })))
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    use subtle::ConstantTimeEq;
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
