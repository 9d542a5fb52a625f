use crate::pages;
use crate::state::AppState;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Form, Json,
};
use serde::Deserialize;
use tracing::info;

// ============================================================================
// Page endpoints
// ============================================================================

pub async fn home() -> Html<String> {
    Html(pages::render_home())
}

pub async fn about() -> Html<String> {
    Html(pages::render_about())
}

pub async fn classify_form() -> Html<String> {
    Html(pages::render_classify_form())
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
}

pub async fn classify(
    State(state): State<AppState>,
    Form(form): Form<ClassifyRequest>,
) -> Html<String> {
    match state.service.classify(&form.abstract_text).await {
        Ok(result) => {
            info!(labels = result.labels.len(), "classified abstract");
            Html(pages::render_result(&form.abstract_text, &result))
        }
        Err(error) => Html(pages::render_error(&form.abstract_text, &error)),
    }
}

// ============================================================================
// Health and statistics endpoints
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.service.metrics();
    let hit_rate = snapshot.hit_rate();
    let dedup_rate = snapshot.dedup_rate();
    Json(serde_json::json!({
        "counters": snapshot,
        "hit_rate": hit_rate,
        "dedup_rate": dedup_rate,
        "cached_results": state.service.cached_results(),
        "jobs_in_flight": state.service.jobs_in_flight(),
        "worker_slots": state.service.worker_slots(),
    }))
}
