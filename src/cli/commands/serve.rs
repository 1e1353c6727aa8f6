//! HTTP API server for integration with other systems.
//!
//! Exposes the agent, resume parsing, tracking, and analytics over REST.
//! Each /chat request is an independent agent run; conversation state is
//! the caller's concern.

use crate::agent::response::{extract_job_data, JobRecord};
use crate::agent::{Agent, ToolContext};
use crate::analytics::{AnalyticsSnapshot, SearchAnalytics};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::resume::ResumeParser;
use crate::tracker::NotionTracker;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

/// Shared application state.
struct AppState {
    settings: Settings,
    prompts: Prompts,
    analytics: Arc<SearchAnalytics>,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

    let state = Arc::new(AppState {
        settings,
        prompts,
        analytics: Arc::new(SearchAnalytics::new()),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/resume", post(resume))
        .route("/jobs/track", post(track))
        .route("/analytics", get(analytics))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("jobscout API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Chat (agent)", "POST /chat");
    Output::kv("Parse Resume", "POST /resume");
    Output::kv("Track Jobs", "POST /jobs/track");
    Output::kv("Analytics", "GET  /analytics");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct ChatRequest {
    /// The user's free-text request
    message: String,
    /// Optional context line (e.g. from a previously parsed resume)
    #[serde(default)]
    resume_context: Option<String>,
    /// Optional model override
    #[serde(default)]
    model: Option<String>,
}

#[derive(Serialize)]
struct ChatResponse {
    request_id: Uuid,
    reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    jobs: Option<Vec<JobRecord>>,
    steps: usize,
    answered_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
struct ResumeResponse {
    job_role: String,
    skills: Vec<String>,
}

#[derive(Serialize)]
struct TrackResponse {
    message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn internal_error(message: String) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: message }),
    )
        .into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> impl IntoResponse {
    // One request, one search
    state.analytics.record_search();

    let tools = match ToolContext::new(&state.settings, Arc::clone(&state.analytics)) {
        Ok(tools) => tools,
        Err(e) => return internal_error(e.to_string()),
    };

    let model = req
        .model
        .unwrap_or_else(|| state.settings.agent.model.clone());
    let agent = Agent::new(tools, &model)
        .with_system_prompt(&state.prompts.agent.system)
        .with_max_steps(state.settings.agent.max_steps);

    match agent.run(&req.message, req.resume_context.as_deref()).await {
        Ok(response) => {
            let reply = extract_job_data(&response.content);
            Json(ChatResponse {
                request_id: Uuid::new_v4(),
                reply: reply.message,
                jobs: reply.jobs,
                steps: response.steps,
                answered_at: chrono::Utc::now(),
            })
            .into_response()
        }
        Err(e) => internal_error(e.to_string()),
    }
}

async fn resume(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("resume").to_string();
            match field.bytes().await {
                Ok(bytes) => file = Some((file_name, bytes.to_vec())),
                Err(e) => return internal_error(format!("Upload failed: {}", e)),
            }
        }
    }

    let Some((file_name, file_bytes)) = file else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing 'file' field in multipart upload".to_string(),
            }),
        )
            .into_response();
    };

    let parser = ResumeParser::new(&state.settings.resume, state.prompts.clone());
    match parser.parse(&file_bytes, &file_name).await {
        Ok(profile) => Json(ResumeResponse {
            job_role: profile.job_role,
            skills: profile.skills,
        })
        .into_response(),
        Err(e) => internal_error(e.to_string()),
    }
}

async fn track(
    State(state): State<Arc<AppState>>,
    Json(jobs): Json<serde_json::Value>,
) -> impl IntoResponse {
    let tracker = NotionTracker::new(&state.settings.tracker);

    let jobs_json = jobs.to_string();
    match tracker.save_jobs(&jobs_json).await {
        Ok(message) => Json(TrackResponse { message }).into_response(),
        Err(e) => internal_error(e.to_string()),
    }
}

async fn analytics(State(state): State<Arc<AppState>>) -> Json<AnalyticsSnapshot> {
    Json(state.analytics.snapshot())
}
