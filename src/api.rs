//! REST API server for the FinChain Intelligence Network
//!
//! Exposes the orchestrator via HTTP endpoints

use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::orchestrator::Orchestrator;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QueryRequest {
    pub query: String,
    pub session_id: Option<String>,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub orchestrator: Arc<Orchestrator>,
}

/// =============================
/// Helpers — Session Identity
/// =============================

fn stable_uuid_from_string(input: &str) -> uuid::Uuid {
    use sha2::{Digest, Sha256};

    let hash = Sha256::digest(input.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);

    // Set UUID version (4) and variant (RFC4122) bits.
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    uuid::Uuid::from_bytes(bytes)
}

fn parse_or_stable_uuid(value: Option<&str>, fallback_seed: &str) -> uuid::Uuid {
    match value {
        Some(v) if !v.trim().is_empty() => {
            uuid::Uuid::parse_str(v).unwrap_or_else(|_| stable_uuid_from_string(v))
        }
        _ => stable_uuid_from_string(fallback_seed),
    }
}

/// =============================
/// Health Endpoint
/// =============================

async fn health(State(state): State<ApiState>) -> Json<serde_json::Value> {
    let network = state.orchestrator.health_check().await;
    Json(serde_json::json!({
        "status": network.status,
        "agent_count": network.agent_count,
        "agents": network.agents,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Agent Listing Endpoint
/// =============================

async fn list_agents(State(state): State<ApiState>) -> Json<ApiResponse> {
    let capabilities = state.orchestrator.agent_capabilities().await;
    Json(ApiResponse::success(serde_json::json!({
        "agents": state.orchestrator.registered_agents().await,
        "capabilities": capabilities,
    })))
}

/// =============================
/// Main Query Endpoint
/// =============================

async fn run_query(
    State(state): State<ApiState>,
    Json(req): Json<QueryRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    info!("Received query request: {}", req.query);

    let session_id = parse_or_stable_uuid(req.session_id.as_deref(), "anonymous-session");

    match state.orchestrator.process_query(&req.query).await {
        Ok(response) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({
                "session_id": session_id.to_string(),
                "response": response,
            }))),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Query processing failed: {}", e))),
        ),
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(orchestrator: Arc<Orchestrator>) -> Router {
    let state = ApiState { orchestrator };

    Router::new()
        .route("/health", get(health))
        .route("/api/agents", get(list_agents))
        .route("/api/query", post(run_query))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    orchestrator: Arc<Orchestrator>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(orchestrator);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_uuid_is_deterministic() {
        let a = stable_uuid_from_string("session-42");
        let b = stable_uuid_from_string("session-42");
        let c = stable_uuid_from_string("session-43");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn valid_uuids_parse_unchanged() {
        let id = uuid::Uuid::new_v4();
        let parsed = parse_or_stable_uuid(Some(&id.to_string()), "fallback");
        assert_eq!(parsed, id);
    }

    #[test]
    fn blank_session_falls_back_to_seed() {
        let a = parse_or_stable_uuid(Some("   "), "seed");
        let b = parse_or_stable_uuid(None, "seed");
        assert_eq!(a, b);
    }
}
