//! HTTP API server.
//!
//! Exposes the router as `GET /execute?q=...`, plus health and catalog
//! listing endpoints.

use super::build_router;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::{ErrorKind, RouterError};
use crate::router::FunctionCallRouter;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application state.
struct AppState {
    router: FunctionCallRouter,
}

/// Run the HTTP API server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Serve, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'switchyard doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let router = build_router(&settings, None)?;
    let tool_count = router.catalog().len();
    let app = app(router);

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Switchyard API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    Output::kv("Model", &settings.gateway.model);
    Output::kv("Tools", &tool_count.to_string());
    println!();
    println!("Endpoints:");
    Output::kv("Execute", "GET  /execute?q=<text>");
    Output::kv("Tools", "GET  /tools");
    Output::kv("Health", "GET  /health");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

/// Build the HTTP application around a router.
fn app(router: FunctionCallRouter) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/execute", get(execute))
        .route("/tools", get(list_tools))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AppState { router }))
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct ExecuteParams {
    q: Option<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    kind: ErrorKind,
}

#[derive(Serialize)]
struct ToolsResponse {
    tools: Vec<ToolInfo>,
    total: usize,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    description: String,
    parameters: Value,
}

/// HTTP status for a routing failure.
fn status_for(err: &RouterError) -> StatusCode {
    match err.kind() {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::GatewayFailure if err.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::GatewayFailure
        | ErrorKind::UnknownOperation
        | ErrorKind::MissingArgument
        | ErrorKind::UnknownArgument
        | ErrorKind::TypeMismatch => StatusCode::BAD_GATEWAY,
    }
}

fn error_response(err: &RouterError) -> Response {
    (
        status_for(err),
        Json(ErrorResponse {
            error: err.to_string(),
            kind: err.kind(),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn execute(State(state): State<Arc<AppState>>, Query(params): Query<ExecuteParams>) -> Response {
    let Some(query) = params.q else {
        return error_response(&RouterError::InvalidInput("Missing query parameter 'q'".to_string()));
    };

    match state.router.route(&query).await {
        Ok(call) => Json(call).into_response(),
        Err(e) => {
            info!(kind = %e.kind(), "Request failed: {}", e);
            error_response(&e)
        }
    }
}

async fn list_tools(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let catalog = state.router.catalog();
    Json(ToolsResponse {
        total: catalog.len(),
        tools: catalog
            .all()
            .iter()
            .map(|t| ToolInfo {
                name: t.name.clone(),
                description: t.description.clone(),
                parameters: t.parameters_schema(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ToolCatalog;
    use crate::gateway::FixedGateway;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::json;
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_app(gateway: FixedGateway) -> Router {
        app(FunctionCallRouter::new(Arc::new(ToolCatalog::seed()), Arc::new(gateway)))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_execute_success() {
        let app = test_app(FixedGateway::proposing("get_ticket_status", json!({"ticket_id": 4521})));

        let (status, body) = get_json(app, "/execute?q=What%27s%20the%20status%20of%20ticket%204521%3F").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"name": "get_ticket_status", "arguments": {"ticket_id": 4521}}));
    }

    #[tokio::test]
    async fn test_execute_missing_query_is_bad_request() {
        let app = test_app(FixedGateway::proposing("get_ticket_status", json!({"ticket_id": 1})));

        let (status, body) = get_json(app, "/execute").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], json!("invalid_input"));
    }

    #[tokio::test]
    async fn test_execute_blank_query_is_bad_request() {
        let app = test_app(FixedGateway::proposing("get_ticket_status", json!({"ticket_id": 1})));

        let (status, _) = get_json(app, "/execute?q=%20%20").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_execute_unknown_operation_is_bad_gateway() {
        let app = test_app(FixedGateway::proposing("delete_everything", json!({})));

        let (status, body) = get_json(app, "/execute?q=wipe").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["kind"], json!("unknown_operation"));
    }

    #[tokio::test]
    async fn test_execute_type_mismatch_is_bad_gateway() {
        let app = test_app(FixedGateway::proposing("get_ticket_status", json!({"ticket_id": "four"})));

        let (status, body) = get_json(app, "/execute?q=ticket%20four").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["kind"], json!("type_mismatch"));
    }

    #[tokio::test]
    async fn test_execute_timeout_is_gateway_timeout() {
        let router = FunctionCallRouter::new(
            Arc::new(ToolCatalog::seed()),
            Arc::new(
                FixedGateway::proposing("get_ticket_status", json!({"ticket_id": 1}))
                    .with_delay(Duration::from_secs(10)),
            ),
        )
        .with_timeout(Duration::from_millis(20));

        let (status, body) = get_json(app(router), "/execute?q=ticket%201").await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["kind"], json!("gateway_failure"));
    }

    #[tokio::test]
    async fn test_tools_listing() {
        let app = test_app(FixedGateway::proposing("get_ticket_status", json!({})));

        let (status, body) = get_json(app, "/tools").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], json!(5));
        assert_eq!(body["tools"][1]["name"], json!("schedule_meeting"));
        assert_eq!(
            body["tools"][1]["parameters"]["required"],
            json!(["date", "time", "meeting_room"])
        );
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(FixedGateway::proposing("get_ticket_status", json!({})));
        let (status, body) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&RouterError::GatewayFailure("502 from upstream".to_string())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&RouterError::MissingArgument("date".to_string())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&RouterError::UnknownArgument("extra".to_string())),
            StatusCode::BAD_GATEWAY
        );
    }
}
