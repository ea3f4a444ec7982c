use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::{SystemTime, UNIX_EPOCH},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::api::{ApiAnalyzeRequest, ApiErrorResponse};
use post_insights::config::InsightsConfig;
use post_insights::{analyze_with_config, AnalysisError, AnalysisOutput};

#[derive(Clone)]
struct AppState {
    config: Arc<InsightsConfig>,
}

type ApiError = (StatusCode, Json<ApiErrorResponse>);

static REQUEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub async fn serve(args: crate::ServeArgs, config: InsightsConfig) -> Result<(), String> {
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind server: {}", err))?;
    info!(%addr, "post-insights listening");

    axum::serve(listener, router(config))
        .await
        .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

fn router(config: InsightsConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalysisOutput>, ApiError> {
    let request_id = generate_request_id();
    let request = ApiAnalyzeRequest::from_slice(&body).map_err(|err| error_response(&request_id, err))?;

    let config = state.config.clone();
    let output = run_blocking(move || analyze_with_config(&request.rows, &config))
        .await
        .map_err(|err| error_response(&request_id, err))?;

    info!(
        request_id = %request_id,
        rows = output.diagnostics.row_count,
        dropped = output.diagnostics.dropped_rows,
        best_hours = ?output.best_hours,
        "analysis complete"
    );

    Ok(Json(output))
}

async fn run_blocking<F>(task: F) -> Result<AnalysisOutput, AnalysisError>
where
    F: FnOnce() -> Result<AnalysisOutput, AnalysisError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| AnalysisError::unexpected(format!("analysis task failed: {}", err)))
        .and_then(|result| result)
}

fn error_response(request_id: &str, err: AnalysisError) -> ApiError {
    let status = match &err {
        AnalysisError::InvalidInput { .. } => {
            warn!(request_id = %request_id, error = %err, "rejected analysis request");
            StatusCode::BAD_REQUEST
        }
        AnalysisError::Unexpected { .. } => {
            error!(request_id = %request_id, error = %err, "analysis failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ApiErrorResponse::from(&err)))
}

fn generate_request_id() -> String {
    let counter = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{}", now_ms(), counter)
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or(0)
}
