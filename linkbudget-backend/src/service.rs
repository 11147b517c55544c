//! HTTP API over the link budget handler

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use linkbudget_common::api::{
    BandResponse, ExportResponse, LinkBudgetRequest, LinkBudgetResponse, MessageResponse,
    PresetListing,
};
use linkbudget_common::{FrequencyInput, FrequencyUnit};

use crate::module::budget::LinkBudgetError;
use crate::module::handler::LinkBudgetHandler;
use crate::module::report::{render_report, ReportExporter};

/// Shared state of the HTTP service. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    handler: Arc<LinkBudgetHandler>,
    exporter: Arc<ReportExporter>,
}

impl AppState {
    pub fn new(handler: LinkBudgetHandler, exporter: ReportExporter) -> Self {
        Self {
            handler: Arc::new(handler),
            exporter: Arc::new(exporter),
        }
    }
}

/// Failure of an API call
#[derive(Debug)]
pub enum ApiError {
    /// Bad input; nothing was computed
    InvalidParameter(LinkBudgetError),
    Internal(anyhow::Error),
}

impl From<LinkBudgetError> for ApiError {
    fn from(e: LinkBudgetError) -> Self {
        ApiError::InvalidParameter(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidParameter(LinkBudgetError::invalid("body", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidParameter(LinkBudgetError::invalid("query", rejection.body_text()))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidParameter(e) => {
                warn!("Rejected request: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Internal(e) => {
                error!("Request failed: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Internal error: {}", e))
            }
        };
        let body = MessageResponse {
            success: false,
            message,
            message_id: uuid::Uuid::now_v7().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the application routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(stats))
        .route("/api/presets", get(presets))
        .route("/api/band", get(band))
        .route("/api/link-budget", post(link_budget))
        .route("/api/report", post(report))
        .route("/api/export", post(export))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Stats endpoint - returns basic server information
async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.handler.catalog().stats();
    Json(serde_json::json!({
        "status": "running",
        "service": "linkbudget-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "terminals": catalog.terminals,
        "environments": catalog.environments,
        "modcods": catalog.modcods,
    }))
}

async fn presets(State(state): State<AppState>) -> Json<PresetListing> {
    Json(state.handler.catalog().listing())
}

#[derive(Debug, Deserialize)]
struct BandQuery {
    frequency: f64,
    /// Defaults to Hz
    unit: Option<FrequencyUnit>,
}

async fn band(
    State(state): State<AppState>,
    query: Result<Query<BandQuery>, QueryRejection>,
) -> Result<Json<BandResponse>, ApiError> {
    let Query(query) = query?;
    let frequency = FrequencyInput::Value {
        value: query.frequency,
        unit: query.unit,
    };
    Ok(Json(state.handler.band_lookup(&frequency)?))
}

async fn link_budget(
    State(state): State<AppState>,
    request: Result<Json<LinkBudgetRequest>, JsonRejection>,
) -> Result<Json<LinkBudgetResponse>, ApiError> {
    let Json(request) = request?;
    Ok(Json(state.handler.handle(&request)?))
}

async fn report(
    State(state): State<AppState>,
    request: Result<Json<LinkBudgetRequest>, JsonRejection>,
) -> Result<Html<String>, ApiError> {
    let Json(request) = request?;
    let response = state.handler.handle(&request)?;
    Ok(Html(render_report(&response, chrono::Local::now())))
}

async fn export(
    State(state): State<AppState>,
    request: Result<Json<LinkBudgetRequest>, JsonRejection>,
) -> Result<Json<ExportResponse>, ApiError> {
    let Json(request) = request?;
    let response = state.handler.handle(&request)?;
    let exported = state.exporter.export(&response).await?;
    Ok(Json(ExportResponse {
        success: true,
        request_id: response.request_id,
        report_path: exported.report_path.to_string_lossy().replace('\\', "/"),
        chart_path: exported.chart_path.to_string_lossy().replace('\\', "/"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::presets::PresetCatalog;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use linkbudget_common::{Band, MarginMode};
    use tower::ServiceExt;

    fn app(export_dir: &std::path::Path) -> Router {
        let handler = LinkBudgetHandler::new(Arc::new(PresetCatalog::builtin()));
        router(AppState::new(handler, ReportExporter::new(export_dir, true)))
    }

    fn test_app() -> Router {
        app(&std::env::temp_dir().join("linkbudget_service_unused"))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK");
    }

    #[tokio::test]
    async fn test_link_budget_modcod() {
        let body = r#"{"frequency": "8.4 GHz", "distance_km": 35786, "modcod": "QPSK 1/2", "orbit": "geo"}"#;
        let response = test_app()
            .oneshot(post_json("/api/link-budget", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let parsed: LinkBudgetResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.band, Band::X);
        assert_eq!(parsed.result.mode, MarginMode::Ebn0);
        assert_eq!(parsed.result.data_rate_bps, Some(1e6));
        assert_eq!(parsed.loss_breakdown.len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_parameter_is_bad_request() {
        let response = test_app()
            .oneshot(post_json("/api/link-budget", r#"{"distance_km": 0}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let parsed: MessageResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(!parsed.success);
        assert!(parsed.message.contains("distance_km"));
    }

    #[tokio::test]
    async fn test_unknown_modcod_is_bad_request() {
        let response = test_app()
            .oneshot(post_json("/api/link-budget", r#"{"modcod": "QPSK 9/10"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_unit_in_value_form_is_json_bad_request() {
        for uri in ["/api/link-budget", "/api/report", "/api/export"] {
            let response = test_app()
                .oneshot(post_json(uri, r#"{"frequency": {"value": 8.4, "unit": "THz"}}"#))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);

            let parsed: MessageResponse = serde_json::from_str(&body_string(response).await).unwrap();
            assert!(!parsed.success);
            assert!(parsed.message.starts_with("Invalid parameter 'body'"));
        }

        let response = test_app()
            .oneshot(post_json("/api/link-budget", r#"{"frequency": "8.4 THz"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let parsed: MessageResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(parsed.message.contains("THz"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_json_bad_request() {
        let response = test_app()
            .oneshot(post_json("/api/link-budget", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let parsed: MessageResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(!parsed.success);
    }

    #[tokio::test]
    async fn test_overflowing_distance_is_bad_request() {
        let body = r#"{"distance_km": 1e306, "modcod": "32APSK 4/5"}"#;
        let response = test_app()
            .oneshot(post_json("/api/link-budget", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let parsed: MessageResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(parsed.message.contains("distance_km"));
    }

    #[tokio::test]
    async fn test_band_query_bad_unit_is_json_bad_request() {
        let response = test_app()
            .oneshot(
                Request::get("/api/band?frequency=8.4&unit=THz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let parsed: MessageResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(!parsed.success);
        assert!(parsed.message.starts_with("Invalid parameter 'query'"));
    }

    #[tokio::test]
    async fn test_band_query() {
        let response = test_app()
            .oneshot(
                Request::get("/api/band?frequency=8.4&unit=GHz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let parsed: BandResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(parsed.band, Band::X);
        assert!(parsed.tactical_satcom);

        let response = test_app()
            .oneshot(Request::get("/api/band?frequency=0").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_presets_listing() {
        let response = test_app()
            .oneshot(Request::get("/api/presets").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let parsed: PresetListing = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(parsed.terminals.iter().any(|t| t.name == "PRC-117G (SATCOM)"));
        assert!(parsed.environments.iter().any(|e| e.name == "Maritime"));
        assert!(parsed.modcods.iter().any(|m| m.label() == "QPSK 1/2"));
    }

    #[tokio::test]
    async fn test_report_is_html() {
        let response = test_app()
            .oneshot(post_json("/api/report", r#"{"terminal": "Vehicle Relay"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("S-band"));
        assert!(html.contains("2.200 GHz"));
    }

    #[tokio::test]
    async fn test_export_writes_files() {
        let dir = std::env::temp_dir().join(format!("linkbudget_api_export_{}", uuid::Uuid::now_v7()));
        let response = app(&dir)
            .oneshot(post_json("/api/export", r#"{"environment": "Urban"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let parsed: ExportResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(std::path::Path::new(&parsed.report_path).exists());
        assert!(std::path::Path::new(&parsed.chart_path).exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
