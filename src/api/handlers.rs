use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::database::models::TpslOrder;
use crate::market_data::{ChartOverlay, MarketDataError, MarketDataProvider};
use crate::models::TpslRecord;
use crate::tpsl::{TpslService, TpslServiceError};

use super::responses::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TpslService>,
    pub market_data: Arc<dyn MarketDataProvider>,
}

fn error_body(status: StatusCode, message: String, kind: Option<String>) -> Response {
    let body = Json(ErrorResponse {
        error: status.to_string(),
        message,
        kind,
    });

    (status, body).into_response()
}

/// Convert TpslServiceError to HTTP response
impl IntoResponse for TpslServiceError {
    fn into_response(self) -> Response {
        match &self {
            TpslServiceError::Validation(err) => error_body(
                StatusCode::UNPROCESSABLE_ENTITY,
                self.to_string(),
                Some(err.kind().to_string()),
            ),
            TpslServiceError::OrderNotFound(_) => {
                error_body(StatusCode::NOT_FOUND, self.to_string(), None)
            }
            TpslServiceError::Store(_) | TpslServiceError::TaskFailed(_) => {
                error_body(StatusCode::INTERNAL_SERVER_ERROR, self.to_string(), None)
            }
        }
    }
}

/// Convert MarketDataError to HTTP response
impl IntoResponse for MarketDataError {
    fn into_response(self) -> Response {
        let status = match &self {
            MarketDataError::NoData(_) => StatusCode::NOT_FOUND,
            MarketDataError::HttpTimeout => StatusCode::GATEWAY_TIMEOUT,
            MarketDataError::Http(_)
            | MarketDataError::HttpResponse(..)
            | MarketDataError::Provider { .. } => StatusCode::BAD_GATEWAY,
            MarketDataError::InvalidBaseUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        error_body(status, self.to_string(), None)
    }
}

/// Run a service call on the blocking pool
///
/// Store calls check out a pooled connection and wait on PostgreSQL.
async fn run_blocking<T, F>(call: F) -> Result<T, TpslServiceError>
where
    F: FnOnce() -> Result<T, TpslServiceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(call).await.map_err(|e| {
        tracing::error!("❌ TP/SL store task failed: {}", e);
        TpslServiceError::TaskFailed(e.to_string())
    })?
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

/// List TP/SL orders
#[utoipa::path(
    get,
    path = "/api/v1/tpsl",
    tag = "TP/SL",
    params(TpslListQuery),
    responses(
        (status = 200, description = "List of TP/SL orders", body = Vec<TpslOrder>),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn list_tpsl_orders(
    State(state): State<AppState>,
    Query(query): Query<TpslListQuery>,
) -> Result<Json<Vec<TpslOrder>>, TpslServiceError> {
    let service = Arc::clone(&state.service);
    run_blocking(move || service.list(query.ticker.as_deref()))
        .await
        .map(Json)
}

/// Get a TP/SL order by ID
#[utoipa::path(
    get,
    path = "/api/v1/tpsl/{id}",
    tag = "TP/SL",
    params(
        ("id" = i64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "TP/SL order", body = TpslOrder),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn get_tpsl_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TpslOrder>, TpslServiceError> {
    let service = Arc::clone(&state.service);
    run_blocking(move || service.get(id)).await.map(Json)
}

/// Create a TP/SL order
#[utoipa::path(
    post,
    path = "/api/v1/tpsl",
    tag = "TP/SL",
    request_body = TpslRecord,
    responses(
        (status = 201, description = "Order created", body = TpslOrder),
        (status = 422, description = "Record failed validation", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn create_tpsl_order(
    State(state): State<AppState>,
    Json(record): Json<TpslRecord>,
) -> Result<(StatusCode, Json<TpslOrder>), TpslServiceError> {
    let service = Arc::clone(&state.service);
    let order = run_blocking(move || service.create(&record)).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Replace a TP/SL order
#[utoipa::path(
    put,
    path = "/api/v1/tpsl/{id}",
    tag = "TP/SL",
    params(
        ("id" = i64, Path, description = "Order ID")
    ),
    request_body = TpslRecord,
    responses(
        (status = 200, description = "Order updated", body = TpslOrder),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 422, description = "Record failed validation", body = ErrorResponse)
    )
)]
pub async fn update_tpsl_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(record): Json<TpslRecord>,
) -> Result<Json<TpslOrder>, TpslServiceError> {
    let service = Arc::clone(&state.service);
    run_blocking(move || service.update(id, &record))
        .await
        .map(Json)
}

/// Delete a TP/SL order
#[utoipa::path(
    delete,
    path = "/api/v1/tpsl/{id}",
    tag = "TP/SL",
    params(
        ("id" = i64, Path, description = "Order ID")
    ),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn delete_tpsl_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, TpslServiceError> {
    let service = Arc::clone(&state.service);
    run_blocking(move || service.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Validate a TP/SL record without saving it
#[utoipa::path(
    post,
    path = "/api/v1/tpsl/validate",
    tag = "TP/SL",
    request_body = TpslRecord,
    responses(
        (status = 200, description = "Validation outcome", body = ValidationResponse)
    )
)]
pub async fn validate_tpsl_record(
    State(state): State<AppState>,
    Json(record): Json<TpslRecord>,
) -> Json<ValidationResponse> {
    match state.service.check(&record) {
        Ok(()) => Json(ValidationResponse::valid()),
        Err(err) => {
            let kind = match &err {
                TpslServiceError::Validation(validation) => Some(validation.kind().to_string()),
                _ => None,
            };
            Json(ValidationResponse {
                valid: false,
                kind,
                message: Some(err.to_string()),
            })
        }
    }
}

/// Price chart with TP/SL levels for a ticker
#[utoipa::path(
    get,
    path = "/api/v1/chart/{ticker}",
    tag = "Chart",
    params(
        ("ticker" = String, Path, description = "Ticker symbol (e.g., AAPL)")
    ),
    responses(
        (status = 200, description = "Bars and level lines", body = ChartOverlay),
        (status = 404, description = "No price data", body = ErrorResponse),
        (status = 502, description = "Market data provider failed", body = ErrorResponse),
        (status = 504, description = "Market data provider timed out", body = ErrorResponse)
    )
)]
pub async fn get_chart(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<ChartOverlay>, Response> {
    let service = Arc::clone(&state.service);
    let lookup = ticker.clone();
    let orders = run_blocking(move || service.list(Some(&lookup)))
        .await
        .map_err(IntoResponse::into_response)?;

    let bars = state.market_data.fetch_bars(&ticker).await.map_err(|e| {
        tracing::error!("Failed to fetch chart data for {}: {}", ticker, e);
        e.into_response()
    })?;

    Ok(Json(ChartOverlay::build(&ticker, bars, &orders)))
}
