use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::*;
use super::openapi::ApiDocV1;

/// Create the API router with Swagger UI
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/v1/openapi.json", ApiDocV1::openapi()))
        .route("/health", get(health_check))
        // TP/SL order endpoints
        .route("/api/v1/tpsl", get(list_tpsl_orders).post(create_tpsl_order))
        .route("/api/v1/tpsl/validate", post(validate_tpsl_record))
        .route(
            "/api/v1/tpsl/:id",
            get(get_tpsl_order)
                .put(update_tpsl_order)
                .delete(delete_tpsl_order),
        )
        // Chart endpoint
        .route("/api/v1/chart/:ticker", get(get_chart))
        .with_state(state)
}
