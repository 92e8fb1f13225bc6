use utoipa::OpenApi;

use crate::api::handlers;
use crate::api::responses::*;
use crate::database::models::TpslOrder;
use crate::market_data::{ChartOverlay, LevelLine, PriceBar};
use crate::models::{Side, Strategy, TpslRecord};

/// OpenAPI v1 specification
#[derive(OpenApi)]
#[openapi(
    info(
        title = "TP/SL Dashboard API",
        version = "1.0.0",
        description = "Take-profit / stop-loss order records with price chart overlays",
        license(
            name = "MIT"
        )
    ),
    paths(
        handlers::health_check,
        handlers::list_tpsl_orders,
        handlers::get_tpsl_order,
        handlers::create_tpsl_order,
        handlers::update_tpsl_order,
        handlers::delete_tpsl_order,
        handlers::validate_tpsl_record,
        handlers::get_chart,
    ),
    components(
        schemas(
            TpslRecord,
            TpslOrder,
            Side,
            Strategy,
            TpslListQuery,
            ValidationResponse,
            ChartOverlay,
            LevelLine,
            PriceBar,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "TP/SL", description = "TP/SL order management endpoints"),
        (name = "Chart", description = "Price chart and level overlay endpoints"),
    )
)]
pub struct ApiDocV1;
