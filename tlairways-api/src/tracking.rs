use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use serde::Serialize;
use tlairways_order::{build_payment_tracking, validate_booking, ProductLineItem, PurchaseEvent, TrackingContext};
use tlairways_shared::BookingRecord;
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ProductsResponse {
    products: Vec<ProductLineItem>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/tracking/products", post(assemble_products))
        .route("/v1/tracking/purchase", post(track_purchase))
}

/// POST /v1/tracking/products
async fn assemble_products(
    State(state): State<AppState>,
    Json(record): Json<BookingRecord>,
) -> Result<Json<ProductsResponse>, AppError> {
    validate_booking(&record).map_err(|e| AppError::ValidationError(e.to_string()))?;

    let products = state.assembler.assemble(&record);
    Ok(Json(ProductsResponse { products }))
}

/// POST /v1/tracking/purchase
async fn track_purchase(
    State(state): State<AppState>,
    Json(record): Json<BookingRecord>,
) -> Result<Json<PurchaseEvent>, AppError> {
    validate_booking(&record).map_err(|e| AppError::ValidationError(e.to_string()))?;

    let event = build_payment_tracking(&state.assembler, &record, &TrackingContext::now());
    info!(
        event_id = %event.event_id,
        purchase_id = %event.commerce.order.purchase_id,
        total = %event.commerce.order.price_total,
        "Built purchase event"
    );

    // Emission runs detached; the response never waits on the sink
    if state.emit_events {
        let sink = state.sink.clone();
        let emitted = event.clone();
        tokio::spawn(async move {
            if let Err(e) = sink.emit(&emitted).await {
                warn!(event_id = %emitted.event_id, "Failed to emit purchase event: {}", e);
            }
        });
    }

    Ok(Json(event))
}
