use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/pricing/ancillaries", get(ancillary_prices))
}

/// GET /v1/pricing/ancillaries
async fn ancillary_prices(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let table = serde_json::to_value(state.assembler.price_table().config())?;

    Ok(Json(json!({
        "currency": state.assembler.currency(),
        "table": table,
    })))
}
