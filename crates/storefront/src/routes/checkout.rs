//! Checkout route handler.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use shoplite_core::Order;
use tracing::instrument;

use crate::error::Result;
use crate::services;
use crate::state::AppState;

/// Checkout request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub discount_code: Option<String>,
}

/// Checkout response body.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order: Order,
}

/// Place an order for the shopper's cart.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutResponse>> {
    let Json(body) = body?;
    let order = state.with_store(|store| {
        services::checkout(store, &body.user_id, body.discount_code.as_deref())
    })?;
    Ok(Json(CheckoutResponse { order }))
}
