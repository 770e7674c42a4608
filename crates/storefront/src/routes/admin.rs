//! Admin route handlers: discount generation and sales stats.
//!
//! These routes are unauthenticated; deploy the storefront where only
//! trusted clients can reach `/api/admin`.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::services::{self, GeneratedCode, StoreStats};
use crate::state::AppState;

/// Return the current milestone's discount code, minting it if needed.
#[instrument(skip_all)]
pub async fn generate_discount(State(state): State<AppState>) -> Result<Json<GeneratedCode>> {
    let generated = state.with_store(services::generate_discount_code)?;
    Ok(Json(generated))
}

/// Sales totals and every issued discount code.
#[instrument(skip_all)]
pub async fn stats(State(state): State<AppState>) -> Result<Json<StoreStats>> {
    let stats = state.with_store(|store| services::get_stats(store))?;
    Ok(Json(stats))
}
