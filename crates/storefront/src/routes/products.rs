//! Product route handlers.

use axum::{Json, extract::Path};
use serde::Serialize;
use shoplite_core::Product;

use crate::catalog;
use crate::error::{AppError, Result};

/// Product listing response body.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: &'static [Product],
}

/// List every product in the catalog.
pub async fn index() -> Json<ProductsResponse> {
    Json(ProductsResponse {
        products: catalog::PRODUCTS,
    })
}

/// Show a single product.
pub async fn show(Path(sku): Path<String>) -> Result<Json<&'static Product>> {
    catalog::find(&sku)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {sku}")))
}
