//! Catalog product type.

use serde::Serialize;

use super::money::Money;

/// A product offered in the catalog.
///
/// Catalog entries are compiled in, so fields borrow `'static` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Product {
    pub sku: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: Money,
}
