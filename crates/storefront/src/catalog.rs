//! Built-in product catalog.
//!
//! The demo store sells a fixed set of products. Cart items are not checked
//! against this list; clients send name and price along with the sku.

use shoplite_core::{Money, Product};

/// Every product on sale, in display order.
pub const PRODUCTS: &[Product] = &[
    Product {
        sku: "tee-black",
        name: "Basic Tee",
        description: "Soft cotton. Everyday fit.",
        price: Money::new(999),
    },
    Product {
        sku: "cap-stone",
        name: "Stone Cap",
        description: "Clean look. Adjustable strap.",
        price: Money::new(699),
    },
    Product {
        sku: "hoodie-ash",
        name: "Ash Hoodie",
        description: "Heavyweight. Cozy all day.",
        price: Money::new(1999),
    },
    Product {
        sku: "socks-white",
        name: "Crew Socks",
        description: "Cushioned. 3-pack.",
        price: Money::new(499),
    },
];

/// Look up a product by sku.
#[must_use]
pub fn find(sku: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.sku == sku)
}
