use catalog::Product;
use serde::Serialize;

/// A product decorated with the quantity reported by the inventory service.
///
/// `quantity` is None when the service has no record for the product, which
/// is a valid state and not the same as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductWithQuantity {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: Option<i32>,
}

impl ProductWithQuantity {
    pub fn new(product: Product, quantity: Option<i32>) -> Self {
        Self { product, quantity }
    }
}
