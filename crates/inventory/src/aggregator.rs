//! Quantity lookup over bulk-fetched inventory records.

use std::collections::{HashMap, HashSet};

use crate::{InventoryRecord, ProductId};

/// Available quantity reported for `product_id`, if any.
///
/// The first record whose attributes name the product wins. Records without
/// attributes can't be matched and are skipped; a matching record without a
/// quantity yields None.
pub fn quantity_for(product_id: ProductId, records: &[InventoryRecord]) -> Option<i32> {
    records
        .iter()
        .filter_map(|record| record.attributes.as_ref())
        .find(|attributes| attributes.product_id == Some(product_id))
        .and_then(|attributes| attributes.quantity_available)
}

/// Product id -> quantity lookup built once per listing.
///
/// Same first-match rule as [`quantity_for`]: once a record names a product,
/// later records for that product are ignored, even if the first one carries
/// no quantity.
pub fn quantities_by_product(records: &[InventoryRecord]) -> HashMap<ProductId, i32> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut quantities = HashMap::with_capacity(records.len());

    for attributes in records.iter().filter_map(|r| r.attributes.as_ref()) {
        let Some(product_id) = attributes.product_id else {
            continue;
        };
        if !seen.insert(product_id) {
            continue;
        }
        if let Some(quantity) = attributes.quantity_available {
            quantities.insert(product_id, quantity);
        }
    }
    quantities
}
