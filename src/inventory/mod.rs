// Copyright 2021-2022 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The inventory collaborator and the stock availability evaluator that
//! feeds the workflow's automatic stock branch.

mod error;
mod memory;

pub use error::InventoryLookupError;
pub use memory::MemoryInventoryLookup;

use crate::purchase_order::PurchaseOrder;

/// Provides available-quantity lookups against a company's inventory.
pub trait InventoryLookup {
    /// Returns the quantity of `inventory_ref` available at `company_id`.
    fn get_available_quantity(
        &self,
        company_id: &str,
        inventory_ref: &str,
    ) -> Result<u64, InventoryLookupError>;
}

impl<IL> InventoryLookup for Box<IL>
where
    IL: InventoryLookup + ?Sized,
{
    fn get_available_quantity(
        &self,
        company_id: &str,
        inventory_ref: &str,
    ) -> Result<u64, InventoryLookupError> {
        (**self).get_available_quantity(company_id, inventory_ref)
    }
}

/// The sufficiency verdict for a single line item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemStockCheck {
    item_id: String,
    requested: u64,
    available: u64,
    sufficient: bool,
}

impl ItemStockCheck {
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn available(&self) -> u64 {
        self.available
    }

    pub fn sufficient(&self) -> bool {
        self.sufficient
    }
}

/// The stock availability verdict for a whole order.
///
/// This is ephemeral read-only data: it is recomputed fresh on every
/// evaluation and never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StockCheckResult {
    available: bool,
    items: Vec<ItemStockCheck>,
}

impl StockCheckResult {
    /// Returns `true` if every line item on the order is sufficient.
    pub fn available(&self) -> bool {
        self.available
    }

    pub fn items(&self) -> &[ItemStockCheck] {
        &self.items
    }
}

/// Evaluates whether an order can be fulfilled from the buyer company's
/// internal stock.
///
/// Line items without a linked inventory reference are off-catalog entries
/// and are treated as unavailable. The aggregate verdict is sufficient only
/// if every item is.
pub fn check_stock(
    order: &PurchaseOrder,
    lookup: &dyn InventoryLookup,
) -> Result<StockCheckResult, InventoryLookupError> {
    let mut items = Vec::with_capacity(order.items().len());
    let mut available = true;

    for item in order.items() {
        let on_hand = match item.inventory_ref() {
            Some(inventory_ref) => {
                lookup.get_available_quantity(order.buyer_company_id(), inventory_ref)?
            }
            None => 0,
        };
        let sufficient = on_hand >= item.requested_quantity();

        debug!(
            "Stock check for order {} item {}: requested {}, available {}",
            order.id(),
            item.item_id(),
            item.requested_quantity(),
            on_hand
        );

        available &= sufficient;
        items.push(ItemStockCheck {
            item_id: item.item_id().to_string(),
            requested: item.requested_quantity(),
            available: on_hand,
            sufficient,
        });
    }

    Ok(StockCheckResult { available, items })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::purchase_order::{LineItemBuilder, PurchaseOrderBuilder};

    fn order_with_items(items: Vec<crate::purchase_order::LineItem>) -> PurchaseOrder {
        PurchaseOrderBuilder::new()
            .with_id("po-1")
            .with_buyer_company_id("acme")
            .with_creator_id("alice")
            .with_internal_scope("unit-1")
            .with_items(items)
            .build()
            .expect("build order")
    }

    fn item(id: &str, requested: u64, inventory_ref: Option<&str>) -> crate::purchase_order::LineItem {
        let mut builder = LineItemBuilder::new()
            .with_item_id(id)
            .with_requested_quantity(requested)
            .with_unit("each");
        if let Some(inventory_ref) = inventory_ref {
            builder = builder.with_inventory_ref(inventory_ref);
        }
        builder.build().expect("build item")
    }

    /// Tests that an order whose every item is covered by on-hand stock is
    /// reported as available.
    #[test]
    fn test_all_items_sufficient() {
        let mut lookup = MemoryInventoryLookup::new();
        lookup.set_quantity("acme", "sku-1", 10);
        lookup.set_quantity("acme", "sku-2", 3);

        let order = order_with_items(vec![
            item("i-1", 10, Some("sku-1")),
            item("i-2", 2, Some("sku-2")),
        ]);

        let result = check_stock(&order, &lookup).expect("check stock");
        assert!(result.available());
        assert!(result.items().iter().all(ItemStockCheck::sufficient));
    }

    /// Tests that a single short item makes the aggregate verdict
    /// insufficient while other items still report their own sufficiency.
    #[test]
    fn test_one_item_short() {
        let mut lookup = MemoryInventoryLookup::new();
        lookup.set_quantity("acme", "sku-1", 4);
        lookup.set_quantity("acme", "sku-2", 5);

        let order = order_with_items(vec![
            item("i-1", 10, Some("sku-1")),
            item("i-2", 5, Some("sku-2")),
        ]);

        let result = check_stock(&order, &lookup).expect("check stock");
        assert!(!result.available());
        assert_eq!(4, result.items()[0].available());
        assert!(!result.items()[0].sufficient());
        assert!(result.items()[1].sufficient());
    }

    /// Tests that an item with no linked inventory reference is treated as
    /// having nothing available.
    #[test]
    fn test_unlinked_item_is_never_sufficient() {
        let lookup = MemoryInventoryLookup::new();
        let order = order_with_items(vec![item("i-1", 1, None)]);

        let result = check_stock(&order, &lookup).expect("check stock");
        assert!(!result.available());
        assert_eq!(0, result.items()[0].available());
    }

    /// Tests that an unknown inventory reference reports zero on hand rather
    /// than an error.
    #[test]
    fn test_unknown_reference_reports_zero() {
        let lookup = MemoryInventoryLookup::new();
        let order = order_with_items(vec![item("i-1", 1, Some("sku-404"))]);

        let result = check_stock(&order, &lookup).expect("check stock");
        assert!(!result.available());
    }
}
