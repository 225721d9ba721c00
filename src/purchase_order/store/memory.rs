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

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::InternalError;
use crate::purchase_order::{PurchaseOrder, TransitionRecord};
use crate::workflow::OrderStatus;

use super::error::OrderStoreError;
use super::OrderStore;

#[derive(Default)]
struct MemoryOrderStoreState {
    orders: HashMap<String, PurchaseOrder>,
    records: HashMap<String, Vec<TransitionRecord>>,
}

/// An in-memory [`OrderStore`], for tests and fully in-process deployments.
///
/// The store is cheaply cloneable; clones share the same underlying state,
/// so concurrent callers observe each other's writes and the optimistic
/// status check in [`OrderStore::save_order`] behaves as it would against a
/// shared database row.
#[derive(Clone, Default)]
pub struct MemoryOrderStore {
    state: Arc<Mutex<MemoryOrderStoreState>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<MemoryOrderStoreState>, OrderStoreError> {
        self.state.lock().map_err(|_| {
            OrderStoreError::InternalError(InternalError::with_message(
                "MemoryOrderStore lock was poisoned".to_string(),
            ))
        })
    }
}

impl OrderStore for MemoryOrderStore {
    fn add_order(&self, order: PurchaseOrder) -> Result<(), OrderStoreError> {
        let mut state = self.lock()?;

        if state.orders.contains_key(order.id()) {
            return Err(OrderStoreError::InternalError(InternalError::with_message(
                format!("Order {} already exists", order.id()),
            )));
        }

        state.orders.insert(order.id().to_string(), order);
        Ok(())
    }

    fn get_order(&self, order_id: &str) -> Result<Option<PurchaseOrder>, OrderStoreError> {
        let state = self.lock()?;
        Ok(state.orders.get(order_id).cloned())
    }

    fn save_order(
        &self,
        order: PurchaseOrder,
        expected_prior_status: OrderStatus,
    ) -> Result<(), OrderStoreError> {
        let mut state = self.lock()?;

        let current = state
            .orders
            .get(order.id())
            .ok_or_else(|| OrderStoreError::NotFoundError(order.id().to_string()))?;

        if current.status() != expected_prior_status {
            return Err(OrderStoreError::ConcurrentModification {
                expected: expected_prior_status,
                actual: current.status(),
            });
        }

        state.orders.insert(order.id().to_string(), order);
        Ok(())
    }

    fn append_transition_record(&self, record: TransitionRecord) -> Result<(), OrderStoreError> {
        let mut state = self.lock()?;
        state
            .records
            .entry(record.order_id().to_string())
            .or_insert_with(Vec::new)
            .push(record);
        Ok(())
    }

    fn list_transition_records(
        &self,
        order_id: &str,
    ) -> Result<Vec<TransitionRecord>, OrderStoreError> {
        let state = self.lock()?;
        Ok(state.records.get(order_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::purchase_order::PurchaseOrderBuilder;

    fn order(status: OrderStatus) -> PurchaseOrder {
        PurchaseOrderBuilder::new()
            .with_id("po-1")
            .with_buyer_company_id("acme")
            .with_creator_id("alice")
            .with_internal_scope("unit-1")
            .with_status(status)
            .build()
            .expect("build order")
    }

    /// Tests that adding an order twice is refused.
    #[test]
    fn test_add_order_enforces_unique_id() {
        let store = MemoryOrderStore::new();
        store.add_order(order(OrderStatus::Draft)).expect("add");
        assert!(store.add_order(order(OrderStatus::Draft)).is_err());
    }

    /// Tests that `save_order` applies the write when the persisted status
    /// matches the expected prior status.
    #[test]
    fn test_save_order_with_matching_status() {
        let store = MemoryOrderStore::new();
        store.add_order(order(OrderStatus::Draft)).expect("add");

        store
            .save_order(order(OrderStatus::PendingSiteManager), OrderStatus::Draft)
            .expect("save");

        let saved = store.get_order("po-1").expect("get").expect("order");
        assert_eq!(OrderStatus::PendingSiteManager, saved.status());
    }

    /// Tests that `save_order` refuses the write when the persisted status
    /// has moved on since the caller read it.
    #[test]
    fn test_save_order_detects_concurrent_modification() {
        let store = MemoryOrderStore::new();
        store
            .add_order(order(OrderStatus::PendingManagement))
            .expect("add");

        // first writer wins
        store
            .save_order(
                order(OrderStatus::ApprovedManagement),
                OrderStatus::PendingManagement,
            )
            .expect("save");

        // second writer validated against the stale status
        let err = store
            .save_order(
                order(OrderStatus::RejectedManagement),
                OrderStatus::PendingManagement,
            )
            .expect_err("stale save");
        assert!(matches!(
            err,
            OrderStoreError::ConcurrentModification { .. }
        ));
    }

    /// Tests that clones of the store share state.
    #[test]
    fn test_clones_share_state() {
        let store = MemoryOrderStore::new();
        let clone = store.clone();

        store.add_order(order(OrderStatus::Draft)).expect("add");
        assert!(clone.get_order("po-1").expect("get").is_some());
    }
}
