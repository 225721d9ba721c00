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

//! The order store collaborator: persists purchase orders and their
//! transition records.

mod error;
mod memory;

pub use error::OrderStoreError;
pub use memory::MemoryOrderStore;

use crate::workflow::OrderStatus;

use super::{PurchaseOrder, TransitionRecord};

/// Persists purchase orders and their audit trails.
///
/// `save_order` carries the optimistic concurrency check that serializes
/// racing transition attempts on the same order: the caller names the status
/// it validated the transition against, and the store must refuse the write
/// if the persisted status no longer matches.
pub trait OrderStore {
    /// Adds a new purchase order to the underlying storage
    ///
    /// # Arguments
    ///
    ///  * `order` - The order to add; its ID must not already be present
    fn add_order(&self, order: PurchaseOrder) -> Result<(), OrderStoreError>;

    /// Fetches a purchase order from the underlying storage
    ///
    /// # Arguments
    ///
    ///  * `order_id` - The ID of the order
    fn get_order(&self, order_id: &str) -> Result<Option<PurchaseOrder>, OrderStoreError>;

    /// Replaces a purchase order in the underlying storage, refusing the
    /// write with `ConcurrentModification` if the persisted status differs
    /// from `expected_prior_status`
    ///
    /// # Arguments
    ///
    ///  * `order` - The updated order
    ///  * `expected_prior_status` - The status the update was validated
    ///    against
    fn save_order(
        &self,
        order: PurchaseOrder,
        expected_prior_status: OrderStatus,
    ) -> Result<(), OrderStoreError>;

    /// Appends a transition record to an order's audit trail
    ///
    /// # Arguments
    ///
    ///  * `record` - The record to append
    fn append_transition_record(&self, record: TransitionRecord) -> Result<(), OrderStoreError>;

    /// Lists an order's transition records, oldest first
    ///
    /// # Arguments
    ///
    ///  * `order_id` - The ID of the order
    fn list_transition_records(
        &self,
        order_id: &str,
    ) -> Result<Vec<TransitionRecord>, OrderStoreError>;
}

impl<OS> OrderStore for Box<OS>
where
    OS: OrderStore + ?Sized,
{
    fn add_order(&self, order: PurchaseOrder) -> Result<(), OrderStoreError> {
        (**self).add_order(order)
    }

    fn get_order(&self, order_id: &str) -> Result<Option<PurchaseOrder>, OrderStoreError> {
        (**self).get_order(order_id)
    }

    fn save_order(
        &self,
        order: PurchaseOrder,
        expected_prior_status: OrderStatus,
    ) -> Result<(), OrderStoreError> {
        (**self).save_order(order, expected_prior_status)
    }

    fn append_transition_record(&self, record: TransitionRecord) -> Result<(), OrderStoreError> {
        (**self).append_transition_record(record)
    }

    fn list_transition_records(
        &self,
        order_id: &str,
    ) -> Result<Vec<TransitionRecord>, OrderStoreError> {
        (**self).list_transition_records(order_id)
    }
}
