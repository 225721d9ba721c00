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

use super::error::InventoryLookupError;
use super::InventoryLookup;

/// An in-memory [`InventoryLookup`], for tests and fully in-process
/// deployments.
///
/// References with no recorded quantity report zero available.
#[derive(Default)]
pub struct MemoryInventoryLookup {
    // keyed by (company_id, inventory_ref)
    quantities: HashMap<(String, String), u64>,
}

impl MemoryInventoryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the available quantity of `inventory_ref` at `company_id`.
    pub fn set_quantity(&mut self, company_id: &str, inventory_ref: &str, quantity: u64) {
        self.quantities
            .insert((company_id.to_string(), inventory_ref.to_string()), quantity);
    }
}

impl InventoryLookup for MemoryInventoryLookup {
    fn get_available_quantity(
        &self,
        company_id: &str,
        inventory_ref: &str,
    ) -> Result<u64, InventoryLookupError> {
        Ok(self
            .quantities
            .get(&(company_id.to_string(), inventory_ref.to_string()))
            .copied()
            .unwrap_or(0))
    }
}
