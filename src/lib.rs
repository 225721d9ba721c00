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

//! A purchase order approval workflow engine.
//!
//! Purchase orders move through a fixed transition graph: creation, site
//! level approval, automatic stock verification, conditional management
//! approval, supplier acceptance and delivery. Every manual transition is
//! authorized against a role and, where applicable, an organizational scope,
//! and every applied transition is recorded in an immutable audit trail that
//! is guaranteed to agree with the order's persisted status.
//!
//! Storage, the membership directory, and inventory lookups are external
//! collaborators consumed through the traits in [`purchase_order::store`],
//! [`membership`] and [`inventory`].

extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;

pub mod engine;
pub mod error;
pub mod inventory;
pub mod membership;
pub mod permissions;
pub mod purchase_order;
pub mod workflow;
