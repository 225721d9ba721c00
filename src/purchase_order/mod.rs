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

//! The purchase order domain structs: the order itself, its line items, and
//! the immutable transition records that make up its audit trail.

mod error;
pub mod store;

pub use error::PurchaseOrderBuilderError;

use std::fmt;
use std::str::FromStr;

use crate::error::InternalError;
use crate::workflow::{OrderStatus, WorkflowAction};

/// The scoping of a purchase order.
///
/// The kind is fixed at creation and determines which scope field is set:
/// internal orders are tied to an organizational unit, external orders to a
/// project. Exactly one of the two is ever present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKind {
    /// Scoped to an organizational unit; fulfilled from internal stock when
    /// possible.
    Internal,
    /// Scoped to a project; always routed to an outside supplier.
    External,
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OrderKind::Internal => write!(f, "internal"),
            OrderKind::External => write!(f, "external"),
        }
    }
}

impl FromStr for OrderKind {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internal" => Ok(OrderKind::Internal),
            "external" => Ok(OrderKind::External),
            _ => Err(InternalError::with_message(format!(
                "Unknown order kind: {}",
                s
            ))),
        }
    }
}

/// A single line item on a purchase order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LineItem {
    item_id: String,
    requested_quantity: u64,
    unit: String,
    unit_price: Option<u64>,
    inventory_ref: Option<String>,
}

impl LineItem {
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn requested_quantity(&self) -> u64 {
        self.requested_quantity
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the unit price in minor currency units, if priced.
    pub fn unit_price(&self) -> Option<u64> {
        self.unit_price
    }

    /// Returns the linked inventory reference. Items without one are manual,
    /// off-catalog entries that cannot be fulfilled from internal stock.
    pub fn inventory_ref(&self) -> Option<&str> {
        self.inventory_ref.as_deref()
    }
}

/// Builder used to create a `LineItem`
#[derive(Default, Clone)]
pub struct LineItemBuilder {
    item_id: String,
    requested_quantity: u64,
    unit: String,
    unit_price: Option<u64>,
    inventory_ref: Option<String>,
}

impl LineItemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the item ID for this line item
    pub fn with_item_id(mut self, item_id: &str) -> Self {
        self.item_id = item_id.to_string();
        self
    }

    /// Sets the requested quantity for this line item
    pub fn with_requested_quantity(mut self, quantity: u64) -> Self {
        self.requested_quantity = quantity;
        self
    }

    /// Sets the unit of measure for this line item
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    /// Sets the unit price, in minor currency units, for this line item
    pub fn with_unit_price(mut self, unit_price: u64) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    /// Sets the linked inventory reference for this line item
    pub fn with_inventory_ref(mut self, inventory_ref: &str) -> Self {
        self.inventory_ref = Some(inventory_ref.to_string());
        self
    }

    pub fn build(self) -> Result<LineItem, PurchaseOrderBuilderError> {
        if self.item_id.is_empty() {
            return Err(PurchaseOrderBuilderError::MissingRequiredField(
                "item_id".to_string(),
            ));
        }

        if self.requested_quantity == 0 {
            return Err(PurchaseOrderBuilderError::InvalidField(
                "requested_quantity must be greater than zero".to_string(),
            ));
        }

        if self.unit.is_empty() {
            return Err(PurchaseOrderBuilderError::MissingRequiredField(
                "unit".to_string(),
            ));
        }

        Ok(LineItem {
            item_id: self.item_id,
            requested_quantity: self.requested_quantity,
            unit: self.unit,
            unit_price: self.unit_price,
            inventory_ref: self.inventory_ref,
        })
    }
}

/// A purchase order moving through the approval workflow.
///
/// Orders are created in `Draft` and mutated exclusively through the
/// workflow engine afterwards. The per-transition timestamps are each set
/// exactly once, by the transition that reaches the corresponding state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PurchaseOrder {
    id: String,
    buyer_company_id: String,
    supplier_company_id: Option<String>,
    creator_id: String,
    site_manager_id: Option<String>,
    order_kind: OrderKind,
    org_unit_id: Option<String>,
    project_id: Option<String>,
    status: OrderStatus,
    created_at: i64,
    submitted_at: Option<i64>,
    site_approved_at: Option<i64>,
    management_approved_at: Option<i64>,
    supplier_submitted_at: Option<i64>,
    supplier_accepted_at: Option<i64>,
    delivered_at: Option<i64>,
    rejection_reason: Option<String>,
    cancellation_reason: Option<String>,
    items: Vec<LineItem>,
}

impl PurchaseOrder {
    /// Returns the unique ID for the order
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the buyer company ID for the order
    pub fn buyer_company_id(&self) -> &str {
        &self.buyer_company_id
    }

    /// Returns the supplier company ID, present once the order has been
    /// routed to a supplier
    pub fn supplier_company_id(&self) -> Option<&str> {
        self.supplier_company_id.as_deref()
    }

    /// Returns the ID of the user that created the order
    pub fn creator_id(&self) -> &str {
        &self.creator_id
    }

    /// Returns the ID of the site manager that approved the order, if it has
    /// been site approved
    pub fn site_manager_id(&self) -> Option<&str> {
        self.site_manager_id.as_deref()
    }

    /// Returns the kind of the order
    pub fn order_kind(&self) -> OrderKind {
        self.order_kind
    }

    /// Returns the organizational unit the order is scoped to; present only
    /// for internal orders
    pub fn org_unit_id(&self) -> Option<&str> {
        self.org_unit_id.as_deref()
    }

    /// Returns the project the order is scoped to; present only for external
    /// orders
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// Returns the current workflow status of the order
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the creation timestamp, in seconds since the epoch
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn submitted_at(&self) -> Option<i64> {
        self.submitted_at
    }

    pub fn site_approved_at(&self) -> Option<i64> {
        self.site_approved_at
    }

    pub fn management_approved_at(&self) -> Option<i64> {
        self.management_approved_at
    }

    pub fn supplier_submitted_at(&self) -> Option<i64> {
        self.supplier_submitted_at
    }

    pub fn supplier_accepted_at(&self) -> Option<i64> {
        self.supplier_accepted_at
    }

    pub fn delivered_at(&self) -> Option<i64> {
        self.delivered_at
    }

    /// Returns the reason recorded by the most recent rejection, if any
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    /// Returns the reason recorded by a cancellation, if the order was
    /// cancelled
    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    /// Returns the line items on the order
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Converts the order back into a builder, preserving every field.
    pub fn into_builder(self) -> PurchaseOrderBuilder {
        PurchaseOrderBuilder {
            id: self.id,
            buyer_company_id: self.buyer_company_id,
            supplier_company_id: self.supplier_company_id,
            creator_id: self.creator_id,
            site_manager_id: self.site_manager_id,
            order_kind: Some(self.order_kind),
            org_unit_id: self.org_unit_id,
            project_id: self.project_id,
            status: Some(self.status),
            created_at: Some(self.created_at),
            submitted_at: self.submitted_at,
            site_approved_at: self.site_approved_at,
            management_approved_at: self.management_approved_at,
            supplier_submitted_at: self.supplier_submitted_at,
            supplier_accepted_at: self.supplier_accepted_at,
            delivered_at: self.delivered_at,
            rejection_reason: self.rejection_reason,
            cancellation_reason: self.cancellation_reason,
            items: self.items,
        }
    }
}

/// Builder used to create a `PurchaseOrder`
///
/// A fresh order starts in `Draft`; the status and timestamp setters exist
/// so stores can rehydrate persisted orders.
#[derive(Default, Clone)]
pub struct PurchaseOrderBuilder {
    id: String,
    buyer_company_id: String,
    supplier_company_id: Option<String>,
    creator_id: String,
    site_manager_id: Option<String>,
    order_kind: Option<OrderKind>,
    org_unit_id: Option<String>,
    project_id: Option<String>,
    status: Option<OrderStatus>,
    created_at: Option<i64>,
    submitted_at: Option<i64>,
    site_approved_at: Option<i64>,
    management_approved_at: Option<i64>,
    supplier_submitted_at: Option<i64>,
    supplier_accepted_at: Option<i64>,
    delivered_at: Option<i64>,
    rejection_reason: Option<String>,
    cancellation_reason: Option<String>,
    items: Vec<LineItem>,
}

impl PurchaseOrderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the unique ID for this order
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the buyer company ID for this order
    pub fn with_buyer_company_id(mut self, company_id: &str) -> Self {
        self.buyer_company_id = company_id.to_string();
        self
    }

    /// Sets the supplier company ID for this order
    pub fn with_supplier_company_id(mut self, company_id: &str) -> Self {
        self.supplier_company_id = Some(company_id.to_string());
        self
    }

    /// Sets the ID of the user creating this order
    pub fn with_creator_id(mut self, creator_id: &str) -> Self {
        self.creator_id = creator_id.to_string();
        self
    }

    /// Sets the ID of the site manager that approved this order
    pub fn with_site_manager_id(mut self, site_manager_id: &str) -> Self {
        self.site_manager_id = Some(site_manager_id.to_string());
        self
    }

    /// Scopes this order to an organizational unit, making it an internal
    /// order
    pub fn with_internal_scope(mut self, org_unit_id: &str) -> Self {
        self.order_kind = Some(OrderKind::Internal);
        self.org_unit_id = Some(org_unit_id.to_string());
        self
    }

    /// Scopes this order to a project, making it an external order
    pub fn with_external_scope(mut self, project_id: &str) -> Self {
        self.order_kind = Some(OrderKind::External);
        self.project_id = Some(project_id.to_string());
        self
    }

    /// Sets the workflow status for this order
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the creation timestamp, in seconds since the epoch, for this
    /// order
    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_submitted_at(mut self, at: i64) -> Self {
        self.submitted_at = Some(at);
        self
    }

    pub fn with_site_approved_at(mut self, at: i64) -> Self {
        self.site_approved_at = Some(at);
        self
    }

    pub fn with_management_approved_at(mut self, at: i64) -> Self {
        self.management_approved_at = Some(at);
        self
    }

    pub fn with_supplier_submitted_at(mut self, at: i64) -> Self {
        self.supplier_submitted_at = Some(at);
        self
    }

    pub fn with_supplier_accepted_at(mut self, at: i64) -> Self {
        self.supplier_accepted_at = Some(at);
        self
    }

    pub fn with_delivered_at(mut self, at: i64) -> Self {
        self.delivered_at = Some(at);
        self
    }

    /// Sets the rejection reason for this order
    pub fn with_rejection_reason(mut self, reason: &str) -> Self {
        self.rejection_reason = Some(reason.to_string());
        self
    }

    /// Sets the cancellation reason for this order
    pub fn with_cancellation_reason(mut self, reason: &str) -> Self {
        self.cancellation_reason = Some(reason.to_string());
        self
    }

    /// Sets the line items for this order
    pub fn with_items(mut self, items: Vec<LineItem>) -> Self {
        self.items = items;
        self
    }

    pub fn build(self) -> Result<PurchaseOrder, PurchaseOrderBuilderError> {
        if self.id.is_empty() {
            return Err(PurchaseOrderBuilderError::MissingRequiredField(
                "id".to_string(),
            ));
        }

        if self.buyer_company_id.is_empty() {
            return Err(PurchaseOrderBuilderError::MissingRequiredField(
                "buyer_company_id".to_string(),
            ));
        }

        if self.creator_id.is_empty() {
            return Err(PurchaseOrderBuilderError::MissingRequiredField(
                "creator_id".to_string(),
            ));
        }

        let order_kind = self.order_kind.ok_or_else(|| {
            PurchaseOrderBuilderError::MissingRequiredField("order_kind".to_string())
        })?;

        // Exactly one scope field must be set, determined by the kind.
        match order_kind {
            OrderKind::Internal => {
                if self.org_unit_id.is_none() {
                    return Err(PurchaseOrderBuilderError::MissingRequiredField(
                        "org_unit_id".to_string(),
                    ));
                }
                if self.project_id.is_some() {
                    return Err(PurchaseOrderBuilderError::InvalidField(
                        "internal orders must not be scoped to a project".to_string(),
                    ));
                }
            }
            OrderKind::External => {
                if self.project_id.is_none() {
                    return Err(PurchaseOrderBuilderError::MissingRequiredField(
                        "project_id".to_string(),
                    ));
                }
                if self.org_unit_id.is_some() {
                    return Err(PurchaseOrderBuilderError::InvalidField(
                        "external orders must not be scoped to an organizational unit"
                            .to_string(),
                    ));
                }
            }
        }

        Ok(PurchaseOrder {
            id: self.id,
            buyer_company_id: self.buyer_company_id,
            supplier_company_id: self.supplier_company_id,
            creator_id: self.creator_id,
            site_manager_id: self.site_manager_id,
            order_kind,
            org_unit_id: self.org_unit_id,
            project_id: self.project_id,
            status: self.status.unwrap_or(OrderStatus::Draft),
            created_at: self.created_at.unwrap_or(0),
            submitted_at: self.submitted_at,
            site_approved_at: self.site_approved_at,
            management_approved_at: self.management_approved_at,
            supplier_submitted_at: self.supplier_submitted_at,
            supplier_accepted_at: self.supplier_accepted_at,
            delivered_at: self.delivered_at,
            rejection_reason: self.rejection_reason,
            cancellation_reason: self.cancellation_reason,
            items: self.items,
        })
    }
}

/// An immutable audit entry recording one applied transition.
///
/// `actor_id` and `action` are both absent for system-triggered automatic
/// transitions and both present for manual ones.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransitionRecord {
    order_id: String,
    from_status: OrderStatus,
    to_status: OrderStatus,
    actor_id: Option<String>,
    action: Option<WorkflowAction>,
    timestamp: i64,
    notes: Option<String>,
    reason: Option<String>,
}

impl TransitionRecord {
    /// Returns the ID of the order the record belongs to
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn from_status(&self) -> OrderStatus {
        self.from_status
    }

    pub fn to_status(&self) -> OrderStatus {
        self.to_status
    }

    /// Returns the ID of the acting user; `None` marks a system-triggered
    /// transition
    pub fn actor_id(&self) -> Option<&str> {
        self.actor_id.as_deref()
    }

    /// Returns the triggering action; `None` marks a system-triggered
    /// transition
    pub fn action(&self) -> Option<WorkflowAction> {
        self.action
    }

    /// Returns the timestamp the transition was applied at, in seconds since
    /// the epoch
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

/// Builder used to create a `TransitionRecord`
#[derive(Default, Clone)]
pub struct TransitionRecordBuilder {
    order_id: String,
    from_status: Option<OrderStatus>,
    to_status: Option<OrderStatus>,
    actor_id: Option<String>,
    action: Option<WorkflowAction>,
    timestamp: Option<i64>,
    notes: Option<String>,
    reason: Option<String>,
}

impl TransitionRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ID of the order this record belongs to
    pub fn with_order_id(mut self, order_id: &str) -> Self {
        self.order_id = order_id.to_string();
        self
    }

    /// Sets the status the order moved from
    pub fn with_from_status(mut self, status: OrderStatus) -> Self {
        self.from_status = Some(status);
        self
    }

    /// Sets the status the order moved to
    pub fn with_to_status(mut self, status: OrderStatus) -> Self {
        self.to_status = Some(status);
        self
    }

    /// Sets the acting user for this record
    pub fn with_actor_id(mut self, actor_id: &str) -> Self {
        self.actor_id = Some(actor_id.to_string());
        self
    }

    /// Sets the triggering action for this record
    pub fn with_action(mut self, action: WorkflowAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Sets the timestamp, in seconds since the epoch, for this record
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets free-form notes on this record
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// Sets the reason given for the transition
    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }

    pub fn build(self) -> Result<TransitionRecord, PurchaseOrderBuilderError> {
        if self.order_id.is_empty() {
            return Err(PurchaseOrderBuilderError::MissingRequiredField(
                "order_id".to_string(),
            ));
        }

        let from_status = self.from_status.ok_or_else(|| {
            PurchaseOrderBuilderError::MissingRequiredField("from_status".to_string())
        })?;

        let to_status = self.to_status.ok_or_else(|| {
            PurchaseOrderBuilderError::MissingRequiredField("to_status".to_string())
        })?;

        let timestamp = self.timestamp.ok_or_else(|| {
            PurchaseOrderBuilderError::MissingRequiredField("timestamp".to_string())
        })?;

        // An actor without an action, or an action without an actor, would
        // make the audit trail ambiguous about who triggered the move.
        if self.actor_id.is_some() != self.action.is_some() {
            return Err(PurchaseOrderBuilderError::InvalidField(
                "actor_id and action must be set together".to_string(),
            ));
        }

        Ok(TransitionRecord {
            order_id: self.order_id,
            from_status,
            to_status,
            actor_id: self.actor_id,
            action: self.action,
            timestamp,
            notes: self.notes,
            reason: self.reason,
        })
    }
}
