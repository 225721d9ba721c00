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

//! The workflow engine: validates, authorizes and applies transitions,
//! resolves automatic transitions, and answers the available-actions query.

mod error;

pub use error::WorkflowError;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::InternalError;
use crate::inventory::{check_stock, InventoryLookup, StockCheckResult};
use crate::membership::{Actor, MembershipDirectory};
use crate::permissions::{PermissionChecker, Role};
use crate::purchase_order::store::OrderStore;
use crate::purchase_order::{PurchaseOrder, TransitionRecordBuilder};
use crate::workflow::{AutomaticTransition, OrderStatus, WorkflowAction};

/// Routes purchase orders through the approval workflow.
///
/// The engine holds no mutable state of its own; every call is a
/// self-contained read-modify-write against the order store. Racing
/// transition attempts on the same order are serialized by the store's
/// optimistic status check.
pub struct WorkflowEngine {
    order_store: Box<dyn OrderStore>,
    membership: Box<dyn MembershipDirectory>,
    inventory: Box<dyn InventoryLookup>,
}

impl WorkflowEngine {
    pub fn new(
        order_store: Box<dyn OrderStore>,
        membership: Box<dyn MembershipDirectory>,
        inventory: Box<dyn InventoryLookup>,
    ) -> Self {
        Self {
            order_store,
            membership,
            inventory,
        }
    }

    /// Moves an order to `target`.
    ///
    /// A manual transition names the acting party in `actor` and is
    /// validated against the transition graph, the acting party's role, and
    /// the organizational scope predicate where it applies. An automatic
    /// transition passes `None` and skips authorization entirely; only the
    /// resolver in [`WorkflowEngine::run_automatic_transitions`] is expected
    /// to do so.
    ///
    /// The status change and its transition record are applied atomically:
    /// if the record cannot be appended the status change is rolled back.
    pub fn transition(
        &self,
        order_id: &str,
        target: OrderStatus,
        actor: Option<&Actor>,
        notes: Option<&str>,
        reason: Option<&str>,
    ) -> Result<PurchaseOrder, WorkflowError> {
        let order = self
            .order_store
            .get_order(order_id)?
            .ok_or_else(|| WorkflowError::OrderNotFound(order_id.to_string()))?;

        self.apply_transition(order, target, actor, notes, reason)
    }

    /// Applies every automatic transition the order is due for, returning
    /// the order at rest.
    ///
    /// The edge out of `CheckingStock` branches on a stock verdict computed
    /// fresh at evaluation time. Each hop produces its own transition record
    /// with no acting party.
    pub fn run_automatic_transitions(
        &self,
        order_id: &str,
    ) -> Result<PurchaseOrder, WorkflowError> {
        let mut order = self
            .order_store
            .get_order(order_id)?
            .ok_or_else(|| WorkflowError::OrderNotFound(order_id.to_string()))?;

        while let Some(automatic) = order.status().automatic_transition() {
            let target = match automatic {
                AutomaticTransition::Unconditional(target) => target,
                AutomaticTransition::StockBranch {
                    fulfilled,
                    needs_external,
                } => {
                    let verdict = check_stock(&order, self.inventory.as_ref())?;
                    info!(
                        "Stock verdict for order {}: available {}",
                        order.id(),
                        verdict.available()
                    );
                    if verdict.available() {
                        fulfilled
                    } else {
                        needs_external
                    }
                }
            };

            order = self.apply_transition(order, target, None, None, None)?;
        }

        Ok(order)
    }

    /// Answers "what may this actor do to this order right now".
    ///
    /// Safe to call at high frequency; never mutates state.
    pub fn available_actions(
        &self,
        order_id: &str,
        actor: &Actor,
    ) -> Result<Vec<WorkflowAction>, WorkflowError> {
        let order = self
            .order_store
            .get_order(order_id)?
            .ok_or_else(|| WorkflowError::OrderNotFound(order_id.to_string()))?;

        let checker = PermissionChecker::new(self.membership.as_ref());
        Ok(checker.available_actions(&order, actor)?)
    }

    /// Evaluates whether the order can be fulfilled from the buyer
    /// company's internal stock. Recomputed fresh on every call.
    pub fn check_stock_availability(
        &self,
        order_id: &str,
    ) -> Result<StockCheckResult, WorkflowError> {
        let order = self
            .order_store
            .get_order(order_id)?
            .ok_or_else(|| WorkflowError::OrderNotFound(order_id.to_string()))?;

        Ok(check_stock(&order, self.inventory.as_ref())?)
    }

    fn apply_transition(
        &self,
        order: PurchaseOrder,
        target: OrderStatus,
        actor: Option<&Actor>,
        notes: Option<&str>,
        reason: Option<&str>,
    ) -> Result<PurchaseOrder, WorkflowError> {
        let from = order.status();

        if !from.can_transition(target) {
            return Err(WorkflowError::InvalidTransition { from, to: target });
        }

        let action = match actor {
            Some(actor) => Some(self.authorize(&order, actor, target)?),
            None => None,
        };

        let timestamp = current_time_secs()?;
        let updated = apply_state_change(&order, target, actor, reason, timestamp)?;

        self.order_store.save_order(updated.clone(), from)?;

        let mut record_builder = TransitionRecordBuilder::new()
            .with_order_id(order.id())
            .with_from_status(from)
            .with_to_status(target)
            .with_timestamp(timestamp);
        if let Some(actor) = actor {
            record_builder = record_builder.with_actor_id(actor.user_id());
        }
        if let Some(action) = action {
            record_builder = record_builder.with_action(action);
        }
        if let Some(notes) = notes {
            record_builder = record_builder.with_notes(notes);
        }
        if let Some(reason) = reason {
            record_builder = record_builder.with_reason(reason);
        }
        let record = record_builder.build()?;

        if let Err(append_err) = self.order_store.append_transition_record(record) {
            warn!(
                "Rolling back order {} to {}: transition record could not be appended: {}",
                order.id(),
                from,
                append_err
            );
            self.order_store
                .save_order(order.clone(), target)
                .map_err(|rollback_err| {
                    WorkflowError::InternalError(InternalError::with_message(format!(
                        "Order {} status and history have diverged: append failed ({}) and \
                         rollback failed ({})",
                        order.id(),
                        append_err,
                        rollback_err
                    )))
                })?;
            return Err(append_err.into());
        }

        info!(
            "Order {} transitioned {} -> {} by {}",
            order.id(),
            from,
            target,
            actor.map(Actor::user_id).unwrap_or("system")
        );

        Ok(updated)
    }

    /// Authorizes a manual transition and returns the action it maps to.
    fn authorize(
        &self,
        order: &PurchaseOrder,
        actor: &Actor,
        target: OrderStatus,
    ) -> Result<WorkflowAction, WorkflowError> {
        let action = WorkflowAction::for_transition(order.status(), target).ok_or_else(|| {
            WorkflowError::AuthorizationDenied(format!(
                "Transition from {} to {} is system triggered",
                order.status(),
                target
            ))
        })?;

        let checker = PermissionChecker::new(self.membership.as_ref());
        let role = checker.resolve_role(order, actor)?.ok_or_else(|| {
            WorkflowError::AuthorizationDenied(format!(
                "User {} holds no role at company {} for order {}",
                actor.user_id(),
                actor.company_id(),
                order.id()
            ))
        })?;

        debug!(
            "Authorizing {} as {} for {} on order {}",
            actor.user_id(),
            role,
            action,
            order.id()
        );

        if role == Role::Admin {
            return Ok(action);
        }

        if !role.allowed_actions(order.status()).contains(&action) {
            return Err(WorkflowError::AuthorizationDenied(format!(
                "Role {} may not {} an order in {}",
                role,
                action,
                order.status()
            )));
        }

        if PermissionChecker::scope_predicate_applies(order, role, action)
            && !checker.is_within_org_scope(order, actor)?
        {
            return Err(WorkflowError::AuthorizationDenied(format!(
                "User {} is not a member of organizational unit {}",
                actor.user_id(),
                order.org_unit_id().unwrap_or_default()
            )));
        }

        Ok(action)
    }
}

/// Builds the updated order for a transition: the new status, the one
/// timestamp field the target state owns (set only if not already set), the
/// rejection or cancellation reason where applicable, and the approving site
/// manager on site approval.
fn apply_state_change(
    order: &PurchaseOrder,
    target: OrderStatus,
    actor: Option<&Actor>,
    reason: Option<&str>,
    timestamp: i64,
) -> Result<PurchaseOrder, WorkflowError> {
    let mut builder = order.clone().into_builder().with_status(target);

    match target {
        OrderStatus::PendingSiteManager => {
            if order.submitted_at().is_none() {
                builder = builder.with_submitted_at(timestamp);
            }
        }
        OrderStatus::ApprovedSiteManager => {
            if order.site_approved_at().is_none() {
                builder = builder.with_site_approved_at(timestamp);
            }
            if order.site_manager_id().is_none() {
                if let Some(actor) = actor {
                    builder = builder.with_site_manager_id(actor.user_id());
                }
            }
        }
        OrderStatus::ApprovedManagement => {
            if order.management_approved_at().is_none() {
                builder = builder.with_management_approved_at(timestamp);
            }
        }
        OrderStatus::SubmittedToSupplier => {
            if order.supplier_submitted_at().is_none() {
                builder = builder.with_supplier_submitted_at(timestamp);
            }
        }
        OrderStatus::AcceptedSupplier => {
            if order.supplier_accepted_at().is_none() {
                builder = builder.with_supplier_accepted_at(timestamp);
            }
        }
        OrderStatus::Delivered => {
            if order.delivered_at().is_none() {
                builder = builder.with_delivered_at(timestamp);
            }
        }
        OrderStatus::RejectedManagement | OrderStatus::RejectedSupplier => {
            if let Some(reason) = reason {
                builder = builder.with_rejection_reason(reason);
            }
        }
        OrderStatus::Cancelled => {
            if let Some(reason) = reason {
                builder = builder.with_cancellation_reason(reason);
            }
        }
        _ => (),
    }

    Ok(builder.build()?)
}

fn current_time_secs() -> Result<i64, WorkflowError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs() as i64)
        .map_err(|err| WorkflowError::InternalError(InternalError::from_source(Box::new(err))))
}
