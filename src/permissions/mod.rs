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

//! The permission model: the roles recognized by the workflow, the canonical
//! role and state to allowed-actions table, and the checker that resolves an
//! actor's effective role and organizational scope for an order.

pub mod error;

pub use error::PermissionCheckerError;

use std::fmt;
use std::str::FromStr;

use crate::error::InternalError;
use crate::membership::{Actor, MembershipDirectory};
use crate::purchase_order::{OrderKind, PurchaseOrder};
use crate::workflow::{OrderStatus, WorkflowAction};

/// A role a user may hold within a company.
///
/// Roles are a closed set; the membership directory resolves a user to at
/// most one role per company. `SupplierMember` is the effective role of any
/// active member of an order's assigned supplier company, whatever role they
/// hold there. `Logistics` is view-only and maps to no actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    TeamLead,
    SiteManager,
    Management,
    Warehouse,
    Logistics,
    SupplierMember,
    Admin,
}

impl Role {
    /// Returns the actions this role may take against an order in `status`.
    ///
    /// This is the single canonical permission table. `Admin` is not listed
    /// here: an admin may take any action whose target is a legal outgoing
    /// edge, which [`PermissionChecker`] handles as an override.
    pub fn allowed_actions(&self, status: OrderStatus) -> &'static [WorkflowAction] {
        use OrderStatus::*;
        use WorkflowAction::*;

        match (self, status) {
            (Role::TeamLead, Draft) => &[Submit, Cancel],
            (Role::TeamLead, PendingSiteManager)
            | (Role::TeamLead, PendingManagement)
            | (Role::TeamLead, PendingSupplier) => &[Cancel],
            (Role::SiteManager, PendingSiteManager) => &[ApproveSite, RejectSite, Cancel],
            (Role::Management, PendingManagement) => &[ApproveMgmt, RejectMgmt, Cancel],
            (Role::SupplierMember, PendingSupplier) => &[AcceptSupplier, RejectSupplier, Cancel],
            (Role::SupplierMember, AcceptedSupplier) | (Role::SupplierMember, InTransit) => {
                &[Deliver]
            }
            (Role::Warehouse, Delivered) => &[Complete],
            _ => &[],
        }
    }

    /// Returns every non-admin role.
    pub fn all() -> &'static [Role] {
        &[
            Role::TeamLead,
            Role::SiteManager,
            Role::Management,
            Role::Warehouse,
            Role::Logistics,
            Role::SupplierMember,
        ]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Role::TeamLead => write!(f, "team-lead"),
            Role::SiteManager => write!(f, "site-manager"),
            Role::Management => write!(f, "management"),
            Role::Warehouse => write!(f, "warehouse"),
            Role::Logistics => write!(f, "logistics"),
            Role::SupplierMember => write!(f, "supplier-member"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "team-lead" => Ok(Role::TeamLead),
            "site-manager" => Ok(Role::SiteManager),
            "management" => Ok(Role::Management),
            "warehouse" => Ok(Role::Warehouse),
            "logistics" => Ok(Role::Logistics),
            "supplier-member" => Ok(Role::SupplierMember),
            "admin" => Ok(Role::Admin),
            _ => Err(InternalError::with_message(format!("Unknown role: {}", s))),
        }
    }
}

/// Resolves an actor's effective role and organizational scope for a
/// purchase order against the membership directory.
pub struct PermissionChecker<'a> {
    directory: &'a dyn MembershipDirectory,
}

impl<'a> PermissionChecker<'a> {
    /// Returns a PermissionChecker backed by the given directory.
    pub fn new(directory: &'a dyn MembershipDirectory) -> PermissionChecker<'a> {
        PermissionChecker { directory }
    }

    /// Resolves the actor's effective role for the given order.
    ///
    /// This is the single normalization point for "which company side": an
    /// actor acting for the buyer company carries the role the directory
    /// records there; an actor acting for the order's assigned supplier
    /// company is a `SupplierMember` whatever their recorded role, unless
    /// that role is `Admin`. An actor acting for a company that is not party
    /// to the order has no role.
    pub fn resolve_role(
        &self,
        order: &PurchaseOrder,
        actor: &Actor,
    ) -> Result<Option<Role>, PermissionCheckerError> {
        if actor.company_id() == order.buyer_company_id() {
            return Ok(self
                .directory
                .get_role(actor.user_id(), actor.company_id())?);
        }

        if order.supplier_company_id() == Some(actor.company_id()) {
            return Ok(self
                .directory
                .get_role(actor.user_id(), actor.company_id())?
                .map(|role| match role {
                    Role::Admin => Role::Admin,
                    _ => Role::SupplierMember,
                }));
        }

        Ok(None)
    }

    /// Returns `true` if the actor satisfies the organizational scope
    /// predicate for the order: membership in the order's organizational
    /// unit. External orders carry no such restriction.
    pub fn is_within_org_scope(
        &self,
        order: &PurchaseOrder,
        actor: &Actor,
    ) -> Result<bool, PermissionCheckerError> {
        match order.order_kind() {
            OrderKind::External => Ok(true),
            OrderKind::Internal => {
                let org_unit_id = order.org_unit_id().ok_or_else(|| {
                    PermissionCheckerError::InternalError(InternalError::with_message(format!(
                        "Internal order {} has no organizational unit",
                        order.id()
                    )))
                })?;
                Ok(self.directory.is_member_of_org_unit(
                    actor.user_id(),
                    org_unit_id,
                    actor.company_id(),
                )?)
            }
        }
    }

    /// Returns `true` if the scope predicate applies to this role and action
    /// on this order: a site manager approving or rejecting an internal
    /// order.
    pub fn scope_predicate_applies(
        order: &PurchaseOrder,
        role: Role,
        action: WorkflowAction,
    ) -> bool {
        role == Role::SiteManager
            && order.order_kind() == OrderKind::Internal
            && matches!(
                action,
                WorkflowAction::ApproveSite | WorkflowAction::RejectSite
            )
    }

    /// Answers "what may this actor do to this order right now".
    ///
    /// The role's allowed actions are intersected with the legal outgoing
    /// edges of the order's current status. A site manager that fails the
    /// organizational scope predicate on an internal order gets the empty
    /// set, overriding any table entry. Admins get every action whose target
    /// is a legal outgoing edge. Never mutates state.
    pub fn available_actions(
        &self,
        order: &PurchaseOrder,
        actor: &Actor,
    ) -> Result<Vec<WorkflowAction>, PermissionCheckerError> {
        let role = match self.resolve_role(order, actor)? {
            Some(role) => role,
            None => return Ok(Vec::new()),
        };

        if role == Role::Admin {
            return Ok(order
                .status()
                .transitions()
                .iter()
                .filter_map(|to| WorkflowAction::for_transition(order.status(), *to))
                .collect());
        }

        let actions: Vec<WorkflowAction> = role
            .allowed_actions(order.status())
            .iter()
            .copied()
            .filter(|action| action.target_status(order.status()).is_some())
            .collect();

        if !actions.is_empty()
            && role == Role::SiteManager
            && order.order_kind() == OrderKind::Internal
            && !self.is_within_org_scope(order, actor)?
        {
            return Ok(Vec::new());
        }

        Ok(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::membership::MemoryMembershipDirectory;
    use crate::purchase_order::PurchaseOrderBuilder;

    fn internal_order(status: OrderStatus) -> PurchaseOrder {
        PurchaseOrderBuilder::new()
            .with_id("po-1")
            .with_buyer_company_id("acme")
            .with_supplier_company_id("supl")
            .with_creator_id("alice")
            .with_internal_scope("unit-1")
            .with_status(status)
            .build()
            .expect("build order")
    }

    /// Tests that every action in the permission table targets a legal
    /// outgoing edge of the state it is allowed from, for every role and
    /// state.
    #[test]
    fn test_table_actions_are_legal_edges() {
        for role in Role::all() {
            for status in OrderStatus::all() {
                for action in role.allowed_actions(*status) {
                    assert!(
                        action.target_status(*status).is_some(),
                        "({}, {}) allows {} with no legal edge",
                        role,
                        status,
                        action
                    );
                }
            }
        }
    }

    /// Tests that no role is granted an action from a terminal state.
    #[test]
    fn test_no_actions_from_terminal_states() {
        for role in Role::all() {
            for status in OrderStatus::all() {
                if status.is_terminal() {
                    assert!(role.allowed_actions(*status).is_empty());
                }
            }
        }
    }

    /// Tests that the view-only logistics role maps to no actions anywhere.
    #[test]
    fn test_logistics_is_view_only() {
        for status in OrderStatus::all() {
            assert!(Role::Logistics.allowed_actions(*status).is_empty());
        }
    }

    /// Tests that a buyer-side actor resolves to the directory's recorded
    /// role and that a stranger company resolves to none.
    #[test]
    fn test_resolve_role_buyer_side() {
        let mut directory = MemoryMembershipDirectory::new();
        directory.add_role("alice", "acme", Role::TeamLead);
        let checker = PermissionChecker::new(&directory);
        let order = internal_order(OrderStatus::Draft);

        assert_eq!(
            Some(Role::TeamLead),
            checker
                .resolve_role(&order, &Actor::new("alice", "acme"))
                .expect("resolve")
        );
        assert_eq!(
            None,
            checker
                .resolve_role(&order, &Actor::new("alice", "stranger"))
                .expect("resolve")
        );
    }

    /// Tests that any member of the supplier company resolves to
    /// `SupplierMember` regardless of their recorded role there.
    #[test]
    fn test_resolve_role_supplier_side() {
        let mut directory = MemoryMembershipDirectory::new();
        directory.add_role("carol", "supl", Role::Warehouse);
        let checker = PermissionChecker::new(&directory);
        let order = internal_order(OrderStatus::PendingSupplier);

        assert_eq!(
            Some(Role::SupplierMember),
            checker
                .resolve_role(&order, &Actor::new("carol", "supl"))
                .expect("resolve")
        );
    }

    /// Tests that for every non-admin role and every state, the available
    /// actions equal the table entry intersected with the graph's edges,
    /// when the scope predicate does not apply.
    #[test]
    fn test_available_actions_match_table() {
        let order_template = PurchaseOrderBuilder::new()
            .with_id("po-1")
            .with_buyer_company_id("acme")
            .with_supplier_company_id("supl")
            .with_creator_id("alice")
            .with_external_scope("proj-1");

        for role in Role::all() {
            let mut directory = MemoryMembershipDirectory::new();
            let company = if *role == Role::SupplierMember {
                "supl"
            } else {
                "acme"
            };
            directory.add_role("user", company, *role);
            let checker = PermissionChecker::new(&directory);
            let actor = Actor::new("user", company);

            for status in OrderStatus::all() {
                let order = order_template
                    .clone()
                    .with_status(*status)
                    .build()
                    .expect("build order");

                let expected: Vec<WorkflowAction> = role
                    .allowed_actions(*status)
                    .iter()
                    .copied()
                    .filter(|action| action.target_status(*status).is_some())
                    .collect();

                assert_eq!(
                    expected,
                    checker
                        .available_actions(&order, &actor)
                        .expect("available actions"),
                    "role {} status {}",
                    role,
                    status
                );
            }
        }
    }

    /// Tests that a site manager outside the order's organizational unit
    /// gets the empty set on an internal order, cancel included.
    #[test]
    fn test_out_of_scope_site_manager_gets_nothing() {
        let mut directory = MemoryMembershipDirectory::new();
        directory.add_role("bob", "acme", Role::SiteManager);
        directory.add_org_unit_member("bob", "unit-2", "acme");
        let checker = PermissionChecker::new(&directory);
        let order = internal_order(OrderStatus::PendingSiteManager);

        assert!(checker
            .available_actions(&order, &Actor::new("bob", "acme"))
            .expect("available actions")
            .is_empty());
    }

    /// Tests that any site manager may act on an external order, which
    /// carries no organizational scope.
    #[test]
    fn test_external_order_has_no_scope_restriction() {
        let mut directory = MemoryMembershipDirectory::new();
        directory.add_role("bob", "acme", Role::SiteManager);
        let checker = PermissionChecker::new(&directory);
        let order = PurchaseOrderBuilder::new()
            .with_id("po-2")
            .with_buyer_company_id("acme")
            .with_creator_id("alice")
            .with_external_scope("proj-1")
            .with_status(OrderStatus::PendingSiteManager)
            .build()
            .expect("build order");

        assert_eq!(
            vec![
                WorkflowAction::ApproveSite,
                WorkflowAction::RejectSite,
                WorkflowAction::Cancel
            ],
            checker
                .available_actions(&order, &Actor::new("bob", "acme"))
                .expect("available actions")
        );
    }

    /// Tests that an admin is offered every manually triggerable edge and
    /// nothing from a terminal state.
    #[test]
    fn test_admin_override() {
        let mut directory = MemoryMembershipDirectory::new();
        directory.add_role("root", "acme", Role::Admin);
        let checker = PermissionChecker::new(&directory);
        let actor = Actor::new("root", "acme");

        let pending = internal_order(OrderStatus::PendingManagement);
        let mut actions = checker
            .available_actions(&pending, &actor)
            .expect("available actions");
        actions.sort_by_key(|a| a.to_string());
        assert_eq!(
            vec![
                WorkflowAction::ApproveMgmt,
                WorkflowAction::Cancel,
                WorkflowAction::RejectMgmt
            ],
            actions
        );

        let done = internal_order(OrderStatus::Completed);
        assert!(checker
            .available_actions(&done, &actor)
            .expect("available actions")
            .is_empty());
    }
}
