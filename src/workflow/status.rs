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

use std::fmt;
use std::str::FromStr;

use crate::error::InternalError;

/// The state of a purchase order within the approval workflow.
///
/// The legal transitions between states form a fixed graph, exposed through
/// [`OrderStatus::transitions`]. A transition request for an edge not in the
/// graph is rejected by the engine regardless of the acting party.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Draft,
    PendingSiteManager,
    ApprovedSiteManager,
    CheckingStock,
    FulfilledInternal,
    NeedsExternalOrder,
    PendingManagement,
    ApprovedManagement,
    RejectedManagement,
    SubmittedToSupplier,
    PendingSupplier,
    AcceptedSupplier,
    RejectedSupplier,
    InTransit,
    Delivered,
    Completed,
    Cancelled,
}

/// A transition that fires without actor input.
///
/// Most automatic edges are unconditional pass-throughs; the edge out of
/// `CheckingStock` branches on the stock availability verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutomaticTransition {
    /// The order always moves to the contained state.
    Unconditional(OrderStatus),
    /// The order moves to `fulfilled` if every line item can be covered from
    /// internal stock, otherwise to `needs_external`.
    StockBranch {
        fulfilled: OrderStatus,
        needs_external: OrderStatus,
    },
}

impl OrderStatus {
    /// Returns the legal outgoing edges from this state.
    ///
    /// Terminal states return an empty slice.
    pub fn transitions(&self) -> &'static [OrderStatus] {
        use OrderStatus::*;

        match self {
            Draft => &[PendingSiteManager, Cancelled],
            PendingSiteManager => &[ApprovedSiteManager, Draft, Cancelled],
            ApprovedSiteManager => &[CheckingStock],
            CheckingStock => &[FulfilledInternal, NeedsExternalOrder],
            FulfilledInternal => &[],
            NeedsExternalOrder => &[PendingManagement],
            PendingManagement => &[ApprovedManagement, RejectedManagement, Cancelled],
            RejectedManagement => &[Draft],
            ApprovedManagement => &[SubmittedToSupplier],
            SubmittedToSupplier => &[PendingSupplier],
            PendingSupplier => &[AcceptedSupplier, RejectedSupplier, Cancelled],
            AcceptedSupplier => &[InTransit],
            RejectedSupplier => &[PendingManagement],
            InTransit => &[Delivered],
            Delivered => &[Completed],
            Completed => &[],
            Cancelled => &[],
        }
    }

    /// Returns `true` if `target` is a legal outgoing edge from this state.
    pub fn can_transition(&self, target: OrderStatus) -> bool {
        self.transitions().contains(&target)
    }

    /// Returns `true` if this state has no outgoing edges.
    pub fn is_terminal(&self) -> bool {
        self.transitions().is_empty()
    }

    /// Returns the automatic transition out of this state, if one exists.
    ///
    /// Automatic transitions are system triggered: they bypass role and
    /// scope checks and are recorded with no acting party. Rejected orders
    /// re-queue automatically: a management rejection returns the order to
    /// `Draft` for rework and a supplier rejection returns it to
    /// `PendingManagement` for re-sourcing.
    pub fn automatic_transition(&self) -> Option<AutomaticTransition> {
        use OrderStatus::*;

        match self {
            ApprovedSiteManager => Some(AutomaticTransition::Unconditional(CheckingStock)),
            CheckingStock => Some(AutomaticTransition::StockBranch {
                fulfilled: FulfilledInternal,
                needs_external: NeedsExternalOrder,
            }),
            NeedsExternalOrder => Some(AutomaticTransition::Unconditional(PendingManagement)),
            RejectedManagement => Some(AutomaticTransition::Unconditional(Draft)),
            ApprovedManagement => Some(AutomaticTransition::Unconditional(SubmittedToSupplier)),
            SubmittedToSupplier => Some(AutomaticTransition::Unconditional(PendingSupplier)),
            RejectedSupplier => Some(AutomaticTransition::Unconditional(PendingManagement)),
            _ => None,
        }
    }

    /// Returns every state in the workflow.
    pub fn all() -> &'static [OrderStatus] {
        use OrderStatus::*;

        &[
            Draft,
            PendingSiteManager,
            ApprovedSiteManager,
            CheckingStock,
            FulfilledInternal,
            NeedsExternalOrder,
            PendingManagement,
            ApprovedManagement,
            RejectedManagement,
            SubmittedToSupplier,
            PendingSupplier,
            AcceptedSupplier,
            RejectedSupplier,
            InTransit,
            Delivered,
            Completed,
            Cancelled,
        ]
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OrderStatus::Draft => write!(f, "draft"),
            OrderStatus::PendingSiteManager => write!(f, "pending_site_manager"),
            OrderStatus::ApprovedSiteManager => write!(f, "approved_site_manager"),
            OrderStatus::CheckingStock => write!(f, "checking_stock"),
            OrderStatus::FulfilledInternal => write!(f, "fulfilled_internal"),
            OrderStatus::NeedsExternalOrder => write!(f, "needs_external_order"),
            OrderStatus::PendingManagement => write!(f, "pending_management"),
            OrderStatus::ApprovedManagement => write!(f, "approved_management"),
            OrderStatus::RejectedManagement => write!(f, "rejected_management"),
            OrderStatus::SubmittedToSupplier => write!(f, "submitted_to_supplier"),
            OrderStatus::PendingSupplier => write!(f, "pending_supplier"),
            OrderStatus::AcceptedSupplier => write!(f, "accepted_supplier"),
            OrderStatus::RejectedSupplier => write!(f, "rejected_supplier"),
            OrderStatus::InTransit => write!(f, "in_transit"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(OrderStatus::Draft),
            "pending_site_manager" => Ok(OrderStatus::PendingSiteManager),
            "approved_site_manager" => Ok(OrderStatus::ApprovedSiteManager),
            "checking_stock" => Ok(OrderStatus::CheckingStock),
            "fulfilled_internal" => Ok(OrderStatus::FulfilledInternal),
            "needs_external_order" => Ok(OrderStatus::NeedsExternalOrder),
            "pending_management" => Ok(OrderStatus::PendingManagement),
            "approved_management" => Ok(OrderStatus::ApprovedManagement),
            "rejected_management" => Ok(OrderStatus::RejectedManagement),
            "submitted_to_supplier" => Ok(OrderStatus::SubmittedToSupplier),
            "pending_supplier" => Ok(OrderStatus::PendingSupplier),
            "accepted_supplier" => Ok(OrderStatus::AcceptedSupplier),
            "rejected_supplier" => Ok(OrderStatus::RejectedSupplier),
            "in_transit" => Ok(OrderStatus::InTransit),
            "delivered" => Ok(OrderStatus::Delivered),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(InternalError::with_message(format!(
                "Unknown order status: {}",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that the three terminal states have no outgoing edges and that
    /// every other state has at least one.
    #[test]
    fn test_terminal_states() {
        for status in OrderStatus::all() {
            let terminal = matches!(
                status,
                OrderStatus::FulfilledInternal | OrderStatus::Completed | OrderStatus::Cancelled
            );
            assert_eq!(terminal, status.is_terminal(), "{}", status);
        }
    }

    /// Tests that every declared edge points at a state that is itself part
    /// of the workflow, and that no state declares a self edge.
    #[test]
    fn test_graph_is_closed() {
        for status in OrderStatus::all() {
            for target in status.transitions() {
                assert!(OrderStatus::all().contains(target));
                assert_ne!(status, target);
            }
        }
    }

    /// Tests that every automatic transition is a legal edge in the graph.
    #[test]
    fn test_automatic_transitions_are_legal_edges() {
        for status in OrderStatus::all() {
            match status.automatic_transition() {
                Some(AutomaticTransition::Unconditional(target)) => {
                    assert!(status.can_transition(target), "{} -> {}", status, target);
                }
                Some(AutomaticTransition::StockBranch {
                    fulfilled,
                    needs_external,
                }) => {
                    assert!(status.can_transition(fulfilled));
                    assert!(status.can_transition(needs_external));
                }
                None => (),
            }
        }
    }

    /// Tests that the status names round trip through `Display`/`FromStr`.
    #[test]
    fn test_status_name_round_trip() {
        for status in OrderStatus::all() {
            assert_eq!(
                *status,
                status.to_string().parse::<OrderStatus>().expect("parse")
            );
        }
    }
}
