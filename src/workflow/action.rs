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

use super::status::OrderStatus;

/// An action a party may take against a purchase order.
///
/// Each action, taken from a given state, maps to exactly one target state.
/// `Deliver` is overloaded: it marks the order in transit when taken from
/// `AcceptedSupplier` and delivered when taken from `InTransit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowAction {
    Submit,
    ApproveSite,
    RejectSite,
    ApproveMgmt,
    RejectMgmt,
    AcceptSupplier,
    RejectSupplier,
    Deliver,
    Complete,
    Cancel,
}

impl WorkflowAction {
    /// Returns the state this action moves an order to, given the order's
    /// current state. Returns `None` if the action does not apply to the
    /// current state.
    pub fn target_status(&self, current: OrderStatus) -> Option<OrderStatus> {
        let target = match self {
            WorkflowAction::Submit => OrderStatus::PendingSiteManager,
            WorkflowAction::ApproveSite => OrderStatus::ApprovedSiteManager,
            WorkflowAction::RejectSite => OrderStatus::Draft,
            WorkflowAction::ApproveMgmt => OrderStatus::ApprovedManagement,
            WorkflowAction::RejectMgmt => OrderStatus::RejectedManagement,
            WorkflowAction::AcceptSupplier => OrderStatus::AcceptedSupplier,
            WorkflowAction::RejectSupplier => OrderStatus::RejectedSupplier,
            WorkflowAction::Deliver => match current {
                OrderStatus::AcceptedSupplier => OrderStatus::InTransit,
                OrderStatus::InTransit => OrderStatus::Delivered,
                _ => return None,
            },
            WorkflowAction::Complete => OrderStatus::Completed,
            WorkflowAction::Cancel => OrderStatus::Cancelled,
        };

        if current.can_transition(target) {
            Some(target)
        } else {
            None
        }
    }

    /// Returns the action that triggers the `from -> to` edge, or `None` if
    /// the edge is not in the graph or fires automatically.
    pub fn for_transition(from: OrderStatus, to: OrderStatus) -> Option<WorkflowAction> {
        if !from.can_transition(to) || from.automatic_transition().is_some() {
            return None;
        }

        match to {
            OrderStatus::PendingSiteManager => Some(WorkflowAction::Submit),
            OrderStatus::ApprovedSiteManager => Some(WorkflowAction::ApproveSite),
            OrderStatus::Draft => Some(WorkflowAction::RejectSite),
            OrderStatus::ApprovedManagement => Some(WorkflowAction::ApproveMgmt),
            OrderStatus::RejectedManagement => Some(WorkflowAction::RejectMgmt),
            OrderStatus::AcceptedSupplier => Some(WorkflowAction::AcceptSupplier),
            OrderStatus::RejectedSupplier => Some(WorkflowAction::RejectSupplier),
            OrderStatus::InTransit | OrderStatus::Delivered => Some(WorkflowAction::Deliver),
            OrderStatus::Completed => Some(WorkflowAction::Complete),
            OrderStatus::Cancelled => Some(WorkflowAction::Cancel),
            _ => None,
        }
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WorkflowAction::Submit => write!(f, "submit"),
            WorkflowAction::ApproveSite => write!(f, "approve-site"),
            WorkflowAction::RejectSite => write!(f, "reject-site"),
            WorkflowAction::ApproveMgmt => write!(f, "approve-mgmt"),
            WorkflowAction::RejectMgmt => write!(f, "reject-mgmt"),
            WorkflowAction::AcceptSupplier => write!(f, "accept-supplier"),
            WorkflowAction::RejectSupplier => write!(f, "reject-supplier"),
            WorkflowAction::Deliver => write!(f, "deliver"),
            WorkflowAction::Complete => write!(f, "complete"),
            WorkflowAction::Cancel => write!(f, "cancel"),
        }
    }
}

impl FromStr for WorkflowAction {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submit" => Ok(WorkflowAction::Submit),
            "approve-site" => Ok(WorkflowAction::ApproveSite),
            "reject-site" => Ok(WorkflowAction::RejectSite),
            "approve-mgmt" => Ok(WorkflowAction::ApproveMgmt),
            "reject-mgmt" => Ok(WorkflowAction::RejectMgmt),
            "accept-supplier" => Ok(WorkflowAction::AcceptSupplier),
            "reject-supplier" => Ok(WorkflowAction::RejectSupplier),
            "deliver" => Ok(WorkflowAction::Deliver),
            "complete" => Ok(WorkflowAction::Complete),
            "cancel" => Ok(WorkflowAction::Cancel),
            _ => Err(InternalError::with_message(format!(
                "Unknown workflow action: {}",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests the overloaded `Deliver` action: in transit from
    /// `AcceptedSupplier`, delivered from `InTransit`, inapplicable
    /// elsewhere.
    #[test]
    fn test_deliver_is_disambiguated_by_current_status() {
        assert_eq!(
            Some(OrderStatus::InTransit),
            WorkflowAction::Deliver.target_status(OrderStatus::AcceptedSupplier)
        );
        assert_eq!(
            Some(OrderStatus::Delivered),
            WorkflowAction::Deliver.target_status(OrderStatus::InTransit)
        );
        assert_eq!(
            None,
            WorkflowAction::Deliver.target_status(OrderStatus::Draft)
        );
    }

    /// Tests that an action whose target is not an edge from the current
    /// state resolves to no target.
    #[test]
    fn test_target_requires_legal_edge() {
        assert_eq!(
            None,
            WorkflowAction::ApproveMgmt.target_status(OrderStatus::Draft)
        );
        assert_eq!(
            None,
            WorkflowAction::Cancel.target_status(OrderStatus::Completed)
        );
    }

    /// Tests that every manual edge maps back to the action that produced
    /// it, and that automatic edges map to no action.
    #[test]
    fn test_for_transition_round_trip() {
        for from in OrderStatus::all() {
            for to in from.transitions() {
                match WorkflowAction::for_transition(*from, *to) {
                    Some(action) => {
                        assert_eq!(Some(*to), action.target_status(*from));
                    }
                    None => {
                        assert!(
                            from.automatic_transition().is_some(),
                            "manual edge {} -> {} has no action",
                            from,
                            to
                        );
                    }
                }
            }
        }
    }

    /// Tests that the action names round trip through `Display`/`FromStr`.
    #[test]
    fn test_action_name_round_trip() {
        let actions = [
            WorkflowAction::Submit,
            WorkflowAction::ApproveSite,
            WorkflowAction::RejectSite,
            WorkflowAction::ApproveMgmt,
            WorkflowAction::RejectMgmt,
            WorkflowAction::AcceptSupplier,
            WorkflowAction::RejectSupplier,
            WorkflowAction::Deliver,
            WorkflowAction::Complete,
            WorkflowAction::Cancel,
        ];
        for action in &actions {
            assert_eq!(
                *action,
                action.to_string().parse::<WorkflowAction>().expect("parse")
            );
        }
    }
}
