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

use std::error::Error;
use std::fmt;

use crate::error::InternalError;
use crate::inventory::InventoryLookupError;
use crate::membership::MembershipDirectoryError;
use crate::permissions::PermissionCheckerError;
use crate::purchase_order::store::OrderStoreError;
use crate::purchase_order::PurchaseOrderBuilderError;
use crate::workflow::OrderStatus;

/// Represents workflow engine errors.
///
/// Business rejections are not errors: a rejected approval is a successful
/// transition to a rejected state. These variants cover requests that could
/// not be applied at all.
#[derive(Debug)]
pub enum WorkflowError {
    /// The requested edge does not exist from the order's current status.
    /// Never worth retrying; the caller acted on stale state.
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    /// The acting party's role or organizational scope does not permit the
    /// requested action. Never worth retrying.
    AuthorizationDenied(String),
    /// The order's persisted status moved on between validation and write.
    /// The caller should reload and may retry once.
    ConcurrentModification,
    /// The persistence collaborator did not respond in time. Nothing was
    /// applied; the caller may retry with backoff.
    PersistenceTimeout,
    /// The named order does not exist.
    OrderNotFound(String),
    InternalError(InternalError),
}

impl Error for WorkflowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorkflowError::InternalError(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WorkflowError::InvalidTransition { from, to } => {
                write!(f, "No transition from {} to {}", from, to)
            }
            WorkflowError::AuthorizationDenied(ref s) => {
                write!(f, "Authorization denied: {}", s)
            }
            WorkflowError::ConcurrentModification => {
                write!(f, "Order was modified concurrently; reload and retry")
            }
            WorkflowError::PersistenceTimeout => {
                write!(f, "Persistence collaborator timed out; nothing was applied")
            }
            WorkflowError::OrderNotFound(ref s) => write!(f, "Order not found: {}", s),
            WorkflowError::InternalError(err) => err.fmt(f),
        }
    }
}

impl From<OrderStoreError> for WorkflowError {
    fn from(err: OrderStoreError) -> Self {
        match err {
            OrderStoreError::ConcurrentModification { .. } => WorkflowError::ConcurrentModification,
            OrderStoreError::TimeoutError(_) => WorkflowError::PersistenceTimeout,
            OrderStoreError::NotFoundError(order_id) => WorkflowError::OrderNotFound(order_id),
            OrderStoreError::InternalError(err) => WorkflowError::InternalError(err),
        }
    }
}

impl From<PermissionCheckerError> for WorkflowError {
    fn from(err: PermissionCheckerError) -> Self {
        match err {
            PermissionCheckerError::InternalError(err) => WorkflowError::InternalError(err),
            PermissionCheckerError::MembershipDirectoryError(
                MembershipDirectoryError::InternalError(err),
            ) => WorkflowError::InternalError(err),
        }
    }
}

impl From<InventoryLookupError> for WorkflowError {
    fn from(err: InventoryLookupError) -> Self {
        match err {
            InventoryLookupError::InternalError(err) => WorkflowError::InternalError(err),
        }
    }
}

impl From<PurchaseOrderBuilderError> for WorkflowError {
    fn from(err: PurchaseOrderBuilderError) -> Self {
        WorkflowError::InternalError(InternalError::with_message(err.to_string()))
    }
}
