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
use crate::workflow::OrderStatus;

/// Represents OrderStore errors
#[derive(Debug)]
pub enum OrderStoreError {
    InternalError(InternalError),
    /// Returned when the named order does not exist
    NotFoundError(String),
    /// Returned when an optimistic status check failed: the persisted status
    /// no longer matches the status the write was validated against
    ConcurrentModification {
        expected: OrderStatus,
        actual: OrderStatus,
    },
    /// Returned when the underlying storage did not respond in time; the
    /// write was not applied
    TimeoutError(String),
}

impl Error for OrderStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            OrderStoreError::InternalError(err) => Some(err),
            OrderStoreError::NotFoundError(_) => None,
            OrderStoreError::ConcurrentModification { .. } => None,
            OrderStoreError::TimeoutError(_) => None,
        }
    }
}

impl fmt::Display for OrderStoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OrderStoreError::InternalError(err) => err.fmt(f),
            OrderStoreError::NotFoundError(ref s) => write!(f, "Order not found: {}", s),
            OrderStoreError::ConcurrentModification { expected, actual } => write!(
                f,
                "Concurrent modification: expected status {}, found {}",
                expected, actual
            ),
            OrderStoreError::TimeoutError(ref s) => write!(f, "Storage timed out: {}", s),
        }
    }
}
