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

/// Represents errors raised while building purchase order domain structs
#[derive(Debug)]
pub enum PurchaseOrderBuilderError {
    /// Returned when a required field was not set
    MissingRequiredField(String),
    /// Returned when a field was set to a value that violates a domain
    /// invariant
    InvalidField(String),
}

impl Error for PurchaseOrderBuilderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PurchaseOrderBuilderError::MissingRequiredField(_) => None,
            PurchaseOrderBuilderError::InvalidField(_) => None,
        }
    }
}

impl fmt::Display for PurchaseOrderBuilderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PurchaseOrderBuilderError::MissingRequiredField(ref s) => {
                write!(f, "Missing required field: {}", s)
            }
            PurchaseOrderBuilderError::InvalidField(ref s) => {
                write!(f, "Invalid field: {}", s)
            }
        }
    }
}
