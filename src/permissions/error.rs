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
use crate::membership::MembershipDirectoryError;

/// Represents PermissionChecker errors
#[derive(Debug)]
pub enum PermissionCheckerError {
    InternalError(InternalError),
    /// Returned when the membership directory could not be consulted
    MembershipDirectoryError(MembershipDirectoryError),
}

impl Error for PermissionCheckerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PermissionCheckerError::InternalError(err) => Some(err),
            PermissionCheckerError::MembershipDirectoryError(err) => Some(err),
        }
    }
}

impl fmt::Display for PermissionCheckerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PermissionCheckerError::InternalError(err) => err.fmt(f),
            PermissionCheckerError::MembershipDirectoryError(err) => err.fmt(f),
        }
    }
}

impl From<MembershipDirectoryError> for PermissionCheckerError {
    fn from(err: MembershipDirectoryError) -> Self {
        PermissionCheckerError::MembershipDirectoryError(err)
    }
}
