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

/// Represents MembershipDirectory errors
#[derive(Debug)]
pub enum MembershipDirectoryError {
    InternalError(InternalError),
}

impl Error for MembershipDirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MembershipDirectoryError::InternalError(err) => Some(err),
        }
    }
}

impl fmt::Display for MembershipDirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MembershipDirectoryError::InternalError(err) => err.fmt(f),
        }
    }
}
