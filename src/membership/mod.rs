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

//! The membership directory collaborator: resolves a user's role within a
//! company and their organizational unit memberships.

mod error;
mod memory;

pub use error::MembershipDirectoryError;
pub use memory::MemoryMembershipDirectory;

use crate::permissions::Role;

/// The party attempting an action against a purchase order.
///
/// An actor carries only its identity and the company the action is taken on
/// behalf of; the actor's role and organizational unit memberships are always
/// resolved through the [`MembershipDirectory`], never trusted from the
/// caller. A user may hold different roles at the buyer and the supplier
/// company of the same order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    user_id: String,
    company_id: String,
}

impl Actor {
    pub fn new(user_id: &str, company_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            company_id: company_id.to_string(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the ID of the company the actor is acting on behalf of.
    pub fn company_id(&self) -> &str {
        &self.company_id
    }
}

/// Provides role and organizational unit membership lookups.
pub trait MembershipDirectory {
    /// Returns the role `user_id` holds at `company_id`, or `None` if the
    /// user is not an active member of the company.
    fn get_role(
        &self,
        user_id: &str,
        company_id: &str,
    ) -> Result<Option<Role>, MembershipDirectoryError>;

    /// Returns `true` if `user_id` is a member of the organizational unit
    /// `org_unit_id` within `company_id`.
    fn is_member_of_org_unit(
        &self,
        user_id: &str,
        org_unit_id: &str,
        company_id: &str,
    ) -> Result<bool, MembershipDirectoryError>;
}

impl<MD> MembershipDirectory for Box<MD>
where
    MD: MembershipDirectory + ?Sized,
{
    fn get_role(
        &self,
        user_id: &str,
        company_id: &str,
    ) -> Result<Option<Role>, MembershipDirectoryError> {
        (**self).get_role(user_id, company_id)
    }

    fn is_member_of_org_unit(
        &self,
        user_id: &str,
        org_unit_id: &str,
        company_id: &str,
    ) -> Result<bool, MembershipDirectoryError> {
        (**self).is_member_of_org_unit(user_id, org_unit_id, company_id)
    }
}
