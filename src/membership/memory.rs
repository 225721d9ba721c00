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

use std::collections::{HashMap, HashSet};

use crate::permissions::Role;

use super::error::MembershipDirectoryError;
use super::MembershipDirectory;

/// An in-memory [`MembershipDirectory`], for tests and fully in-process
/// deployments.
#[derive(Default)]
pub struct MemoryMembershipDirectory {
    // keyed by (user_id, company_id)
    roles: HashMap<(String, String), Role>,
    // entries of (user_id, org_unit_id, company_id)
    org_unit_members: HashSet<(String, String, String)>,
}

impl MemoryMembershipDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the role `user_id` holds at `company_id`, replacing any
    /// previously recorded role.
    pub fn add_role(&mut self, user_id: &str, company_id: &str, role: Role) {
        self.roles
            .insert((user_id.to_string(), company_id.to_string()), role);
    }

    /// Records `user_id` as a member of the organizational unit
    /// `org_unit_id` within `company_id`.
    pub fn add_org_unit_member(&mut self, user_id: &str, org_unit_id: &str, company_id: &str) {
        self.org_unit_members.insert((
            user_id.to_string(),
            org_unit_id.to_string(),
            company_id.to_string(),
        ));
    }
}

impl MembershipDirectory for MemoryMembershipDirectory {
    fn get_role(
        &self,
        user_id: &str,
        company_id: &str,
    ) -> Result<Option<Role>, MembershipDirectoryError> {
        Ok(self
            .roles
            .get(&(user_id.to_string(), company_id.to_string()))
            .copied())
    }

    fn is_member_of_org_unit(
        &self,
        user_id: &str,
        org_unit_id: &str,
        company_id: &str,
    ) -> Result<bool, MembershipDirectoryError> {
        Ok(self.org_unit_members.contains(&(
            user_id.to_string(),
            org_unit_id.to_string(),
            company_id.to_string(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that a recorded role is returned for the matching company only.
    #[test]
    fn test_role_is_scoped_to_company() {
        let mut directory = MemoryMembershipDirectory::new();
        directory.add_role("alice", "acme", Role::SiteManager);

        assert_eq!(
            Some(Role::SiteManager),
            directory.get_role("alice", "acme").expect("get role")
        );
        assert_eq!(
            None,
            directory.get_role("alice", "other").expect("get role")
        );
    }

    /// Tests that org unit membership lookups match on all three keys.
    #[test]
    fn test_org_unit_membership() {
        let mut directory = MemoryMembershipDirectory::new();
        directory.add_org_unit_member("alice", "unit-1", "acme");

        assert!(directory
            .is_member_of_org_unit("alice", "unit-1", "acme")
            .expect("membership"));
        assert!(!directory
            .is_member_of_org_unit("alice", "unit-2", "acme")
            .expect("membership"));
        assert!(!directory
            .is_member_of_org_unit("bob", "unit-1", "acme")
            .expect("membership"));
    }
}
