use std::collections::BTreeSet;

use data_error::{DataError, Result};

use crate::model::{Color, GroupId, GroupSpec, ProfileId, UseCase};
use crate::store::EntityStore;

/// Use cases given to groups made with [`MembershipCoordinator::quick_create_group`]
pub const QUICK_GROUP_USE_CASES: &[UseCase] = &[];

/// Applies group assignments to one profile or a batch of profiles
pub struct MembershipCoordinator<'a> {
    store: &'a mut EntityStore,
}

impl<'a> MembershipCoordinator<'a> {
    pub fn new(store: &'a mut EntityStore) -> Self {
        MembershipCoordinator { store }
    }

    /// Replace the groups of a single profile
    pub fn assign_groups<I>(
        &mut self,
        profile_id: &ProfileId,
        group_ids: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = GroupId>,
    {
        self.store.set_profile_groups(profile_id, group_ids)
    }

    /// Replace the groups of every given profile and return how many were
    /// updated
    ///
    /// Fails with [`DataError::NoSelection`] when no profile is given, and
    /// with [`DataError::NotFound`] when any of them doesn't exist; in both
    /// cases nothing is changed.
    pub fn bulk_assign_groups(
        &mut self,
        profile_ids: &[ProfileId],
        group_ids: &BTreeSet<GroupId>,
    ) -> Result<usize> {
        if profile_ids.is_empty() {
            return Err(DataError::NoSelection);
        }
        if let Some(missing) = profile_ids
            .iter()
            .find(|id| self.store.profile(id).is_none())
        {
            return Err(DataError::NotFound(format!("profile {}", missing)));
        }

        for profile_id in profile_ids {
            self.assign_groups(profile_id, group_ids.iter().cloned())?;
        }
        log::debug!(
            "Assigned {:?} to {} profiles",
            group_ids,
            profile_ids.len()
        );

        Ok(profile_ids.len())
    }

    /// Add the group to the profile if it's missing, remove it otherwise.
    ///
    /// Returns whether the profile belongs to the group afterwards.
    pub fn toggle_group(
        &mut self,
        profile_id: &ProfileId,
        group_id: &GroupId,
    ) -> Result<bool> {
        let mut group_ids = self
            .store
            .profile(profile_id)
            .ok_or_else(|| DataError::NotFound(format!("profile {}", profile_id)))?
            .group_ids
            .clone();

        let member = if group_ids.remove(group_id) {
            false
        } else {
            group_ids.insert(group_id.clone());
            true
        };
        self.assign_groups(profile_id, group_ids)?;

        Ok(member)
    }

    /// Create a group from a bare name, with the default color and
    /// [`QUICK_GROUP_USE_CASES`], so it can be assigned right away
    pub fn quick_create_group(&mut self, name: &str) -> Result<GroupId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DataError::InvalidInput(
                "group name must not be empty".to_owned(),
            ));
        }

        self.store.create_group(
            GroupSpec::named(name)
                .with_color(Color::default())
                .with_use_cases(QUICK_GROUP_USE_CASES.iter().copied()),
        )
    }
}
