use std::collections::{BTreeSet, HashSet};

use data_error::{DataError, Result};

use crate::model::{
    Group, GroupFields, GroupId, GroupSpec, Profile, ProfileId, UseCase,
};
use crate::monoid::Monoid;
use crate::seed::Seed;

/// The sole owner of the profile roster and the group collection.
///
/// Profiles are seeded once and never created or deleted afterwards; only
/// their group memberships change. Groups can be created and edited but not
/// deleted. Both collections keep their insertion order, which is the order
/// used for display.
///
/// Every id stored in [`Profile::group_ids`] is expected to name an existing
/// group, but nothing here enforces it: lookups that resolve group ids skip
/// the ones that dangle.
///
/// All mutating operations validate first and mutate last, so a rejected
/// operation leaves the store untouched.
#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    profiles: Vec<Profile>,
    groups: Vec<Group>,
}

impl EntityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a seed collection
    ///
    /// Fails with [`DataError::Collision`] if two profiles or two groups share
    /// an id.
    pub fn from_seed(seed: Seed) -> Result<Self> {
        let Seed { profiles, groups } = seed;

        ensure_unique("profile", profiles.iter().map(|p| &p.id))?;
        ensure_unique("group", groups.iter().map(|g| &g.id))?;

        log::debug!(
            "Seeded store with {} profiles and {} groups",
            profiles.len(),
            groups.len()
        );
        Ok(EntityStore { profiles, groups })
    }

    /// Return all profiles in roster order
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Return all groups in creation order
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn profile(&self, id: &ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|profile| &profile.id == id)
    }

    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| &group.id == id)
    }

    fn profile_mut(&mut self, id: &ProfileId) -> Result<&mut Profile> {
        self.profiles
            .iter_mut()
            .find(|profile| &profile.id == id)
            .ok_or_else(|| DataError::NotFound(format!("profile {}", id)))
    }

    /// Create a new group and return its freshly generated id
    ///
    /// The name is trimmed and must not be empty. Names don't have to be
    /// unique.
    pub fn create_group(&mut self, spec: GroupSpec) -> Result<GroupId> {
        let name = required_name(&spec.name)?;

        let mut id = GroupId::generate();
        while self.group(&id).is_some() {
            id = GroupId::generate();
        }

        let group = Group {
            id: id.clone(),
            name,
            color: spec.color.unwrap_or_default(),
            use_cases: spec.use_cases.unwrap_or_default(),
        };
        log::debug!("Group created: {:?}", group);
        self.groups.push(group);

        Ok(id)
    }

    /// Replace the editable fields of an existing group
    pub fn update_group(
        &mut self,
        id: &GroupId,
        fields: GroupFields,
    ) -> Result<()> {
        let name = required_name(&fields.name)?;
        let group = self
            .groups
            .iter_mut()
            .find(|group| &group.id == id)
            .ok_or_else(|| DataError::NotFound(format!("group {}", id)))?;

        group.name = name;
        group.color = fields.color;
        group.use_cases = fields.use_cases;
        log::debug!("Group updated: {:?}", group);

        Ok(())
    }

    /// Replace the group memberships of a profile
    ///
    /// Duplicates collapse. Ids of groups that don't exist are stored as
    /// given.
    pub fn set_profile_groups<I>(
        &mut self,
        profile_id: &ProfileId,
        group_ids: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = GroupId>,
    {
        let group_ids: BTreeSet<GroupId> = group_ids.into_iter().collect();
        let profile = self.profile_mut(profile_id)?;

        log::debug!(
            "Groups of profile {}: {:?} -> {:?}",
            profile_id,
            profile.group_ids,
            group_ids
        );
        profile.group_ids = group_ids;

        Ok(())
    }

    /// Detach a profile from every group that grants the given use case
    ///
    /// Use cases only exist through group membership, so removing one means
    /// leaving each group that grants it, together with whatever else those
    /// groups grant. Returns the ids of the groups the profile left.
    pub fn remove_use_case_from_profile(
        &mut self,
        profile_id: &ProfileId,
        use_case: UseCase,
    ) -> Result<BTreeSet<GroupId>> {
        let granting: BTreeSet<GroupId> = self
            .groups_of(profile_id)?
            .into_iter()
            .filter(|group| group.grants(use_case))
            .map(|group| group.id.clone())
            .collect();

        let profile = self.profile_mut(profile_id)?;
        profile.group_ids.retain(|id| !granting.contains(id));
        log::debug!(
            "Profile {} left {:?} to drop use case {}",
            profile_id,
            granting,
            use_case
        );

        Ok(granting)
    }

    /// Return the existing groups a profile belongs to, in group order
    pub fn groups_of(&self, profile_id: &ProfileId) -> Result<Vec<&Group>> {
        let profile = self
            .profile(profile_id)
            .ok_or_else(|| DataError::NotFound(format!("profile {}", profile_id)))?;

        Ok(self
            .groups
            .iter()
            .filter(|group| profile.belongs_to(&group.id))
            .collect())
    }

    /// Return the profiles referencing a group id, in roster order
    ///
    /// The group itself doesn't have to exist.
    pub fn members_of(&self, group_id: &GroupId) -> Vec<&Profile> {
        self.profiles
            .iter()
            .filter(|profile| profile.belongs_to(group_id))
            .collect()
    }

    /// Return the union of the use cases of all existing groups the profile
    /// belongs to
    pub fn effective_use_cases(
        &self,
        profile_id: &ProfileId,
    ) -> Result<BTreeSet<UseCase>> {
        let groups = self.groups_of(profile_id)?;
        Ok(BTreeSet::<UseCase>::combine_all(
            groups.into_iter().map(|group| group.use_cases.clone()),
        ))
    }
}

fn ensure_unique<'a, Id, I>(kind: &str, ids: I) -> Result<()>
where
    Id: std::hash::Hash + Eq + std::fmt::Display + 'a,
    I: IntoIterator<Item = &'a Id>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DataError::Collision(format!(
                "{} id {} is used more than once",
                kind, id
            )));
        }
    }
    Ok(())
}

fn required_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DataError::InvalidInput(
            "group name must not be empty".to_owned(),
        ));
    }
    Ok(name.to_owned())
}
