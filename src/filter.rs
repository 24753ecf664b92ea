use crate::model::{GroupId, Network, Profile, ProfileId, Visibility};

/// The active value of each filter axis; `None` means the axis is off
///
/// Selecting the value an axis already holds turns that axis off again.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSelection {
    group: Option<GroupId>,
    network: Option<Network>,
    visibility: Option<Visibility>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self) -> Option<&GroupId> {
        self.group.as_ref()
    }

    pub fn network(&self) -> Option<Network> {
        self.network
    }

    pub fn visibility(&self) -> Option<Visibility> {
        self.visibility
    }

    /// Whether no axis is active
    pub fn is_empty(&self) -> bool {
        self.group.is_none()
            && self.network.is_none()
            && self.visibility.is_none()
    }

    pub fn toggle_group(&mut self, group: GroupId) {
        toggle(&mut self.group, group);
    }

    pub fn toggle_network(&mut self, network: Network) {
        toggle(&mut self.network, network);
    }

    pub fn toggle_visibility(&mut self, visibility: Visibility) {
        toggle(&mut self.visibility, visibility);
    }

    pub fn set_group(&mut self, group: Option<GroupId>) {
        self.group = group;
    }

    pub fn set_network(&mut self, network: Option<Network>) {
        self.network = network;
    }

    pub fn set_visibility(&mut self, visibility: Option<Visibility>) {
        self.visibility = visibility;
    }

    /// Turn every axis off
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether the profile passes all active axes
    ///
    /// Group membership is checked by id only, so a profile referencing a
    /// group that no longer exists still matches that id.
    pub fn matches(&self, profile: &Profile) -> bool {
        self.group
            .as_ref()
            .map_or(true, |group| profile.belongs_to(group))
            && self
                .network
                .map_or(true, |network| profile.network == network)
            && self
                .visibility
                .map_or(true, |visibility| profile.visibility == visibility)
    }
}

fn toggle<T: PartialEq>(axis: &mut Option<T>, value: T) {
    if axis.as_ref() == Some(&value) {
        *axis = None;
    } else {
        *axis = Some(value);
    }
}

/// Compute the profiles passing the filter, in their original order
///
/// This recomputes from scratch on every call.
pub fn visible_profiles<'a>(
    profiles: &'a [Profile],
    filter: &FilterSelection,
) -> Vec<&'a Profile> {
    log::trace!("Filtering {} profiles with {:?}", profiles.len(), filter);
    profiles
        .iter()
        .filter(|profile| filter.matches(profile))
        .collect()
}

/// Ids of the profiles passing the filter, in their original order
pub fn visible_ids(
    profiles: &[Profile],
    filter: &FilterSelection,
) -> Vec<ProfileId> {
    visible_profiles(profiles, filter)
        .into_iter()
        .map(|profile| profile.id.clone())
        .collect()
}
