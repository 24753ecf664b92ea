use std::collections::BTreeSet;

use data_error::Result;

use crate::filter::{visible_ids, visible_profiles, FilterSelection};
use crate::membership::MembershipCoordinator;
use crate::model::{
    GroupFields, GroupId, GroupSpec, Network, Profile, ProfileId, UseCase,
    Visibility,
};
use crate::seed::Seed;
use crate::selection::{SelectAll, SelectionTracker};
use crate::store::EntityStore;

/// Owns all state of a session and sequences every user action.
///
/// Each action first mutates the store, the filter or the selection and then
/// reconciles the selection with the recomputed visible set: whenever the ids
/// of the visible profiles change, the selection is cleared. Actions that
/// leave the visible ids untouched keep the selection as it is.
#[derive(Clone, Debug, Default)]
pub struct App {
    store: EntityStore,
    filter: FilterSelection,
    selection: SelectionTracker,
}

impl App {
    pub fn new(store: EntityStore) -> Self {
        App {
            store,
            filter: FilterSelection::new(),
            selection: SelectionTracker::new(),
        }
    }

    pub fn from_seed(seed: Seed) -> Result<Self> {
        Ok(Self::new(EntityStore::from_seed(seed)?))
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn filter(&self) -> &FilterSelection {
        &self.filter
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// The profiles passing the current filter, recomputed on every call
    pub fn visible_profiles(&self) -> Vec<&Profile> {
        visible_profiles(self.store.profiles(), &self.filter)
    }

    pub fn visible_ids(&self) -> Vec<ProfileId> {
        visible_ids(self.store.profiles(), &self.filter)
    }

    /// Run an action and clear the selection if it changed which profiles
    /// are visible
    fn reconciled<T>(&mut self, action: impl FnOnce(&mut Self) -> T) -> T {
        let before = self.visible_ids();
        let result = action(self);
        if self.visible_ids() != before && !self.selection.is_empty() {
            log::debug!(
                "Visible profiles changed, dropping selection of {}",
                self.selection.len()
            );
            self.selection.clear();
        }
        result
    }

    // filters

    pub fn toggle_group_filter(&mut self, group: GroupId) {
        self.reconciled(|app| app.filter.toggle_group(group))
    }

    pub fn toggle_network_filter(&mut self, network: Network) {
        self.reconciled(|app| app.filter.toggle_network(network))
    }

    pub fn toggle_visibility_filter(&mut self, visibility: Visibility) {
        self.reconciled(|app| app.filter.toggle_visibility(visibility))
    }

    /// The "All Profiles" button: turn the group axis off
    pub fn show_all_groups(&mut self) {
        self.reconciled(|app| app.filter.set_group(None))
    }

    pub fn clear_filters(&mut self) {
        self.reconciled(|app| app.filter.clear())
    }

    // selection

    /// Toggle a visible profile's selection; hidden profiles are ignored.
    ///
    /// Returns whether the profile is selected afterwards.
    pub fn toggle_selected(&mut self, id: ProfileId) -> bool {
        if !self.visible_ids().contains(&id) {
            log::debug!("Ignoring selection of hidden profile {}", id);
            return false;
        }
        self.selection.toggle(id)
    }

    pub fn select_all(&mut self) {
        let visible = self.visible_ids();
        self.selection.select_all(&visible);
    }

    /// The tri-state header checkbox
    pub fn toggle_select_all(&mut self) {
        let visible = self.visible_ids();
        self.selection.toggle_all(&visible);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn select_all_state(&self) -> SelectAll {
        self.selection.state(&self.visible_ids())
    }

    // groups and memberships

    pub fn create_group(&mut self, spec: GroupSpec) -> Result<GroupId> {
        self.store.create_group(spec)
    }

    pub fn update_group(
        &mut self,
        id: &GroupId,
        fields: GroupFields,
    ) -> Result<()> {
        self.store.update_group(id, fields)
    }

    pub fn quick_create_group(&mut self, name: &str) -> Result<GroupId> {
        MembershipCoordinator::new(&mut self.store).quick_create_group(name)
    }

    pub fn assign_groups(
        &mut self,
        profile_id: &ProfileId,
        group_ids: BTreeSet<GroupId>,
    ) -> Result<()> {
        self.reconciled(|app| {
            MembershipCoordinator::new(&mut app.store)
                .assign_groups(profile_id, group_ids)
        })
    }

    pub fn toggle_profile_group(
        &mut self,
        profile_id: &ProfileId,
        group_id: &GroupId,
    ) -> Result<bool> {
        self.reconciled(|app| {
            MembershipCoordinator::new(&mut app.store)
                .toggle_group(profile_id, group_id)
        })
    }

    /// Assign the groups to every selected profile
    pub fn bulk_assign_groups(
        &mut self,
        group_ids: &BTreeSet<GroupId>,
    ) -> Result<usize> {
        let selected = self.selection.ids();
        self.reconciled(|app| {
            MembershipCoordinator::new(&mut app.store)
                .bulk_assign_groups(&selected, group_ids)
        })
    }

    pub fn remove_use_case_from_profile(
        &mut self,
        profile_id: &ProfileId,
        use_case: UseCase,
    ) -> Result<BTreeSet<GroupId>> {
        self.reconciled(|app| {
            app.store.remove_use_case_from_profile(profile_id, use_case)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_error::DataError;

    fn app() -> App {
        App::from_seed(Seed::builtin().unwrap()).unwrap()
    }

    fn ids(raw: &[&str]) -> Vec<ProfileId> {
        raw.iter().map(|id| ProfileId::new(*id)).collect()
    }

    #[test]
    fn filter_change_clears_the_selection() {
        let mut app = app();
        app.select_all();
        assert_eq!(app.selection().len(), 8);

        app.toggle_network_filter(Network::Facebook);
        assert_eq!(app.visible_ids(), ids(&["2", "8"]));
        assert!(app.selection().is_empty());
    }

    #[test]
    fn filter_change_without_visible_effect_keeps_the_selection() {
        let mut app = app();
        app.toggle_selected(ProfileId::new("3"));

        app.clear_filters();
        assert_eq!(app.selection().ids(), ids(&["3"]));
    }

    #[test]
    fn hidden_profiles_cannot_be_selected() {
        let mut app = app();
        app.toggle_visibility_filter(Visibility::Private);
        assert!(!app.toggle_selected(ProfileId::new("1")));
        assert!(app.selection().is_empty());
    }

    #[test]
    fn bulk_assign_uses_the_selection() {
        let mut app = app();
        app.toggle_selected(ProfileId::new("1"));
        app.toggle_selected(ProfileId::new("2"));

        let groups = BTreeSet::from([GroupId::new("tag-3")]);
        assert_eq!(app.bulk_assign_groups(&groups).unwrap(), 2);
        assert_eq!(app.store().members_of(&GroupId::new("tag-3")).len(), 3);
        // no filter is active, so the visible set and the selection stay
        assert_eq!(app.selection().len(), 2);
    }

    #[test]
    fn bulk_assign_without_selection_is_rejected() {
        let mut app = app();
        let groups = BTreeSet::from([GroupId::new("tag-3")]);
        let err = app.bulk_assign_groups(&groups).unwrap_err();
        assert!(matches!(err, DataError::NoSelection));
    }

    #[test]
    fn assignment_that_hides_a_profile_clears_the_selection() {
        let mut app = app();
        app.toggle_group_filter(GroupId::new("tag-4"));
        assert_eq!(app.visible_ids(), ids(&["3", "8"]));
        app.select_all();
        assert_eq!(app.select_all_state(), SelectAll::All);

        app.remove_use_case_from_profile(&ProfileId::new("8"), UseCase::Engage)
            .unwrap();

        assert_eq!(app.visible_ids(), ids(&["3"]));
        assert_eq!(app.select_all_state(), SelectAll::Empty);
    }

    #[test]
    fn assignment_that_reveals_a_profile_clears_the_selection() {
        let mut app = app();
        app.toggle_group_filter(GroupId::new("tag-4"));
        app.select_all();
        assert_eq!(app.selection().len(), 2);

        app.assign_groups(&ProfileId::new("4"), BTreeSet::from([GroupId::new("tag-4")]))
            .unwrap();

        assert_eq!(app.visible_ids(), ids(&["3", "4", "8"]));
        assert!(app.selection().is_empty());
    }

    #[test]
    fn toggling_the_group_filter_twice_shows_everything() {
        let mut app = app();
        app.toggle_group_filter(GroupId::new("tag-2"));
        assert_eq!(app.visible_ids(), ids(&["6", "7"]));
        app.toggle_group_filter(GroupId::new("tag-2"));
        assert_eq!(app.visible_profiles().len(), 8);
    }

    #[test]
    fn show_all_groups_keeps_other_axes() {
        let mut app = app();
        app.toggle_group_filter(GroupId::new("tag-1"));
        app.toggle_visibility_filter(Visibility::Private);
        app.show_all_groups();
        assert_eq!(app.filter().group(), None);
        assert_eq!(app.filter().visibility(), Some(Visibility::Private));
    }

    #[test]
    fn header_checkbox_cycles() {
        let mut app = app();
        app.toggle_network_filter(Network::Twitter);
        app.toggle_selected(ProfileId::new("1"));
        assert_eq!(app.select_all_state(), SelectAll::Partial);

        app.toggle_select_all();
        assert_eq!(app.select_all_state(), SelectAll::All);

        app.toggle_select_all();
        assert_eq!(app.select_all_state(), SelectAll::Empty);
    }

    #[test]
    fn quick_created_group_can_be_toggled_on() {
        let mut app = app();
        let id = app.quick_create_group("VIP").unwrap();
        assert!(app.toggle_profile_group(&ProfileId::new("4"), &id).unwrap());
        assert_eq!(app.store().members_of(&id).len(), 1);
    }
}
