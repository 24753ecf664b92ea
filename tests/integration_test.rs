use std::collections::{BTreeSet, HashSet};

use quickcheck_macros::quickcheck;

use profile_groups::{
    visible_profiles, App, Color, DataError, EntityStore, FilterSelection,
    Group, GroupId, GroupSpec, MembershipCoordinator, Network, Profile,
    ProfileId, Seed, UseCase, Visibility,
};

fn profile(
    id: &str,
    network: Network,
    visibility: Visibility,
    groups: &[&str],
) -> Profile {
    Profile {
        id: ProfileId::new(id),
        name: id.to_owned(),
        handle: format!("@{}", id),
        network,
        visibility,
        followers: 100,
        group_ids: groups.iter().map(|g| GroupId::new(*g)).collect(),
        avatar: String::new(),
    }
}

fn group(id: &str, use_cases: &[UseCase]) -> Group {
    Group {
        id: GroupId::new(id),
        name: id.to_owned(),
        color: Color::default(),
        use_cases: use_cases.iter().copied().collect(),
    }
}

fn group_set(raw: &[&str]) -> BTreeSet<GroupId> {
    raw.iter().map(|g| GroupId::new(*g)).collect()
}

#[quickcheck]
fn created_group_ids_are_distinct(names: Vec<String>) -> bool {
    let mut store = EntityStore::new();
    let ids: Vec<GroupId> = names
        .iter()
        .filter_map(|name| store.create_group(GroupSpec::named(name.as_str())).ok())
        .collect();

    let distinct: HashSet<&GroupId> = ids.iter().collect();
    distinct.len() == ids.len() && store.groups().len() == ids.len()
}

#[quickcheck]
fn setting_groups_twice_is_idempotent(raw: Vec<u8>) -> bool {
    let seed = Seed {
        profiles: vec![profile("p", Network::Tiktok, Visibility::Public, &[])],
        groups: vec![],
    };
    let mut store = EntityStore::from_seed(seed).unwrap();
    let p = ProfileId::new("p");
    let given: Vec<GroupId> = raw
        .iter()
        .map(|n| GroupId::new(format!("g{}", n % 8)))
        .collect();
    let expected: BTreeSet<GroupId> = given.iter().cloned().collect();

    store.set_profile_groups(&p, given.clone()).unwrap();
    let first = store.profile(&p).unwrap().group_ids.clone();
    store.set_profile_groups(&p, given).unwrap();
    let second = store.profile(&p).unwrap().group_ids.clone();

    first == expected && second == expected
}

#[test_log::test]
fn filter_conjunction() {
    let profiles = vec![
        profile("A", Network::Facebook, Visibility::Public, &[]),
        profile("B", Network::Facebook, Visibility::Private, &[]),
        profile("C", Network::Twitter, Visibility::Public, &[]),
    ];
    let mut filter = FilterSelection::new();
    filter.toggle_network(Network::Facebook);
    filter.toggle_visibility(Visibility::Public);

    let visible: Vec<_> = visible_profiles(&profiles, &filter)
        .into_iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(visible, vec!["A"]);
}

#[test_log::test]
fn filter_toggle_returns_to_unfiltered() {
    let profiles = vec![
        profile("A", Network::Facebook, Visibility::Public, &["g1"]),
        profile("B", Network::Youtube, Visibility::Public, &[]),
    ];
    let mut filter = FilterSelection::new();
    filter.toggle_group(GroupId::new("g1"));
    assert_eq!(visible_profiles(&profiles, &filter).len(), 1);

    filter.toggle_group(GroupId::new("g1"));
    assert!(filter.group().is_none());
    assert_eq!(visible_profiles(&profiles, &filter).len(), 2);
}

#[test_log::test]
fn bulk_assign_to_selection() {
    let seed = Seed {
        profiles: vec![
            profile("p1", Network::Facebook, Visibility::Public, &[]),
            profile("p2", Network::Instagram, Visibility::Private, &["g2"]),
            profile("p3", Network::Linkedin, Visibility::Public, &[]),
            profile("p4", Network::Linkedin, Visibility::Public, &[]),
        ],
        groups: vec![group("g1", &[]), group("g2", &[])],
    };
    let mut app = App::from_seed(seed).unwrap();
    for id in ["p1", "p2", "p3"] {
        assert!(app.toggle_selected(ProfileId::new(id)));
    }

    let updated = app.bulk_assign_groups(&group_set(&["g1"])).unwrap();
    assert_eq!(updated, 3);
    for id in ["p1", "p2", "p3"] {
        let profile = app.store().profile(&ProfileId::new(id)).unwrap();
        assert!(profile.belongs_to(&GroupId::new("g1")));
    }
    let untouched = app.store().profile(&ProfileId::new("p4")).unwrap();
    assert!(untouched.group_ids.is_empty());
}

#[test_log::test]
fn bulk_assign_with_empty_selection() {
    let seed = Seed::builtin().unwrap();
    let mut store = EntityStore::from_seed(seed.clone()).unwrap();

    let err = MembershipCoordinator::new(&mut store)
        .bulk_assign_groups(&[], &group_set(&["tag-1"]))
        .unwrap_err();

    assert!(matches!(err, DataError::NoSelection));
    assert_eq!(store.profiles(), seed.profiles.as_slice());
}

#[test_log::test]
fn use_case_removal_drops_every_granting_group() {
    let seed = Seed {
        profiles: vec![profile(
            "p",
            Network::Instagram,
            Visibility::Public,
            &["g1", "g2"],
        )],
        groups: vec![
            group("g1", &[UseCase::Analyze]),
            group("g2", &[UseCase::Analyze, UseCase::Engage]),
        ],
    };
    let mut store = EntityStore::from_seed(seed).unwrap();
    let p = ProfileId::new("p");
    assert_eq!(
        store.effective_use_cases(&p).unwrap(),
        BTreeSet::from([UseCase::Analyze, UseCase::Engage])
    );

    store
        .remove_use_case_from_profile(&p, UseCase::Analyze)
        .unwrap();

    assert!(store.profile(&p).unwrap().group_ids.is_empty());
    let effective = store.effective_use_cases(&p).unwrap();
    assert!(!effective.contains(&UseCase::Analyze));
    assert!(!effective.contains(&UseCase::Engage));
}

#[test_log::test]
fn dangling_reference_tolerance() {
    let seed = Seed {
        profiles: vec![profile(
            "p",
            Network::Twitter,
            Visibility::Private,
            &["ghost"],
        )],
        groups: vec![],
    };
    let mut app = App::from_seed(seed).unwrap();

    app.toggle_group_filter(GroupId::new("ghost"));
    let visible: Vec<_> = app
        .visible_profiles()
        .into_iter()
        .map(|p| p.id.clone())
        .collect();
    assert_eq!(visible, vec![ProfileId::new("p")]);

    let effective = app
        .store()
        .effective_use_cases(&ProfileId::new("p"))
        .unwrap();
    assert!(effective.is_empty());
}

#[test_log::test]
fn rejected_operations_leave_state_untouched() {
    let mut app = App::from_seed(Seed::builtin().unwrap()).unwrap();
    let groups_before = app.store().groups().to_vec();
    let profiles_before = app.store().profiles().to_vec();

    assert!(matches!(
        app.quick_create_group("   "),
        Err(DataError::InvalidInput(_))
    ));
    assert!(matches!(
        app.assign_groups(&ProfileId::new("missing"), group_set(&["tag-1"])),
        Err(DataError::NotFound(_))
    ));
    assert!(matches!(
        app.remove_use_case_from_profile(&ProfileId::new("missing"), UseCase::Engage),
        Err(DataError::NotFound(_))
    ));

    assert_eq!(app.store().groups(), groups_before.as_slice());
    assert_eq!(app.store().profiles(), profiles_before.as_slice());
}
