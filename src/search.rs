//! Case-insensitive text search used by the group picker and the group
//! editor. An empty query matches everything; results keep input order.

use crate::model::{Group, Profile};

/// Groups whose name contains the query
pub fn groups_matching<'a>(groups: &'a [Group], query: &str) -> Vec<&'a Group> {
    let query = query.to_lowercase();
    groups
        .iter()
        .filter(|group| group.name.to_lowercase().contains(&query))
        .collect()
}

/// Profiles whose name or network contains the query
pub fn profiles_matching<'a>(
    profiles: &'a [Profile],
    query: &str,
) -> Vec<&'a Profile> {
    let query = query.to_lowercase();
    profiles
        .iter()
        .filter(|profile| {
            profile.name.to_lowercase().contains(&query)
                || profile.network.as_str().contains(&query)
        })
        .collect()
}
