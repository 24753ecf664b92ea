use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::PathBuf;

use itertools::Itertools;
use profile_groups::{App, EntityStore, Group, GroupId, Profile, Seed, SelectionTracker};

use crate::AppError;

/// Build the application state from the given seed file, or from the
/// built-in roster when none is given
pub fn provide_app(seed: &Option<PathBuf>) -> Result<App, AppError> {
    let seed = match seed {
        Some(path) => Seed::load(path),
        None => Seed::builtin(),
    }
    .map_err(|e| AppError::SeedLoadError(e.to_string()))?;

    Ok(App::from_seed(seed)?)
}

pub fn format_followers(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Parse a comma-separated list of group ids; `-` stands for none
pub fn parse_group_ids(s: &str) -> BTreeSet<GroupId> {
    let s = s.trim();
    if s == "-" {
        return BTreeSet::new();
    }
    s.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(GroupId::new)
        .collect()
}

fn group_names(store: &EntityStore, profile: &Profile) -> String {
    store
        .groups_of(&profile.id)
        .map(|groups| groups.iter().map(|group| group.name.as_str()).join(", "))
        .unwrap_or_default()
}

pub fn write_profiles<W: Write>(
    out: &mut W,
    store: &EntityStore,
    profiles: &[&Profile],
    selection: Option<&SelectionTracker>,
) -> io::Result<()> {
    if profiles.is_empty() {
        return writeln!(out, "No profiles");
    }

    for profile in profiles {
        let mark = match selection {
            Some(selection) if selection.contains(&profile.id) => "[x] ",
            Some(_) => "[ ] ",
            None => "",
        };
        writeln!(
            out,
            "{}{:<6} {:<20} {:<18} {:<10} {:<8} {:>7}  {}",
            mark,
            profile.id,
            profile.name,
            profile.handle,
            profile.network,
            profile.visibility,
            format_followers(profile.followers),
            group_names(store, profile)
        )?;
    }
    Ok(())
}

pub fn write_groups<W: Write>(
    out: &mut W,
    store: &EntityStore,
    groups: &[&Group],
) -> io::Result<()> {
    if groups.is_empty() {
        return writeln!(out, "No groups");
    }

    for group in groups {
        let use_cases = if group.use_cases.is_empty() {
            "-".to_owned()
        } else {
            group.use_cases.iter().join(",")
        };
        writeln!(
            out,
            "{:<12} {:<16} {:<14} {:<26} {} profiles",
            group.id,
            group.name,
            group.color,
            use_cases,
            store.members_of(&group.id).len()
        )?;
    }
    Ok(())
}
