//! # Profile groups
//!
//! An in-memory model of social-media profiles organised into named, colored
//! groups that grant use cases, together with the filter and selection logic
//! a profile manager needs.
//!
//! - [`EntityStore`] owns profiles and groups.
//! - [`FilterSelection`] and [`visible_profiles`] derive the visible roster.
//! - [`MembershipCoordinator`] assigns groups to one or many profiles.
//! - [`SelectionTracker`] remembers the profiles marked for bulk actions.
//! - [`App`] owns one of each and keeps the selection consistent with what
//!   is visible.
//!
//! All state is volatile: it is built from a [`Seed`] and lives as long as
//! the value holding it.

mod app;
mod filter;
mod membership;
mod model;
mod monoid;
pub mod search;
mod seed;
mod selection;
mod store;

pub use app::App;
pub use data_error::{DataError, Result};
pub use filter::{visible_ids, visible_profiles, FilterSelection};
pub use membership::{MembershipCoordinator, QUICK_GROUP_USE_CASES};
pub use model::{
    parse_use_cases, Color, Group, GroupFields, GroupId, GroupSpec, Network,
    Profile, ProfileId, UseCase, Visibility,
};
pub use monoid::Monoid;
pub use seed::Seed;
pub use selection::{SelectAll, SelectionTracker};
pub use store::EntityStore;
