use std::collections::BTreeSet;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use data_error::DataError;

/// Identifier of a [`Profile`], stable for the profile's lifetime
#[derive(
    PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        ProfileId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProfileId {
    fn from(id: &str) -> Self {
        ProfileId::new(id)
    }
}

/// Identifier of a [`Group`], stable for the group's lifetime
#[derive(
    PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        GroupId(id.into())
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        GroupId(format!("group-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupId {
    fn from(id: &str) -> Self {
        GroupId::new(id)
    }
}

/// Generates `Display`, `FromStr` and an `ALL` listing for a fieldless enum
/// whose textual form is its lowercase variant name.
macro_rules! lowercase_enum {
    ($ty:ident, $what:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = DataError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($name => Ok($ty::$variant),)+
                    other => Err(DataError::InvalidInput(format!(
                        "unknown {} '{}'",
                        $what, other
                    ))),
                }
            }
        }
    };
}

/// The social network a profile lives on
#[derive(
    PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Facebook,
    Instagram,
    Twitter,
    Linkedin,
    Youtube,
    Tiktok,
}

lowercase_enum!(Network, "network", {
    Facebook => "facebook",
    Instagram => "instagram",
    Twitter => "twitter",
    Linkedin => "linkedin",
    Youtube => "youtube",
    Tiktok => "tiktok",
});

/// Whether a profile is public or private
#[derive(
    PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

lowercase_enum!(Visibility, "visibility", {
    Public => "public",
    Private => "private",
});

/// A capability granted to profiles through the groups they belong to
#[derive(
    PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum UseCase {
    Analyze,
    Orchestrate,
    Engage,
}

lowercase_enum!(UseCase, "use case", {
    Analyze => "analyze",
    Orchestrate => "orchestrate",
    Engage => "engage",
});

/// Parse a comma-separated list of use cases, e.g. `analyze,engage`.
///
/// `-` and the empty string stand for the empty set.
pub fn parse_use_cases(s: &str) -> Result<BTreeSet<UseCase>, DataError> {
    let s = s.trim();
    if s.is_empty() || s == "-" {
        return Ok(BTreeSet::new());
    }
    s.split(',').map(UseCase::from_str).collect()
}

/// Opaque presentation token attached to a group
#[derive(PartialEq, Eq, Hash, Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub const PURPLE: &'static str = "bg-purple-500";
    pub const BLUE: &'static str = "bg-blue-500";
    pub const GREEN: &'static str = "bg-green-500";
    pub const YELLOW: &'static str = "bg-yellow-500";
    pub const RED: &'static str = "bg-red-500";
    pub const PINK: &'static str = "bg-pink-500";

    /// The tokens offered by the group editor
    pub const PALETTE: &'static [&'static str] = &[
        Self::PURPLE,
        Self::BLUE,
        Self::GREEN,
        Self::YELLOW,
        Self::RED,
        Self::PINK,
    ];

    pub fn new<S: Into<String>>(token: S) -> Self {
        Color(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::new(Self::PURPLE)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A represented social-media account
#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    #[serde(default)]
    pub handle: String,
    pub network: Network,
    pub visibility: Visibility,
    #[serde(default)]
    pub followers: u64,
    /// Groups the profile belongs to; ids may dangle
    #[serde(default)]
    pub group_ids: BTreeSet<GroupId>,
    #[serde(default)]
    pub avatar: String,
}

impl Profile {
    /// Whether the profile references the group, regardless of whether the
    /// group still exists
    pub fn belongs_to(&self, group_id: &GroupId) -> bool {
        self.group_ids.contains(group_id)
    }
}

/// A named, colored collection of profiles carrying use cases
#[derive(PartialEq, Eq, Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub use_cases: BTreeSet<UseCase>,
}

impl Group {
    pub fn grants(&self, use_case: UseCase) -> bool {
        self.use_cases.contains(&use_case)
    }
}

/// Fields of a group to be created
///
/// Only the name is required; the color falls back to [`Color::default`] and
/// the use cases to the empty set.
#[derive(Clone, Debug, Default)]
pub struct GroupSpec {
    pub name: String,
    pub color: Option<Color>,
    pub use_cases: Option<BTreeSet<UseCase>>,
}

impl GroupSpec {
    pub fn named<S: Into<String>>(name: S) -> Self {
        GroupSpec {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_use_cases<I: IntoIterator<Item = UseCase>>(
        mut self,
        use_cases: I,
    ) -> Self {
        self.use_cases = Some(use_cases.into_iter().collect());
        self
    }
}

/// The full replacement value of an existing group's editable fields
#[derive(Clone, Debug)]
pub struct GroupFields {
    pub name: String,
    pub color: Color,
    pub use_cases: BTreeSet<UseCase>,
}
