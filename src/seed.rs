use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use data_error::Result;

use crate::model::{Group, Profile};

const BUILTIN_SEED: &str = include_str!("../seed/default.json");

/// The initial collections a store is built from
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Seed {
    /// The roster shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_SEED)
    }

    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a seed from a JSON file shaped as
    /// `{ "profiles": [...], "groups": [...] }`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading seed from {}", path.display());

        let json = fs::read_to_string(path).map_err(|e| {
            log::warn!("Couldn't read seed {}: {}", path.display(), e);
            e
        })?;
        Self::parse(&json)
    }
}
