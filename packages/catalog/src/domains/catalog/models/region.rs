use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::CatalogError;

/// Regional tag of a channel, stored as its flag emoji
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Region {
    Global,
    UnitedStates,
    EuropeanUnion,
    UnitedKingdom,
    Canada,
    Japan,
    Germany,
    France,
    Russia,
    Ukraine,
    Israel,
    China,
    India,
    Australia,
}

impl Region {
    pub const ALL: [Region; 14] = [
        Region::Global,
        Region::UnitedStates,
        Region::EuropeanUnion,
        Region::UnitedKingdom,
        Region::Canada,
        Region::Japan,
        Region::Germany,
        Region::France,
        Region::Russia,
        Region::Ukraine,
        Region::Israel,
        Region::China,
        Region::India,
        Region::Australia,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Region::Global => "🌍",
            Region::UnitedStates => "🇺🇸",
            Region::EuropeanUnion => "🇪🇺",
            Region::UnitedKingdom => "🇬🇧",
            Region::Canada => "🇨🇦",
            Region::Japan => "🇯🇵",
            Region::Germany => "🇩🇪",
            Region::France => "🇫🇷",
            Region::Russia => "🇷🇺",
            Region::Ukraine => "🇺🇦",
            Region::Israel => "🇮🇱",
            Region::China => "🇨🇳",
            Region::India => "🇮🇳",
            Region::Australia => "🇦🇺",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Region {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::validation("Region is required"));
        }
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.tag() == trimmed)
            .ok_or_else(|| CatalogError::validation(format!("Unknown region: {}", trimmed)))
    }
}

impl TryFrom<String> for Region {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.tag().to_string()
    }
}
