// src/domain/mod.rs
// Game domains. Each one contributes a focus sentence to the system prompt.

use std::str::FromStr;

use serde::Serialize;
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::ConfigurationError;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, EnumString, IntoStaticStr, EnumIter,
)]
pub enum Domain {
    #[strum(serialize = "Valorant")]
    #[serde(rename = "Valorant")]
    Valorant,
    #[strum(serialize = "League of Legends")]
    #[serde(rename = "League of Legends")]
    LeagueOfLegends,
    #[strum(serialize = "CS2/CS:GO")]
    #[serde(rename = "CS2/CS:GO")]
    CounterStrike,
    #[strum(serialize = "Fortnite")]
    #[serde(rename = "Fortnite")]
    Fortnite,
    #[strum(serialize = "Apex Legends")]
    #[serde(rename = "Apex Legends")]
    ApexLegends,
    #[strum(serialize = "Dota 2")]
    #[serde(rename = "Dota 2")]
    Dota2,
    #[strum(serialize = "Overwatch 2")]
    #[serde(rename = "Overwatch 2")]
    Overwatch2,
    #[strum(serialize = "Rocket League")]
    #[serde(rename = "Rocket League")]
    RocketLeague,
    #[default]
    #[strum(serialize = "General Gaming")]
    #[serde(rename = "General Gaming")]
    GeneralGaming,
}

impl Domain {
    pub fn from_name(name: &str) -> Result<Self, ConfigurationError> {
        Self::from_str(name)
            .map_err(|_| ConfigurationError::UnknownDomain(name.to_string()))
    }

    /// Display name, also used verbatim inside prompts and quick-action templates.
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    pub fn focus(&self) -> &'static str {
        match self {
            Domain::Valorant => {
                "Focus on agent abilities, map control, economy management, and tactical positioning."
            }
            Domain::LeagueOfLegends => {
                "Focus on champion mechanics, macro gameplay, objectives, and team composition."
            }
            Domain::CounterStrike => {
                "Focus on utility usage, positioning, economy, crosshair placement, and map knowledge."
            }
            Domain::Fortnite => {
                "Focus on building techniques, rotation strategies, loadout optimization, and positioning."
            }
            Domain::ApexLegends => {
                "Focus on legend synergies, movement mechanics, positioning, and team coordination."
            }
            Domain::Dota2 => {
                "Focus on hero mechanics, itemization, map control, and team fight execution."
            }
            Domain::Overwatch2 => {
                "Focus on hero counters, ultimate economy, team composition, and positioning."
            }
            Domain::RocketLeague => {
                "Focus on rotation, mechanics, boost management, and positioning."
            }
            Domain::GeneralGaming => {
                "Provide versatile gaming advice applicable across multiple titles."
            }
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::iter().map(|d| d.name()).collect()
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
