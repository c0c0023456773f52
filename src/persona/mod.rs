// src/persona/mod.rs
// Coaching personas. Fixed set, selected per turn by the UI.

pub mod analyst;
pub mod casual;
pub mod competitive;
pub mod hype;

use std::str::FromStr;

use serde::Serialize;
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::ConfigurationError;

pub use analyst::ANALYST_PROMPT;
pub use casual::CASUAL_PROMPT;
pub use competitive::COMPETITIVE_PROMPT;
pub use hype::HYPE_PROMPT;

/// A coaching style. The serialized form is the label shown in the selector.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, EnumString, IntoStaticStr, EnumIter,
)]
pub enum Persona {
    #[default]
    #[strum(serialize = "Competitive Pro Coach")]
    #[serde(rename = "Competitive Pro Coach")]
    CompetitiveProCoach,
    #[strum(serialize = "Casual Fun Guide")]
    #[serde(rename = "Casual Fun Guide")]
    CasualFunGuide,
    #[strum(serialize = "Educational Analyst")]
    #[serde(rename = "Educational Analyst")]
    EducationalAnalyst,
    #[strum(serialize = "Hype Man")]
    #[serde(rename = "Hype Man")]
    HypeMan,
}

impl Persona {
    /// Resolve a selector label against the catalogue.
    pub fn from_name(name: &str) -> Result<Self, ConfigurationError> {
        Self::from_str(name)
            .map_err(|_| ConfigurationError::UnknownPersona(name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    /// Base instruction text placed at the top of the system prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            Persona::CompetitiveProCoach => COMPETITIVE_PROMPT,
            Persona::CasualFunGuide => CASUAL_PROMPT,
            Persona::EducationalAnalyst => ANALYST_PROMPT,
            Persona::HypeMan => HYPE_PROMPT,
        }
    }

    /// All labels in selector order.
    pub fn names() -> Vec<&'static str> {
        Self::iter().map(|p| p.name()).collect()
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_label() {
        assert_eq!(Persona::from_name("Hype Man").unwrap(), Persona::HypeMan);
    }

    #[test]
    fn test_lookup_is_exact() {
        for name in ["  hype MAN ", "hype man", "Hype Man "] {
            assert_eq!(
                Persona::from_name(name).unwrap_err(),
                ConfigurationError::UnknownPersona(name.into())
            );
        }
    }

    #[test]
    fn test_unknown_persona() {
        let err = Persona::from_name("Drill Sergeant").unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownPersona("Drill Sergeant".into()));
    }

    #[test]
    fn test_instruction_keeps_source_line_layout() {
        let lines: Vec<&str> = COMPETITIVE_PROMPT.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "You are an elite esports coach with years of competitive gaming experience. "
        );
        assert!(lines[1].starts_with("    You focus on META strategies"));

        for persona in Persona::iter() {
            for line in persona.instruction().lines().skip(1) {
                assert!(line.starts_with("    ") && !line.starts_with("     "));
            }
        }
        assert!(HYPE_PROMPT.ends_with("LET'S GO! 🔥"));
    }

    #[test]
    fn test_catalogue_order_and_text() {
        assert_eq!(
            Persona::names(),
            vec![
                "Competitive Pro Coach",
                "Casual Fun Guide",
                "Educational Analyst",
                "Hype Man"
            ]
        );
        for persona in Persona::iter() {
            assert!(!persona.instruction().is_empty());
            assert_eq!(Persona::from_name(persona.name()).unwrap(), persona);
        }
    }
}
