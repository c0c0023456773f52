//! Quick actions: one-click canned questions about the selected game.

use std::str::FromStr;

use serde::Serialize;
use strum::{EnumIter, EnumString, IntoEnumIterator};

use crate::domain::Domain;
use crate::error::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, EnumIter)]
pub enum QuickAction {
    #[strum(serialize = "Build Guide", serialize = "BuildGuide", serialize = "build_guide")]
    BuildGuide,
    #[strum(
        serialize = "Counter Strategy",
        serialize = "CounterStrategy",
        serialize = "counter_strategy"
    )]
    CounterStrategy,
    #[strum(
        serialize = "Improve Gameplay",
        serialize = "Improve My Gameplay",
        serialize = "ImproveGameplay",
        serialize = "improve_gameplay"
    )]
    ImproveGameplay,
    #[strum(serialize = "Meta Analysis", serialize = "MetaAnalysis", serialize = "meta_analysis")]
    MetaAnalysis,
}

impl QuickAction {
    pub fn from_name(name: &str) -> Result<Self, ConfigurationError> {
        Self::from_str(name)
            .map_err(|_| ConfigurationError::UnknownAction(name.to_string()))
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            QuickAction::BuildGuide => "Build Guide",
            QuickAction::CounterStrategy => "Counter Strategy",
            QuickAction::ImproveGameplay => "Improve Gameplay",
            QuickAction::MetaAnalysis => "Meta Analysis",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            QuickAction::BuildGuide => "📋",
            QuickAction::CounterStrategy => "🛡️",
            QuickAction::ImproveGameplay => "📈",
            QuickAction::MetaAnalysis => "🔥",
        }
    }

    /// The user message this action submits. Only the game name varies.
    pub fn message(&self, domain: Domain) -> String {
        let game = domain.name();
        match self {
            QuickAction::BuildGuide => format!(
                "What's the current meta build/loadout for {}? Give me a strong setup.",
                game
            ),
            QuickAction::CounterStrategy => {
                format!("How do I counter the current meta strategies in {}?", game)
            }
            QuickAction::ImproveGameplay => format!(
                "What are the top 3 things I should focus on to improve at {}?",
                game
            ),
            QuickAction::MetaAnalysis => format!("What's the current meta in {} and why?", game),
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::iter().map(|a| a.label()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_forms() {
        for name in ["Meta Analysis", "MetaAnalysis", "meta_analysis"] {
            assert_eq!(QuickAction::from_name(name).unwrap(), QuickAction::MetaAnalysis);
        }
        assert_eq!(
            QuickAction::from_name("Improve My Gameplay").unwrap(),
            QuickAction::ImproveGameplay
        );
        assert!(QuickAction::from_name("meta analysis").is_err());
        assert!(QuickAction::from_name(" Build Guide").is_err());
    }

    #[test]
    fn test_unknown_action() {
        assert_eq!(
            QuickAction::from_name("Surrender Vote").unwrap_err(),
            ConfigurationError::UnknownAction("Surrender Vote".into())
        );
    }

    #[test]
    fn test_templates_embed_domain() {
        for action in QuickAction::iter() {
            assert!(action.message(Domain::CounterStrike).contains("CS2/CS:GO"));
        }
        assert_eq!(
            QuickAction::MetaAnalysis.message(Domain::Valorant),
            "What's the current meta in Valorant and why?"
        );
    }
}
