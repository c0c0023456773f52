use serde::Serialize;

use crate::domain::Domain;
use crate::error::ConfigurationError;
use crate::persona::Persona;

const CLOSING_LINE: &str =
    "Always be helpful, accurate, and adapt your advice to the player's skill level when mentioned.";

/// Detail dial in 1..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Verbosity(u8);

impl Verbosity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(level: i64) -> Result<Self, ConfigurationError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&level) {
            Ok(Self(level as u8))
        } else {
            Err(ConfigurationError::VerbosityOutOfRange(level))
        }
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    /// Map the dial onto one of three response-length instructions.
    /// Thresholds: 1-3 concise, 4-7 moderate, 8-10 comprehensive.
    pub fn detail(&self) -> Detail {
        match self.0 {
            0..=3 => Detail::Concise,
            4..=7 => Detail::Moderate,
            _ => Detail::Comprehensive,
        }
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Self(5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    Concise,
    Moderate,
    Comprehensive,
}

impl Detail {
    pub fn instruction(&self) -> &'static str {
        match self {
            Detail::Concise => "Keep responses concise and to the point (2-3 sentences).",
            Detail::Moderate => "Provide moderate detail with key points (1 paragraph).",
            Detail::Comprehensive => {
                "Give comprehensive analysis with examples and multiple strategies (detailed response)."
            }
        }
    }
}

/// The three selector values that shape one turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TurnSettings {
    pub persona: Persona,
    pub domain: Domain,
    pub verbosity: Verbosity,
}

impl TurnSettings {
    pub fn new(persona: Persona, domain: Domain, verbosity: Verbosity) -> Self {
        Self {
            persona,
            domain,
            verbosity,
        }
    }

    /// Validate raw selector values against the catalogues.
    pub fn parse(persona: &str, domain: &str, verbosity: i64) -> Result<Self, ConfigurationError> {
        Ok(Self {
            persona: Persona::from_name(persona)?,
            domain: Domain::from_name(domain)?,
            verbosity: Verbosity::new(verbosity)?,
        })
    }

    pub fn system_prompt(&self) -> String {
        compose_system_prompt(self.persona, self.domain, self.verbosity)
    }
}

/// Assemble the system instruction for already-validated inputs.
pub fn compose_system_prompt(persona: Persona, domain: Domain, verbosity: Verbosity) -> String {
    format!(
        "{}\n\nGame Context: You're coaching for {}. {}\n\nResponse Style: {}\n\n{}",
        persona.instruction(),
        domain.name(),
        domain.focus(),
        verbosity.detail().instruction(),
        CLOSING_LINE,
    )
}

/// Builds the system prompt from raw selector values.
///
/// Unknown persona or domain names and out-of-range verbosity are rejected
/// rather than defaulted.
pub fn build_system_prompt(
    persona: &str,
    domain: &str,
    verbosity: i64,
) -> Result<String, ConfigurationError> {
    TurnSettings::parse(persona, domain, verbosity).map(|s| s.system_prompt())
}
