// src/config/mod.rs
// Process configuration: environment first, then ~/.coach/config.toml, then defaults.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::Domain;
use crate::error::{ConfigurationError, API_KEY_ENV};
use crate::llm::completion::{CompletionSettings, GROQ_API_URL, MODEL_NAME};
use crate::persona::Persona;
use crate::prompt::{TurnSettings, Verbosity};

#[derive(Debug, Clone)]
pub struct CoachConfig {
    // ── Completion provider
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub timeout_secs: u64,

    // ── Server
    pub host: String,
    pub port: u16,

    // ── Selector defaults
    pub default_persona: String,
    pub default_domain: String,
    pub default_verbosity: i64,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: GROQ_API_URL.to_string(),
            model: MODEL_NAME.to_string(),
            timeout_secs: 30,
            host: "127.0.0.1".to_string(),
            port: 7860,
            default_persona: Persona::default().name().to_string(),
            default_domain: Domain::default().name().to_string(),
            default_verbosity: 5,
        }
    }
}

/// Optional overlay read from `~/.coach/config.toml`
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub groq_api_key: Option<String>,
    pub api_url: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub default_persona: Option<String>,
    pub default_domain: Option<String>,
    pub default_verbosity: Option<i64>,
}

impl FileConfig {
    /// Load the overlay. A missing file is not an error; an unreadable or
    /// unparsable one is logged and ignored.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Default overlay location
pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".coach")
        .join("config.toml")
}

/// Directory holding the optional per-user `.env`
pub fn dotenv_path() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(".coach").join(".env")
}

// Values may carry trailing "# comments" in .env files
fn env_var<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    let clean = raw.split('#').next().unwrap_or("").trim();
    if clean.is_empty() {
        return None;
    }
    match clean.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Config: {} = '{}' (parse failed, ignoring)", key, clean);
            None
        }
    }
}

impl CoachConfig {
    /// Environment > `~/.coach/config.toml` > defaults
    pub fn from_env() -> Self {
        Self::resolve(FileConfig::load(&config_path()))
    }

    pub fn resolve(file: FileConfig) -> Self {
        let defaults = Self::default();

        // The key is read raw: '#' is legal inside secrets
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .or(file.groq_api_key);

        Self {
            api_key,
            api_url: env_var("COACH_API_URL")
                .or(file.api_url)
                .unwrap_or(defaults.api_url),
            model: env_var("COACH_MODEL")
                .or(file.model)
                .unwrap_or(defaults.model),
            timeout_secs: env_var("COACH_TIMEOUT_SECS")
                .or(file.timeout_secs)
                .unwrap_or(defaults.timeout_secs),
            host: env_var("COACH_HOST")
                .or(file.host)
                .unwrap_or(defaults.host),
            port: env_var("COACH_PORT")
                .or(file.port)
                .unwrap_or(defaults.port),
            default_persona: env_var("COACH_DEFAULT_PERSONA")
                .or(file.default_persona)
                .unwrap_or(defaults.default_persona),
            default_domain: env_var("COACH_DEFAULT_DOMAIN")
                .or(file.default_domain)
                .unwrap_or(defaults.default_domain),
            default_verbosity: env_var("COACH_DEFAULT_VERBOSITY")
                .or(file.default_verbosity)
                .unwrap_or(defaults.default_verbosity),
        }
    }

    pub fn completion_settings(&self) -> CompletionSettings {
        CompletionSettings {
            endpoint: self.api_url.clone(),
            model: self.model.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            ..CompletionSettings::default()
        }
    }

    /// Selector defaults, validated against the catalogues
    pub fn default_turn_settings(&self) -> Result<TurnSettings, ConfigurationError> {
        Ok(TurnSettings::new(
            Persona::from_name(&self.default_persona)?,
            Domain::from_name(&self.default_domain)?,
            Verbosity::new(self.default_verbosity)?,
        ))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_catalogue() {
        let config = CoachConfig::default();
        let settings = config.default_turn_settings().unwrap();
        assert_eq!(settings.persona, Persona::CompetitiveProCoach);
        assert_eq!(settings.domain, Domain::GeneralGaming);
        assert_eq!(settings.verbosity.level(), 5);
        assert_eq!(config.bind_address(), "127.0.0.1:7860");
    }

    #[test]
    fn test_file_overlay() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "model = \"llama-3.1-8b-instant\"\nport = 9000\ndefault_domain = \"Dota 2\""
        )
        .unwrap();

        let overlay = FileConfig::load(file.path());
        assert_eq!(overlay.model.as_deref(), Some("llama-3.1-8b-instant"));
        assert_eq!(overlay.port, Some(9000));
        assert_eq!(overlay.default_domain.as_deref(), Some("Dota 2"));
        assert!(overlay.groq_api_key.is_none());
    }

    #[test]
    fn test_broken_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number").unwrap();

        let overlay = FileConfig::load(file.path());
        assert!(overlay.port.is_none());
    }

    #[test]
    fn test_missing_file_is_empty_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let overlay = FileConfig::load(&dir.path().join("absent.toml"));
        assert!(overlay.model.is_none());
    }

    #[test]
    fn test_invalid_default_persona_is_rejected() {
        let config = CoachConfig {
            default_persona: "Grumpy Uncle".into(),
            ..CoachConfig::default()
        };
        assert_eq!(
            config.default_turn_settings().unwrap_err(),
            ConfigurationError::UnknownPersona("Grumpy Uncle".into())
        );
    }

    #[test]
    fn test_completion_settings_keep_fixed_sampling() {
        let config = CoachConfig {
            timeout_secs: 0,
            ..CoachConfig::default()
        };
        let settings = config.completion_settings();
        assert_eq!(settings.max_tokens, 1500);
        assert!((settings.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(settings.timeout, Duration::from_secs(1));
    }
}
