//! Error types for the coach.
//!
//! Configuration errors are programming errors (a selector offered a value the
//! catalogue does not know). Everything else is scoped to a single turn and is
//! rendered into the transcript through [`CoachError::inline_message`].

use thiserror::Error;

/// Name of the environment variable holding the completion provider key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Transcript text shown when no credential is configured.
pub const CREDENTIAL_MISSING_MESSAGE: &str = "❌ Error: GROQ_API_KEY not configured. \
     Set it in the environment or in a local .env file.";

/// Lookup failures against the fixed catalogues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("unknown persona '{0}'")]
    UnknownPersona(String),

    #[error("unknown domain '{0}'")]
    UnknownDomain(String),

    #[error("unknown quick action '{0}'")]
    UnknownAction(String),

    #[error("verbosity {0} is outside 1-10")]
    VerbosityOutOfRange(i64),
}

#[derive(Debug, Error)]
pub enum CoachError {
    #[error("GROQ_API_KEY not configured")]
    CredentialMissing,

    /// Completion endpoint answered with a non-2xx status
    #[error("completion endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Connect/read timeout, reset, DNS failure and friends
    #[error("connection error: {0}")]
    Connection(String),

    /// A streamed fragment that is not valid JSON. Never surfaces to the
    /// transcript; the decoder skips these.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),
}

impl CoachError {
    /// True for status and connection failures.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Connection(_))
    }

    /// User-facing text placed in the assistant slot when a turn fails.
    pub fn inline_message(&self) -> String {
        match self {
            Self::CredentialMissing => CREDENTIAL_MISSING_MESSAGE.to_string(),
            Self::Status { status, body } => format!("❌ Error {}: {}", status, body),
            Self::Connection(detail) => format!("❌ Connection error: {}", detail),
            Self::MalformedFrame(detail) => format!("❌ Malformed response: {}", detail),
        }
    }
}

impl From<reqwest::Error> for CoachError {
    fn from(e: reqwest::Error) -> Self {
        Self::Connection(e.to_string())
    }
}

pub type Result<T, E = CoachError> = std::result::Result<T, E>;
