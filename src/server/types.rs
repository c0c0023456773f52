//! Request/response types and SSE events for the HTTP API

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coach::{TurnPhase, TurnSnapshot};
use crate::conversation::display::DisplayMessage;
use crate::error::ConfigurationError;
use crate::prompt::TurnSettings;

// ============================================================================
// Requests
// ============================================================================

/// Selector values sent with every turn. Missing fields fall back to the
/// server defaults.
#[derive(Debug, Default, Deserialize)]
pub struct Selection {
    pub persona: Option<String>,
    pub domain: Option<String>,
    pub verbosity: Option<i64>,
}

impl Selection {
    pub fn resolve(&self, defaults: &TurnSettings) -> Result<TurnSettings, ConfigurationError> {
        TurnSettings::parse(
            self.persona.as_deref().unwrap_or(defaults.persona.name()),
            self.domain.as_deref().unwrap_or(defaults.domain.name()),
            self.verbosity
                .unwrap_or_else(|| i64::from(defaults.verbosity.level())),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatStreamRequest {
    pub message: String,
    #[serde(flatten)]
    pub selection: Selection,
}

#[derive(Debug, Deserialize)]
pub struct QuickActionRequest {
    pub action: String,
    #[serde(flatten)]
    pub selection: Selection,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub session_id: Uuid,
    pub messages: Vec<DisplayMessage>,
    /// Shown in place of the transcript while it is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct QuickActionInfo {
    pub label: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Serialize)]
pub struct VerbosityRange {
    pub min: u8,
    pub max: u8,
}

#[derive(Debug, Serialize)]
pub struct CatalogueResponse {
    pub personas: Vec<&'static str>,
    pub domains: Vec<&'static str>,
    pub quick_actions: Vec<QuickActionInfo>,
    pub verbosity: VerbosityRange,
    pub defaults: TurnSettings,
}

// ============================================================================
// SSE Event Types
// ============================================================================

/// Events sent to the browser while a turn streams
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum TurnEvent {
    /// The user entry was appended
    #[serde(rename = "user")]
    User { content: String },

    /// Full assistant text so far. Replaces, never appends.
    #[serde(rename = "assistant")]
    Assistant { content: String },

    /// Turn settled
    #[serde(rename = "done")]
    Done { message_count: usize },

    #[serde(rename = "error")]
    Error { message: String },
}

impl TurnEvent {
    /// Event for a snapshot, if the browser needs to hear about it.
    pub fn from_snapshot(snapshot: &TurnSnapshot) -> Option<Self> {
        let messages = snapshot.conversation.messages();
        match snapshot.phase {
            TurnPhase::UserAppended => {
                let user = messages.len().checked_sub(2).map(|i| &messages[i])?;
                Some(Self::User {
                    content: user.content.clone(),
                })
            }
            TurnPhase::Streaming(_) => Some(Self::Assistant {
                content: snapshot.conversation.last()?.content.clone(),
            }),
            TurnPhase::Idle | TurnPhase::Settled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{Conversation, Message};
    use crate::domain::Domain;
    use crate::persona::Persona;

    #[test]
    fn test_event_wire_format() {
        let event = TurnEvent::Assistant {
            content: "Stay".into(),
        };
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"type":"assistant","content":"Stay"}"#
        );
        let done = TurnEvent::Done { message_count: 2 };
        assert_eq!(
            serde_json::to_string(&done).unwrap(),
            r#"{"type":"done","message_count":2}"#
        );
    }

    #[test]
    fn test_events_from_snapshots() {
        let mut conversation = Conversation::new();
        conversation.open_turn("aim?");

        let appended = TurnSnapshot {
            conversation: conversation.clone(),
            phase: TurnPhase::UserAppended,
        };
        assert_eq!(
            TurnEvent::from_snapshot(&appended),
            Some(TurnEvent::User {
                content: "aim?".into()
            })
        );

        conversation.set_trailing_assistant("Stay");
        let streaming = TurnSnapshot {
            conversation,
            phase: TurnPhase::Streaming(1),
        };
        assert_eq!(
            TurnEvent::from_snapshot(&streaming),
            Some(TurnEvent::Assistant {
                content: "Stay".into()
            })
        );

        let idle = TurnSnapshot {
            conversation: Conversation::from_messages(vec![Message::user("x")]),
            phase: TurnPhase::Idle,
        };
        assert_eq!(TurnEvent::from_snapshot(&idle), None);
    }

    #[test]
    fn test_selection_falls_back_to_defaults() {
        let defaults = TurnSettings::default();
        let partial: ChatStreamRequest =
            serde_json::from_str(r#"{"message":"hi","domain":"Fortnite","verbosity":9}"#).unwrap();

        let settings = partial.selection.resolve(&defaults).unwrap();
        assert_eq!(settings.persona, Persona::CompetitiveProCoach);
        assert_eq!(settings.domain, Domain::Fortnite);
        assert_eq!(settings.verbosity.level(), 9);

        let bad = Selection {
            verbosity: Some(11),
            ..Selection::default()
        };
        assert_eq!(
            bad.resolve(&defaults).unwrap_err(),
            ConfigurationError::VerbosityOutOfRange(11)
        );
    }
}
