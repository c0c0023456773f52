//! Per-turn state machine
//!
//! `Idle → UserAppended → Streaming(1) → … → Streaming(n) → Settled`

use serde::Serialize;

use crate::conversation::Conversation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "updates", rename_all = "snake_case")]
pub enum TurnPhase {
    /// No turn started (blank submission)
    Idle,
    /// User entry and empty assistant slot appended
    UserAppended,
    /// `n` cumulative updates applied to the assistant slot
    Streaming(usize),
    /// Terminal for this turn
    Settled,
}

impl TurnPhase {
    pub fn user_appended(self) -> Self {
        match self {
            TurnPhase::Idle => TurnPhase::UserAppended,
            other => other,
        }
    }

    /// Settled is terminal; updates after it are ignored.
    pub fn updated(self) -> Self {
        match self {
            TurnPhase::UserAppended => TurnPhase::Streaming(1),
            TurnPhase::Streaming(n) => TurnPhase::Streaming(n + 1),
            other => other,
        }
    }

    pub fn settled(self) -> Self {
        TurnPhase::Settled
    }

    pub fn updates(&self) -> usize {
        match self {
            TurnPhase::Streaming(n) => *n,
            _ => 0,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, TurnPhase::Settled)
    }
}

/// The conversation as it stood at one point of a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnSnapshot {
    pub conversation: Conversation,
    pub phase: TurnPhase,
}
