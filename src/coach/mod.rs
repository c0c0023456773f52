//! Coaching turns
//!
//! A turn takes the conversation by value and hands it back as a stream of
//! snapshots, so the caller always holds the single current copy. The
//! assistant slot is overwritten (never appended to) with each cumulative
//! reply from the completion client.

pub mod quick_actions;
pub mod turn;

use futures::stream::{self, BoxStream, StreamExt};

use crate::conversation::Conversation;
use crate::error::ConfigurationError;
use crate::llm::CompletionClient;
use crate::prompt::TurnSettings;

pub use quick_actions::QuickAction;
pub use turn::{TurnPhase, TurnSnapshot};

/// Finite, non-restartable sequence of snapshots for one turn
pub type TurnStream = BoxStream<'static, TurnSnapshot>;

#[derive(Clone)]
pub struct Coach {
    client: CompletionClient,
}

impl Coach {
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &CompletionClient {
        &self.client
    }

    /// Submit free text using raw selector values.
    ///
    /// Blank text is a no-op and the selectors are not looked at.
    pub fn submit_turn(
        &self,
        conversation: Conversation,
        user_text: &str,
        persona: &str,
        domain: &str,
        verbosity: i64,
    ) -> Result<TurnStream, ConfigurationError> {
        if is_blank(user_text) {
            return Ok(idle(conversation));
        }
        let settings = TurnSettings::parse(persona, domain, verbosity)?;
        Ok(self.start_turn(conversation, user_text, settings))
    }

    /// Run a named quick action using raw selector values.
    pub fn run_quick_action(
        &self,
        action_name: &str,
        conversation: Conversation,
        persona: &str,
        domain: &str,
        verbosity: i64,
    ) -> Result<TurnStream, ConfigurationError> {
        let action = QuickAction::from_name(action_name)?;
        let settings = TurnSettings::parse(persona, domain, verbosity)?;
        Ok(self.start_quick_action(action, conversation, settings))
    }

    pub fn start_quick_action(
        &self,
        action: QuickAction,
        conversation: Conversation,
        settings: TurnSettings,
    ) -> TurnStream {
        let message = action.message(settings.domain);
        tracing::info!(action = action.label(), domain = %settings.domain, "Quick action");
        self.start_turn(conversation, &message, settings)
    }

    /// Start a turn with validated settings.
    ///
    /// Blank text yields the conversation unchanged, once, without touching
    /// the network. Otherwise the first snapshot already holds the user
    /// entry and an empty assistant slot, and the last one is `Settled`.
    pub fn start_turn(
        &self,
        mut conversation: Conversation,
        user_text: &str,
        settings: TurnSettings,
    ) -> TurnStream {
        if is_blank(user_text) {
            return idle(conversation);
        }

        let prior = conversation.open_turn(user_text);
        let system_prompt = settings.system_prompt();
        let replies = self
            .client
            .stream_completion(user_text, &prior, &system_prompt);

        tracing::info!(
            persona = %settings.persona,
            domain = %settings.domain,
            verbosity = settings.verbosity.level(),
            history = prior.len(),
            "Starting turn"
        );

        async_stream::stream! {
            let mut phase = TurnPhase::Idle.user_appended();
            yield TurnSnapshot { conversation: conversation.clone(), phase };

            let mut replies = replies;
            while let Some(text) = replies.next().await {
                conversation.set_trailing_assistant(text);
                phase = phase.updated();
                yield TurnSnapshot { conversation: conversation.clone(), phase };
            }

            tracing::debug!(updates = phase.updates(), "Turn settled");
            yield TurnSnapshot { conversation, phase: phase.settled() };
        }
        .boxed()
    }
}

pub fn is_blank(user_text: &str) -> bool {
    user_text.trim().is_empty()
}

/// The conversation handed back once, untouched
fn idle(conversation: Conversation) -> TurnStream {
    tracing::debug!("Ignoring blank submission");
    stream::once(futures::future::ready(TurnSnapshot {
        conversation,
        phase: TurnPhase::Idle,
    }))
    .boxed()
}
