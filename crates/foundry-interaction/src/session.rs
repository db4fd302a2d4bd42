//! Conversational extraction and merge engine.
//!
//! A [`CoauthorSession`] owns one conversation transcript and one
//! document. Each submitted turn goes to the upstream agent together with
//! the persona instruction and the transcript so far; the structured part
//! of the response is merged into the document with shallow override
//! semantics.
//!
//! The session is single-flight by contract: callers must not submit a
//! new turn while one is in flight (`is_busy`). The engine does not guard
//! against violations internally - two racing turns both settle, and the
//! merge of whichever response arrives last wins.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use foundry_core::conversation::{Conversation, ConversationTurn, TurnRole};
use foundry_core::document::{Document, PartialUpdate};
use foundry_core::error::{FoundryError, Result};
use foundry_core::persona::Persona;

use crate::agent::{Agent, Attachment, Payload};

/// The result of one successful turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// The agent's conversational reply.
    pub reply: String,
    /// Wire names of the fields the turn updated.
    pub updated_fields: Vec<String>,
}

/// The structured shape every model response must decode to.
///
/// Anything else - missing keys, extra keys, non-JSON text - is a
/// malformed response and drops the turn.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelReply {
    reply: String,
    updates: Map<String, Value>,
}

struct SessionState {
    conversation: Conversation,
    document: Document,
    in_flight: bool,
}

/// One co-authoring session: persona, transcript, document, and the
/// agent handle, with the in-flight flag for the single-flight contract.
pub struct CoauthorSession<A: Agent<Output = String>> {
    agent: A,
    persona: Persona,
    state: Arc<Mutex<SessionState>>,
}

impl<A: Agent<Output = String>> CoauthorSession<A> {
    /// Creates a session over an existing document value.
    ///
    /// When `greeting` is set it becomes the scripted opening agent turn.
    pub fn new(agent: A, persona: Persona, document: Document, greeting: Option<String>) -> Self {
        let mut conversation = Conversation::new();
        if let Some(text) = greeting {
            conversation.push_agent(text);
        }
        Self {
            agent,
            persona,
            state: Arc::new(Mutex::new(SessionState {
                conversation,
                document,
                in_flight: false,
            })),
        }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// True while a turn is awaiting the upstream response. Callers must
    /// check this before submitting; the engine does not queue.
    pub async fn is_busy(&self) -> bool {
        self.state.lock().await.in_flight
    }

    /// Snapshot of the current document value.
    pub async fn document(&self) -> Document {
        self.state.lock().await.document.clone()
    }

    /// Snapshot of the transcript.
    pub async fn transcript(&self) -> Vec<ConversationTurn> {
        self.state.lock().await.conversation.turns().to_vec()
    }

    /// Submits one turn: text plus an optional attachment.
    ///
    /// On success the agent turn is appended and the partial update is
    /// merged. On any failure the turn is dropped whole: no agent turn,
    /// no merge, in-flight cleared, and the cause goes to the diagnostic
    /// log as well as to the returned error.
    pub async fn submit_turn(
        &self,
        text: &str,
        attachment: Option<Attachment>,
    ) -> Result<TurnOutcome> {
        let instruction = self.persona.system_instruction()?;

        let prompt = {
            let mut state = self.state.lock().await;
            let history = history_prompt(state.conversation.turns());
            let display = match &attachment {
                Some(att) => {
                    format!("{} {}", self.persona.attachment_marker(&att.name), text)
                }
                None => text.to_string(),
            };
            state.conversation.push_operator(display);
            state.in_flight = true;
            format!(
                "{instruction}\n\n# Conversation History\n{history}\n\n# New Request\n{text}"
            )
        };

        let mut payload = Payload::text(prompt);
        if let Some(att) = attachment {
            payload = payload.with_attachment(att);
        }

        // The one suspension point: the lock is not held across it.
        let result = self.agent.execute(payload).await;

        let mut state = self.state.lock().await;
        state.in_flight = false;

        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(target: "coauthor", "model call failed, turn dropped: {err}");
                return Err(FoundryError::model(err.to_string()));
            }
        };

        let (reply, update) = match self.decode_reply(&raw) {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::warn!(target: "coauthor", "unusable model response, turn dropped: {err}");
                return Err(err);
            }
        };

        let merged = match state.document.merge(&update) {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(target: "coauthor", "update rejected, turn dropped: {err}");
                return Err(err);
            }
        };

        state.conversation.push_agent(reply.clone());
        state.document = merged;
        Ok(TurnOutcome {
            reply,
            updated_fields: update.keys().cloned().collect(),
        })
    }

    /// Merges an update that did not come from the model (e.g. the
    /// finalized avatar). The document is still mutated only through the
    /// session, never from outside.
    pub async fn apply_update(&self, update: &PartialUpdate) -> Result<()> {
        let mut state = self.state.lock().await;
        state.document = state.document.merge(update)?;
        Ok(())
    }

    fn decode_reply(&self, raw: &str) -> Result<(String, PartialUpdate)> {
        let parsed: ModelReply = serde_json::from_str(raw).map_err(|err| {
            FoundryError::malformed_response(format!(
                "expected {{\"reply\", \"updates\"}}: {err}"
            ))
        })?;
        let update = PartialUpdate::validated(parsed.updates, &self.persona.permitted_fields())?;
        Ok((parsed.reply, update))
    }
}

fn history_prompt(turns: &[ConversationTurn]) -> String {
    turns
        .iter()
        .map(|turn| match turn.role {
            TurnRole::Operator => format!("User: {}", turn.text),
            TurnRole::Agent => format!("Assistant: {}", turn.text),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
