//! Agent abstraction over the upstream model service.
//!
//! An [`Agent`] turns one [`Payload`] (text plus optional attachments)
//! into one response. The extraction engine is generic over this trait so
//! tests can substitute scripted agents for the live API client.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by agent implementations.
#[derive(Error, Debug, Clone)]
pub enum AgentError {
    /// The agent could not run at all (configuration, empty payload, ...)
    #[error("Agent execution failed: {0}")]
    ExecutionFailed(String),

    /// The upstream process/HTTP call failed
    #[error("Process error (status {status_code:?}): {message}")]
    ProcessError {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// Anything else
    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Creates a ProcessError carrying an upstream Retry-After delay.
    pub fn process_error_with_retry_after(
        status_code: u16,
        message: impl Into<String>,
        is_retryable: bool,
        retry_after: Duration,
    ) -> Self {
        Self::ProcessError {
            status_code: Some(status_code),
            message: message.into(),
            is_retryable,
            retry_after: Some(retry_after),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ProcessError { is_retryable: true, .. })
    }
}

/// An in-memory file handed to the model alongside a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn in_memory(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// The content of one upstream request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    text: String,
    attachments: Vec<Attachment>,
}

impl Payload {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn to_text(&self) -> String {
        self.text.clone()
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

/// A model-backed executor of single requests.
#[async_trait]
pub trait Agent: Send + Sync {
    type Output;

    /// Short human-readable description of what this agent is good at.
    fn expertise(&self) -> &str;

    /// Executes one request against the backing model.
    async fn execute(&self, payload: Payload) -> Result<Self::Output, AgentError>;
}
