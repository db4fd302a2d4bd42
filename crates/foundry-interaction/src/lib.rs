//! Model-service layer: agent abstraction, the Gemini REST client, and
//! the conversational extraction and merge engine.

pub mod agent;
pub mod config;
pub mod gemini;
pub mod session;

pub use agent::{Agent, AgentError, Attachment, Payload};
pub use gemini::GeminiApiAgent;
pub use session::{CoauthorSession, TurnOutcome};
