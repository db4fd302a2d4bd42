//! Document publication boundary.
//!
//! Publication (persistence, visibility, matching) is an external
//! collaborator's concern; the core only hands over the finished value.

use async_trait::async_trait;

use foundry_core::document::Document;
use foundry_core::error::Result;

/// Receives the finished document at session end.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, document: &Document) -> Result<()>;
}

/// A publisher that only logs the handoff.
#[derive(Debug, Clone, Default)]
pub struct LogPublisher;

#[async_trait]
impl Publisher for LogPublisher {
    async fn publish(&self, document: &Document) -> Result<()> {
        tracing::info!(
            target: "publish",
            "document handed off: {}",
            serde_json::to_string(document)?
        );
        Ok(())
    }
}
