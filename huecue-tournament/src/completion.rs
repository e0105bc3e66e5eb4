//! The text-generation seam between the orchestrator and a model backend

use async_trait::async_trait;

use crate::agents::Agent;

/// A completion call that produced no usable text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("gateway returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed gateway response: {0}")]
    InvalidResponse(String),

    #[error("No response from model")]
    Empty,
}

/// Produces one completion for an agent
///
/// Implementations make exactly one attempt per call; the orchestrator
/// never retries.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, agent: &Agent, prompt: &str) -> Result<String, CompletionError>;
}

#[async_trait]
impl<T: CompletionProvider + ?Sized> CompletionProvider for std::sync::Arc<T> {
    async fn complete(&self, agent: &Agent, prompt: &str) -> Result<String, CompletionError> {
        (**self).complete(agent, prompt).await
    }
}
