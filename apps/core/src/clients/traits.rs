use crate::error::AppError;
use async_trait::async_trait;

/// Defines the public interface for a completion provider.
///
/// This trait abstracts the source of AI response text, allowing the live
/// OpenAI-compatible proxy and the local mock generator to be used
/// interchangeably by the pipeline.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generates a complete text response for a query.
    async fn complete(&self, prompt: &str) -> Result<String, AppError>;

    /// Short identifier for logging ("proxy", "mock").
    fn name(&self) -> &'static str;
}
