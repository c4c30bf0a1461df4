use async_trait::async_trait;

use crate::error::Result;

/// A model that turns a prompt into free-form text.
///
/// `GeminiClient` is the production implementation. The movie service only
/// depends on this trait, so tests can substitute a canned reply.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use cineinfo::{Result, TextGenerator};
///
/// struct Echo;
///
/// #[async_trait]
/// impl TextGenerator for Echo {
///     async fn generate(&self, prompt: &str) -> Result<String> {
///         Ok(prompt.to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Raw completion for a single user message.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
