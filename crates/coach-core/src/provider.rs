//! LLM Provider Strategy Pattern
//!
//! Defines a common interface for LLM backends (Ollama, hosted APIs, test
//! doubles) so the coach works with any of them without code changes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use coach_core::provider::{GenerationOptions, LlmProvider};
//!
//! let provider = OllamaProvider::from_env();
//! let reply = provider
//!     .generate_text("You are a stock coach.", "Should I buy TCS?", &GenerationOptions::default())
//!     .await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{CoachError, Result};
use crate::message::Message;

/// Configuration for LLM generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "llama3.2")
    pub model: String,

    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Top-p nucleus sampling
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

const fn default_temperature() -> f32 { 0.7 }
const fn default_max_tokens() -> u32 { 512 }
const fn default_top_p() -> f32 { 0.9 }

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: "llama3.2".into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
        }
    }
}

impl GenerationOptions {
    /// Options for a specific model, other settings at their defaults
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }
}

/// Response from an LLM completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text
    pub content: String,

    /// Model that generated this response
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,
}

/// Token usage statistics
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Information about a model
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
}

/// Strategy trait for LLM providers
///
/// Implement this trait to add support for new LLM backends.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "Ollama")
    fn name(&self) -> &str;

    /// Check if the provider is available and configured correctly
    async fn health_check(&self) -> Result<bool>;

    /// Generate a completion from messages
    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion>;

    /// List available models
    async fn list_models(&self) -> Result<Vec<ModelInfo>>;

    /// Text in, text out: one system prompt plus one user turn.
    ///
    /// Blank completions are reported as [`CoachError::EmptyCompletion`] so
    /// callers can substitute their own fallback text.
    async fn generate_text(
        &self,
        system_prompt: &str,
        user_text: &str,
        options: &GenerationOptions,
    ) -> Result<String> {
        let messages = [Message::system(system_prompt), Message::user(user_text)];
        let completion = self.complete(&messages, options).await?;

        let text = completion.content.trim();
        if text.is_empty() {
            return Err(CoachError::EmptyCompletion(self.name().to_string()));
        }

        tracing::debug!(
            provider = self.name(),
            model = %completion.model,
            chars = text.len(),
            "generated text"
        );
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;
    use std::sync::Mutex;

    /// Records the last prompt and answers with a canned reply
    struct CannedProvider {
        reply: String,
        seen: Mutex<Vec<Message>>,
    }

    impl CannedProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.into(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for CannedProvider {
        fn name(&self) -> &str {
            "Canned"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        async fn complete(
            &self,
            messages: &[Message],
            options: &GenerationOptions,
        ) -> Result<Completion> {
            *self.seen.lock().unwrap() = messages.to_vec();
            Ok(Completion {
                content: self.reply.clone(),
                model: options.model.clone(),
                usage: None,
            })
        }

        async fn list_models(&self) -> Result<Vec<ModelInfo>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_generation_options_defaults() {
        let opts = GenerationOptions::default();
        assert!((opts.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(opts.max_tokens, 512);
        assert_eq!(opts.model, "llama3.2");
        assert_eq!(GenerationOptions::for_model("mistral").model, "mistral");
    }

    #[tokio::test]
    async fn test_generate_text_sends_system_then_user() {
        let provider = CannedProvider::new("  Are you sure?  ");
        let reply = provider
            .generate_text("be a coach", "buy TCS?", &GenerationOptions::default())
            .await
            .unwrap();

        assert_eq!(reply, "Are you sure?");
        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].role, Role::System);
        assert_eq!(seen[0].content, "be a coach");
        assert_eq!(seen[1].role, Role::User);
        assert_eq!(seen[1].content, "buy TCS?");
    }

    #[tokio::test]
    async fn test_blank_completion_is_an_error() {
        let provider = CannedProvider::new("   ");
        let result = provider
            .generate_text("sys", "hi", &GenerationOptions::default())
            .await;
        assert!(matches!(result, Err(CoachError::EmptyCompletion(_))));
    }
}
