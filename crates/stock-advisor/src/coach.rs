//! Debate Coach
//!
//! The user argues for a trade; the coach pushes back. Any chat-provider
//! failure is swallowed and answered with a fixed apology.

use std::sync::Arc;

use coach_core::{GenerationOptions, LlmProvider};

use crate::error::{AdvisorError, Result};

/// System prompt for the debate coach
pub const DEBATE_COACH_PROMPT: &str = r#"You are a stock AI coach. The user will argue with you about whether to buy/sell a stock.
Your style:
- Challenge them with 2-3 logical reasons.
- If their argument is strong, concede and say "You might be right, here's a safer approach."
- Keep responses concise (2-3 sentences max).
- Be conversational and slightly confrontational but helpful."#;

/// Reply used whenever the chat provider cannot answer
pub const FALLBACK_REPLY: &str =
    "I'm having trouble processing your question right now. Please try again.";

#[derive(Clone)]
pub struct DebateCoach {
    provider: Arc<dyn LlmProvider>,
    options: GenerationOptions,
}

impl DebateCoach {
    pub fn new(provider: Arc<dyn LlmProvider>, options: GenerationOptions) -> Self {
        Self { provider, options }
    }

    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    pub fn model(&self) -> &str {
        &self.options.model
    }

    /// Answer a debate question.
    ///
    /// Only a blank question is an error; provider failures and empty
    /// completions yield [`FALLBACK_REPLY`].
    pub async fn ask(&self, question: &str) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AdvisorError::InvalidInput("Question string is required".into()));
        }

        match self.provider.generate_text(DEBATE_COACH_PROMPT, question, &self.options).await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    model = %self.options.model,
                    error = %e,
                    "chat provider failed, sending fallback reply"
                );
                Ok(FALLBACK_REPLY.to_string())
            }
        }
    }
}
