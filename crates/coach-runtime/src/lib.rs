//! # coach-runtime
//!
//! Runtime LLM providers for the portfolio coach.
//!
//! ## Providers
//!
//! - **Ollama** (default): Local LLM inference via Ollama
//!
//! ## Usage
//!
//! ```rust,ignore
//! use coach_runtime::OllamaProvider;
//!
//! let provider = Arc::new(OllamaProvider::from_env());
//! let coach = DebateCoach::new(provider, "llama3.2");
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaProvider};

// Re-export core types for convenience
pub use coach_core::{CoachError, GenerationOptions, LlmProvider, Message, Result, Role};
