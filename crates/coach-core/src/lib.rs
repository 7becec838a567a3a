//! # coach-core
//!
//! Provider-agnostic LLM abstraction for the portfolio coach.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    Debate coach                          │
//! │  ┌──────────────────────┐    ┌────────────────────────┐  │
//! │  │  generate_text(      │───▶│  LlmProvider           │  │
//! │  │    system, user)     │    │  (Ollama, mock, ...)   │  │
//! │  └──────────────────────┘    └────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers only ever see text in and text out. The `LlmProvider` trait lets
//! the server swap the backing model (or a test double) without touching the
//! coaching logic.

pub mod provider;
pub mod message;
pub mod error;

pub use error::{CoachError, Result};
pub use message::{Message, Role};
pub use provider::{GenerationOptions, LlmProvider};
