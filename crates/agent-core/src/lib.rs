//! # agent-core
//!
//! Core types for the health coaching specialists: a provider-agnostic LLM
//! abstraction, the session context, and the specialist agent trait.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     SpecialistAgent                          │
//! │  ┌──────────────────┐  ┌─────────────┐  ┌────────────────┐   │
//! │  │ UserSession      │  │ ModelClient │──│  LlmProvider   │   │
//! │  │ Context          │──│ (options)   │  │  (Strategy)    │   │
//! │  └──────────────────┘  └─────────────┘  └────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait lets the agents run against OpenRouter, a
//! scripted mock, or any other chat-completion backend unchanged.

pub mod agent;
pub mod error;
pub mod message;
pub mod provider;
pub mod session;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use agent::{ModelClient, SpecialistAgent};
pub use error::{AgentError, Result};
pub use message::{Message, Role};
pub use provider::{Completion, GenerationOptions, LlmProvider};
pub use session::{SessionId, UserSessionContext};
