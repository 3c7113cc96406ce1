//! vitalyx-llm — LLM backend abstraction and narrative generation.
//!
//! Narrative text is a capability with two outcomes — generated or
//! explicitly unavailable — never an exception path that can fail the
//! surrounding assessment.

pub mod backend;
pub mod narrative;

pub use backend::{LlmBackend, LlmError, LlmRequest, LlmResponse, Message};
pub use narrative::{Narrative, NarrativeGenerator};
