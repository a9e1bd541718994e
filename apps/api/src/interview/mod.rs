// Mock interview generation.
// Implements: form validation, prompt building, AI response normalization,
// the submit cycle, and the interview HTTP handlers.
// All LLM calls go through llm_client; all persistence through store.

pub mod controller;
pub mod form;
pub mod guard;
pub mod handlers;
pub mod normalizer;
pub mod prompts;
