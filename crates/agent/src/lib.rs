//! LLM collaborator for the quote builder. The model only ever sees the
//! flattened meal summary and only ever returns package names; every quote
//! mutation stays deterministic in the core.

pub mod llm;
pub mod suggest;

pub use llm::{HttpLlmClient, LlmClient};
pub use suggest::{parse_packages, PackageSuggester};
