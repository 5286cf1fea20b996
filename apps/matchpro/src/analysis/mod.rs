// Resume / job description fit analysis.
// Prompt, declared schema and strict result validation around a single
// provider call. All LLM calls go through llm_client.

pub mod analyzer;
pub mod models;
pub mod prompts;
pub mod schema;
