// src/llm/mod.rs
// Gemini-backed classification client

mod gemini;
mod prompt;

pub use gemini::GeminiClient;
pub use prompt::build_triage_prompt;
