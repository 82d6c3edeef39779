// Content enhancement: prompt construction, one Gemini call, response normalization.
// All provider calls go through llm_client.

pub mod error;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod prompts;
pub mod service;
