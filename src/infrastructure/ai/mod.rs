//! AI inference infrastructure
//!
//! Gemini-backed implementations of the categorization and report-generation
//! traits, plus the prompt templates and response parsing they share.

pub mod gemini;
pub mod prompts;
pub mod response_parser;

pub use gemini::GeminiAnalysisProvider;
pub use response_parser::ResponseParser;
