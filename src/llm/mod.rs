//! LLM integration module

pub mod analyzer;
pub mod client;
pub mod prompts;

pub use analyzer::ResumeAnalyzer;
pub use client::{Credential, GeminiClient, ModelBackend, ModelConfig};
