//! HTTP backend that forwards code snippets to an LLM completion API and
//! returns a structurally validated Big-O complexity analysis.

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod llm;
