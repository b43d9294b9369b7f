//! Complexity analysis flow: input checks, upstream call, structural
//! validation and per-format recovery.

mod service;
mod types;
pub mod validator;

pub use service::AnalysisService;
pub use types::{AnalysisOutcome, AnalysisRequest, ComplexityReport, MarkdownAnalysis, Validation};
