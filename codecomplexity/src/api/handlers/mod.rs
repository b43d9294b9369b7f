pub mod analyze;
pub(crate) mod health;

pub use analyze::{analyze, analyze_code};
pub use health::health_check;
