pub mod types;
pub mod recognizer;
pub mod symbol;
pub mod confidence;
pub mod fallback;
pub mod guidance;
pub mod orchestrator;

pub use types::*;
pub use recognizer::*;
pub use symbol::{infer, infer_with_strategy, Strategy};
pub use confidence::{estimate, estimate_unclamped};
pub use fallback::{simulate, simulate_with};
pub use guidance::{tip_for, tip_for_with, GuidancePolicy};
pub use orchestrator::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Text recognizer is not available")]
    RecognizerUnavailable,

    #[error("Text recognition failed: {0}")]
    Recognition(String),

    #[error("Text recognition timed out")]
    Timeout,

    #[error("Malformed recognition result: {0}")]
    MalformedResult(#[from] serde_json::Error),
}
