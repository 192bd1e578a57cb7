use super::types::{ImageRef, RecognitionResult, TextBlock, TextRecognizer};
use super::ScanError;

/// Mock recognizer for unit testing and demo builds without ML Kit.
pub struct MockRecognizer {
    pub text: String,
    pub blocks: Vec<TextBlock>,
}

impl MockRecognizer {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            blocks: vec![],
        }
    }

    /// Report one block per non-empty line, like a structured recognizer would.
    pub fn with_line_blocks(mut self) -> Self {
        self.blocks = self
            .text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(TextBlock::new)
            .collect();
        self
    }
}

impl TextRecognizer for MockRecognizer {
    fn recognize(&self, _image: &ImageRef) -> Result<RecognitionResult, ScanError> {
        Ok(RecognitionResult {
            text: self.text.clone(),
            blocks: self.blocks.clone(),
        })
    }
}

#[derive(Debug, Clone)]
enum Failure {
    Error(String),
    Timeout,
    Unavailable,
}

/// Recognizer that always fails, standing in for a missing or crashed native module.
pub struct FailingRecognizer {
    failure: Failure,
}

impl FailingRecognizer {
    pub fn new(reason: &str) -> Self {
        Self {
            failure: Failure::Error(reason.to_string()),
        }
    }

    /// Fails as if the native call never returned.
    pub fn timeout() -> Self {
        Self {
            failure: Failure::Timeout,
        }
    }

    /// Fails as if the native module is not linked into this build.
    pub fn unavailable() -> Self {
        Self {
            failure: Failure::Unavailable,
        }
    }
}

impl TextRecognizer for FailingRecognizer {
    fn recognize(&self, image: &ImageRef) -> Result<RecognitionResult, ScanError> {
        Err(match &self.failure {
            Failure::Error(reason) => ScanError::Recognition(format!("{reason} ({})", image.uri())),
            Failure::Timeout => ScanError::Timeout,
            Failure::Unavailable => ScanError::RecognizerUnavailable,
        })
    }
}
