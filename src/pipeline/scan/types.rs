use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::ScanError;
use crate::models::{DetectionMethod, ResinCode};

/// Opaque reference to a captured photo (file path or content URI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn uri(&self) -> &str {
        &self.0
    }
}

/// Output of the text recognizer for one photograph.
///
/// Deserialization is lenient: a missing, null or non-string `text` becomes
/// empty, and anything other than an array for `blocks` means no blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecognitionResult {
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_blocks")]
    pub blocks: Vec<TextBlock>,
}

impl RecognitionResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            blocks: vec![],
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<TextBlock>) -> Self {
        self.blocks = blocks;
        self
    }

    /// Parse the JSON payload handed over by a native recognizer bridge.
    pub fn from_json(json: &str) -> Result<Self, ScanError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn has_blocks(&self) -> bool {
        !self.blocks.is_empty()
    }
}

/// A structured region reported by the recognizer. Only its presence is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,
    #[serde(default, alias = "frame", deserialize_with = "lenient_frame")]
    pub bounding_box: Option<BoundingBox>,
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bounding_box: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(alias = "left")]
    pub x: f32,
    #[serde(alias = "top")]
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        _ => String::new(),
    })
}

fn lenient_blocks<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<TextBlock>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => TextBlock::new(s),
                other => serde_json::from_value(other).unwrap_or_default(),
            })
            .collect(),
        _ => vec![],
    })
}

fn lenient_frame<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<BoundingBox>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| serde_json::from_value(v).ok()))
}

/// Outcome of one scan attempt.
///
/// Built through [`DetectionResult::new`], which keeps `confidence` at 0 whenever
/// `code` is absent and never above 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub code: Option<ResinCode>,
    pub confidence: u8,
    pub raw_text: String,
    pub method: DetectionMethod,
    pub tip: Option<String>,
}

impl DetectionResult {
    pub fn new(
        code: Option<ResinCode>,
        confidence: u8,
        raw_text: String,
        method: DetectionMethod,
    ) -> Self {
        let confidence = if code.is_some() { confidence.min(100) } else { 0 };
        Self {
            code,
            confidence,
            raw_text,
            method,
            tip: None,
        }
    }

    pub fn with_tip(mut self, tip: Option<String>) -> Self {
        self.tip = tip;
        self
    }

    pub fn is_detected(&self) -> bool {
        self.code.is_some()
    }
}

/// Text recognition capability (ML Kit bridge in the app, mocks in tests).
pub trait TextRecognizer {
    fn recognize(&self, image: &ImageRef) -> Result<RecognitionResult, ScanError>;
}
