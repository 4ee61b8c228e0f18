use serde::Serialize;

use crate::service::EmotionReading;

/// Color used for labels missing from the table
pub const DEFAULT_EMOTION_COLOR: &str = "#6c757d";

const EMOTION_COLORS: &[(&str, &str)] = &[
    ("happy", "#28a745"),
    ("neutral", "#007bff"),
    ("sad", "#dc3545"),
    ("angry", "#dc3545"),
    ("fear", "#ffc107"),
    ("surprise", "#6f42c1"),
    ("disgust", "#fd7e14"),
];

/// Display color for an emotion label
pub fn color_for(label: &str) -> &'static str {
    EMOTION_COLORS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_EMOTION_COLOR)
}

/// One inference result; never persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionSample {
    pub label: String,
    pub confidence: f64,
}

impl From<EmotionReading> for EmotionSample {
    fn from(reading: EmotionReading) -> Self {
        Self {
            label: reading.emotion.unwrap_or_else(|| "Unknown".to_string()),
            confidence: reading.confidence.unwrap_or(0.0),
        }
    }
}

/// What the emotion overlay currently shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmotionDisplay {
    pub label: String,
    /// Confidence rounded to a whole percent
    pub confidence: u32,
    pub color: String,
}

impl From<&EmotionSample> for EmotionDisplay {
    fn from(sample: &EmotionSample) -> Self {
        Self {
            label: sample.label.clone(),
            confidence: sample.confidence.round().max(0.0) as u32,
            color: color_for(&sample.label).to_string(),
        }
    }
}
