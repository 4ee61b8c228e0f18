use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct StartRequest {
    pub user_role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub questions: Vec<Value>,
    /// Present when the service allocates its own session id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmotionRequest {
    /// Still frame as a `data:image/...;base64,` URL
    pub image: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmotionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub emotion: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FinishRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FinishResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub report: Option<Report>,
}

/// Responses carrying the service's `success` flag
pub trait ServiceReply {
    fn success(&self) -> bool;
}

macro_rules! impl_service_reply {
    ($($ty:ty),*) => {
        $(impl ServiceReply for $ty {
            fn success(&self) -> bool {
                self.success
            }
        })*
    };
}

impl_service_reply!(
    StartResponse,
    QuestionResponse,
    AnswerResponse,
    EmotionResponse,
    FinishResponse
);

// ============================================================================
// Domain Types
// ============================================================================

/// Result of a successful start request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStart {
    pub total_questions: usize,
    pub session_id: Option<String>,
}

/// Score and feedback for a recorded answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerScore {
    pub score: f64,
    pub feedback: String,
}

/// Raw emotion inference result
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionReading {
    pub emotion: Option<String>,
    pub confidence: Option<f64>,
}

/// Final session report
///
/// Only the scoring summary is interpreted; every other field is kept as-is
/// so the persisted copy matches what the service produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub scoring: Scoring,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoring {
    pub final_score: f64,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Report {
    pub fn final_score(&self) -> f64 {
        self.scoring.final_score
    }
}
