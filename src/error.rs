use std::fmt;
use thiserror::Error;

/// Remote operation a transport error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    StartSession,
    FetchQuestion,
    CaptureAnswer,
    AnalyzeEmotion,
    FinishSession,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::StartSession => "start_interview",
            Endpoint::FetchQuestion => "ask_question",
            Endpoint::CaptureAnswer => "record_answer",
            Endpoint::AnalyzeEmotion => "analyze_emotion",
            Endpoint::FinishSession => "finish_interview",
        };
        f.write_str(name)
    }
}

/// Camera/microphone acquisition failures
///
/// Fatal to recording and emotion sampling for the rest of the session,
/// but never to question navigation.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("camera access denied: {reason}")]
    PermissionDenied { reason: String },

    #[error("no capture device available")]
    NoDevice,

    #[error("capture device error: {reason}")]
    Device { reason: String },
}

impl CaptureError {
    /// Human-readable reason, without the variant prefix
    pub fn reason(&self) -> &str {
        match self {
            CaptureError::PermissionDenied { reason } | CaptureError::Device { reason } => reason,
            CaptureError::NoDevice => "no capture device available",
        }
    }
}

/// Failures talking to the interview service
///
/// Recoverable: the controller turns each one into a status entry and
/// abandons the operation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{endpoint} request failed: {source}")]
    Request {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: Endpoint, status: u16 },

    #[error("{endpoint} reported an unsuccessful result")]
    Unsuccessful { endpoint: Endpoint },

    #[error("start_interview returned no questions")]
    EmptyQuestionSet,
}

impl TransportError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            TransportError::Request { endpoint, .. }
            | TransportError::Status { endpoint, .. }
            | TransportError::Unsuccessful { endpoint } => *endpoint,
            TransportError::EmptyQuestionSet => Endpoint::StartSession,
        }
    }
}
