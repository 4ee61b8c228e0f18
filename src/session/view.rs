use serde::Serialize;

use super::emotion::EmotionDisplay;
use super::state::{Affordances, Phase, Session};
use crate::service::AnswerScore;
use crate::status::{Progress, StatusEntry, StatusFeed};

pub const RECORD_LABEL_IDLE: &str = "Click to Answer";
pub const RECORD_LABEL_RECORDING: &str = "Recording... (3s silence to finish)";

/// Mutable page state owned by the controller
#[derive(Debug, Default)]
pub(crate) struct ViewState {
    pub question: Option<String>,
    pub progress: Progress,
    pub feedback: Option<AnswerScore>,
    pub final_score: Option<f64>,
    pub completed: bool,
    pub video_live: bool,
    pub status: StatusFeed,
}

/// Point-in-time snapshot of everything a front end renders
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    #[serde(flatten)]
    pub phase: Phase,
    pub role: String,
    pub question_index: usize,
    pub total_questions: Option<usize>,
    pub active: bool,
    pub recording: bool,
    pub question: Option<String>,
    pub progress: Progress,
    pub record_label: &'static str,
    pub affordances: Affordances,
    pub feedback: Option<AnswerScore>,
    pub final_score: Option<f64>,
    pub completed: bool,
    pub video_live: bool,
    /// `None` until the first successful emotion sample
    pub emotion: Option<EmotionDisplay>,
    pub status: Vec<StatusEntry>,
}

impl SessionView {
    pub(crate) fn capture(
        session: &Session,
        view: &ViewState,
        emotion: Option<EmotionDisplay>,
    ) -> Self {
        Self {
            phase: session.phase(),
            role: session.role().to_string(),
            question_index: session.question_index(),
            total_questions: session.total_questions(),
            active: session.is_active(),
            recording: session.is_recording(),
            question: view.question.clone(),
            progress: view.progress,
            record_label: if session.is_recording() {
                RECORD_LABEL_RECORDING
            } else {
                RECORD_LABEL_IDLE
            },
            affordances: session.affordances(),
            feedback: view.feedback.clone(),
            final_score: view.final_score,
            completed: view.completed,
            video_live: view.video_live,
            emotion,
            status: view.status.entries(),
        }
    }
}
