use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::config::SessionConfig;
use super::sampler::EmotionSampler;
use super::state::{Advance, Session};
use super::view::{SessionView, ViewState};
use crate::capture::{CaptureDevice, CaptureManager};
use crate::error::TransportError;
use crate::report::{HandoffStore, REPORT_KEY};
use crate::service::InterviewService;
use crate::status::Severity;

/// How a controller operation resolved
///
/// Failures have already been reported to the status feed by the time an
/// operation returns; callers never need to surface them again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Completed,
    Failed,
    /// The triggering control was disabled in the current phase
    Ignored,
}

struct ControllerState {
    session: Session,
    view: ViewState,
}

/// Drives the interview: one session, one capture stream, one sampler
pub struct SessionController {
    state: Arc<Mutex<ControllerState>>,
    service: Arc<dyn InterviewService>,
    capture: Arc<CaptureManager>,
    sampler: EmotionSampler,
    store: Arc<dyn HandoffStore>,
}

impl SessionController {
    pub fn new(
        config: SessionConfig,
        service: Arc<dyn InterviewService>,
        capture: Arc<CaptureManager>,
        store: Arc<dyn HandoffStore>,
    ) -> Self {
        info!("Creating interview session for role: {}", config.role);

        let sampler = EmotionSampler::new(
            config.sample_period,
            Arc::clone(&capture),
            Arc::clone(&service),
        );

        Self {
            state: Arc::new(Mutex::new(ControllerState {
                session: Session::new(config.role, config.session_id),
                view: ViewState::default(),
            })),
            service,
            capture,
            sampler,
            store,
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut ControllerState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Snapshot of the current session and view
    pub fn snapshot(&self) -> SessionView {
        let emotion = self.sampler.display();
        self.with_state(|s| SessionView::capture(&s.session, &s.view, emotion))
    }

    /// Add an entry to the status feed
    pub fn report(&self, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        self.with_state(|s| s.view.status.report(message, severity));
    }

    /// Dismiss a status entry by id
    pub fn dismiss_status(&self, id: Uuid) -> bool {
        self.with_state(|s| s.view.status.dismiss(id))
    }

    pub fn sampler(&self) -> &EmotionSampler {
        &self.sampler
    }

    pub fn capture(&self) -> &CaptureManager {
        &self.capture
    }

    /// Acquire the capture stream (once, at page load)
    ///
    /// Failure leaves the session usable; recording and sampling degrade to
    /// no-ops.
    pub async fn initialize(&self, device: &dyn CaptureDevice) -> Outcome {
        match self.capture.acquire(device).await {
            Ok(_) => {
                self.with_state(|s| {
                    s.view.video_live = true;
                    s.view
                        .status
                        .report("Camera initialized successfully", Severity::Success);
                });
                Outcome::Completed
            }
            Err(e) => {
                error!("Camera setup error: {}", e);
                self.report(
                    "Camera access denied. Please enable camera permissions.",
                    Severity::Danger,
                );
                Outcome::Failed
            }
        }
    }

    /// Idle -> Starting -> Active(0)
    pub async fn start(&self) -> Outcome {
        let role = self.with_state(|s| {
            if !s.session.begin_start() {
                return None;
            }
            s.view.status.report("Initializing interview...", Severity::Info);
            Some(s.session.role().to_string())
        });
        let Some(role) = role else {
            return Outcome::Ignored;
        };

        info!("Starting interview: {}", role);

        let started = self
            .service
            .start_session(&role)
            .await
            .and_then(|start| match start.total_questions {
                0 => Err(TransportError::EmptyQuestionSet),
                _ => Ok(start),
            });

        match started {
            Ok(start) => {
                let total_questions = start.total_questions;
                let activated = self.with_state(|s| {
                    if !s.session.activate(total_questions, start.session_id) {
                        return false;
                    }
                    s.view.progress.total = total_questions;
                    s.view
                        .status
                        .report("Interview started successfully!", Severity::Success);
                    // Must be running before the lock is released
                    self.sampler.start();
                    true
                });
                if !activated {
                    warn!("Session left Starting before the start response arrived");
                    return Outcome::Ignored;
                }

                info!("Interview started with {} questions", total_questions);

                self.fetch_question(0).await;
                Outcome::Completed
            }
            Err(e) => {
                error!("Failed to start interview: {}", e);
                self.with_state(|s| {
                    s.session.abort_start();
                    s.view
                        .status
                        .report("Failed to start interview", Severity::Danger);
                });
                Outcome::Failed
            }
        }
    }

    /// Load and display question `index`
    ///
    /// On failure the previously displayed question stays up. A response
    /// for an index the session has already moved past is discarded.
    pub async fn fetch_question(&self, index: usize) -> Outcome {
        self.report("Loading question...", Severity::Info);

        match self.service.fetch_question(index).await {
            Ok(question) => self.with_state(|s| {
                if !s.session.is_active() || s.session.question_index() != index {
                    warn!("Discarding stale question {}", index);
                    return Outcome::Ignored;
                }
                let total = s.session.total_questions().unwrap_or_default();
                s.view.question = Some(question);
                s.view.progress.update(index, total);
                s.view.status.report(
                    "Question ready. Click record to answer.",
                    Severity::Info,
                );
                Outcome::Completed
            }),
            Err(e) => {
                error!("Failed to load question {}: {}", index, e);
                self.report("Failed to load question", Severity::Danger);
                Outcome::Failed
            }
        }
    }

    /// AwaitingRecord -> Recording -> AwaitingAdvance
    ///
    /// Only one capture request is in flight at a time: the record control
    /// stays disabled until it resolves. Whatever the result, the session
    /// always ends up not recording with the next control enabled.
    pub async fn toggle_record(&self) -> Outcome {
        let stream = self.capture.stream();

        let session_id = self.with_state(|s| {
            if stream.is_none() {
                if s.session.skip_recording() {
                    s.view.status.report(
                        "No camera stream. Answer not recorded.",
                        Severity::Warning,
                    );
                    return Err(Outcome::Failed);
                }
                return Err(Outcome::Ignored);
            }
            if !s.session.begin_recording() {
                return Err(Outcome::Ignored);
            }
            s.view
                .status
                .report("Recording your answer...", Severity::Warning);
            Ok(s.session.session_id().to_string())
        });
        let session_id = match session_id {
            Ok(id) => id,
            Err(outcome) => return outcome,
        };

        info!("Recording answer for question {}", self.question_index());

        let _recording = RecordingGuard {
            state: Arc::clone(&self.state),
        };
        let _stream = stream;

        match self.service.capture_answer(&session_id).await {
            Ok(answer) => self.with_state(|s| {
                if !s.session.is_active() {
                    warn!("Discarding answer that resolved after the session ended");
                    return Outcome::Ignored;
                }
                info!("Answer recorded with score {}", answer.score);
                s.view.status.report(
                    format!("Answer recorded! Score: {}/100", answer.score),
                    Severity::Success,
                );
                s.view.feedback = Some(answer);
                Outcome::Completed
            }),
            Err(e) => {
                error!("Failed to record answer: {}", e);
                let message = match e {
                    TransportError::Unsuccessful { .. } => "Failed to record answer",
                    _ => "Recording failed",
                };
                self.with_state(|s| {
                    if !s.session.is_active() {
                        return Outcome::Ignored;
                    }
                    s.view.status.report(message, Severity::Danger);
                    Outcome::Failed
                })
            }
        }
    }

    /// Move to the next question, or finish after the last one
    pub async fn advance(&self) -> Outcome {
        let step = self.with_state(|s| s.session.advance());

        match step {
            Some(Advance::Question(index)) => {
                info!("Advancing to question {}", index);
                self.fetch_question(index).await;
                Outcome::Completed
            }
            Some(Advance::Finish) => self.complete().await,
            None => Outcome::Ignored,
        }
    }

    /// End the session and hand the final report off
    pub async fn finish(&self) -> Outcome {
        if !self.with_state(|s| s.session.begin_finish()) {
            return Outcome::Ignored;
        }
        self.complete().await
    }

    /// Forced termination; no report is requested
    pub async fn end(&self) -> Outcome {
        let terminated = self.with_state(|s| {
            if !s.session.terminate() {
                return false;
            }
            s.view.status.report(
                "Interview ended. Your progress was not saved.",
                Severity::Warning,
            );
            true
        });
        if !terminated {
            return Outcome::Ignored;
        }

        info!("Interview ended by user");
        self.sampler.stop();
        self.capture.release();
        Outcome::Completed
    }

    /// Page teardown: stop sampling and release the camera (idempotent)
    pub fn dispose(&self) {
        self.sampler.stop();
        self.capture.release();
    }

    fn question_index(&self) -> usize {
        self.with_state(|s| s.session.question_index())
    }

    /// Finishing -> Finished
    async fn complete(&self) -> Outcome {
        let session_id = self.with_state(|s| {
            s.view
                .status
                .report("Generating final report...", Severity::Info);
            s.session.session_id().to_string()
        });

        self.sampler.stop();

        let outcome = match self.service.finish_session(&session_id).await {
            Ok(report) => {
                let final_score = report.final_score();
                info!("Interview complete, final score {}", final_score);

                let stored = match serde_json::to_string(&report) {
                    Ok(json) => self.store.put(REPORT_KEY, json).await,
                    Err(e) => Err(e.into()),
                };

                self.with_state(|s| {
                    s.session.complete_finish();
                    s.view.final_score = Some(final_score);
                    s.view.completed = true;
                    s.view.status.report(
                        format!("Interview complete! Final score: {}", final_score),
                        Severity::Success,
                    );
                    if let Err(e) = &stored {
                        error!("Failed to store report: {:#}", e);
                        s.view.status.report(
                            "Report could not be saved for viewing",
                            Severity::Warning,
                        );
                    }
                });
                Outcome::Completed
            }
            Err(e) => {
                error!("Failed to generate report: {}", e);
                self.with_state(|s| {
                    s.session.complete_finish();
                    s.view
                        .status
                        .report("Failed to generate report", Severity::Danger);
                });
                Outcome::Failed
            }
        };

        self.capture.release();
        outcome
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Clears the recording flag when the capture request resolves, fails,
/// panics or is dropped mid-flight.
struct RecordingGuard {
    state: Arc<Mutex<ControllerState>>,
}

impl Drop for RecordingGuard {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.session.end_recording();
    }
}
