// Shared fakes for integration tests
//
// ScriptedService stands in for the remote interview service and records
// every call it receives; TestCaptureDevice hands out an in-memory stream.

#![allow(dead_code)]

use async_trait::async_trait;
use interview_client::capture::{CaptureConstraints, CaptureDevice, CaptureStream, Frame};
use interview_client::error::{CaptureError, Endpoint, TransportError};
use interview_client::service::{AnswerScore, EmotionReading, Report, SessionStart};
use interview_client::{
    CaptureManager, InterviewService, MemoryHandoffStore, SessionConfig, SessionController,
};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub struct ScriptedService {
    pub total_questions: Mutex<Option<usize>>,
    pub fail_questions: AtomicBool,
    pub question_gate: Mutex<Option<Arc<Notify>>>,
    pub answer: Mutex<Option<AnswerScore>>,
    pub answer_gate: Mutex<Option<Arc<Notify>>>,
    pub panic_on_answer: AtomicBool,
    pub emotion: Mutex<Option<EmotionReading>>,
    pub emotion_delay: Mutex<Option<Duration>>,
    pub report: Mutex<Option<Report>>,
    pub finish_gate: Mutex<Option<Arc<Notify>>>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self {
            total_questions: Mutex::new(Some(5)),
            fail_questions: AtomicBool::new(false),
            question_gate: Mutex::new(None),
            answer: Mutex::new(Some(AnswerScore {
                score: 82.0,
                feedback: "Good structure".to_string(),
            })),
            answer_gate: Mutex::new(None),
            panic_on_answer: AtomicBool::new(false),
            emotion: Mutex::new(Some(EmotionReading {
                emotion: Some("happy".to_string()),
                confidence: Some(91.4),
            })),
            emotion_delay: Mutex::new(None),
            report: Mutex::new(Some(sample_report(78.5))),
            finish_gate: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_questions(total: Option<usize>) -> Self {
        let service = Self::new();
        *service.total_questions.lock().unwrap() = total;
        service
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn sample_report(final_score: f64) -> Report {
    serde_json::from_value(json!({
        "scoring": { "final_score": final_score, "technical": 80 },
        "summary": "Solid fundamentals",
        "answers": [1, 2, 3]
    }))
    .unwrap()
}

#[async_trait]
impl InterviewService for ScriptedService {
    async fn start_session(&self, role: &str) -> Result<SessionStart, TransportError> {
        self.record(format!("start:{}", role));
        let total = *self.total_questions.lock().unwrap();
        match total {
            Some(total_questions) => Ok(SessionStart {
                total_questions,
                session_id: None,
            }),
            None => Err(TransportError::Unsuccessful {
                endpoint: Endpoint::StartSession,
            }),
        }
    }

    async fn fetch_question(&self, index: usize) -> Result<String, TransportError> {
        self.record(format!("question:{}", index));

        let gate = self.question_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.fail_questions.load(Ordering::SeqCst) {
            return Err(TransportError::Status {
                endpoint: Endpoint::FetchQuestion,
                status: 500,
            });
        }
        Ok(format!("Question {}", index + 1))
    }

    async fn capture_answer(&self, session_id: &str) -> Result<AnswerScore, TransportError> {
        self.record(format!("answer:{}", session_id));

        let gate = self.answer_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.panic_on_answer.load(Ordering::SeqCst) {
            panic!("capture backend crashed");
        }

        let answer = self.answer.lock().unwrap().clone();
        answer.ok_or(TransportError::Unsuccessful {
            endpoint: Endpoint::CaptureAnswer,
        })
    }

    async fn analyze_emotion(&self, image_data: &str) -> Result<EmotionReading, TransportError> {
        assert!(image_data.starts_with("data:image/jpeg;base64,"));
        self.record("emotion".to_string());

        let delay = *self.emotion_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let reading = self.emotion.lock().unwrap().clone();
        reading.ok_or(TransportError::Unsuccessful {
            endpoint: Endpoint::AnalyzeEmotion,
        })
    }

    async fn finish_session(&self, session_id: &str) -> Result<Report, TransportError> {
        self.record(format!("finish:{}", session_id));

        let gate = self.finish_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let report = self.report.lock().unwrap().clone();
        report.ok_or(TransportError::Unsuccessful {
            endpoint: Endpoint::FinishSession,
        })
    }
}

/// Capture device that always succeeds with an in-memory JPEG stream
pub struct TestCaptureDevice;

#[async_trait]
impl CaptureDevice for TestCaptureDevice {
    async fn acquire(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<Arc<dyn CaptureStream>, CaptureError> {
        Ok(Arc::new(TestStream {
            width: constraints.width,
            height: constraints.height,
            live: AtomicBool::new(true),
        }))
    }

    fn name(&self) -> &str {
        "test"
    }
}

/// Capture device that simulates the user denying camera access
pub struct DeniedCaptureDevice;

#[async_trait]
impl CaptureDevice for DeniedCaptureDevice {
    async fn acquire(
        &self,
        _constraints: &CaptureConstraints,
    ) -> Result<Arc<dyn CaptureStream>, CaptureError> {
        Err(CaptureError::PermissionDenied {
            reason: "NotAllowedError".to_string(),
        })
    }

    fn name(&self) -> &str {
        "denied"
    }
}

pub struct TestStream {
    width: u32,
    height: u32,
    live: AtomicBool,
}

#[async_trait]
impl CaptureStream for TestStream {
    async fn snapshot(&self) -> Result<Frame, CaptureError> {
        Ok(Frame {
            data: vec![0xFF, 0xD8, 0xFF, 0xE0],
            mime_type: "image/jpeg".to_string(),
            width: self.width,
            height: self.height,
        })
    }

    fn release(&self) {
        self.live.store(false, Ordering::SeqCst);
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    fn label(&self) -> &str {
        "test-stream"
    }
}

pub struct Harness {
    pub service: Arc<ScriptedService>,
    pub store: Arc<MemoryHandoffStore>,
    pub capture: Arc<CaptureManager>,
    pub controller: Arc<SessionController>,
}

/// Controller wired to scripted fakes, capture not yet acquired
pub fn harness(service: ScriptedService, role: &str) -> Harness {
    let service = Arc::new(service);
    let store = Arc::new(MemoryHandoffStore::new());
    let capture = Arc::new(CaptureManager::new(CaptureConstraints::default()));

    let config = SessionConfig {
        role: role.to_string(),
        ..SessionConfig::default()
    };

    let controller = Arc::new(SessionController::new(
        config,
        service.clone(),
        Arc::clone(&capture),
        store.clone(),
    ));

    Harness {
        service,
        store,
        capture,
        controller,
    }
}

/// Controller with a live capture stream
pub async fn harness_with_camera(service: ScriptedService, role: &str) -> Harness {
    let h = harness(service, role);
    h.controller.initialize(&TestCaptureDevice).await;
    h
}
