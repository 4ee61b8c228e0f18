// Integration tests for the session controller
//
// The controller runs against a scripted interview service and an
// in-memory capture stream; no rendering surface is involved.

mod common;

use anyhow::Result;
use common::{harness, harness_with_camera, DeniedCaptureDevice, ScriptedService};
use interview_client::session::{ActiveStep, RECORD_LABEL_IDLE};
use interview_client::{HandoffStore, Outcome, Phase, Severity, REPORT_KEY};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::Notify;

fn latest_message(view: &interview_client::SessionView) -> &str {
    view.status.first().map(|e| e.message.as_str()).unwrap_or("")
}

#[tokio::test]
async fn test_camera_initialization_reports_success() {
    let h = harness_with_camera(ScriptedService::new(), "Data Scientist").await;
    let view = h.controller.snapshot();

    assert!(view.video_live);
    assert_eq!(view.status[0].severity, Severity::Success);
    assert_eq!(view.status[0].message, "Camera initialized successfully");
    assert!(h.capture.has_stream());
}

#[tokio::test]
async fn test_camera_denied_reports_danger() {
    let h = harness(ScriptedService::new(), "Data Scientist");
    let outcome = h.controller.initialize(&DeniedCaptureDevice).await;
    let view = h.controller.snapshot();

    assert_eq!(outcome, Outcome::Failed);
    assert!(!view.video_live);
    assert_eq!(view.status[0].severity, Severity::Danger);
    assert!(view.status[0].message.starts_with("Camera access denied"));
    assert!(view.affordances.start, "Session can still be started");
}

#[tokio::test]
async fn test_start_fetches_first_question() {
    let h = harness_with_camera(ScriptedService::new(), "Data Scientist").await;

    assert_eq!(h.controller.start().await, Outcome::Completed);

    let view = h.controller.snapshot();
    assert_eq!(view.total_questions, Some(5));
    assert!(view.active);
    assert_eq!(view.phase, Phase::Active(ActiveStep::AwaitingRecord));
    assert!(!view.affordances.start);
    assert!(view.affordances.record);
    assert!(!view.affordances.next);
    assert_eq!(view.question.as_deref(), Some("Question 1"));
    assert_eq!(view.progress.current, 1);
    assert_eq!(view.progress.percent, 20);
    assert!(h.controller.sampler().is_running());

    assert_eq!(
        h.service.calls(),
        vec!["start:Data Scientist".to_string(), "question:0".to_string()]
    );

    h.controller.dispose();
}

#[tokio::test]
async fn test_start_failure_stays_idle_and_allows_retry() {
    let h = harness_with_camera(ScriptedService::with_questions(None), "Data Scientist").await;

    assert_eq!(h.controller.start().await, Outcome::Failed);

    let view = h.controller.snapshot();
    assert_eq!(view.phase, Phase::Idle);
    assert!(!view.active);
    assert!(view.affordances.start);
    assert!(!view.affordances.record);
    assert_eq!(latest_message(&view), "Failed to start interview");
    assert!(!h.controller.sampler().is_running());
    assert_eq!(h.service.count("question:"), 0);

    *h.service.total_questions.lock().unwrap() = Some(3);
    assert_eq!(h.controller.start().await, Outcome::Completed);
    assert_eq!(h.controller.snapshot().total_questions, Some(3));

    h.controller.dispose();
}

#[tokio::test]
async fn test_start_with_no_questions_is_a_failure() {
    let h = harness_with_camera(ScriptedService::with_questions(Some(0)), "Data Scientist").await;

    assert_eq!(h.controller.start().await, Outcome::Failed);

    let view = h.controller.snapshot();
    assert_eq!(view.phase, Phase::Idle);
    assert!(view.affordances.start);
    assert!(!view.affordances.record);
    assert_eq!(latest_message(&view), "Failed to start interview");
    assert_eq!(view.status[0].severity, Severity::Danger);
    assert!(!h.controller.sampler().is_running());
    assert_eq!(h.service.count("question:"), 0);

    // A later start with a real question set goes through
    *h.service.total_questions.lock().unwrap() = Some(3);
    assert_eq!(h.controller.start().await, Outcome::Completed);
    assert_eq!(
        h.controller.snapshot().phase,
        Phase::Active(ActiveStep::AwaitingRecord)
    );

    h.controller.dispose();
}

#[tokio::test]
async fn test_start_is_ignored_once_active() {
    let h = harness_with_camera(ScriptedService::new(), "Data Scientist").await;
    h.controller.start().await;

    assert_eq!(h.controller.start().await, Outcome::Ignored);
    assert_eq!(h.service.count("start:"), 1);

    h.controller.dispose();
}

#[tokio::test]
async fn test_record_answer_success() {
    let h = harness_with_camera(ScriptedService::new(), "Data Scientist").await;
    h.controller.start().await;

    assert_eq!(h.controller.toggle_record().await, Outcome::Completed);

    let view = h.controller.snapshot();
    assert!(!view.recording);
    assert_eq!(view.record_label, RECORD_LABEL_IDLE);
    assert_eq!(view.phase, Phase::Active(ActiveStep::AwaitingAdvance));
    assert!(view.affordances.next);
    assert!(!view.affordances.record);
    assert_eq!(latest_message(&view), "Answer recorded! Score: 82/100");
    assert_eq!(view.status[0].severity, Severity::Success);

    let feedback = view.feedback.expect("feedback should be shown");
    assert_eq!(feedback.score, 82.0);
    assert_eq!(feedback.feedback, "Good structure");
    assert_eq!(h.service.count("answer:default"), 1);

    h.controller.dispose();
}

#[tokio::test]
async fn test_record_answer_failure_still_allows_advance() {
    let service = ScriptedService::new();
    *service.answer.lock().unwrap() = None;
    let h = harness_with_camera(service, "Data Scientist").await;
    h.controller.start().await;

    assert_eq!(h.controller.toggle_record().await, Outcome::Failed);

    let view = h.controller.snapshot();
    assert!(!view.recording);
    assert!(view.feedback.is_none());
    assert!(view.affordances.next);
    assert_eq!(latest_message(&view), "Failed to record answer");
    assert_eq!(view.status[0].severity, Severity::Danger);

    assert_eq!(h.controller.advance().await, Outcome::Completed);
    assert_eq!(h.controller.snapshot().question_index, 1);

    h.controller.dispose();
}

#[tokio::test]
async fn test_record_toggle_is_not_reentrant() -> Result<()> {
    let service = ScriptedService::new();
    let gate = Arc::new(Notify::new());
    *service.answer_gate.lock().unwrap() = Some(Arc::clone(&gate));
    let h = harness_with_camera(service, "Data Scientist").await;
    h.controller.start().await;

    let controller = Arc::clone(&h.controller);
    let in_flight = tokio::spawn(async move { controller.toggle_record().await });

    for _ in 0..100 {
        if h.controller.snapshot().recording {
            break;
        }
        tokio::task::yield_now().await;
    }

    let view = h.controller.snapshot();
    assert!(view.recording);
    assert!(!view.affordances.record, "Record is disabled while in flight");
    assert!(!view.affordances.next, "Next is disabled while in flight");

    assert_eq!(h.controller.toggle_record().await, Outcome::Ignored);
    assert_eq!(h.controller.advance().await, Outcome::Ignored);

    gate.notify_one();
    assert_eq!(in_flight.await?, Outcome::Completed);
    assert_eq!(h.service.count("answer:"), 1);
    assert!(!h.controller.snapshot().recording);

    h.controller.dispose();
    Ok(())
}

#[tokio::test]
async fn test_answer_resolving_after_end_is_discarded() -> Result<()> {
    let service = ScriptedService::new();
    let gate = Arc::new(Notify::new());
    *service.answer_gate.lock().unwrap() = Some(Arc::clone(&gate));
    let h = harness_with_camera(service, "Data Scientist").await;
    h.controller.start().await;

    let controller = Arc::clone(&h.controller);
    let in_flight = tokio::spawn(async move { controller.toggle_record().await });

    for _ in 0..100 {
        if h.controller.snapshot().recording {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert!(h.controller.snapshot().recording);

    assert_eq!(h.controller.end().await, Outcome::Completed);

    gate.notify_one();
    assert_eq!(in_flight.await?, Outcome::Ignored);

    let view = h.controller.snapshot();
    assert_eq!(view.phase, Phase::Finished);
    assert!(!view.recording);
    assert!(view.feedback.is_none());
    assert_eq!(
        latest_message(&view),
        "Interview ended. Your progress was not saved."
    );
    assert!(!view
        .status
        .iter()
        .any(|e| e.message.starts_with("Answer recorded")));

    Ok(())
}

#[tokio::test]
async fn test_recording_resets_when_capture_panics() {
    let service = ScriptedService::new();
    service.panic_on_answer.store(true, Ordering::SeqCst);
    let h = harness_with_camera(service, "Data Scientist").await;
    h.controller.start().await;

    let controller = Arc::clone(&h.controller);
    let result = tokio::spawn(async move { controller.toggle_record().await }).await;
    assert!(result.is_err(), "Capture task should have panicked");

    let view = h.controller.snapshot();
    assert!(!view.recording);
    assert!(view.affordances.next);

    h.controller.dispose();
}

#[tokio::test]
async fn test_record_without_camera_skips_capture() {
    let h = harness(ScriptedService::new(), "Data Scientist");
    h.controller.initialize(&DeniedCaptureDevice).await;
    h.controller.start().await;

    assert_eq!(h.controller.toggle_record().await, Outcome::Failed);

    let view = h.controller.snapshot();
    assert!(!view.recording);
    assert!(view.affordances.next, "Navigation continues without a camera");
    assert_eq!(view.status[0].severity, Severity::Warning);
    assert_eq!(h.service.count("answer:"), 0);

    h.controller.dispose();
}

#[tokio::test]
async fn test_advance_past_last_question_finishes_once() -> Result<()> {
    let h = harness_with_camera(ScriptedService::new(), "Data Scientist").await;
    h.controller.start().await;

    for expected in 1..5 {
        h.controller.toggle_record().await;
        assert_eq!(h.controller.advance().await, Outcome::Completed);

        let view = h.controller.snapshot();
        assert_eq!(view.question_index, expected);
        assert_eq!(view.question, Some(format!("Question {}", expected + 1)));
        assert!(view.affordances.record);
        assert!(!view.affordances.next);
    }
    assert_eq!(h.controller.snapshot().progress.percent, 100);

    h.controller.toggle_record().await;
    assert_eq!(h.controller.advance().await, Outcome::Completed);

    assert_eq!(h.service.count("finish:"), 1);
    assert_eq!(h.service.count("question:5"), 0);
    assert_eq!(h.service.count("question:"), 5);

    let view = h.controller.snapshot();
    assert_eq!(view.phase, Phase::Finished);
    assert!(!view.active);
    assert!(view.completed);
    assert_eq!(view.final_score, Some(78.5));
    assert_eq!(latest_message(&view), "Interview complete! Final score: 78.5");
    assert!(!h.controller.sampler().is_running());
    assert!(!h.capture.has_stream(), "Camera released after finish");

    // Further presses do nothing
    assert_eq!(h.controller.advance().await, Outcome::Ignored);
    assert_eq!(h.controller.finish().await, Outcome::Ignored);
    assert_eq!(h.service.count("finish:"), 1);

    let stored = h.store.get(REPORT_KEY).await?.expect("report persisted");
    let report: serde_json::Value = serde_json::from_str(&stored)?;
    assert_eq!(report["scoring"]["final_score"], 78.5);
    assert_eq!(report["scoring"]["technical"], 80);
    assert_eq!(report["summary"], "Solid fundamentals");

    Ok(())
}

#[tokio::test]
async fn test_question_fetch_failure_keeps_previous_question() {
    let h = harness_with_camera(ScriptedService::new(), "Data Scientist").await;
    h.controller.start().await;
    h.controller.toggle_record().await;

    h.service.fail_questions.store(true, Ordering::SeqCst);
    h.controller.advance().await;

    let view = h.controller.snapshot();
    assert_eq!(view.question_index, 1);
    assert_eq!(view.question.as_deref(), Some("Question 1"));
    assert_eq!(view.progress.current, 1);
    assert_eq!(latest_message(&view), "Failed to load question");
    assert!(view.affordances.record, "User can still answer");

    h.controller.dispose();
}

#[tokio::test]
async fn test_finish_without_sampler_is_safe() -> Result<()> {
    let h = harness(ScriptedService::new(), "Data Scientist");
    assert!(!h.controller.sampler().is_running());

    assert_eq!(h.controller.finish().await, Outcome::Completed);

    let view = h.controller.snapshot();
    assert_eq!(view.phase, Phase::Finished);
    assert!(!h.controller.sampler().is_running());
    assert!(h.store.get(REPORT_KEY).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_finish_failure_leaves_session_finished_without_report() -> Result<()> {
    let service = ScriptedService::with_questions(Some(1));
    *service.report.lock().unwrap() = None;
    let h = harness_with_camera(service, "Data Scientist").await;
    h.controller.start().await;
    h.controller.toggle_record().await;

    assert_eq!(h.controller.advance().await, Outcome::Failed);

    let view = h.controller.snapshot();
    assert_eq!(view.phase, Phase::Finished);
    assert!(!view.completed);
    assert_eq!(view.final_score, None);
    assert_eq!(latest_message(&view), "Failed to generate report");
    assert!(h.store.get(REPORT_KEY).await?.is_none());
    assert!(!h.controller.sampler().is_running());
    Ok(())
}

#[tokio::test]
async fn test_end_terminates_without_report() {
    let h = harness_with_camera(ScriptedService::new(), "Data Scientist").await;
    h.controller.start().await;

    assert_eq!(h.controller.end().await, Outcome::Completed);

    let view = h.controller.snapshot();
    assert_eq!(view.phase, Phase::Finished);
    assert!(!view.active);
    assert_eq!(view.status[0].severity, Severity::Warning);
    assert_eq!(h.service.count("finish:"), 0);
    assert!(!h.controller.sampler().is_running());
    assert!(!h.capture.has_stream());
    assert_eq!(h.controller.end().await, Outcome::Ignored);
}

#[tokio::test]
async fn test_end_is_ignored_while_report_is_generating() -> Result<()> {
    let service = ScriptedService::with_questions(Some(1));
    let gate = Arc::new(Notify::new());
    *service.finish_gate.lock().unwrap() = Some(Arc::clone(&gate));
    let h = harness_with_camera(service, "Data Scientist").await;
    h.controller.start().await;

    let controller = Arc::clone(&h.controller);
    let finishing = tokio::spawn(async move { controller.finish().await });

    for _ in 0..100 {
        if h.controller.snapshot().phase == Phase::Finishing {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(h.controller.snapshot().phase, Phase::Finishing);

    assert_eq!(h.controller.end().await, Outcome::Ignored);
    assert_eq!(h.controller.snapshot().phase, Phase::Finishing);

    gate.notify_one();
    assert_eq!(finishing.await?, Outcome::Completed);

    let view = h.controller.snapshot();
    assert_eq!(view.phase, Phase::Finished);
    assert!(view.completed);
    assert_eq!(view.final_score, Some(78.5));
    assert!(!view
        .status
        .iter()
        .any(|e| e.message.starts_with("Interview ended")));
    assert!(h.store.get(REPORT_KEY).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_end_during_first_question_fetch_stops_sampler() -> Result<()> {
    let service = ScriptedService::new();
    let gate = Arc::new(Notify::new());
    *service.question_gate.lock().unwrap() = Some(Arc::clone(&gate));
    let h = harness_with_camera(service, "Data Scientist").await;

    let controller = Arc::clone(&h.controller);
    let starting = tokio::spawn(async move { controller.start().await });

    for _ in 0..100 {
        if h.service.count("question:0") == 1 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert!(h.controller.snapshot().active);
    assert!(h.controller.sampler().is_running());

    assert_eq!(h.controller.end().await, Outcome::Completed);
    assert!(!h.controller.sampler().is_running());

    gate.notify_one();
    assert_eq!(starting.await?, Outcome::Completed);

    let view = h.controller.snapshot();
    assert_eq!(view.phase, Phase::Finished);
    assert!(view.question.is_none(), "Stale question is discarded");
    assert!(!h.controller.sampler().is_running());
    Ok(())
}

#[tokio::test]
async fn test_status_feed_stays_bounded_through_a_session() {
    let h = harness_with_camera(ScriptedService::new(), "Data Scientist").await;
    h.controller.start().await;

    for _ in 0..5 {
        h.controller.toggle_record().await;
        h.controller.advance().await;
        assert!(h.controller.snapshot().status.len() <= 4);
    }

    assert_eq!(h.controller.snapshot().status.len(), 4);
}
