//! Interview service boundary
//!
//! Question selection, answer scoring, emotion inference and report
//! generation all happen remotely. This module holds the request/response
//! contract and the HTTP client that speaks it.

pub mod client;
pub mod messages;

pub use client::{HttpInterviewService, InterviewService};
pub use messages::{AnswerScore, EmotionReading, Report, Scoring, SessionStart};
