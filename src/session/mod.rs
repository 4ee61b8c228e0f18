//! Interview session management
//!
//! This module provides the `SessionController` state machine that manages:
//! - Session lifecycle (start, per-question record/advance, finish)
//! - Remote calls to the interview service
//! - Periodic emotion sampling from the capture stream
//! - The view model (affordances, progress, status feed) kept consistent with state

mod config;
mod controller;
mod emotion;
mod sampler;
mod state;
mod view;

pub use config::SessionConfig;
pub use controller::{Outcome, SessionController};
pub use emotion::{color_for, EmotionDisplay, EmotionSample, DEFAULT_EMOTION_COLOR};
pub use sampler::EmotionSampler;
pub use state::{ActiveStep, Advance, Affordances, Phase, Session};
pub use view::{SessionView, RECORD_LABEL_IDLE, RECORD_LABEL_RECORDING};
