use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::capture::{CaptureConstraints, CaptureSource};
use crate::session::SessionConfig;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub session: SessionSettings,
    pub capture: CaptureConfig,
    pub sampler: SamplerConfig,
    pub storage: StorageConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionSettings {
    pub role: String,
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CaptureConfig {
    pub width: u32,
    pub height: u32,
    pub audio: bool,
    /// Still image replayed as the camera feed; no camera when unset
    pub frame_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct SamplerConfig {
    pub period_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

impl Config {
    /// Load defaults, then `path` (if present), then `INTERVIEW__*` env vars
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.base_url", "http://127.0.0.1:8000")?
            .set_default("session.role", "Software Engineer")?
            .set_default("session.session_id", "default")?
            .set_default("capture.width", 640)?
            .set_default("capture.height", 480)?
            .set_default("capture.audio", true)?
            .set_default("sampler.period_ms", 2000)?
            .set_default("storage.dir", "data")?
            .set_default("http.bind", "127.0.0.1")?
            .set_default("http.port", 3030)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("INTERVIEW").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            role: self.session.role.clone(),
            session_id: self.session.session_id.clone(),
            sample_period: Duration::from_millis(self.sampler.period_ms),
        }
    }

    pub fn capture_constraints(&self) -> CaptureConstraints {
        CaptureConstraints {
            width: self.capture.width,
            height: self.capture.height,
            audio: self.capture.audio,
        }
    }

    pub fn capture_source(&self) -> CaptureSource {
        match &self.capture.frame_file {
            Some(path) => CaptureSource::File(path.clone()),
            None => CaptureSource::None,
        }
    }
}
