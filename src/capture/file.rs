use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

use super::backend::{CaptureConstraints, CaptureDevice, CaptureStream, Frame};
use crate::error::CaptureError;

/// Capture device backed by a still image on disk
///
/// Every snapshot returns the same image. Useful for headless runs where
/// no camera exists but emotion sampling should still exercise the service.
pub struct FileCaptureDevice {
    path: PathBuf,
}

impl FileCaptureDevice {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn mime_type(path: &Path) -> &'static str {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            _ => "image/jpeg",
        }
    }
}

#[async_trait]
impl CaptureDevice for FileCaptureDevice {
    async fn acquire(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<Arc<dyn CaptureStream>, CaptureError> {
        info!("Opening frame file: {}", self.path.display());

        let data = tokio::fs::read(&self.path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => CaptureError::NoDevice,
            ErrorKind::PermissionDenied => CaptureError::PermissionDenied {
                reason: e.to_string(),
            },
            _ => CaptureError::Device {
                reason: e.to_string(),
            },
        })?;

        if data.is_empty() {
            return Err(CaptureError::Device {
                reason: format!("{} is empty", self.path.display()),
            });
        }

        Ok(Arc::new(FileStream {
            label: self.path.display().to_string(),
            frame: Frame {
                data,
                mime_type: Self::mime_type(&self.path).to_string(),
                width: constraints.width,
                height: constraints.height,
            },
            live: AtomicBool::new(true),
        }))
    }

    fn name(&self) -> &str {
        "file"
    }
}

struct FileStream {
    label: String,
    frame: Frame,
    live: AtomicBool,
}

#[async_trait]
impl CaptureStream for FileStream {
    async fn snapshot(&self) -> Result<Frame, CaptureError> {
        if !self.is_live() {
            return Err(CaptureError::Device {
                reason: "stream released".to_string(),
            });
        }
        Ok(self.frame.clone())
    }

    fn release(&self) {
        self.live.store(false, Ordering::SeqCst);
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    fn label(&self) -> &str {
        &self.label
    }
}
