use async_trait::async_trait;
use base64::Engine;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::CaptureError;

/// Still frame captured from the live stream
#[derive(Debug, Clone)]
pub struct Frame {
    /// Encoded image bytes
    pub data: Vec<u8>,
    /// MIME type of `data` (e.g. "image/jpeg")
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    /// Encode the frame as a `data:` URL, the form the inference endpoint expects
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.data)
        )
    }
}

/// Requested stream parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConstraints {
    /// Target video width in pixels
    pub width: u32,
    /// Target video height in pixels
    pub height: u32,
    /// Whether the microphone is requested alongside the camera
    pub audio: bool,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            audio: true,
        }
    }
}

/// Live audio/video handle
///
/// Shared read-only by the answer-capture flow and the emotion sampler;
/// both hold an `Arc` only for the duration of a single call.
#[async_trait]
pub trait CaptureStream: Send + Sync {
    /// Snapshot a still frame from the video track
    async fn snapshot(&self) -> Result<Frame, CaptureError>;

    /// Release the underlying device (idempotent)
    fn release(&self);

    /// Whether the stream has not been released yet
    fn is_live(&self) -> bool;

    /// Stream label for logging
    fn label(&self) -> &str;
}

/// Camera/microphone provider
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Request a stream matching `constraints`
    async fn acquire(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<Arc<dyn CaptureStream>, CaptureError>;

    /// Device name for logging
    fn name(&self) -> &str;
}

/// Where captured frames come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureSource {
    /// No device attached (session runs degraded)
    None,
    /// Replay a still image file as the live video frame
    File(PathBuf),
}

/// Capture device factory
pub struct CaptureDeviceFactory;

impl CaptureDeviceFactory {
    pub fn create(source: CaptureSource) -> Box<dyn CaptureDevice> {
        match source {
            CaptureSource::None => Box::new(NoCaptureDevice),
            CaptureSource::File(path) => Box::new(super::file::FileCaptureDevice::new(path)),
        }
    }
}

/// Device that is never present
pub struct NoCaptureDevice;

#[async_trait]
impl CaptureDevice for NoCaptureDevice {
    async fn acquire(
        &self,
        _constraints: &CaptureConstraints,
    ) -> Result<Arc<dyn CaptureStream>, CaptureError> {
        Err(CaptureError::NoDevice)
    }

    fn name(&self) -> &str {
        "none"
    }
}
